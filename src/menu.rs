use anyhow::Result;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::catalog::{Catalog, CatalogError, SearchAlgorithm, SortAlgorithm};
use crate::display::{playlists_report, songs_table};
use crate::engine::{AttributeKey, Sort};
use crate::models::{NewSong, TrackLength};
use crate::store::CatalogStore;

/// Interactive console loop over a catalog
pub struct Menu<'a, R: BufRead> {
    catalog: Catalog,
    store: &'a dyn CatalogStore,
    input: R,
    quiet: bool,
}

impl<'a, R: BufRead> Menu<'a, R> {
    pub fn new(catalog: Catalog, store: &'a dyn CatalogStore, input: R, quiet: bool) -> Self {
        Self {
            catalog,
            store,
            input,
            quiet,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run until "Save and Exit" or end of input, then flush to the store.
    pub fn run(&mut self) -> Result<()> {
        loop {
            println!("\n--- Music Catalog ---");
            println!("1. Add New Song");
            println!("2. Create Playlist");
            println!("3. Add Song to Playlist");
            println!("4. Search Songs");
            println!("5. Sort Songs");
            println!("6. Display All Songs");
            println!("7. Display Playlists");
            println!("8. Save and Exit");

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_song()?,
                "2" => self.create_playlist()?,
                "3" => self.add_song_to_playlist()?,
                "4" => self.search_songs()?,
                "5" => self.sort_songs()?,
                "6" => self.display_all_songs(),
                "7" => println!("{}", playlists_report(&self.catalog)),
                "8" => break,
                _ => println!("Invalid choice. Please select a valid option."),
            }
        }

        self.catalog.save(self.store)?;
        println!("Data saved. Exiting the music catalog.");
        Ok(())
    }

    /// Read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn progress(&self, total: usize, desc: &'static str, unit: &'static str) -> Option<kdam::Bar> {
        if self.quiet {
            None
        } else {
            Some(kdam::tqdm!(total = total, desc = desc, unit = unit))
        }
    }

    fn add_song(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the song name: ")? else {
            return Ok(());
        };
        let Some(artist) = self.prompt("Enter the artist name: ")? else {
            return Ok(());
        };
        let Some(album) = self.prompt("Enter the album name: ")? else {
            return Ok(());
        };

        // New songs follow the shape of the songs already in the catalog
        let template = self.catalog.songs().first();
        let wants_genre = template.is_some_and(|song| song.views.is_none());
        let wants_millis = template.is_some_and(|song| matches!(song.length, TrackLength::Millis(_)));

        let (genre, views) = if wants_genre {
            let Some(genre) = self.prompt("Enter the genre: ")? else {
                return Ok(());
            };
            (Some(genre), None)
        } else {
            let Some(raw) = self.prompt("Enter the number of views: ")? else {
                return Ok(());
            };
            match raw.parse::<u64>() {
                Ok(views) => (None, Some(views)),
                Err(_) => {
                    println!("'{raw}' is not a valid number of views. Song not added.");
                    return Ok(());
                }
            }
        };

        let length = if wants_millis {
            let Some(raw) = self.prompt("Enter the duration in milliseconds: ")? else {
                return Ok(());
            };
            match raw.parse::<u64>() {
                Ok(ms) => TrackLength::Millis(ms),
                Err(_) => {
                    println!("'{raw}' is not a valid duration. Song not added.");
                    return Ok(());
                }
            }
        } else {
            let Some(raw) = self.prompt("Enter the duration in minutes: ")? else {
                return Ok(());
            };
            match raw.parse::<f64>() {
                Ok(minutes) if minutes.is_finite() && minutes >= 0.0 => TrackLength::Minutes(minutes),
                _ => {
                    println!("'{raw}' is not a valid duration. Song not added.");
                    return Ok(());
                }
            }
        };

        match self.catalog.add_song(NewSong {
            name,
            artist,
            album,
            genre,
            views,
            length,
        }) {
            Ok(song) => println!("Added {song}"),
            Err(e) => println!("{e}. Song not added."),
        }
        Ok(())
    }

    fn create_playlist(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the playlist name: ")? else {
            return Ok(());
        };
        let playlist = self.catalog.create_playlist(&name);
        println!("Created playlist: {}", playlist.name);
        Ok(())
    }

    fn add_song_to_playlist(&mut self) -> Result<()> {
        let Some(playlist_name) = self.prompt("Enter the name of the playlist: ")? else {
            return Ok(());
        };
        let Some(song_name) = self.prompt("Enter the song name: ")? else {
            return Ok(());
        };

        let Some(song_id) = self.catalog.find_song_by_name(&song_name).map(|song| song.id) else {
            println!("{}.", CatalogError::SongNotFound(song_name));
            return Ok(());
        };

        match self.catalog.add_to_playlist(&playlist_name, song_id) {
            Ok(()) => println!("Added {song_name} to playlist {playlist_name}."),
            Err(e) => println!("{e}."),
        }
        Ok(())
    }

    fn choose_attribute(&mut self) -> Result<Option<AttributeKey>> {
        println!("\nChoose attribute:");
        for (i, key) in AttributeKey::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, capitalize(key.as_str()));
        }
        let Some(choice) = self.prompt("Enter your choice (number or name): ")? else {
            return Ok(None);
        };

        match parse_attribute(&choice) {
            Ok(key) => Ok(Some(key)),
            Err(e) => {
                warn!("{e}");
                Ok(None)
            }
        }
    }

    fn search_songs(&mut self) -> Result<()> {
        println!("\nChoose search algorithm:");
        for (i, algorithm) in SearchAlgorithm::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, algorithm);
        }
        let Some(choice) = self.prompt("Enter your choice (1/2/3): ")? else {
            return Ok(());
        };
        let algorithm = match choice.parse::<SearchAlgorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                warn!("{e}");
                println!("Invalid choice. Search cancelled.");
                return Ok(());
            }
        };

        let Some(key) = self.choose_attribute()? else {
            println!("Invalid choice. Search cancelled.");
            return Ok(());
        };
        let Some(term) = self.prompt(&format!("Enter your search term for {key}: "))? else {
            return Ok(());
        };

        let total = self.catalog.len();
        let mut progress = match algorithm {
            SearchAlgorithm::Linear => self.progress(total, "Linear Searching", "song"),
            SearchAlgorithm::Probe => self.progress(total, "LCG Searching", "attempt"),
            SearchAlgorithm::HashIndex => None,
        };

        let started = Instant::now();
        match self.catalog.search(&term, key, algorithm, &mut progress) {
            Ok(results) => {
                let elapsed = started.elapsed();
                if progress.is_some() {
                    eprintln!();
                }
                println!("\nSearch Results ({} found):", results.len());
                println!("{}", songs_table(results));
                println!("\n{algorithm} completed in {:.6} seconds.", elapsed.as_secs_f64());
                info!("{algorithm} on {key} took {elapsed:?}");
            }
            Err(e) => println!("{e}. Search cancelled."),
        }
        Ok(())
    }

    fn sort_songs(&mut self) -> Result<()> {
        println!("\nChoose sort algorithm:");
        for (i, algorithm) in SortAlgorithm::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, algorithm);
        }
        let Some(choice) = self.prompt("Enter your choice (1/2/3): ")? else {
            return Ok(());
        };
        let algorithm = match choice.parse::<SortAlgorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                warn!("{e}");
                println!("Invalid choice. Sort cancelled.");
                return Ok(());
            }
        };

        let Some(key) = self.choose_attribute()? else {
            println!("Invalid choice. Sort cancelled.");
            return Ok(());
        };

        let n = self.catalog.len();
        let mut progress = match algorithm {
            SortAlgorithm::Reference => self.progress(n, "Sorting", "song"),
            SortAlgorithm::Partition => self.progress(n, "Quicksorting", "song"),
            SortAlgorithm::Pairwise => {
                self.progress(Sort::pairwise_comparisons(n), "Slowsorting", "comparison")
            }
        };

        let started = Instant::now();
        match self.catalog.sort(key, algorithm, &mut progress) {
            Ok(songs) => {
                let elapsed = started.elapsed();
                if progress.is_some() {
                    eprintln!();
                }
                println!("\nSorted Songs:");
                println!("{}", songs_table(songs));
                println!("\n{algorithm} completed in {:.6} seconds.", elapsed.as_secs_f64());
                info!("{algorithm} on {key} took {elapsed:?}");
            }
            Err(e) => println!("{e}. Sort cancelled."),
        }
        Ok(())
    }

    fn display_all_songs(&self) {
        println!("{}", songs_table(self.catalog.songs()));
    }
}

/// Accept a menu number (1-based) or an attribute name.
pub fn parse_attribute(choice: &str) -> Result<AttributeKey, CatalogError> {
    match choice.trim().parse::<usize>() {
        Ok(n) if (1..=AttributeKey::ALL.len()).contains(&n) => Ok(AttributeKey::ALL[n - 1]),
        Ok(_) => Err(CatalogError::InvalidAttribute(choice.trim().to_string())),
        Err(_) => choice.parse(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogFile, SongRecord};
    use crate::store::MockCatalogStore;
    use std::io::Cursor;

    fn beatles_file() -> CatalogFile {
        let record = |id: u32, track: &str, minutes: f64| SongRecord {
            id: Some(i64::from(id)),
            track: track.to_string(),
            artist: "The Beatles".to_string(),
            album: "Various".to_string(),
            genre: None,
            views: Some(100 * id as u64),
            duration_min: Some(minutes),
            duration_ms: None,
        };
        CatalogFile {
            songs: vec![
                record(1, "Yesterday", 2.05),
                record(2, "Help", 2.33),
                record(3, "Hey Jude", 7.11),
            ],
            playlists: vec![],
        }
    }

    fn saving_store() -> MockCatalogStore {
        let mut store = MockCatalogStore::new();
        store.expect_save().times(1).returning(|_| Ok(()));
        store
    }

    fn run_menu(store: &MockCatalogStore, script: &str) -> Catalog {
        let catalog = Catalog::from_file(beatles_file()).unwrap();
        let mut menu = Menu::new(catalog, store, Cursor::new(script.to_string()), true);
        menu.run().unwrap();
        menu.catalog
    }

    #[test]
    fn test_parse_attribute_by_number_or_name() {
        assert_eq!(parse_attribute("1"), Ok(AttributeKey::Name));
        assert_eq!(parse_attribute("6"), Ok(AttributeKey::Duration));
        assert_eq!(parse_attribute("views"), Ok(AttributeKey::Views));
        assert!(parse_attribute("0").is_err());
        assert!(parse_attribute("7").is_err());
        assert!(parse_attribute("tempo").is_err());
    }

    #[test]
    fn test_sort_by_duration_then_exit() {
        let store = saving_store();
        let catalog = run_menu(&store, "5\n2\nduration\n8\n");

        let names: Vec<&str> = catalog.songs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Yesterday", "Help", "Hey Jude"]);
    }

    #[test]
    fn test_add_song_and_playlist() {
        let store = saving_store();
        let script = "1\nLet It Be\nThe Beatles\nLet It Be\n5000\n4.05\n\
                      2\nFavourites\n\
                      3\nFavourites\nLet It Be\n\
                      8\n";
        let catalog = run_menu(&store, script);

        let added = catalog.find_song_by_name("Let It Be").unwrap();
        assert_eq!(added.id, 4);
        assert_eq!(added.views, Some(5000));
        assert_eq!(catalog.playlists()[0].song_ids, vec![4]);
    }

    #[test]
    fn test_invalid_input_leaves_catalog_unchanged() {
        let store = saving_store();
        let script = "9\n5\n7\n4\n1\nbogus\n1\nnot-a-number\n1\nx\ny\nz\nlots\n";
        let catalog = run_menu(&store, script);

        assert_eq!(catalog.len(), 3);
        let ids: Vec<u32> = catalog.songs().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_end_of_input_saves() {
        let store = saving_store();
        let catalog = run_menu(&store, "");
        assert_eq!(catalog.len(), 3);
    }
}
