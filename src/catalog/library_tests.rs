use crate::catalog::*;
use crate::engine::{AttributeKey, ProbeCoverage, ProbeSettings, TickCounter};
use crate::models::{NewSong, Playlist, Song, TrackLength};

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_song(id: u32, name: &str, artist: &str, views: u64, minutes: f64) -> Song {
        Song {
            id,
            name: name.to_string(),
            artist: artist.to_string(),
            album: "Singles".to_string(),
            genre: None,
            views: Some(views),
            length: TrackLength::Minutes(minutes),
        }
    }

    fn create_test_catalog() -> Catalog {
        let songs = vec![
            create_test_song(1, "Yesterday", "The Beatles", 1200, 2.05),
            create_test_song(2, "Help", "The Beatles", 3400, 2.33),
            create_test_song(3, "Hey Jude", "The Beatles", 5600, 7.11),
            create_test_song(4, "Hey Ya!", "OutKast", 9100, 3.9),
            create_test_song(5, "Jolene", "Dolly Parton", 2200, 2.6),
        ];
        let playlists = vec![Playlist {
            name: "Beatles".to_string(),
            song_ids: vec![3, 1],
        }];
        Catalog::from_parts(songs, playlists).unwrap()
    }

    fn new_song(name: &str, views: u64) -> NewSong {
        NewSong {
            name: name.to_string(),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            genre: None,
            views: Some(views),
            length: TrackLength::Minutes(3.5),
        }
    }

    fn names(songs: &[&Song]) -> Vec<String> {
        songs.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_search_dispatches_to_each_algorithm() {
        let mut catalog = create_test_catalog();
        catalog.set_probe(ProbeSettings {
            seed: Some(2),
            coverage: ProbeCoverage::Exhaustive,
        });

        let linear = catalog
            .search("hey", AttributeKey::Name, SearchAlgorithm::Linear, &mut ())
            .unwrap();
        assert_eq!(names(&linear), vec!["Hey Jude", "Hey Ya!"]);

        let hashed = catalog
            .search("hey", AttributeKey::Name, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        assert!(hashed.is_empty());

        let hashed = catalog
            .search("hey jude", AttributeKey::Name, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        assert_eq!(names(&hashed), vec!["Hey Jude"]);

        let mut probed = names(
            &catalog
                .search("hey", AttributeKey::Name, SearchAlgorithm::Probe, &mut ())
                .unwrap(),
        );
        probed.sort();
        assert_eq!(probed, vec!["Hey Jude", "Hey Ya!"]);
    }

    #[test]
    fn test_probe_search_with_fixed_seed_repeats() {
        let mut catalog = create_test_catalog();
        catalog.set_probe(ProbeSettings {
            seed: Some(3),
            coverage: ProbeCoverage::Capped,
        });

        let first = names(&catalog.search("e", AttributeKey::Name, SearchAlgorithm::Probe, &mut ()).unwrap());
        let second = names(&catalog.search("e", AttributeKey::Name, SearchAlgorithm::Probe, &mut ()).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_index_lifecycle() {
        let mut catalog = create_test_catalog();
        assert!(!catalog.has_index());

        catalog
            .search("help", AttributeKey::Name, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        assert!(catalog.has_index());

        // Adding a song drops the index, so the next lookup sees the new song
        catalog.add_song(new_song("Help", 10)).unwrap();
        assert!(!catalog.has_index());
        let hashed = catalog
            .search("help", AttributeKey::Name, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        let ids: Vec<u32> = hashed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 6]);

        // Sorting moves songs, positions in the index would be stale
        catalog
            .sort(AttributeKey::Views, SortAlgorithm::Reference, &mut ())
            .unwrap();
        assert!(!catalog.has_index());
        let hashed = catalog
            .search("help", AttributeKey::Name, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        let ids: Vec<u32> = hashed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![6, 2]);

        catalog.invalidate_index();
        assert!(!catalog.has_index());
        catalog.rebuild_index();
        assert!(catalog.has_index());
    }

    #[test]
    fn test_hash_search_on_numeric_attribute() {
        let mut catalog = create_test_catalog();
        let hashed = catalog
            .search("2.33", AttributeKey::Duration, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        assert_eq!(names(&hashed), vec!["Help"]);

        let hashed = catalog
            .search("9100", AttributeKey::Views, SearchAlgorithm::HashIndex, &mut ())
            .unwrap();
        assert_eq!(names(&hashed), vec!["Hey Ya!"]);
    }

    #[test]
    fn test_sort_rewrites_catalog_order() {
        for algorithm in SortAlgorithm::ALL {
            let mut catalog = create_test_catalog();
            let returned: Vec<u32> = catalog
                .sort(AttributeKey::Duration, algorithm, &mut ())
                .unwrap()
                .iter()
                .map(|s| s.id)
                .collect();

            let current: Vec<u32> = catalog.songs().iter().map(|s| s.id).collect();
            assert_eq!(returned, current);
            assert_eq!(current, vec![1, 2, 5, 4, 3], "{algorithm}");
        }
    }

    #[test]
    fn test_pairwise_sort_progress_through_catalog() {
        let mut catalog = create_test_catalog();
        let mut counter = TickCounter::default();
        catalog
            .sort(AttributeKey::Name, SortAlgorithm::Pairwise, &mut counter)
            .unwrap();
        assert_eq!(counter.ticks, 10);
    }

    #[test]
    fn test_playlists_survive_sorting() {
        let mut catalog = create_test_catalog();
        catalog
            .sort(AttributeKey::Name, SortAlgorithm::Partition, &mut ())
            .unwrap();

        let playlist = catalog.playlists()[0].clone();
        let songs = catalog.playlist_songs(&playlist);
        assert_eq!(names(&songs), vec!["Hey Jude", "Yesterday"]);
    }

    #[test]
    fn test_unsupported_attribute_aborts_without_mutation() {
        let mut catalog = create_test_catalog();
        let before: Vec<u32> = catalog.songs().iter().map(|s| s.id).collect();

        let err = catalog
            .sort(AttributeKey::Genre, SortAlgorithm::Pairwise, &mut ())
            .unwrap_err();
        assert_eq!(err, CatalogError::UnsupportedAttribute(AttributeKey::Genre));

        let err = catalog
            .search("rock", AttributeKey::Genre, SearchAlgorithm::Linear, &mut ())
            .unwrap_err();
        assert_eq!(err, CatalogError::UnsupportedAttribute(AttributeKey::Genre));

        let after: Vec<u32> = catalog.songs().iter().map(|s| s.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_catalog_never_faults() {
        let mut catalog = Catalog::new();

        for algorithm in SearchAlgorithm::ALL {
            for key in AttributeKey::ALL {
                let results = catalog.search("hey", key, algorithm, &mut ()).unwrap();
                assert!(results.is_empty());
            }
        }
        for algorithm in SortAlgorithm::ALL {
            assert!(catalog.sort(AttributeKey::Duration, algorithm, &mut ()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_add_song_assigns_next_id() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.add_song(new_song("First", 1)).unwrap().id, 1);
        assert_eq!(catalog.add_song(new_song("Second", 2)).unwrap().id, 2);

        let sparse = Catalog::from_parts(
            vec![
                create_test_song(3, "Three", "A", 1, 1.0),
                create_test_song(10, "Ten", "B", 1, 1.0),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(sparse.next_id(), Ok(11));
    }

    #[test]
    fn test_add_song_fails_when_ids_run_out() {
        let mut catalog = Catalog::from_parts(
            vec![create_test_song(u32::MAX, "Last", "A", 1, 1.0)],
            vec![],
        )
        .unwrap();
        assert_eq!(catalog.next_id(), Err(CatalogError::IdsExhausted));
        assert_eq!(
            catalog.add_song(new_song("Overflow", 1)).unwrap_err(),
            CatalogError::IdsExhausted
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let songs = vec![
            create_test_song(1, "Help", "The Beatles", 1, 2.33),
            create_test_song(1, "Yesterday", "The Beatles", 1, 2.05),
        ];
        assert_eq!(
            Catalog::from_parts(songs, vec![]).unwrap_err(),
            CatalogError::DuplicateId(1)
        );
    }

    #[test]
    fn test_add_to_playlist() {
        let mut catalog = create_test_catalog();
        catalog.create_playlist("Road Trip");

        catalog.add_to_playlist("Road Trip", 4).unwrap();
        catalog.add_to_playlist("Road Trip", 4).unwrap();
        assert_eq!(catalog.playlists()[1].song_ids, vec![4, 4]);

        assert_eq!(
            catalog.add_to_playlist("Road Trip", 99),
            Err(CatalogError::SongNotFound("99".to_string()))
        );
        assert_eq!(
            catalog.add_to_playlist("Nowhere", 1),
            Err(CatalogError::PlaylistNotFound("Nowhere".to_string()))
        );
        assert_eq!(catalog.playlists()[1].song_ids, vec![4, 4]);
    }

    #[test]
    fn test_playlist_names_need_not_be_unique() {
        let mut catalog = create_test_catalog();
        catalog.create_playlist("Beatles");
        catalog.add_to_playlist("Beatles", 2).unwrap();

        // The first playlist with the name receives the song
        assert_eq!(catalog.playlists()[0].song_ids, vec![3, 1, 2]);
        assert!(catalog.playlists()[1].song_ids.is_empty());
    }

    #[test]
    fn test_find_song_by_name_is_exact() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.find_song_by_name("Help").map(|s| s.id), Some(2));
        assert!(catalog.find_song_by_name("help").is_none());
        assert!(catalog.find_song_by_name("Hel").is_none());
    }
}
