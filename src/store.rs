use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError};
use crate::models::{CatalogFile, Playlist, PlaylistEntry, PlaylistRecord, Song, SongRecord};

/// Where the catalog is read from at startup and flushed to at exit
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore {
    fn load(&self) -> Result<CatalogFile>;
    fn save(&self, file: &CatalogFile) -> Result<()>;
}

/// JSON data file with `songs` and `playlists` keys
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Result<CatalogFile> {
        if !self.path.exists() {
            warn!("No existing data found in {}.", self.path.display());
            return Ok(CatalogFile::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to decode JSON in {}", self.path.display()))?;
        Ok(file)
    }

    fn save(&self, file: &CatalogFile) -> Result<()> {
        let content = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl Catalog {
    /// Convert the persisted shape into a catalog.
    ///
    /// Records without a positive id, or repeating an earlier id, get the id
    /// of their position (1-based) when free, otherwise the next id above
    /// every taken one.
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        let mut taken = HashSet::new();
        let given: Vec<Option<u32>> = file
            .songs
            .iter()
            .map(|record| {
                record
                    .id
                    .and_then(|id| u32::try_from(id).ok())
                    .filter(|id| *id > 0 && taken.insert(*id))
            })
            .collect();

        let mut next_free = taken.iter().copied().max().unwrap_or(0);
        let mut songs = Vec::with_capacity(file.songs.len());
        for (position, (record, id)) in file.songs.into_iter().zip(given).enumerate() {
            let id = match id {
                Some(id) => id,
                None => {
                    let candidate = u32::try_from(position + 1).ok();
                    let assigned = match candidate {
                        Some(candidate) if taken.insert(candidate) => candidate,
                        _ => loop {
                            next_free = next_free.checked_add(1).ok_or(CatalogError::IdsExhausted)?;
                            if taken.insert(next_free) {
                                break next_free;
                            }
                        },
                    };
                    warn!(
                        "Song '{}' had no usable id ({:?}), assigned {}",
                        record.track, record.id, assigned
                    );
                    assigned
                }
            };
            let song = record
                .into_song(id)
                .map_err(|e| anyhow::anyhow!("Invalid song record: {e}"))?;
            songs.push(song);
        }

        let playlists = file
            .playlists
            .into_iter()
            .map(|record| {
                let song_ids = record
                    .songs
                    .into_iter()
                    .filter_map(|entry| match u32::try_from(entry.track_id) {
                        Ok(id) => Some(id),
                        Err(_) => {
                            warn!(
                                "Playlist '{}' references invalid id {}, dropped",
                                record.name, entry.track_id
                            );
                            None
                        }
                    })
                    .collect();
                Playlist {
                    name: record.name,
                    song_ids,
                }
            })
            .collect();

        Ok(Catalog::from_parts(songs, playlists)?)
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            songs: self.songs().iter().cloned().map(SongRecord::from).collect(),
            playlists: self
                .playlists()
                .iter()
                .map(|playlist| PlaylistRecord {
                    name: playlist.name.clone(),
                    songs: playlist
                        .song_ids
                        .iter()
                        .map(|id| PlaylistEntry { track_id: i64::from(*id) })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn load(store: &dyn CatalogStore) -> Result<Self> {
        let catalog = Self::from_file(store.load()?)?;
        info!(
            "Loaded {} songs and {} playlists",
            catalog.len(),
            catalog.playlists().len()
        );
        Ok(catalog)
    }

    pub fn save(&self, store: &dyn CatalogStore) -> Result<()> {
        store.save(&self.to_file())?;
        info!(
            "Saved {} songs and {} playlists",
            self.len(),
            self.playlists().len()
        );
        Ok(())
    }
}
