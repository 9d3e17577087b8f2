use std::collections::HashSet;

use log::{debug, info, warn};

use super::{CatalogError, SearchAlgorithm, SortAlgorithm};
use crate::engine::{AttributeKey, Attributed, HashIndex, ProbeSettings, Progress, Search, Sort};
use crate::models::{NewSong, Playlist, Song};

/// Owns the songs, the playlists and the cached hash index.
///
/// Song order is the current sort order; every sort rewrites it in place.
#[derive(Debug, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    index: Option<HashIndex>,
    probe: ProbeSettings,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-identified songs.
    ///
    /// Playlist references to unknown ids are dropped.
    pub fn from_parts(songs: Vec<Song>, playlists: Vec<Playlist>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(songs.len());
        for song in &songs {
            if !ids.insert(song.id) {
                return Err(CatalogError::DuplicateId(song.id));
            }
        }

        let playlists = playlists
            .into_iter()
            .map(|mut playlist| {
                playlist.song_ids.retain(|id| {
                    let known = ids.contains(id);
                    if !known {
                        warn!(
                            "Dropping unknown song id {} from playlist '{}'",
                            id, playlist.name
                        );
                    }
                    known
                });
                playlist
            })
            .collect();

        Ok(Self {
            songs,
            playlists,
            index: None,
            probe: ProbeSettings::default(),
        })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        self.probe
    }

    pub fn set_probe(&mut self, probe: ProbeSettings) {
        self.probe = probe;
    }

    pub fn song(&self, id: u32) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// First song whose name equals `name` exactly.
    pub fn find_song_by_name(&self, name: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.name == name)
    }

    /// Id the next appended song receives: `count + 1`, or one past the
    /// highest id when the existing ids are sparse.
    pub fn next_id(&self) -> Result<u32, CatalogError> {
        let max_id = self.songs.iter().map(|song| song.id).max().unwrap_or(0);
        let count = u32::try_from(self.songs.len()).map_err(|_| CatalogError::IdsExhausted)?;
        max_id
            .max(count)
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted)
    }

    pub fn add_song(&mut self, song: NewSong) -> Result<&Song, CatalogError> {
        let id = self.next_id()?;
        self.songs.push(song.with_id(id));
        self.invalidate_index();
        info!("Added song id={id}");
        Ok(&self.songs[self.songs.len() - 1])
    }

    pub fn create_playlist(&mut self, name: &str) -> &Playlist {
        self.playlists.push(Playlist::new(name));
        info!("Created playlist '{name}'");
        &self.playlists[self.playlists.len() - 1]
    }

    /// Append a reference to `song_id` to the first playlist named
    /// `playlist_name`. Nothing changes when either side is missing.
    pub fn add_to_playlist(&mut self, playlist_name: &str, song_id: u32) -> Result<(), CatalogError> {
        if self.song(song_id).is_none() {
            return Err(CatalogError::SongNotFound(song_id.to_string()));
        }

        let playlist = self
            .playlists
            .iter_mut()
            .find(|playlist| playlist.name == playlist_name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(playlist_name.to_string()))?;
        playlist.song_ids.push(song_id);
        Ok(())
    }

    /// Songs referenced by `playlist`, in playlist order.
    pub fn playlist_songs(&self, playlist: &Playlist) -> Vec<&Song> {
        playlist
            .song_ids
            .iter()
            .filter_map(|id| self.song(*id))
            .collect()
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn invalidate_index(&mut self) {
        if self.index.take().is_some() {
            debug!("Hash index invalidated");
        }
    }

    /// Rebuild the hash index for every attribute.
    pub fn rebuild_index(&mut self) {
        self.index = Some(Self::build_index(&self.songs));
    }

    fn build_index(songs: &[Song]) -> HashIndex {
        info!("Building hash index over {} songs", songs.len());
        let index = HashIndex::build(songs, &AttributeKey::ALL);
        for key in AttributeKey::ALL {
            debug!("  {key}: {} distinct values", index.distinct_values(key));
        }
        index
    }

    /// Reject attributes no song carries. An empty catalog accepts any key.
    pub fn check_attribute(&self, key: AttributeKey) -> Result<(), CatalogError> {
        if self.songs.is_empty() || self.songs.iter().any(|song| song.attribute(key).is_some()) {
            Ok(())
        } else {
            Err(CatalogError::UnsupportedAttribute(key))
        }
    }

    /// Find the songs whose `key` attribute matches `term`.
    ///
    /// Linear and probe search match text by substring; the hash index only
    /// returns songs whose whole value equals the term.
    pub fn search(
        &mut self,
        term: &str,
        key: AttributeKey,
        algorithm: SearchAlgorithm,
        progress: &mut impl Progress,
    ) -> Result<Vec<&Song>, CatalogError> {
        self.check_attribute(key)?;

        let results = match algorithm {
            SearchAlgorithm::Linear => Search::linear(&self.songs, term, key, progress),
            SearchAlgorithm::HashIndex => {
                let songs = &self.songs;
                let index = self.index.get_or_insert_with(|| {
                    info!("No hash index available for '{key}'");
                    Self::build_index(songs)
                });
                index
                    .lookup(key, term)
                    .iter()
                    .map(|position| &songs[*position])
                    .collect()
            }
            SearchAlgorithm::Probe => {
                let seed = self.probe.seed_for(self.songs.len());
                debug!("Probe search seed={seed} coverage={:?}", self.probe.coverage);
                Search::probe(&self.songs, term, key, seed, self.probe.coverage, progress)
            }
        };

        Ok(results)
    }

    /// Reorder the catalog by `key` and return the new order.
    pub fn sort(
        &mut self,
        key: AttributeKey,
        algorithm: SortAlgorithm,
        progress: &mut impl Progress,
    ) -> Result<&[Song], CatalogError> {
        self.check_attribute(key)?;

        let sort_key = |song: &Song| song.sort_key(key);
        match algorithm {
            SortAlgorithm::Reference => {
                Sort::reference(&mut self.songs, sort_key);
                progress.advance(self.songs.len());
            }
            SortAlgorithm::Partition => {
                let songs = std::mem::take(&mut self.songs);
                self.songs = Sort::partition(songs, sort_key, progress);
            }
            SortAlgorithm::Pairwise => {
                Sort::pairwise(&mut self.songs, sort_key, progress);
            }
        }
        self.invalidate_index();

        Ok(&self.songs)
    }
}
