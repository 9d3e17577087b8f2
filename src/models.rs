use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{AttributeKey, AttributeValue, Attributed};

/// Track length, stored in whichever unit the dataset uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackLength {
    Minutes(f64),
    Millis(u64),
}

impl TrackLength {
    pub fn as_minutes(&self) -> f64 {
        match self {
            TrackLength::Minutes(minutes) => *minutes,
            TrackLength::Millis(ms) => *ms as f64 / 60_000.0,
        }
    }

    fn value(&self) -> AttributeValue<'_> {
        match self {
            TrackLength::Minutes(minutes) => AttributeValue::Float(*minutes),
            TrackLength::Millis(ms) => AttributeValue::Integer(*ms),
        }
    }
}

impl fmt::Display for TrackLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackLength::Minutes(minutes) => write!(f, "{minutes:.2} minutes"),
            TrackLength::Millis(ms) => write!(f, "{}:{:02}", ms / 60_000, (ms / 1000) % 60),
        }
    }
}

/// A catalog entry. `id` is fixed at creation and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: u32,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: Option<String>, // text dataset variant
    pub views: Option<u64>,    // popularity dataset variant
    pub length: TrackLength,
}

impl Attributed for Song {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue<'_>> {
        match key {
            AttributeKey::Name => Some(AttributeValue::Text(&self.name)),
            AttributeKey::Artist => Some(AttributeValue::Text(&self.artist)),
            AttributeKey::Album => Some(AttributeValue::Text(&self.album)),
            AttributeKey::Genre => self.genre.as_deref().map(AttributeValue::Text),
            AttributeKey::Views => self.views.map(AttributeValue::Integer),
            AttributeKey::Duration => Some(self.length.value()),
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Song: {}, Artist: {}, Album: {}",
            self.name, self.artist, self.album
        )?;
        if let Some(genre) = &self.genre {
            write!(f, ", Genre: {genre}")?;
        }
        if let Some(views) = self.views {
            write!(f, ", Views: {views}")?;
        }
        write!(f, ", Duration: {}", self.length)
    }
}

/// Song fields before an id has been assigned
#[derive(Debug, Clone)]
pub struct NewSong {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: Option<String>,
    pub views: Option<u64>,
    pub length: TrackLength,
}

impl NewSong {
    pub fn with_id(self, id: u32) -> Song {
        Song {
            id,
            name: self.name,
            artist: self.artist,
            album: self.album,
            genre: self.genre,
            views: self.views,
            length: self.length,
        }
    }
}

/// Song as it appears in the data file.
///
/// `id` is signed so files carrying the `-1` placeholder still parse; such
/// ids are reassigned on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Views", default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(rename = "Duration_min", default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    #[serde(rename = "Duration_ms", default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl SongRecord {
    /// Validate the record and attach `id`.
    pub fn into_song(self, id: u32) -> Result<Song, String> {
        let length = match (self.duration_min, self.duration_ms) {
            (Some(minutes), None) => TrackLength::Minutes(minutes),
            (None, Some(ms)) => TrackLength::Millis(ms),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "song '{}' has both Duration_min and Duration_ms",
                    self.track
                ));
            }
            (None, None) => return Err(format!("song '{}' has no duration", self.track)),
        };

        if self.genre.is_none() && self.views.is_none() {
            return Err(format!("song '{}' has neither Genre nor Views", self.track));
        }

        Ok(Song {
            id,
            name: self.track,
            artist: self.artist,
            album: self.album,
            genre: self.genre,
            views: self.views,
            length,
        })
    }
}

impl From<Song> for SongRecord {
    fn from(song: Song) -> Self {
        let (duration_min, duration_ms) = match song.length {
            TrackLength::Minutes(minutes) => (Some(minutes), None),
            TrackLength::Millis(ms) => (None, Some(ms)),
        };
        SongRecord {
            id: Some(i64::from(song.id)),
            track: song.name,
            artist: song.artist,
            album: song.album,
            genre: song.genre,
            views: song.views,
            duration_min,
            duration_ms,
        }
    }
}

/// A named, ordered list of references to catalog songs
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub name: String,
    pub song_ids: Vec<u32>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            song_ids: Vec::new(),
        }
    }
}

/// Playlist as it appears in the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    #[serde(default)]
    pub songs: Vec<PlaylistEntry>,
}

/// Reference to a song inside a persisted playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(alias = "id")]
    pub track_id: i64,
}

/// Top-level shape of the data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}
