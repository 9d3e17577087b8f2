use comfy_table::Table;

use crate::catalog::Catalog;
use crate::models::Song;

/// Render songs as a table, one row per song in the given order
pub fn songs_table<'a>(songs: impl IntoIterator<Item = &'a Song>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["id", "name", "artist", "album", "genre", "views", "duration"]);
    for song in songs {
        table.add_row(vec![
            song.id.to_string(),
            song.name.clone(),
            song.artist.chars().take(30).collect(),
            song.album.chars().take(30).collect(),
            song.genre.clone().unwrap_or("---".to_string()),
            song.views.map(|v| v.to_string()).unwrap_or("---".to_string()),
            song.length.to_string(),
        ]);
    }
    table
}

/// Render every playlist with the songs it references
pub fn playlists_report(catalog: &Catalog) -> String {
    if catalog.playlists().is_empty() {
        return "No playlists created.".to_string();
    }

    catalog
        .playlists()
        .iter()
        .map(|playlist| {
            let songs = catalog.playlist_songs(playlist);
            let count = songs.len();
            format!(
                "Playlist: {} ({} songs)\n{}",
                playlist.name,
                count,
                songs_table(songs)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
