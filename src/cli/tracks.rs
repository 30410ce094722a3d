use tabled::Table;

use crate::{
    error,
    management::SessionStore,
    spotify,
    types::{TimeRange, TrackTableRow},
    warning,
};

/// Prints the raw ranked top-track list for a time range.
pub async fn tracks(time_range: TimeRange, tracks_wanted: usize) {
    let session = SessionStore::open().load().await;
    let Some(token) = session.access_token else {
        error!("Not authenticated. Please run topalcli auth");
    };

    let tracks = spotify::tracks::get_top_tracks(&token, time_range, tracks_wanted).await;
    if tracks.is_empty() {
        warning!("No top tracks available. The token may have expired; run topalcli auth again.");
        return;
    }

    let table_rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| TrackTableRow {
            rank: idx + 1,
            name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|a| a.name.clone())
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name.clone(),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
