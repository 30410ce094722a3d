use chrono::{Datelike, Utc};
use tabled::Table;

use crate::{
    albums::{YearFilter, aggregate_albums},
    error, info,
    management::SessionStore,
    spotify,
    types::{AlbumTableRow, TimeRange},
    utils, warning,
};

/// Derives and prints the ranked top-album list.
///
/// Fetches up to `tracks_wanted` ranked top tracks for the time range,
/// filters them by release year (defaulting to the current year when no year
/// is given) and aggregates them into a scored album ranking. With `share`
/// the output is the plain-text numbered list instead of a table.
pub async fn albums(
    time_range: TimeRange,
    tracks_wanted: usize,
    year: Option<String>,
    share: bool,
    methodology: bool,
) {
    let session = SessionStore::open().load().await;
    let Some(token) = session.access_token else {
        error!("Not authenticated. Please run topalcli auth");
    };

    let year = year.unwrap_or_else(|| Utc::now().year().to_string());
    let filter = YearFilter::parse(&year);

    let tracks = spotify::tracks::get_top_tracks(&token, time_range, tracks_wanted).await;
    if tracks.is_empty() {
        warning!("No top tracks available. The token may have expired; run topalcli auth again.");
        return;
    }

    let ranking = aggregate_albums(&tracks, &filter);

    if methodology {
        print_methodology(&filter);
    }

    if ranking.is_empty() {
        let scope = match &filter {
            YearFilter::All => "any release year".to_string(),
            YearFilter::Year(year) => format!("release year {}", year),
        };
        info!(
            "No albums with at least two of your top tracks for {}.",
            scope
        );
        return;
    }

    if share {
        println!("{}", utils::format_share_text(&ranking, &filter));
        return;
    }

    let table_rows: Vec<AlbumTableRow> = ranking
        .iter()
        .enumerate()
        .map(|(idx, album)| AlbumTableRow {
            rank: idx + 1,
            name: album.name.clone(),
            artists: album.artists.join(", "),
            score: album.score,
            tracks: album.track_count,
            best_rank: album.best_rank,
            released: album.release_date.clone().unwrap_or_default(),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}

fn print_methodology(filter: &YearFilter) {
    info!("Your likely top albums are inferred from your top tracks:");
    match filter {
        YearFilter::All => info!("- No release-year filter is applied."),
        YearFilter::Year(year) => info!(
            "- Only tracks whose album release date starts with {} count.",
            year
        ),
    }
    info!("- Tracks are grouped by album; each contributes a rank-based weight.");
    info!("- Albums rank by total score, then contributing tracks, then best rank.");
    info!("- Albums with a single contributing track are excluded to reduce noise.");
}
