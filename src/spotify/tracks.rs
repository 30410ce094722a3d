use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config,
    types::{TimeRange, TopTracksResponse, Track},
    warning,
};

/// Fixed page size of the top-items endpoint.
pub const TRACKS_PAGE_SIZE: usize = 50;

/// One page of ranked top tracks. A seam so the pagination loop can be
/// driven without the network.
#[allow(async_fn_in_trait)]
pub trait TrackPageSource {
    async fn page(
        &self,
        token: &str,
        time_range: TimeRange,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Track>, String>;
}

/// Production page source against `GET /me/top/tracks`.
pub struct SpotifyTracks;

impl TrackPageSource for SpotifyTracks {
    async fn page(
        &self,
        token: &str,
        time_range: TimeRange,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Track>, String> {
        let api_url = format!(
            "{uri}/me/top/tracks?limit={limit}&offset={offset}&time_range={time_range}",
            uri = &config::spotify_apiurl(),
            limit = limit,
            offset = offset,
            time_range = time_range.as_str()
        );

        let client = Client::new();
        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let res = response
            .json::<TopTracksResponse>()
            .await
            .map_err(|e| e.to_string())?;

        Ok(res.items)
    }
}

/// Pages through a track source until `total` tracks are collected.
///
/// Pages are requested sequentially: the offset pagination only knows whether
/// to continue after seeing whether the previous page was full. A short page
/// means the end of the available data; a failing page ends the loop with the
/// partial accumulation (best effort, never an error). The result preserves
/// provider rank order and is truncated to `total`.
pub async fn collect_top_tracks<S: TrackPageSource>(
    source: &S,
    token: &str,
    time_range: TimeRange,
    total: usize,
) -> Vec<Track> {
    let mut all_tracks: Vec<Track> = Vec::new();
    if total == 0 {
        return all_tracks;
    }

    let pages = total.div_ceil(TRACKS_PAGE_SIZE);
    for page in 0..pages {
        let offset = page * TRACKS_PAGE_SIZE;
        match source
            .page(token, time_range, TRACKS_PAGE_SIZE, offset)
            .await
        {
            Ok(items) => {
                let short_page = items.len() < TRACKS_PAGE_SIZE;
                all_tracks.extend(items);
                if short_page {
                    break; // end of available data
                }
            }
            Err(e) => {
                warning!("Failed to fetch top tracks page {}: {}", page + 1, e);
                break; // return what was accumulated
            }
        }
    }

    all_tracks.truncate(total);
    all_tracks
}

/// Retrieves up to `total` ranked top tracks from Spotify, with a spinner
/// while pages are in flight.
pub async fn get_top_tracks(token: &str, time_range: TimeRange, total: usize) -> Vec<Track> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching top tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let tracks = collect_top_tracks(&SpotifyTracks, token, time_range, total).await;

    pb.finish_and_clear();
    tracks
}
