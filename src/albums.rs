//! Album aggregation.
//!
//! Folds an ordered top-track list into a scored, deduplicated album ranking.
//! Each track contributes a linear Borda-like weight based on its rank, so the
//! most-played tracks pull their albums furthest up the list. Albums with a
//! single contributing track are dropped as noise.

use std::collections::HashMap;

use crate::types::{AlbumEntry, Track};

/// Release-year filter applied before scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum YearFilter {
    All,
    Year(String),
}

impl YearFilter {
    /// Parses the CLI form: `all` (case-insensitive) or a year string that is
    /// matched as a prefix of the album release date.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            YearFilter::All
        } else {
            YearFilter::Year(value.to_string())
        }
    }

    /// Whether a track with the given album release date passes the filter.
    /// Absent release dates pass only under `All`.
    pub fn matches(&self, release_date: Option<&str>) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => release_date.is_some_and(|date| date.starts_with(year)),
        }
    }
}

/// Aggregates an ordered track list into a sorted album ranking.
///
/// The input order is significant: `tracks[0]` is rank 1. After filtering by
/// release year, the track at 0-based index `i` contributes a weight of
/// `len - i` to its album's score. Albums with fewer than two contributing
/// tracks are excluded. The result is sorted by score descending, then track
/// count descending, then best rank ascending, then album id ascending so the
/// order is fully deterministic.
///
/// Total over its inputs: never fails, and an empty track list yields an
/// empty ranking.
pub fn aggregate_albums(tracks: &[Track], filter: &YearFilter) -> Vec<AlbumEntry> {
    let filtered: Vec<&Track> = tracks
        .iter()
        .filter(|track| filter.matches(track.album.release_date.as_deref()))
        .collect();

    let total = filtered.len();
    let mut by_album: HashMap<String, AlbumEntry> = HashMap::new();

    for (idx, track) in filtered.iter().enumerate() {
        if track.album.id.is_empty() {
            continue;
        }
        let weight = (total - idx) as u64;
        let rank = (idx + 1) as u32;
        by_album
            .entry(track.album.id.clone())
            .and_modify(|entry| {
                entry.score += weight;
                entry.track_count += 1;
                entry.best_rank = entry.best_rank.min(rank);
            })
            .or_insert_with(|| AlbumEntry {
                id: track.album.id.clone(),
                name: track.album.name.clone(),
                artists: track.artists.iter().map(|a| a.name.clone()).collect(),
                images: track.album.images.clone(),
                release_date: track.album.release_date.clone(),
                score: weight,
                track_count: 1,
                best_rank: rank,
            });
    }

    let mut albums: Vec<AlbumEntry> = by_album
        .into_values()
        .filter(|entry| entry.track_count >= 2)
        .collect();

    albums.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.track_count.cmp(&a.track_count))
            .then(a.best_rank.cmp(&b.best_rank))
            .then(a.id.cmp(&b.id))
    });

    albums
}
