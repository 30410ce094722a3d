use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Access token obtained from the PKCE code exchange.
///
/// Only the access token itself is consumed; the flow does not refresh or
/// rotate tokens, so the remaining response fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
}

/// Spotify user profile as returned by `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Time range accepted by Spotify's top-items endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Last ~4 weeks
    #[value(name = "short_term")]
    ShortTerm,
    /// Last ~6 months
    #[value(name = "medium_term")]
    MediumTerm,
    /// Several years
    #[value(name = "long_term")]
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// A single ranked top track. Tracks arrive from Spotify already ordered by
/// play rank; index 0 is the most-played track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Response envelope of `GET /me/top/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

/// A scored album derived from the ranked track list.
///
/// `score` is the sum of per-track rank weights, `track_count` the number of
/// contributing tracks and `best_rank` the 1-based best rank among them.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumEntry {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub score: u64,
    pub track_count: u32,
    pub best_rank: u32,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub score: u64,
    pub tracks: u32,
    #[tabled(rename = "best rank")]
    pub best_rank: u32,
    pub released: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}
