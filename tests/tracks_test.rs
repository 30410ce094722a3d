use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use topalcli::spotify::tracks::{TRACKS_PAGE_SIZE, TrackPageSource, collect_top_tracks};
use topalcli::types::{ExternalUrls, TimeRange, Track, TrackAlbum, TrackArtist};

fn numbered_track(n: usize) -> Track {
    Track {
        id: format!("track-{}", n),
        name: format!("Track {}", n),
        artists: vec![TrackArtist {
            name: "Artist".to_string(),
        }],
        album: TrackAlbum {
            id: format!("album-{}", n / 10),
            name: "Album".to_string(),
            images: Vec::new(),
            release_date: Some("2023-01-01".to_string()),
            release_date_precision: Some("day".to_string()),
        },
        external_urls: ExternalUrls::default(),
    }
}

/// Page source double backed by a fixed catalogue, recording every request.
struct FakePages {
    available: usize,
    requests: Mutex<Vec<(usize, usize)>>,
    calls: AtomicUsize,
    fail_from_page: Option<usize>,
}

impl FakePages {
    fn new(available: usize) -> Self {
        FakePages {
            available,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_from_page: None,
        }
    }
}

impl TrackPageSource for FakePages {
    async fn page(
        &self,
        _token: &str,
        _time_range: TimeRange,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Track>, String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((limit, offset));

        if let Some(fail_from) = self.fail_from_page {
            if call >= fail_from {
                return Err("boom".to_string());
            }
        }

        let end = (offset + limit).min(self.available);
        Ok((offset.min(self.available)..end).map(numbered_track).collect())
    }
}

#[tokio::test]
async fn test_requests_ceil_of_total_over_page_size() {
    let source = FakePages::new(500);
    let tracks = collect_top_tracks(&source, "tok", TimeRange::MediumTerm, 120).await;

    // ceil(120 / 50) = 3 pages, sequential offsets, fixed page size
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        *source.requests.lock().unwrap(),
        vec![(50, 0), (50, 50), (50, 100)]
    );

    // Truncated to exactly the requested total, rank order preserved
    assert_eq!(tracks.len(), 120);
    assert_eq!(tracks[0].id, "track-0");
    assert_eq!(tracks[119].id, "track-119");
}

#[tokio::test]
async fn test_stops_early_on_short_page() {
    // Only 70 tracks exist: page 2 comes back short, page 3 is never issued
    let source = FakePages::new(70);
    let tracks = collect_top_tracks(&source, "tok", TimeRange::ShortTerm, 150).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(tracks.len(), 70);
}

#[tokio::test]
async fn test_page_failure_returns_partial_result() {
    let mut source = FakePages::new(500);
    source.fail_from_page = Some(1);

    let tracks = collect_top_tracks(&source, "tok", TimeRange::LongTerm, 150).await;

    // First page succeeded, second failed: best effort, not an error
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(tracks.len(), TRACKS_PAGE_SIZE);
}

#[tokio::test]
async fn test_zero_total_issues_no_requests() {
    let source = FakePages::new(500);
    let tracks = collect_top_tracks(&source, "tok", TimeRange::MediumTerm, 0).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_total_not_on_page_boundary_truncates() {
    let source = FakePages::new(500);
    let tracks = collect_top_tracks(&source, "tok", TimeRange::MediumTerm, 75).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(tracks.len(), 75);
}

#[tokio::test]
async fn test_immediate_failure_yields_empty() {
    let mut source = FakePages::new(500);
    source.fail_from_page = Some(0);

    let tracks = collect_top_tracks(&source, "tok", TimeRange::MediumTerm, 100).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(tracks.is_empty());
}
