use topalcli::albums::{YearFilter, aggregate_albums};
use topalcli::types::{ExternalUrls, Track, TrackAlbum, TrackArtist};

// Helper to build a ranked track on a given album
fn track(id: &str, album_id: &str, release_date: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: format!("track {}", id),
        artists: vec![TrackArtist {
            name: format!("artist of {}", album_id),
        }],
        album: TrackAlbum {
            id: album_id.to_string(),
            name: format!("album {}", album_id),
            images: Vec::new(),
            release_date: release_date.map(|d| d.to_string()),
            release_date_precision: release_date.map(|_| "day".to_string()),
        },
        external_urls: ExternalUrls::default(),
    }
}

#[test]
fn test_borda_weights_and_ordering() {
    // Albums [A,B,A,C,B,A] at ranks 1..6 carry weights [6,5,4,3,2,1]
    let tracks = vec![
        track("t1", "A", Some("2023-01-01")),
        track("t2", "B", Some("2023-01-01")),
        track("t3", "A", Some("2023-01-01")),
        track("t4", "C", Some("2023-01-01")),
        track("t5", "B", Some("2023-01-01")),
        track("t6", "A", Some("2023-01-01")),
    ];

    let result = aggregate_albums(&tracks, &YearFilter::All);

    // C has a single contributing track and is excluded
    assert_eq!(result.len(), 2);

    assert_eq!(result[0].id, "A");
    assert_eq!(result[0].score, 6 + 4 + 1);
    assert_eq!(result[0].track_count, 3);
    assert_eq!(result[0].best_rank, 1);

    assert_eq!(result[1].id, "B");
    assert_eq!(result[1].score, 5 + 2);
    assert_eq!(result[1].track_count, 2);
    assert_eq!(result[1].best_rank, 2);
}

#[test]
fn test_single_track_albums_excluded() {
    let tracks = vec![
        track("t1", "A", None),
        track("t2", "B", None),
        track("t3", "C", None),
    ];
    let result = aggregate_albums(&tracks, &YearFilter::All);
    assert!(result.is_empty());
}

#[test]
fn test_empty_input_yields_empty_ranking() {
    let result = aggregate_albums(&[], &YearFilter::All);
    assert!(result.is_empty());
}

#[test]
fn test_year_filter_prefix_match() {
    let filter = YearFilter::parse("2023");
    assert!(filter.matches(Some("2023-05-01")));
    assert!(!filter.matches(Some("2022-12-01")));
    // Year-precision dates still match by prefix
    assert!(filter.matches(Some("2023")));
}

#[test]
fn test_year_filter_absent_release_dates() {
    // Excluded under a specific year, included under all
    assert!(!YearFilter::parse("2023").matches(None));
    assert!(YearFilter::All.matches(None));
    assert!(YearFilter::parse("all").matches(None));
    assert_eq!(YearFilter::parse("ALL"), YearFilter::All);
}

#[test]
fn test_year_filter_applied_before_weighting() {
    // Four tracks, two of which survive the 2023 filter; weights are
    // computed over the filtered list (2 and 1), not the raw one.
    let tracks = vec![
        track("t1", "A", Some("2022-03-03")),
        track("t2", "B", Some("2023-05-01")),
        track("t3", "A", Some("2022-03-03")),
        track("t4", "B", Some("2023-06-01")),
    ];

    let result = aggregate_albums(&tracks, &YearFilter::Year("2023".to_string()));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "B");
    assert_eq!(result[0].score, 2 + 1);
    assert_eq!(result[0].track_count, 2);
    assert_eq!(result[0].best_rank, 1);
}

#[test]
fn test_equal_score_and_count_break_by_best_rank() {
    // A at ranks 1 and 4, B at ranks 2 and 3: both score 5 with 2 tracks;
    // the better best rank decides.
    let tracks = vec![
        track("t1", "A", None),
        track("t2", "B", None),
        track("t3", "B", None),
        track("t4", "A", None),
    ];
    let result = aggregate_albums(&tracks, &YearFilter::All);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, "A");
    assert_eq!(result[0].best_rank, 1);
    assert_eq!(result[1].id, "B");
    assert_eq!(result[1].best_rank, 2);
}

#[test]
fn test_album_with_more_tracks_and_score_wins() {
    let tracks = vec![
        track("t1", "A", None), // 6
        track("t2", "B", None), // 5
        track("t3", "B", None), // 4
        track("t4", "A", None), // 3
        track("t5", "A", None), // 2
        track("t6", "C", None), // 1, single track, excluded
    ];
    // A: 6+3+2 = 11 (3 tracks), B: 5+4 = 9 (2 tracks)
    let result = aggregate_albums(&tracks, &YearFilter::All);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, "A");
    assert_eq!(result[0].track_count, 3);
    assert_eq!(result[1].id, "B");
}

#[test]
fn test_first_occurrence_seeds_album_metadata() {
    let mut first = track("t1", "A", Some("2021-09-09"));
    first.album.name = "Seeded Name".to_string();
    let tracks = vec![first, track("t2", "A", Some("2021-09-09"))];

    let result = aggregate_albums(&tracks, &YearFilter::All);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Seeded Name");
    assert_eq!(result[0].release_date.as_deref(), Some("2021-09-09"));
}

#[test]
fn test_tracks_with_empty_album_id_are_skipped() {
    let tracks = vec![
        track("t1", "", None),
        track("t2", "A", None),
        track("t3", "", None),
        track("t4", "A", None),
    ];
    let result = aggregate_albums(&tracks, &YearFilter::All);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "A");
}
