use topalcli::albums::YearFilter;
use topalcli::types::{AlbumEntry, Image};
use topalcli::utils::*;

fn album_entry(id: &str, name: &str, artists: &[&str]) -> AlbumEntry {
    AlbumEntry {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        images: Vec::<Image>::new(),
        release_date: None,
        score: 0,
        track_count: 2,
        best_rank: 1,
    }
}

#[test]
fn test_generate_code_verifier_length_and_alphabet() {
    let verifier = generate_code_verifier(VERIFIER_LENGTH);

    // Default length is the longest RFC 7636 form
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier(VERIFIER_LENGTH);
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_verifier_custom_lengths() {
    for length in [43, 64, 100, 128] {
        let verifier = generate_code_verifier(length);
        assert_eq!(verifier.len(), length);
        assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn test_generate_code_challenge_deterministic_and_urlsafe() {
    for length in [43, 77, 128] {
        let verifier = generate_code_verifier(length);
        let challenge = generate_code_challenge(&verifier);

        // Deterministic - same verifier always yields the same challenge
        assert_eq!(challenge, generate_code_challenge(&verifier));

        // base64url without padding: no '=', '+' or '/'
        assert!(!challenge.contains('='));
        assert!(!challenge.contains('+'));
        assert!(!challenge.contains('/'));
        assert!(!challenge.is_empty());
    }

    // Different input should produce different output
    assert_ne!(
        generate_code_challenge("verifier-one"),
        generate_code_challenge("verifier-two")
    );
}

#[test]
fn test_callback_params_from_query_string() {
    let params = CallbackParams::parse("code=abc123&state=xyz");
    assert_eq!(params.code.as_deref(), Some("abc123"));
    assert_eq!(params.error, None);
}

#[test]
fn test_callback_params_from_full_url() {
    let params = CallbackParams::parse("https://example.org/callback?code=abc123");
    assert_eq!(params.code.as_deref(), Some("abc123"));
}

#[test]
fn test_callback_params_from_fragment_routing() {
    // Hash-router deployments put the parameters after the fragment
    let params = CallbackParams::parse("https://example.org/app#/callback?code=frag456");
    assert_eq!(params.code.as_deref(), Some("frag456"));
}

#[test]
fn test_callback_params_fragment_takes_precedence() {
    let params = CallbackParams::parse("https://example.org/cb?code=fromquery#/callback?code=fromfragment");
    assert_eq!(params.code.as_deref(), Some("fromfragment"));
}

#[test]
fn test_callback_params_error_parameter() {
    let params = CallbackParams::parse("error=access_denied");
    assert_eq!(params.error.as_deref(), Some("access_denied"));
    assert_eq!(params.code, None);
}

#[test]
fn test_callback_params_percent_decoding() {
    let params = CallbackParams::parse("code=a%2Fb%3Dc");
    assert_eq!(params.code.as_deref(), Some("a/b=c"));
}

#[test]
fn test_callback_params_empty_input() {
    let params = CallbackParams::parse("");
    assert_eq!(params.code, None);
    assert_eq!(params.error, None);
}

#[test]
fn test_format_share_text_with_year() {
    let albums = vec![
        album_entry("a1", "First Album", &["Artist A"]),
        album_entry("a2", "Second Album", &["Artist B", "Artist C"]),
    ];

    let text = format_share_text(&albums, &YearFilter::Year("2023".to_string()));
    assert_eq!(
        text,
        "My Top Albums (2023)\n\n1. First Album - Artist A\n2. Second Album - Artist B, Artist C"
    );
}

#[test]
fn test_format_share_text_all_time() {
    let albums = vec![album_entry("a1", "Only Album", &["Artist A"])];
    let text = format_share_text(&albums, &YearFilter::All);
    assert!(text.starts_with("My Top Albums (All Time)\n\n"));
    assert!(text.ends_with("1. Only Album - Artist A"));
}
