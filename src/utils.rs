use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::{albums::YearFilter, types::AlbumEntry};

/// Alphabet the PKCE code verifier is drawn from.
const VERIFIER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated code verifiers. RFC 7636 allows 43..=128; the longest
/// permitted form is used.
pub const VERIFIER_LENGTH: usize = 128;

/// Generates a PKCE code verifier of `length` characters from the 62-character
/// alphanumeric alphabet, one secure random byte per character mapped by
/// modulo.
pub fn generate_code_verifier(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::rng().fill(&mut bytes[..]);
    bytes
        .iter()
        .map(|b| VERIFIER_ALPHABET[(*b as usize) % VERIFIER_ALPHABET.len()] as char)
        .collect()
}

/// Derives the S256 code challenge for a verifier: SHA-256 over the UTF-8
/// bytes, base64url-encoded without padding. Deterministic, since Spotify
/// recomputes the same transform during the code exchange.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parameters extracted from the provider's callback redirect.
///
/// Spotify redirects back with `?code=...` or `?error=...`; depending on the
/// routing style of the deployment the parameters may instead arrive inside a
/// navigation fragment (`#/callback?code=...`). Both encodings are parsed and
/// fragment values take precedence over query values for the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Parses a raw callback input: a bare query string, a `?query`, a full
    /// URL, or any of these with a fragment appended.
    pub fn parse(raw: &str) -> Self {
        let (head, fragment) = match raw.split_once('#') {
            Some((head, fragment)) => (head, Some(fragment)),
            None => (raw, None),
        };

        let query = match head.split_once('?') {
            Some((_, query)) => query,
            None => head,
        };

        let mut pairs = parse_query_pairs(query);
        if let Some(fragment) = fragment {
            let fragment_query = match fragment.split_once('?') {
                Some((_, query)) => query,
                None => fragment,
            };
            // fragment wins per key
            for (key, value) in parse_query_pairs(fragment_query) {
                pairs.insert(key, value);
            }
        }

        CallbackParams {
            code: pairs.remove("code"),
            error: pairs.remove("error"),
        }
    }
}

fn parse_query_pairs(query: &str) -> HashMap<String, String> {
    let url = match reqwest::Url::parse(&format!("http://callback/?{}", query)) {
        Ok(url) => url,
        Err(_) => return HashMap::new(),
    };
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Renders the plain-text share form of an album ranking, one numbered line
/// per album.
pub fn format_share_text(albums: &[AlbumEntry], filter: &YearFilter) -> String {
    let year_text = match filter {
        YearFilter::All => "All Time".to_string(),
        YearFilter::Year(year) => year.clone(),
    };

    let lines: Vec<String> = albums
        .iter()
        .enumerate()
        .map(|(idx, album)| format!("{}. {} - {}", idx + 1, album.name, album.artists.join(", ")))
        .collect();

    format!("My Top Albums ({})\n\n{}", year_text, lines.join("\n"))
}
