//! Configuration management for the Spotify Top Albums CLI.
//!
//! Configuration is read from environment variables, optionally loaded from a
//! `.env` file in the platform-specific local data directory
//! (`topalcli/.env`). The OAuth client id and redirect URI are consumed as
//! opaque strings; the redirect URI in particular is resolved per deployment
//! and must match what is registered with the Spotify application.

use dotenv;
use std::{env, path::PathBuf};

/// Scopes requested during authorization. Fixed: the application only ever
/// reads top items and the private profile.
pub const SPOTIFY_AUTH_SCOPE: &str = "user-top-read user-read-private user-read-email";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if needed and loads variables from
/// `topalcli/.env` under the platform data dir:
/// - Linux: `~/.local/share/topalcli/.env`
/// - macOS: `~/Library/Application Support/topalcli/.env`
/// - Windows: `%LOCALAPPDATA%/topalcli/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the `.env`
/// file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("topalcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // A missing .env is fine; variables may come from the environment itself.
    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify OAuth authorization endpoint.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify OAuth token exchange endpoint.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}
