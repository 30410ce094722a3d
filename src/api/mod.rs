//! # API Module
//!
//! HTTP endpoints for the local callback server that receives Spotify's OAuth
//! redirect during authentication.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization redirect and hands the raw
//!   parameters to the shared auth flow, which performs the PKCE token
//!   exchange and profile fetch.
//! - [`health`] - Health check returning application status and version.
//!
//! ## Architecture
//!
//! Built on [Axum](https://docs.rs/axum); the auth flow state machine is
//! shared with the CLI via an `Arc<Mutex<>>` extension layer. The callback
//! handler is safe to invoke more than once for the same redirect: duplicate
//! authorization codes are detected by the flow and ignored.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
