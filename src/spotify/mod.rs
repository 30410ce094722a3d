//! # Spotify Integration Module
//!
//! The integration layer between the CLI and the Spotify Web API. It handles
//! all HTTP communication: the OAuth 2.0 PKCE flow and the paginated
//! retrieval of the user's ranked top tracks.
//!
//! ## Core Modules
//!
//! [`auth`] - OAuth 2.0 PKCE flow plumbing:
//! - **Authorization**: drives the browser-based consent step via the local
//!   callback server and waits for the flow to finish
//! - **Token Exchange**: exchanges the single-use authorization code plus the
//!   code verifier for an access token
//! - **Profile Fetch**: retrieves the authenticated user's profile
//!
//! [`tracks`] - Top-track retrieval:
//! - **Offset Pagination**: sequential pages of fixed size, stopping early on
//!   a short page
//! - **Best Effort**: a failing page yields the partial accumulation instead
//!   of an error
//!
//! ## API Coverage
//!
//! - `POST /api/token` - PKCE code exchange
//! - `GET /me` - user profile
//! - `GET /me/top/tracks` - ranked top tracks with `limit`/`offset`/
//!   `time_range`
//!
//! ## Error Handling
//!
//! Auth operations surface the typed [`crate::management::AuthError`]
//! taxonomy so the caller can render a distinguishable reason; no operation
//! in this module retries, since authorization codes and verifiers are
//! single-use. Track pages degrade to partial results.
//!
//! ## Thread Safety
//!
//! Designed for async single-threaded use; the flow shared between the CLI
//! and the callback server lives behind an `Arc<Mutex<>>`.

pub mod auth;
pub mod tracks;
