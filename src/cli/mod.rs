//! # CLI Module
//!
//! The user-facing command layer. Each command coordinates the session
//! store, the Spotify integration layer and the aggregation logic, and
//! renders results as tables or plain text.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE flow with a local callback server
//! - [`albums`] - Ranked top albums derived from the user's top tracks
//! - [`tracks`] - The raw ranked top-track list
//! - [`whoami`] - The cached user profile
//! - [`logout`] - Clears the persisted session
//!
//! ## Error Handling
//!
//! Commands report problems through the colored output macros; conditions the
//! user can fix (missing authentication, expired token) come with the command
//! to run next. Partial track fetches degrade the result instead of aborting.

mod albums;
mod auth;
mod session;
mod tracks;

pub use albums::albums;
pub use auth::auth;
pub use session::logout;
pub use session::whoami;
pub use tracks::tracks;
