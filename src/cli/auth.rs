use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config,
    management::{AuthFlow, SessionStore},
    spotify::{self, auth::SpotifyClient},
};

pub async fn auth() {
    // Rehydrate from persisted storage so an already-authenticated session
    // is refused instead of silently replaced.
    let flow = AuthFlow::resume(
        SessionStore::open(),
        SpotifyClient::new(),
        config::spotify_client_id(),
        config::spotify_redirect_uri(),
    )
    .await;
    spotify::auth::auth(Arc::new(Mutex::new(flow))).await;
}
