use std::{sync::Arc, time::Duration};

use reqwest::Client;
use serde_json::Value;

use crate::{
    config, error,
    management::{AuthError, FlowState, SharedFlow, TokenExchange},
    server::start_api_server,
    success,
    types::{Profile, Token},
    warning,
};

/// Production [`TokenExchange`] implementation against the Spotify endpoints.
///
/// Both calls translate transport failures and non-success statuses into the
/// typed auth error taxonomy. Neither retries: the authorization code is
/// single-use by protocol, so a client-side retry of the exchange is never
/// safe, and retry policy for the profile fetch belongs to the caller.
#[derive(Default)]
pub struct SpotifyClient;

impl SpotifyClient {
    pub fn new() -> Self {
        SpotifyClient
    }
}

impl TokenExchange for SpotifyClient {
    /// Exchanges an authorization code for an access token using PKCE.
    ///
    /// Issues a form-encoded POST with `grant_type=authorization_code`. The
    /// verifier proves that the client completing the flow is the one that
    /// started it. Non-2xx responses capture the body for diagnostics.
    async fn exchange(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
        client_id: &str,
    ) -> Result<Token, AuthError> {
        let client = Client::new();
        let res = client
            .post(config::spotify_apitoken_url())
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", client_id),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchangeFailed(format!(
                "{}: {}",
                status, body
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let access_token = json["access_token"]
            .as_str()
            .ok_or_else(|| {
                AuthError::TokenExchangeFailed("response carried no access_token".to_string())
            })?
            .to_string();

        Ok(Token { access_token })
    }

    /// Fetches the authenticated user's profile with a bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<Profile, AuthError> {
        let client = Client::new();
        let res = client
            .get(format!("{}/me", config::spotify_apiurl()))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::ProfileFetchFailed(format!("{}: {}", status, body)));
        }

        res.json::<Profile>()
            .await
            .map_err(|e| AuthError::ProfileFetchFailed(e.to_string()))
    }
}

/// Runs the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// 1. Starts the local callback server that will receive the redirect
/// 2. Starts a flow attempt, persisting the verifier and building the
///    authorization URL
/// 3. Opens the URL in the default browser (with a manual fallback)
/// 4. Waits for the callback handler to drive the flow to a terminal state
///
/// Failures are reported with the flow's distinguishable reason; a timeout
/// after 60 seconds is treated as a failed attempt.
pub async fn auth(shared_flow: SharedFlow) {
    // local callback server completes the flow once the redirect lands
    let server_flow = Arc::clone(&shared_flow);
    tokio::spawn(async move {
        start_api_server(server_flow).await;
    });

    let auth_url = {
        let mut flow = shared_flow.lock().await;
        match flow.start().await {
            Ok(url) => url,
            Err(e) => error!("Cannot start authentication: {}", e),
        }
    };

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_completion(shared_flow).await {
        Some(FlowState::Authenticated) => success!("Authentication successful!"),
        Some(FlowState::Failed(reason)) => error!("Authentication failed: {}", reason),
        _ => error!("Authentication failed or timed out."),
    }
}

/// Polls the shared flow until it reaches a terminal state, with a 60-second
/// timeout and a 1-second poll interval.
async fn wait_for_completion(shared_flow: SharedFlow) -> Option<FlowState> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let flow = shared_flow.lock().await;
        if matches!(flow.state(), FlowState::Authenticated | FlowState::Failed(_)) {
            return Some(flow.state().clone());
        }
        drop(flow);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
