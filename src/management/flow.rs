use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config,
    management::{Session, SessionStore},
    spotify::auth::SpotifyClient,
    types::{Profile, Token},
    utils::{self, CallbackParams, VERIFIER_LENGTH},
};

/// Why an authentication attempt failed. Every reason is terminal for that
/// attempt; the user must re-initiate, since authorization codes and PKCE
/// verifiers are single-use by protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The provider denied consent and redirected back with an error.
    AuthRejected(String),
    /// The callback carried neither a code nor an error parameter.
    MissingCode,
    /// No pending verifier was found: the flow was started in a different
    /// session, or the verifier was already consumed.
    MissingVerifier,
    /// The code-for-token exchange returned a non-success status. Carries the
    /// response body for diagnostics, never for display.
    TokenExchangeFailed(String),
    /// The profile fetch returned a non-success status. The access token is
    /// independently valid and is retained.
    ProfileFetchFailed(String),
    /// Network-level failure before any HTTP status was observed.
    Transport(String),
    /// The session store could not be written.
    Storage(String),
    /// `start()` was invoked while already authenticated.
    AlreadyAuthenticated,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::AuthRejected(reason) => write!(f, "authorization rejected: {}", reason),
            AuthError::MissingCode => write!(f, "callback carried no authorization code"),
            AuthError::MissingVerifier => write!(f, "no pending code verifier for this session"),
            AuthError::TokenExchangeFailed(body) => write!(f, "token exchange failed: {}", body),
            AuthError::ProfileFetchFailed(body) => write!(f, "profile fetch failed: {}", body),
            AuthError::Transport(e) => write!(f, "transport error: {}", e),
            AuthError::Storage(e) => write!(f, "session storage error: {}", e),
            AuthError::AlreadyAuthenticated => write!(f, "already authenticated; logout first"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Performs the two provider calls of the flow: the code-for-token exchange
/// and the profile fetch. A seam so the state machine can be driven without
/// the network.
#[allow(async_fn_in_trait)]
pub trait TokenExchange {
    async fn exchange(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
        client_id: &str,
    ) -> Result<Token, AuthError>;

    async fn fetch_profile(&self, token: &str) -> Result<Profile, AuthError>;
}

/// Where the authentication flow currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    AwaitingRedirect,
    Exchanging,
    FetchingProfile,
    Authenticated,
    Failed(AuthError),
}

/// The PKCE authorization flow as an explicit state machine.
///
/// Control leaves the process entirely while the user authorizes in the
/// browser, so the only resumption token is the persisted verifier: a fresh
/// controller over the same [`SessionStore`] can complete a flow started
/// before a restart. Completion is guarded against duplicate delivery of the
/// same redirect, and the verifier is consumed exactly once.
pub struct AuthFlow<C> {
    session: SessionStore,
    client: C,
    client_id: String,
    redirect_uri: String,
    state: FlowState,
}

/// Shared handle used between the CLI auth command and the callback server.
pub type SharedFlow = Arc<Mutex<AuthFlow<SpotifyClient>>>;

impl<C: TokenExchange> AuthFlow<C> {
    pub fn new(session: SessionStore, client: C, client_id: String, redirect_uri: String) -> Self {
        AuthFlow {
            session,
            client,
            client_id,
            redirect_uri,
            state: FlowState::Idle,
        }
    }

    /// Rehydrates the flow from persisted storage: an existing access token
    /// means the session is already authenticated.
    pub async fn resume(
        session: SessionStore,
        client: C,
        client_id: String,
        redirect_uri: String,
    ) -> Self {
        let persisted = session.load().await;
        let mut flow = Self::new(session, client, client_id, redirect_uri);
        if persisted.is_authenticated() {
            flow.state = FlowState::Authenticated;
        }
        flow
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Reads the persisted session snapshot.
    pub async fn session(&self) -> Session {
        self.session.load().await
    }

    /// Starts a new flow attempt: generates a fresh verifier/challenge pair,
    /// persists the verifier and returns the authorization URL to navigate
    /// to. Valid from `Idle`, from `AwaitingRedirect` (a restarted attempt
    /// overwrites the pending verifier) and from `Failed`.
    pub async fn start(&mut self) -> Result<String, AuthError> {
        if self.state == FlowState::Authenticated {
            return Err(AuthError::AlreadyAuthenticated);
        }

        let verifier = utils::generate_code_verifier(VERIFIER_LENGTH);
        let challenge = utils::generate_code_challenge(&verifier);

        self.session
            .save_pending_verifier(&verifier)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let url = authorize_url(&self.client_id, &self.redirect_uri, &challenge);
        self.state = FlowState::AwaitingRedirect;
        Ok(url)
    }

    /// Completes the flow from the provider's callback parameters, raw as
    /// received (query string, fragment-routed, or a full URL).
    ///
    /// A repeated delivery of an already-processed code is a no-op: the
    /// exchange runs at most once per code. All other failure points move the
    /// flow to `Failed` with a distinguishable reason; a `Failed` flow can be
    /// restarted with [`AuthFlow::start`].
    pub async fn complete_from_redirect(&mut self, raw: &str) -> Result<(), AuthError> {
        let params = CallbackParams::parse(raw);

        if let Some(reason) = params.error {
            return self.fail(AuthError::AuthRejected(reason));
        }

        let Some(code) = params.code else {
            return self.fail(AuthError::MissingCode);
        };

        if !self.session.mark_code_processed(&code) {
            // duplicate delivery of the same redirect
            return Ok(());
        }

        let Some(verifier) = self.session.take_pending_verifier().await else {
            return self.fail(AuthError::MissingVerifier);
        };

        self.state = FlowState::Exchanging;
        let token = match self
            .client
            .exchange(&code, &verifier, &self.redirect_uri, &self.client_id)
            .await
        {
            Ok(token) => token,
            Err(e) => return self.fail(e),
        };

        if let Err(e) = self.session.save_token(&token.access_token).await {
            return self.fail(AuthError::Storage(e.to_string()));
        }

        self.state = FlowState::FetchingProfile;
        let profile = match self.client.fetch_profile(&token.access_token).await {
            Ok(profile) => profile,
            // token stays persisted: it is independently valid
            Err(e) => return self.fail(e),
        };

        if let Err(e) = self.session.save_profile(&profile).await {
            return self.fail(AuthError::Storage(e.to_string()));
        }

        self.state = FlowState::Authenticated;
        Ok(())
    }

    /// Clears all session data and returns to `Idle`. Valid from any state.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.session
            .clear()
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.state = FlowState::Idle;
        Ok(())
    }

    fn fail(&mut self, reason: AuthError) -> Result<(), AuthError> {
        self.state = FlowState::Failed(reason.clone());
        Err(reason)
    }
}

/// Builds the provider authorization URL for a challenge. `show_dialog=true`
/// forces a fresh consent prompt on every attempt.
fn authorize_url(client_id: &str, redirect_uri: &str, challenge: &str) -> String {
    let url = reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("scope", config::SPOTIFY_AUTH_SCOPE),
            ("code_challenge_method", "S256"),
            ("code_challenge", challenge),
            ("show_dialog", "true"),
        ],
    );

    match url {
        Ok(url) => url.to_string(),
        // only reachable with a malformed SPOTIFY_API_AUTH_URL
        Err(e) => panic!("invalid authorization endpoint: {}", e),
    }
}
