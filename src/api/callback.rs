use axum::{Extension, extract::RawQuery, response::Html};

use crate::{management::SharedFlow, warning};

/// OAuth callback handler.
///
/// Passes the raw query on to the auth flow untouched; the flow accepts both
/// query and fragment encodings, guards against duplicate delivery of the
/// same code, and surfaces a distinguishable failure reason. The HTML body is
/// only ever seen in the user's browser tab.
pub async fn callback(
    RawQuery(query): RawQuery,
    Extension(shared_flow): Extension<SharedFlow>,
) -> Html<&'static str> {
    let raw = query.unwrap_or_default();

    let mut flow = shared_flow.lock().await;
    match flow.complete_from_redirect(&raw).await {
        Ok(()) => Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            warning!("Authentication failed: {}", e);
            Html("<h4>Login failed. Check the terminal for details.</h4>")
        }
    }
}
