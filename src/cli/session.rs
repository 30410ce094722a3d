use crate::{error, info, management::SessionStore, success, warning};

/// Clears the persisted session: token, profile and any pending verifier.
pub async fn logout() {
    let store = SessionStore::open();
    match store.clear().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to clear session: {}", e),
    }
}

/// Prints the cached user profile.
pub async fn whoami() {
    let session = SessionStore::open().load().await;
    match session.user {
        Some(profile) => {
            let name = profile
                .display_name
                .clone()
                .unwrap_or_else(|| profile.id.clone());
            info!("Logged in as {} ({})", name, profile.id);
            if let Some(email) = &profile.email {
                info!("Email: {}", email);
            }
            if let Some(image) = profile.images.first() {
                info!("Avatar: {}", image.url);
            }
        }
        None => {
            if session.is_authenticated() {
                warning!("Authenticated, but no cached profile. Run topalcli auth again.");
            } else {
                warning!("Not authenticated. Please run topalcli auth");
            }
        }
    }
}
