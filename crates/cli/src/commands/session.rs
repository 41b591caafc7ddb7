//! Sign-in, sign-out and backend status.

use serde_json::json;
use storedash_admin::ApiClient;
use tracing::info;

use super::{CommandError, print_json};

/// Sign in and persist the session.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<(), CommandError> {
    let pair = client.login(email, password).await?;
    let user = match pair.user {
        Some(user) => user,
        None => client.me().await?,
    };

    info!(email = %user.email, role = %user.role, "Signed in");
    print_json(&json!({
        "signedIn": true,
        "user": user,
    }))
}

/// End the session. The local session is cleared even if the backend call
/// fails.
pub async fn logout(client: &ApiClient) -> Result<(), CommandError> {
    client.logout().await?;
    print_json(&json!({ "signedIn": false }))
}

/// Show the signed-in user, falling back to the cached profile when the
/// backend cannot be reached.
pub async fn whoami(client: &ApiClient) -> Result<(), CommandError> {
    if !client.has_token().await {
        return print_json(&json!({ "signedIn": false }));
    }

    match client.me().await {
        Ok(user) => print_json(&json!({ "signedIn": true, "user": user })),
        Err(e) if e.is_retryable() => {
            let Some(user) = client.cached_user() else {
                return Err(e.into());
            };
            tracing::warn!(error = %e, "Backend unreachable, showing cached profile");
            print_json(&json!({ "signedIn": true, "cached": true, "user": user }))
        }
        Err(e) => Err(e.into()),
    }
}

/// Report backend health.
pub async fn health(client: &ApiClient) -> Result<(), CommandError> {
    let status = client.health_check().await?;
    print_json(&json!({
        "baseUrl": client.base_url().as_str(),
        "status": status.status,
        "up": status.is_up(),
    }))
}
