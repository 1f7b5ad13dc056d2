use tracing::info;

use crate::{
    auth::google::GoogleIdentity,
    state::AppState,
    users::repo_types::{NewUser, User},
};

/// Stored as-is for accounts created through Google. It is not a PHC hash,
/// so password login can never succeed for such an account.
pub const OAUTH_PLACEHOLDER_PASSWORD: &str = "123";

pub const DEFAULT_ROLE: &str = "USER_ROLE";

/// Returns the local user for a verified Google identity, creating it on
/// first sign-in.
pub async fn find_or_create_google_user(
    state: &AppState,
    identity: GoogleIdentity,
) -> anyhow::Result<User> {
    if let Some(user) = state.users.find_by_email(&identity.email).await? {
        return Ok(user);
    }

    let user = state
        .users
        .create(NewUser {
            name: identity.name.unwrap_or_else(|| identity.email.clone()),
            email: identity.email,
            password: OAUTH_PLACEHOLDER_PASSWORD.to_string(),
            image: identity.picture,
            role: DEFAULT_ROLE.to_string(),
            google: true,
        })
        .await?;
    info!(user_id = %user.id, email = %user.email, "user created from google sign-in");
    Ok(user)
}
