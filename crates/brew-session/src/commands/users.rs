//! # Admin User Commands
//!
//! The user list with its Customers / Admins tabs, and the revoke and
//! restore buttons. Revoking only flips `isActive` on the profile; the
//! auth provider is what turns an inactive account away at sign-in.

use tracing::{debug, info};

use brew_core::{Role, UserProfile};

use crate::error::ApiError;
use crate::session::Session;
use crate::store::UserDirectory;

/// Registered users, optionally narrowed to one role, sorted by name.
pub async fn list_users(
    session: &Session,
    users: &dyn UserDirectory,
    role: Option<Role>,
) -> Result<Vec<UserProfile>, ApiError> {
    session.require_admin()?;
    debug!(?role, "list_users command");

    let mut profiles: Vec<UserProfile> = users
        .list_users()
        .await?
        .into_iter()
        .filter(|user| role.map_or(true, |r| user.role == r))
        .collect();
    profiles.sort_by_cached_key(|user| user.full_name().to_lowercase());

    Ok(profiles)
}

/// Revokes (`active == false`) or restores a user's access.
///
/// ## Errors
/// - `FORBIDDEN` for non-admins, or an admin revoking themselves
/// - `NOT_FOUND` for an unknown user
pub async fn set_user_active(
    session: &Session,
    users: &dyn UserDirectory,
    user_id: &str,
    active: bool,
) -> Result<UserProfile, ApiError> {
    session.require_admin()?;
    debug!(user_id, active, "set_user_active command");

    if !active && user_id == session.user_id() {
        return Err(ApiError::forbidden("Admins cannot revoke their own access"));
    }

    users.set_active(user_id, active).await?;
    let profile = users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    info!(user_id, is_active = active, "User access changed");
    Ok(profile)
}
