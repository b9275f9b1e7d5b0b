use crate::{
    api::ApiClient,
    error::{AppError, AppResult},
    log_info, log_warn,
};

use super::{Session, SessionStore};

const ENABLE_LOGS: bool = true;

/// Resolves credentials to a person.
///
/// Tries the server's exact `user`/`pass` filter first. An empty answer falls
/// back to scanning the full listing for a case-insensitive username whose
/// national id equals the password.
pub async fn authenticate(api: &ApiClient, username: &str, password: &str) -> AppResult<Session> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let exact = api.lookup_credentials(username, password).await?;
    if let Some(person) = exact.into_iter().next() {
        return Ok(person.into());
    }

    log_info!("No exact match for '{}', scanning full listing", username.trim());
    let listing = api.list_people().await?;
    listing
        .into_iter()
        .find(|person| person.matches_credentials(username, password))
        .map(Session::from)
        .ok_or_else(|| {
            log_warn!("Login rejected for '{}'", username.trim());
            AppError::InvalidCredentials
        })
}

/// Authenticates and persists the resulting session, replacing any previous one.
pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> AppResult<Session> {
    let session = authenticate(api, username, password).await?;
    store.save(session.clone())?;
    Ok(session)
}

/// Clears persisted client state.
pub fn logout(store: &SessionStore) -> AppResult<()> {
    store.clear()?;
    log_info!("Session cleared");
    Ok(())
}
