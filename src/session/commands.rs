use serde::Serialize;
use tauri::State;

use crate::{navigation::Route, AppState};

use super::login as auth;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub route: Route,
    pub short_name: String,
}

#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    username: String,
    password: String,
) -> Result<LoginOutcome, String> {
    let session = auth::login(&state.api, &state.store, &username, &password).await?;
    Ok(LoginOutcome {
        route: Route::Dashboard,
        short_name: session.short_name(),
    })
}

#[tauri::command]
pub async fn logout(state: State<'_, AppState>) -> Result<Route, String> {
    Ok(state.dashboard.logout().await?)
}

/// Where the app should open: straight to the dashboard if a session survived.
#[tauri::command]
pub fn initial_route(state: State<'_, AppState>) -> Route {
    if state.store.current().is_some() {
        Route::Dashboard
    } else {
        Route::Login
    }
}
