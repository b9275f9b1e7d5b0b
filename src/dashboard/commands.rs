use tauri::State;

use crate::{log_warn, AppState};

use super::{
    clock::ClockReading,
    state::DashboardSnapshot,
    DashboardController,
};

const ENABLE_LOGS: bool = true;

fn controller_from_state(state: &State<'_, AppState>) -> DashboardController {
    state.dashboard.clone()
}

#[tauri::command]
pub async fn mount_dashboard(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).mount().await)
}

#[tauri::command]
pub async fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).snapshot().await)
}

/// Load failures are reported through the snapshot's `error` field.
#[tauri::command]
pub async fn refresh_attendance(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    let controller = controller_from_state(&state);
    if let Err(err) = controller.refresh().await {
        log_warn!("Manual refresh failed: {err}");
    }
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn regenerate_challenge(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).regenerate_challenge().await?)
}

#[tauri::command]
pub async fn enter_challenge_digit(
    state: State<'_, AppState>,
    position: usize,
    value: String,
) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state)
        .enter_digit(position, &value)
        .await)
}

#[tauri::command]
pub async fn open_attendance_dialog(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).open_dialog().await)
}

#[tauri::command]
pub async fn close_attendance_dialog(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).close_dialog().await)
}

#[tauri::command]
pub async fn submit_attendance(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(controller_from_state(&state).submit().await?)
}

#[tauri::command]
pub fn get_clock() -> ClockReading {
    ClockReading::now()
}
