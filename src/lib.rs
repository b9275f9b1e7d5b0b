pub mod api;
pub mod attendance;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod session;
mod utils;

use std::sync::Arc;

use api::ApiClient;
use config::AppConfig;
use dashboard::{
    commands::{
        close_attendance_dialog, enter_challenge_digit, get_clock, get_dashboard,
        mount_dashboard, open_attendance_dialog, refresh_attendance, regenerate_challenge,
        submit_attendance,
    },
    ClockTicker, DashboardController, CLOCK_EVENT,
};
use log::warn;
use session::{
    commands::{initial_route, login, logout},
    SessionStore,
};
use tauri::{Emitter, Manager};

pub struct AppState {
    pub(crate) api: ApiClient,
    pub(crate) store: Arc<SessionStore>,
    pub(crate) dashboard: DashboardController,
    pub(crate) clock: ClockTicker,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = AppConfig::from_env();

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .init();

    log::info!(
        "Registro de Asistencias starting ({:?}, endpoint {})",
        config.platform,
        config.endpoint()
    );

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let store = Arc::new(SessionStore::new(app_data_dir.join("session.json"))?);
                if let Some(session) = store.current() {
                    log::info!("Restored session for {}", session.user);
                }

                let api = ApiClient::new(&config);
                let dashboard = DashboardController::new(api.clone(), store.clone());
                let clock = ClockTicker::default();

                let handle = app.handle().clone();
                let ticker = clock.clone();
                tauri::async_runtime::block_on(async move {
                    ticker
                        .start(move |reading| {
                            if let Err(err) = handle.emit(CLOCK_EVENT, &reading) {
                                warn!("Failed to emit clock tick: {err}");
                            }
                        })
                        .await;
                });

                app.manage(AppState {
                    api,
                    store,
                    dashboard,
                    clock,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                let state = window.state::<AppState>();
                let clock = state.clock.clone();
                tauri::async_runtime::block_on(async move { clock.stop().await });
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Session
            login,
            logout,
            initial_route,
            // Dashboard
            mount_dashboard,
            get_dashboard,
            refresh_attendance,
            regenerate_challenge,
            enter_challenge_digit,
            open_attendance_dialog,
            close_attendance_dialog,
            submit_attendance,
            get_clock,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
