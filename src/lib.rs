pub mod auth;
mod commands;
pub mod document;
pub mod planner;
pub mod state;
pub mod store;
pub mod types;
pub mod util;

use std::sync::Arc;

use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            use tauri::Manager;
            app.manage(Arc::new(AppState::new()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Config
            commands::get_config,
            commands::reload_configuration,
            // Session
            commands::login,
            commands::logout,
            commands::current_user,
            // Trips
            commands::new_trip,
            commands::list_trips,
            commands::load_trip,
            commands::save_trip,
            commands::delete_trip,
            commands::add_point_of_interest,
            // Planner
            commands::planner_status,
            commands::plan_trip,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
