//! Single binary web server: front page at /, assets under /static, rotation API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Configure with env: HOST, PORT, COURT_COUNT, MAX_COURTS, AUTO_ASSIGN, ROSTER_FILE,
//! DEMO_PLAYERS, SESSION_TIMEOUT_HOURS.

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use court_rotation_web::api::{self, SessionEntry, SessionId};
use court_rotation_web::config::AppConfig;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

/// How often idle sessions are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if let Some(path) = &config.roster_file {
        log::info!("Roster file: {}", path.display());
    }

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));
    let config = Data::new(config);

    // Background task: remove sessions idle for longer than the configured timeout
    let state_cleanup = state.clone();
    let timeout = config.session_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = api::remove_idle_sessions(&state_cleanup, timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive session(s) (no activity for {}h)",
                    removed,
                    timeout.as_secs() / 3600
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .configure(api::configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
