//! HTTP tests for the session API.

use actix_web::{test, web::Data, App};
use court_rotation_web::api::{self, SessionEntry, SessionId};
use court_rotation_web::config::AppConfig;
use court_rotation_web::{storage, Player};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use tempfile::TempDir;

fn test_config() -> AppConfig {
    AppConfig {
        auto_assign: false,
        court_count: 2,
        ..AppConfig::default()
    }
}

macro_rules! app {
    () => {
        app!(test_config())
    };
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new())))
                .app_data(Data::new($config))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_is_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn front_page_is_html() {
    let app = app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[actix_web::test]
async fn session_flow_add_queue_and_auto_assign() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "court_count": 1 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["state"]["court_count"], 1);
    assert_eq!(body["state"]["auto_assign"], false);

    let mut player_ids = Vec::new();
    for name in ["Amy", "Bo", "Cy", "Di"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/players"))
            .set_json(json!({ "name": name, "gender": "female", "level": 5 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["notices"][0]["kind"], "player_added");
        player_ids.push(body["notices"][0]["player_id"].as_str().unwrap().to_string());
    }

    let dispatch = |action: Value| {
        test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/actions"))
            .set_json(action)
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(
        &app,
        dispatch(json!({ "type": "drop_player_in_queue", "player_id": player_ids[0] })),
    )
    .await;
    let group_id = body["state"]["waiting_queue"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(body["state"]["waiting_queue"][0]["players"][0]["is_queuing"], true);

    for pid in &player_ids[1..] {
        let req = dispatch(json!({ "type": "drop_player_on_group", "player_id": pid, "group_id": group_id }));
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::put()
        .uri(&format!("/api/sessions/{id}/auto-assign"))
        .set_json(json!({ "enabled": true }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["notices"][1]["kind"], "group_assigned");
    assert_eq!(body["notices"][1]["severity"], "success");
    assert_eq!(body["state"]["courts"][0]["is_active"], true);
    assert!(body["state"]["courts"][0]["started_at"].is_string());
    assert_eq!(body["state"]["courts"][0]["group"]["players"][0]["is_playing"], true);
    assert_eq!(body["state"]["waiting_queue"].as_array().unwrap().len(), 0);

    let court_id = body["state"]["courts"][0]["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{id}/courts/{court_id}/finish"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["state"]["standby"].as_array().unwrap().len(), 4);
    assert!(body["state"]["courts"][0]["started_at"].is_null());
    assert_eq!(body["state"]["roster"][0]["games_played"], 1);
}

#[actix_web::test]
async fn rejected_action_is_a_bad_request_with_severity() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/sessions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["id"].as_str().unwrap().to_string();
    let court_id = body["state"]["courts"][0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{id}/courts/{court_id}/finish"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["severity"], "warning");
}

#[actix_web::test]
async fn unknown_session_is_not_found() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn csv_import_adds_players_and_reports_duplicates() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/sessions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{id}/roster/import"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("name,gender,level\nAmy,f,9\nBo,m,4\namy,f,2\n")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["session"]["state"]["standby"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"][0]["name"], "amy");

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{id}/roster"))
        .to_request();
    let roster: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(roster.as_array().unwrap().len(), 2);
    assert_eq!(roster[0]["level"], 9);
}

#[actix_web::test]
async fn idle_sessions_are_removed() {
    let sessions = RwLock::new(HashMap::<SessionId, SessionEntry>::new());
    sessions.write().unwrap().insert(
        uuid::Uuid::new_v4(),
        SessionEntry {
            system: Default::default(),
            last_activity: std::time::Instant::now(),
        },
    );
    assert_eq!(api::remove_idle_sessions(&sessions, std::time::Duration::from_secs(3600)), 0);
    assert_eq!(api::remove_idle_sessions(&sessions, std::time::Duration::ZERO), 1);
}

#[actix_web::test]
async fn sessions_share_the_roster_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    let app = app!(AppConfig {
        roster_file: Some(path.clone()),
        ..test_config()
    });

    let mut sessions = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post().uri("/api/sessions").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        sessions.push(body["id"].as_str().unwrap().to_string());
    }

    let mut added = Vec::new();
    for (id, name) in sessions.iter().zip(["Nora", "Nils"]) {
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/players"))
            .set_json(json!({ "name": name }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        added.push(body["notices"][0]["player_id"].as_str().unwrap().to_string());
    }

    let names = |players: Vec<Player>| players.into_iter().map(|p| p.name).collect::<Vec<_>>();
    assert_eq!(names(storage::load_roster(&path)), ["Nora", "Nils"]);

    // An unrelated action in the first session must not drop the second session's player.
    let court_id = {
        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", sessions[0]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        body["state"]["courts"][0]["id"].as_str().unwrap().to_string()
    };
    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{}/actions", sessions[0]))
        .set_json(json!({ "type": "rename_court", "court_id": court_id, "name": "Center" }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
    assert_eq!(names(storage::load_roster(&path)), ["Nora", "Nils"]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/sessions/{}/players/{}", sessions[0], added[0]))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
    assert_eq!(names(storage::load_roster(&path)), ["Nils"]);

    let req = test::TestRequest::post().uri("/api/sessions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["state"]["standby"][0]["name"], "Nils");
}
