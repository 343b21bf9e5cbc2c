use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;

use crate::config::FIXTURE_CACHE_CONTROL;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);
    Json(serde_json::json!({
        "status": "ok",
        "fixture_source": state.fixture_source.as_str(),
        "player_data_bytes": state.fixtures.player_data.len(),
        "player_clears_bytes": state.fixtures.player_clears.len(),
        "uptime_secs": uptime_secs,
    }))
}

/// Serve the pre-serialized player summary document.
pub async fn get_player_data(State(state): State<AppState>) -> impl IntoResponse {
    json_bytes_response(state.fixtures.player_data.clone(), FIXTURE_CACHE_CONTROL)
}

/// Serve the pre-serialized per-activity clear history document.
pub async fn get_player_clears(State(state): State<AppState>) -> impl IntoResponse {
    json_bytes_response(state.fixtures.player_clears.clone(), FIXTURE_CACHE_CONTROL)
}

fn json_bytes_response(body: Bytes, cache_control: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    response
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use chrono::NaiveDate;
    use radindex_shared::profile::{ActivityKind, ClearsDocument, PlayerSummary};

    use crate::fixtures::{FixtureSource, generate_bodies};
    use crate::state::AppState;

    async fn spawn_test_server(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = crate::app::build_app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }

    fn test_state() -> AppState {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let bodies = generate_bodies(11, today).expect("generate fixtures");
        AppState::new(
            bodies,
            FixtureSource::Generated,
            std::env::temp_dir().join("radindex-no-static"),
        )
    }

    #[tokio::test]
    async fn profile_documents_round_trip_over_http() {
        let (addr, server_handle) = spawn_test_server(test_state()).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        let summary = client
            .get(format!("{base_url}/player-data.json"))
            .send()
            .await
            .expect("player data request")
            .error_for_status()
            .expect("player data status")
            .json::<PlayerSummary>()
            .await
            .expect("parse player data");
        assert_eq!(summary.name, "PlayerName");

        let history = client
            .get(format!("{base_url}/player-clears-data.json"))
            .send()
            .await
            .expect("clears request")
            .error_for_status()
            .expect("clears status")
            .json::<ClearsDocument>()
            .await
            .expect("parse clears");
        let first_raid = &summary.activities.raids[0].activity_name;
        assert!(!history.clears_for(ActivityKind::Raid, first_raid).is_empty());

        let health = client
            .get(format!("{base_url}/api/health"))
            .send()
            .await
            .expect("health request")
            .error_for_status()
            .expect("health status")
            .json::<serde_json::Value>()
            .await
            .expect("parse health");
        assert_eq!(health.get("status").and_then(|v| v.as_str()), Some("ok"));
        assert_eq!(
            health.get("fixture_source").and_then(|v| v.as_str()),
            Some("generated")
        );

        server_handle.abort();
        let _ = server_handle.await;
    }
}
