use std::{collections::HashMap, net::TcpListener, sync::Arc};

use axum::{Router, extract::{Query, State}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Response}, routing::get, Json};
use serde_json::{json, Value};
use tokio::{sync::RwLock, task::JoinHandle};

type QueryMap = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub route: String,
    pub query: QueryMap,
    pub headers: HashMap<String, String>,
}

#[derive(Default)]
pub struct AppState {
    pub teams: Value,
    pub standings: Value,
    pub fixtures: HashMap<String, Value>,
    pub statistics: HashMap<String, Value>,
    pub failures: HashMap<String, u32>,
    pub calls: Vec<RecordedCall>,
}

pub type SafeAppState = Arc<RwLock<AppState>>;

/// Stand-in for the sports API, serving whatever payloads a test registers.
pub struct ExternalServer {
    port: u16,
    handles: Vec<JoinHandle<()>>,
    pub api_state: SafeAppState,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl ExternalServer {
    pub fn new() -> ExternalServer {
        ExternalServer { port: 0, handles: vec![], api_state: Arc::new(RwLock::new(AppState::default())) }
    }

    pub async fn start(&mut self) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
        self.port = listener.local_addr().expect("should have address").port();

        let app = Router::new()
            .route("/teams", get(ExternalServer::get_teams))
            .route("/standings", get(ExternalServer::get_standings))
            .route("/fixtures", get(ExternalServer::get_fixtures))
            .route("/fixtures/statistics", get(ExternalServer::get_statistics))
            .route("/not-json", get(|| async { "<html>rate limited</html>" }))
            .with_state(self.api_state.clone());

        let server = axum::Server::from_tcp(listener)
            .expect("listener should be usable")
            .serve(app.into_make_service());
        self.handles.push(tokio::spawn(async move {
            server.await.expect("mock server should run");
        }));
    }

    pub fn get_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub async fn set_teams(&self, body: Value) {
        self.api_state.write().await.teams = body;
    }

    pub async fn set_standings(&self, body: Value) {
        self.api_state.write().await.standings = body;
    }

    pub async fn add_fixtures(&self, team_id: i64, body: Value) {
        self.api_state.write().await.fixtures.insert(team_id.to_string(), body);
    }

    pub async fn add_statistics(&self, fixture_id: i64, body: Value) {
        self.api_state.write().await.statistics.insert(fixture_id.to_string(), body);
    }

    /// The next `times` calls to `route` answer 500.
    pub async fn fail_next(&self, route: &str, times: u32) {
        self.api_state.write().await.failures.insert(route.to_string(), times);
    }

    pub async fn calls(&self, route: &str) -> Vec<RecordedCall> {
        self.api_state.read().await.calls.iter()
            .filter(|e| e.route == route)
            .cloned()
            .collect()
    }

    async fn get_teams(State(state): State<SafeAppState>, headers: HeaderMap, Query(query): Query<QueryMap>) -> Response {
        ExternalServer::respond(state, "teams", headers, query, |s, _| s.teams.clone()).await
    }

    async fn get_standings(State(state): State<SafeAppState>, headers: HeaderMap, Query(query): Query<QueryMap>) -> Response {
        ExternalServer::respond(state, "standings", headers, query, |s, _| s.standings.clone()).await
    }

    async fn get_fixtures(State(state): State<SafeAppState>, headers: HeaderMap, Query(query): Query<QueryMap>) -> Response {
        ExternalServer::respond(state, "fixtures", headers, query, |s, q| {
            q.get("team")
                .and_then(|e| s.fixtures.get(e))
                .cloned()
                .unwrap_or_else(|| json!({ "response": [] }))
        }).await
    }

    async fn get_statistics(State(state): State<SafeAppState>, headers: HeaderMap, Query(query): Query<QueryMap>) -> Response {
        ExternalServer::respond(state, "statistics", headers, query, |s, q| {
            q.get("fixture")
                .and_then(|e| s.statistics.get(e))
                .cloned()
                .unwrap_or_else(|| json!({ "response": [] }))
        }).await
    }

    async fn respond<F>(state: SafeAppState, route: &str, headers: HeaderMap, query: QueryMap, body: F) -> Response
    where
        F: FnOnce(&AppState, &QueryMap) -> Value,
    {
        let mut state = state.write().await;
        let headers = headers.iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        state.calls.push(RecordedCall { route: route.to_string(), query: query.clone(), headers });

        if let Some(left) = state.failures.get_mut(route) {
            if *left > 0 {
                *left -= 1;
                return (StatusCode::INTERNAL_SERVER_ERROR, "try again").into_response();
            }
        }
        Json(body(&*state, &query)).into_response()
    }
}
