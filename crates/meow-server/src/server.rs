//! Axum web server for the add-on endpoints

use crate::error::ApiError;
use crate::workspace::{self, ActionEndpoints, RenderAction, RenderActions, WorkspaceEvent};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use meow_core::{ActionResponse, CatAddOn, MeowConfig};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
pub struct AppState {
    pub addon: CatAddOn,
    pub endpoints: ActionEndpoints,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &MeowConfig) -> Self {
        Self {
            addon: CatAddOn::new(config),
            endpoints: ActionEndpoints::new(config.server.public_url.clone()),
        }
    }
}

/// Build the router
pub fn router(app_state: SharedState) -> Router {
    Router::new()
        .route("/homepage", post(homepage))
        .route("/contextual", post(contextual))
        .route("/change-cat", post(change_cat))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Serve the endpoints
pub async fn serve(config: MeowConfig, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState::new(&config)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// POST /homepage - greeting card
async fn homepage(
    State(app): State<SharedState>,
    Json(event): Json<WorkspaceEvent>,
) -> Result<Json<RenderAction>, ApiError> {
    let card = app.addon.on_homepage(&event.to_homepage_event()?)?;
    let response = ActionResponse::push(card);
    Ok(Json(workspace::translate_response(&response, &app.endpoints)))
}

/// POST /contextual - card captioned with the current context
async fn contextual(
    State(app): State<SharedState>,
    Json(event): Json<WorkspaceEvent>,
) -> Result<Json<RenderAction>, ApiError> {
    let card = app.addon.on_contextual(&event.to_contextual_event()?)?;
    let response = ActionResponse::push(card);
    Ok(Json(workspace::translate_response(&response, &app.endpoints)))
}

/// POST /change-cat - replace the current card with a new cat
async fn change_cat(
    State(app): State<SharedState>,
    Json(event): Json<WorkspaceEvent>,
) -> Result<Json<RenderActions>, ApiError> {
    let response = app.addon.on_change_cat(&event.to_action_event())?;
    Ok(Json(RenderActions {
        render_actions: workspace::translate_response(&response, &app.endpoints),
    }))
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "meow-server"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn state() -> SharedState {
        let mut config = MeowConfig::default();
        config.server.public_url = "https://meow.example.com".into();
        Arc::new(AppState::new(&config))
    }

    fn event(json: serde_json::Value) -> Json<WorkspaceEvent> {
        Json(serde_json::from_value(json).unwrap())
    }

    #[tokio::test]
    async fn test_homepage_pushes_card() {
        let Json(response) = homepage(
            State(state()),
            event(serde_json::json!({
                "commonEventObject": {"hostApp": "GMAIL", "timeZone": {"id": "UTC"}}
            })),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(response).unwrap();
        let card = &json["action"]["navigations"][0]["pushCard"];
        assert!(card.get("peekCardHeader").is_none());

        let url = card["sections"][0]["widgets"][0]["image"]["imageUrl"]
            .as_str()
            .unwrap();
        assert!(url.starts_with("https://cataas.com/cat/says/Good%20"), "{url}");
        assert!(url.contains("%20gmail?time="), "{url}");
    }

    #[tokio::test]
    async fn test_homepage_bad_timezone_is_bad_request() {
        let err = homepage(
            State(state()),
            event(serde_json::json!({
                "commonEventObject": {"hostApp": "GMAIL", "timeZone": {"id": "Not/AZone"}}
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_contextual_pushes_peek_header() {
        let Json(response) = contextual(
            State(state()),
            event(serde_json::json!({
                "commonEventObject": {"hostApp": "DRIVE"},
                "drive": {"selectedItems": [{"title": "Q3 plan"}]}
            })),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(response).unwrap();
        let header = &json["action"]["navigations"][0]["pushCard"]["peekCardHeader"];
        assert_eq!(header["title"], "Contextual Cat");
        assert_eq!(header["subtitle"], "Q3 plan");
    }

    #[tokio::test]
    async fn test_change_cat_updates_card() {
        let Json(response) = change_cat(
            State(state()),
            event(serde_json::json!({
                "commonEventObject": {
                    "hostApp": "GMAIL",
                    "parameters": {"text": "Hi", "isHomepage": "false"}
                }
            })),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(response).unwrap();
        let card = &json["renderActions"]["action"]["navigations"][0]["updateCard"];
        assert_eq!(card["peekCardHeader"]["subtitle"], "Hi");
        assert_eq!(
            card["sections"][0]["widgets"][1]["buttonList"]["buttons"][0]["onClick"]["action"]
                ["function"],
            "https://meow.example.com/change-cat"
        );
    }

    #[tokio::test]
    async fn test_change_cat_without_parameters() {
        let err = change_cat(
            State(state()),
            event(serde_json::json!({"commonEventObject": {"hostApp": "GMAIL"}})),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
