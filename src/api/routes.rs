//! HTTP API Route Definitions

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{AppState, handlers};

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let settings = Router::new()
        .route(
            "/",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/export", get(handlers::export_settings))
        .route("/import", post(handlers::import_settings))
        .route("/reset", post(handlers::reset_settings))
        .route("/upload-logo", post(handlers::upload_logo))
        .route(
            "/maintenance/modules/:module_id",
            put(handlers::set_module),
        )
        .route(
            "/:section",
            get(handlers::get_section).put(handlers::update_section),
        );

    let centers = Router::new()
        .route(
            "/",
            get(handlers::list_centers).post(handlers::create_center),
        )
        .route("/:id", get(handlers::get_center))
        .route("/:id/worker", put(handlers::assign_worker));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/settings", settings)
        .nest("/api/centers", centers)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Result<Router> {
        let db = setup_test_db().await?;
        Ok(create_router(AppState::new(db)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_raw(app, method, uri, body.map(|body| body.to_string())).await
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_settings_creates_defaults() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(&app, "GET", "/api/settings", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["general"]["systemName"], "SampoornaAangan");
        assert_eq!(body["security"]["sessionTimeout"], 24);
        assert_eq!(body["maintenance"]["modules"]["attendance"], true);
        Ok(())
    }

    #[tokio::test]
    async fn test_section_missing_before_first_read() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(&app, "GET", "/api/settings/health", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Settings not found");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_section_is_not_found() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;

        let (status, body) = send(&app, "GET", "/api/settings/billing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Settings section not found");
        assert!(body["error"].as_str().unwrap().contains("billing"));
        Ok(())
    }

    #[tokio::test]
    async fn test_section_update_merges() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;
        send(
            &app,
            "PUT",
            "/api/settings/general",
            Some(json!({ "district": "Kottayam" })),
        )
        .await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/settings/general",
            Some(json!({ "state": "Kerala" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["district"], "Kottayam");
        assert_eq!(body["state"], "Kerala");
        Ok(())
    }

    #[tokio::test]
    async fn test_put_settings_rejects_unknown_provider() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/settings",
            Some(json!({ "notifications": { "emailConfig": { "provider": "unknown-provider" } } })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        Ok(())
    }

    #[tokio::test]
    async fn test_module_flag_route() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/settings/maintenance/modules/waste",
            Some(json!({ "enabled": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["waste"], false);
        assert_eq!(body["attendance"], true);

        let (_, maintenance) = send(&app, "GET", "/api/settings/maintenance", None).await;
        assert_eq!(maintenance["modules"]["waste"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_and_import_routes() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;
        send(
            &app,
            "PUT",
            "/api/settings/general",
            Some(json!({ "district": "Ernakulam" })),
        )
        .await;

        let (status, export) = send(&app, "GET", "/api/settings/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(export["version"], "1.0");
        assert_eq!(export["settings"]["general"]["district"], "Ernakulam");

        let other = test_app().await?;
        let (status, imported) = send(&other, "POST", "/api/settings/import", Some(export)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(imported["general"]["district"], "Ernakulam");
        assert!(imported.get("id").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_upload_logo_and_reset() -> Result<()> {
        let app = test_app().await?;

        let (status, general) = send(
            &app,
            "POST",
            "/api/settings/upload-logo",
            Some(json!({ "logo": "/uploads/logo.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(general["logo"], "/uploads/logo.png");

        let (status, settings) = send(&app, "POST", "/api/settings/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settings["general"]["logo"], "");
        Ok(())
    }

    #[tokio::test]
    async fn test_center_routes() -> Result<()> {
        let app = test_app().await?;

        let (status, created) = send(
            &app,
            "POST",
            "/api/centers",
            Some(json!({ "name": "Kumarakom AWC", "district": "Kottayam" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, assigned) = send(
            &app,
            "PUT",
            &format!("/api/centers/{id}/worker"),
            Some(json!({ "workerId": "worker-7" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(assigned["workerId"], "worker-7");

        let (status, list) = send(&app, "GET", "/api/centers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "GET", "/api/centers/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", "/api/centers", Some(json!({ "name": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_module_flag_rejects_non_boolean() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/settings/maintenance/modules/waste",
            Some(json!({ "enabled": "no" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert!(body["error"].is_string());

        let (_, maintenance) = send(&app, "GET", "/api/settings/maintenance", None).await;
        assert_eq!(maintenance["modules"]["waste"], true);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() -> Result<()> {
        let app = test_app().await?;
        send(&app, "GET", "/api/settings", None).await;

        let (status, body) = send_raw(
            &app,
            "PUT",
            "/api/settings/general",
            Some(r#"{"district": "Kott"#.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert!(body["error"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_center_without_name_is_bad_request() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(
            &app,
            "POST",
            "/api/centers",
            Some(json!({ "district": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");

        let (_, list) = send(&app, "GET", "/api/centers", None).await;
        assert!(list.as_array().unwrap().is_empty());
        Ok(())
    }
}
