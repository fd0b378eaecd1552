// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    apply_date_range, clear_date_range, get_dashboard, get_thresholds, health_check,
    list_structures, remove_file, reset_thresholds, run_analysis, save_thresholds, select_structure,
    session_status, set_location, set_scope, set_threshold_bound, stream_notifications,
    upload_file,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Responses are compressed in the handlers, so no CompressionLayer here.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/structures", get(list_structures))
        .route("/session", get(session_status))
        .route("/session/file", put(upload_file).delete(remove_file))
        .route("/session/structure", put(select_structure))
        .route("/session/location", put(set_location))
        .route("/analysis", post(run_analysis))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/range", put(apply_date_range).delete(clear_date_range))
        .route("/dashboard/scope", put(set_scope))
        .route("/thresholds", get(get_thresholds).put(save_thresholds))
        .route("/thresholds/reset", post(reset_thresholds))
        .route("/thresholds/:kind/:bound", put(set_threshold_bound))
        .route("/notifications", get(stream_notifications))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::infrastructure::broadcast_notifier::BroadcastNotifier;
    use crate::infrastructure::mock_analysis::MockAnalysisProvider;
    use axum::body::Body;
    use axum::http::{header, Method, Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let notifier = BroadcastNotifier::new(16);
        let dashboard_service = DashboardService::new(
            Arc::new(MockAnalysisProvider::new(0, 100)),
            Arc::new(notifier.clone()),
            50 * 1024 * 1024,
        );
        build_router(Arc::new(AppState {
            dashboard_service,
            notifier,
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn prepare_session(app: &Router) {
        let response = send(
            app,
            Method::PUT,
            "/session/file",
            Some(json!({ "name": "bridge.csv", "size": 4096 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            app,
            Method::PUT,
            "/session/structure",
            Some(json!({ "structure": "bridge" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            app,
            Method::PUT,
            "/session/location",
            Some(json!({ "lat": "40.7128", "lng": "-74.0060" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = send(&app(), Method::GET, "/healthz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analysis_requires_setup() {
        let response = send(&app(), Method::POST, "/analysis", None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["code"], "MISSING_REQUIREMENTS");
    }

    #[tokio::test]
    async fn test_dashboard_after_analysis() {
        let app = app();
        prepare_session(&app).await;

        let response = send(&app, Method::POST, "/analysis", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        // S004 strain 110 breaches 100 (medium), S003 stays under 50 °C
        assert_eq!(json["alert_count"], 1);
        assert_eq!(json["alerts"][0]["sensor_id"], "S004");
        assert_eq!(json["alerts"][0]["severity"], "medium");
        assert_eq!(json["alert_banner"], "1 Active Alert");
        assert_eq!(json["time_series"].as_array().unwrap().len(), 100);
        assert_eq!(json["statistics"][0]["kind"], "strain");
        assert_eq!(json["statistics"][0]["avg"], 16.8);
    }

    #[tokio::test]
    async fn test_date_range_far_in_past_empties_series() {
        let app = app();
        prepare_session(&app).await;
        send(&app, Method::POST, "/analysis", None).await;

        let response = send(
            &app,
            Method::PUT,
            "/dashboard/range",
            Some(json!({ "from": "2000-01-01", "to": "2000-01-02" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["time_series"].as_array().unwrap().is_empty());

        let response = send(&app, Method::DELETE, "/dashboard/range", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let json = body_json(send(&app, Method::GET, "/dashboard", None).await).await;
        assert_eq!(json["time_series"].as_array().unwrap().len(), 100);
    }

    #[tokio::test]
    async fn test_threshold_edits() {
        let app = app();

        let response = send(
            &app,
            Method::PUT,
            "/thresholds/strain/min",
            Some(json!({ "value": "abc" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["thresholds"]["strain"]["min"], -100.0);

        let response = send(
            &app,
            Method::PUT,
            "/thresholds/strain/min",
            Some(json!({ "value": "200" })),
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["thresholds"]["strain"]["min"], 200.0);
        assert_eq!(json["validation"][0]["status"], "range-invalid");

        let response = send(&app, Method::POST, "/thresholds/reset", None).await;
        let json = body_json(response).await;
        assert_eq!(json["thresholds"]["strain"]["min"], -100.0);
        assert_eq!(json["thresholds"]["temperature"]["max"], 50.0);
        assert_eq!(json["validation"][0]["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_bound_is_bad_request() {
        let response = send(
            &app(),
            Method::PUT,
            "/thresholds/strain/middle",
            Some(json!({ "value": "1" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_unsupported_upload() {
        let response = send(
            &app(),
            Method::PUT,
            "/session/file",
            Some(json!({ "name": "notes.txt", "size": 10 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
