//! # Service Status Endpoints
//!
//! Lightweight read-only endpoints for clients and monitoring:
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | service name, version, description, configured models |
//! | `GET /health` | liveness probe, always `healthy` while the process answers |
//! | `GET /stats` | processing statistics since startup |
//!
//! None of these touch the filesystem or wait on the enhancer; they only read
//! the shared state, so they stay responsive while long uploads are running.

use crate::config::{SERVICE_DESCRIPTION, SERVICE_NAME};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// `GET /` - service metadata.
pub async fn service_info(state: web::Data<AppState>) -> HttpResponse {
    let config = state.config();

    HttpResponse::Ok().json(json!({
        "service": SERVICE_NAME,
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
        "description": SERVICE_DESCRIPTION,
        "uptime_seconds": state.uptime_seconds(),
        "models": {
            "demucs": config.models.demucs_model,
            "spleeter": config.models.spleeter_model,
            "loaded": state.enhancer().models_loaded()
        },
        "audio": {
            "default_sample_rate": config.audio.default_sample_rate,
            "default_bit_depth": config.audio.default_bit_depth
        }
    }))
}

/// `GET /health` - liveness probe for monitoring systems.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "audio-enhancer",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `GET /stats` - processing statistics since startup.
pub async fn processing_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.enhancer().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_root_reports_service_metadata() {
        let state = AppState::new(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/", web::get().to(service_info)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["service"], SERVICE_NAME);
        assert_eq!(body["status"], "active");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["models"]["demucs"], "htdemucs");
        assert_eq!(body["models"]["loaded"], false);
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().route("/health", web::get().to(health_check))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "audio-enhancer");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[actix_web::test]
    async fn test_stats_start_at_zero() {
        let state = AppState::new(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/stats", web::get().to(processing_stats)),
        )
        .await;

        let req = test::TestRequest::get().uri("/stats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_files_processed"], 0);
        assert_eq!(body["average_processing_time"], 0.0);
        assert_eq!(body["models_loaded"], false);
        assert_eq!(body["service_status"], "active");
    }
}
