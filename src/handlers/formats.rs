//! `GET /formats` - the upload allow-list, straight from the configuration constants.

use crate::config::SUPPORTED_FORMATS;
use actix_web::HttpResponse;
use serde_json::json;

/// `GET /formats` - extensions accepted by `POST /process`.
pub async fn supported_formats() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "supported_formats": SUPPORTED_FORMATS,
        "description": "Audio formats supported for processing"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_lists_every_supported_format() {
        let app = test::init_service(App::new().route("/formats", web::get().to(supported_formats))).await;

        let req = test::TestRequest::get().uri("/formats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let formats: Vec<&str> = body["supported_formats"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(formats, vec![".wav", ".mp3", ".flac", ".m4a", ".aac", ".ogg"]);
        assert_eq!(body["description"], "Audio formats supported for processing");
    }
}
