//! CORS 설정

use actix_cors::Cors;
use actix_web::http::header;

use crate::config::GatewayConfig;

/// 허용 Origin 목록으로 CORS 미들웨어를 구성합니다.
///
/// `*`가 포함되면 모든 Origin을 허용하며, 이때는 자격 증명을 지원하지 않습니다.
pub fn configure_cors(config: &GatewayConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{source_of, GatewayConfig};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_preflight_for_allowed_origin() {
        let config = GatewayConfig::from_source(&source_of(&[]));
        let app = test::init_service(
            App::new()
                .wrap(configure_cors(&config))
                .route("/api/v1/translate", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/v1/translate")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
    }
}
