use actix_web::{http::StatusCode, test::TestRequest, web::ServiceConfig};

use super::helpers::send_request;
use crate::routes::health;

#[actix_web::test]
async fn health_reports_ok_and_the_current_time() {
    let (status, body) = send_request(TestRequest::get().uri("/health"), |cfg: &mut ServiceConfig| {
        cfg.service(health);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["ok"], true);
    assert!(body["now"].is_i64());
}
