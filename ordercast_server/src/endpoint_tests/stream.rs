use std::sync::Arc;

use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use chrono::Duration;
use ordercast_engine::sessions::SessionStore;

use super::helpers::admin_with_hash;
use crate::{event_stream::EventHub, routes::OrderStreamRoute};

fn stream_fixture(ttl: Duration) -> (Arc<SessionStore>, Arc<EventHub>) {
    let sessions = Arc::new(SessionStore::new(ttl));
    let hub = Arc::new(EventHub::new(Arc::clone(&sessions)));
    (sessions, hub)
}

#[actix_web::test]
async fn a_stream_connect_without_a_token_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let (sessions, hub) = stream_fixture(Duration::hours(1));
    let app = App::new()
        .app_data(web::Data::from(Arc::clone(&sessions)))
        .app_data(web::Data::from(Arc::clone(&hub)))
        .service(OrderStreamRoute::new());
    let service = test::init_service(app).await;

    let res =
        test::call_service(&service, TestRequest::get().uri("/admin/orders/stream").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test::call_service(
        &service,
        TestRequest::get().uri("/admin/orders/stream?token=deadbeef").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hub.subscriber_count(), 0, "rejected connections are never registered");
}

#[actix_web::test]
async fn an_expired_token_is_rejected_before_registration() {
    let _ = env_logger::try_init().ok();
    let (sessions, hub) = stream_fixture(Duration::milliseconds(-1));
    let token = sessions.issue(&admin_with_hash(""));
    let app = App::new()
        .app_data(web::Data::from(Arc::clone(&sessions)))
        .app_data(web::Data::from(Arc::clone(&hub)))
        .service(OrderStreamRoute::new());
    let service = test::init_service(app).await;

    let uri = format!("/admin/orders/stream?token={token}");
    let res = test::call_service(&service, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hub.subscriber_count(), 0);
}

#[actix_web::test]
async fn a_valid_token_opens_a_live_event_stream() {
    let _ = env_logger::try_init().ok();
    let (sessions, hub) = stream_fixture(Duration::hours(1));
    let token = sessions.issue(&admin_with_hash(""));
    let app = App::new()
        .app_data(web::Data::from(Arc::clone(&sessions)))
        .app_data(web::Data::from(Arc::clone(&hub)))
        .service(OrderStreamRoute::new());
    let service = test::init_service(app).await;

    let uri = format!("/admin/orders/stream?token={token}");
    let res = test::call_service(&service, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "text/event-stream");
    assert_eq!(hub.subscriber_count(), 1);

    // Tearing the response down is a client disconnect: the subscriber must leave the live set.
    drop(res);
    assert_eq!(hub.subscriber_count(), 0);
}
