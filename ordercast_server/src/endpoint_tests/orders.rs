use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use oc_common::Money;
use ordercast_engine::{db_types::OrderStatusType, OrderFlowApi, OrderFlowError};
use serde_json::json;

use super::{
    helpers::{bearer, sample_order, send_request, session_fixture},
    mocks::MockOrderDb,
};
use crate::routes::{AdminOrdersRoute, SubmitOrderRoute, UpdateOrderStatusRoute};

#[actix_web::test]
async fn submitting_a_valid_order_returns_201() {
    let _ = env_logger::try_init().ok();
    let mut db = MockOrderDb::new();
    db.expect_create_order()
        .withf(|order| order.total == Money::from(135) && order.items.len() == 2)
        .returning(|_| Ok(sample_order()));
    let api = OrderFlowApi::new(db, Default::default());
    let req = TestRequest::post().uri("/orders").set_json(json!({
        "customerName": "Nid",
        "tableNo": "T3",
        "note": "no chili",
        "items": [
            { "name": "Pad Thai", "price": 60, "qty": 2 },
            { "name": "Tea", "price": 15, "qty": 1 },
        ],
    }));
    let (status, body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(SubmitOrderRoute::<MockOrderDb>::new()).app_data(web::Data::new(api));
    })
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Order received");
    assert_eq!(body["orderId"], 1);
    assert_eq!(body["total"], 135);
}

#[actix_web::test]
async fn an_order_with_no_usable_items_never_reaches_the_store() {
    let _ = env_logger::try_init().ok();
    // No expectations are set: a storage call would panic the mock, proving validation runs first.
    let db = MockOrderDb::new();
    let api = OrderFlowApi::new(db, Default::default());
    let req = TestRequest::post()
        .uri("/orders")
        .set_json(json!({ "items": [ { "name": "", "price": 10, "qty": 1 } ] }));
    let (status, _body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(SubmitOrderRoute::<MockOrderDb>::new()).app_data(web::Data::new(api));
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn listing_orders_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let (sessions, _token) = session_fixture();
    let db = MockOrderDb::new();
    let api = OrderFlowApi::new(db, Default::default());
    let req = TestRequest::get().uri("/admin/orders");
    let (status, _body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(AdminOrdersRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn an_expired_token_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let store = ordercast_engine::sessions::SessionStore::new(chrono::Duration::milliseconds(-1));
    let token = store.issue(&super::helpers::admin_with_hash(""));
    let sessions = web::Data::new(store);
    let db = MockOrderDb::new();
    let api = OrderFlowApi::new(db, Default::default());
    let req = bearer(TestRequest::get().uri("/admin/orders"), &token);
    let (status, _body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(AdminOrdersRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn listing_orders_returns_the_order_payloads() {
    let _ = env_logger::try_init().ok();
    let (sessions, token) = session_fixture();
    let mut db = MockOrderDb::new();
    db.expect_fetch_orders().returning(|| Ok(vec![sample_order()]));
    let api = OrderFlowApi::new(db, Default::default());
    let req = bearer(TestRequest::get().uri("/admin/orders"), &token);
    let (status, body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(AdminOrdersRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["orders"][0]["customerName"], "Nid");
    assert_eq!(body["orders"][0]["status"], "pending");
    assert_eq!(body["orders"][0]["items"][0]["name"], "Pad Thai");
    assert_eq!(body["orders"][0]["items"][1]["price"], 15);
}

#[actix_web::test]
async fn updating_a_status_returns_the_updated_order() {
    let _ = env_logger::try_init().ok();
    let (sessions, token) = session_fixture();
    let mut db = MockOrderDb::new();
    db.expect_update_order_status()
        .withf(|id, status| *id == 1 && *status == OrderStatusType::Served)
        .returning(|_, _| {
            let mut order = sample_order();
            order.status = OrderStatusType::Served;
            Ok(order)
        });
    let api = OrderFlowApi::new(db, Default::default());
    // Mixed case on purpose: matching is case-insensitive.
    let req = bearer(TestRequest::patch().uri("/admin/orders/1/status"), &token)
        .set_json(json!({ "status": "Served" }));
    let (status, body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(UpdateOrderStatusRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Status updated");
    assert_eq!(body["order"]["status"], "served");
}

#[actix_web::test]
async fn an_unknown_status_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let (sessions, token) = session_fixture();
    let db = MockOrderDb::new();
    let api = OrderFlowApi::new(db, Default::default());
    let req = bearer(TestRequest::patch().uri("/admin/orders/1/status"), &token)
        .set_json(json!({ "status": "delivered" }));
    let (status, _body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(UpdateOrderStatusRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn updating_a_missing_order_is_not_found() {
    let _ = env_logger::try_init().ok();
    let (sessions, token) = session_fixture();
    let mut db = MockOrderDb::new();
    db.expect_update_order_status().returning(|id, _| Err(OrderFlowError::OrderNotFound(id)));
    let api = OrderFlowApi::new(db, Default::default());
    let req = bearer(TestRequest::patch().uri("/admin/orders/9999/status"), &token)
        .set_json(json!({ "status": "served" }));
    let (status, _body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(UpdateOrderStatusRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn storage_failures_stay_generic() {
    let _ = env_logger::try_init().ok();
    let (sessions, token) = session_fixture();
    let mut db = MockOrderDb::new();
    db.expect_fetch_orders()
        .returning(|| Err(OrderFlowError::DatabaseError("disk I/O error at offset 4096".to_string())));
    let api = OrderFlowApi::new(db, Default::default());
    let req = bearer(TestRequest::get().uri("/admin/orders"), &token);
    let (status, body) = send_request(req, move |cfg: &mut ServiceConfig| {
        cfg.service(AdminOrdersRoute::<MockOrderDb>::new())
            .app_data(web::Data::new(api))
            .app_data(sessions);
    })
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("disk I/O"), "storage detail must never leak: {body}");
}
