use actix_web::{
    body::MessageBody,
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{Duration, TimeZone, Utc};
use log::debug;
use oc_common::Money;
use ordercast_engine::{
    db_types::{Admin, Order, OrderItem, OrderStatusType},
    sessions::SessionStore,
};

pub async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

/// A session store with one live session, plus its token.
pub fn session_fixture() -> (web::Data<SessionStore>, String) {
    let store = SessionStore::new(Duration::hours(1));
    let token = store.issue(&admin_with_hash(""));
    (web::Data::new(store), token)
}

pub fn admin_with_hash(password_hash: &str) -> Admin {
    Admin {
        id: 1,
        username: "admin".to_string(),
        password_hash: password_hash.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    }
}

// Mock response used by the order route tests.
pub fn sample_order() -> Order {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 13, 30, 0).unwrap();
    Order {
        id: 1,
        customer_name: "Nid".to_string(),
        table_no: "T3".to_string(),
        note: "no chili".to_string(),
        status: OrderStatusType::Pending,
        total: Money::from(135),
        created_at: created,
        updated_at: created,
        items: vec![
            OrderItem {
                id: 1,
                order_id: 1,
                name: "Pad Thai".to_string(),
                price: Money::from(60),
                qty: 2,
                image: None,
            },
            OrderItem {
                id: 2,
                order_id: 1,
                name: "Tea".to_string(),
                price: Money::from(15),
                qty: 1,
                image: None,
            },
        ],
    }
}
