//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the engine backend traits so the endpoint tests can run them against mocks; actix
//! cannot register generic handlers directly, which is what the `route!` macro is for.

use actix_web::{get, http::header, web, HttpResponse, Responder};
use chrono::Utc;
use log::*;
use ordercast_engine::{
    order_objects::OrderSubmission,
    sessions::SessionStore,
    AdminManagement,
    AuthApi,
    OrderFlowApi,
    OrderManagement,
};
use serde_json::json;

use crate::{
    auth::AdminClaims,
    data_objects::{LoginRequest, StatusUpdateRequest, StreamQuery},
    errors::{AuthError, ServerError},
    event_stream::EventHub,
};

// Actix cannot handle generics in handlers, so routes are implemented manually using the `route!` macro.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>]; }
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(json!({ "ok": true, "now": Utc::now().timestamp_millis() }))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(submit_order => Post "/orders" impl OrderManagement);
/// Route handler for customer order intake.
///
/// The body is entirely untrusted; the engine normalizes it before anything touches storage. A submission whose
/// items all normalize away is a 400 and persists nothing.
pub async fn submit_order<B: OrderManagement>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<OrderSubmission>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received new order submission");
    let order = api.submit_order(body.into_inner()).await?;
    info!("💻️📦️ Order #{} accepted for {} ({})", order.id, order.customer_name, order.total);
    Ok(HttpResponse::Created().json(json!({
        "message": "Order received",
        "orderId": order.id,
        "total": order.total,
    })))
}

route!(admin_orders => Get "/admin/orders" impl OrderManagement);
pub async fn admin_orders<B: OrderManagement>(
    claims: AdminClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for {}", claims.username);
    let orders = api.orders().await?;
    Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

route!(update_order_status => Patch "/admin/orders/{id}/status" impl OrderManagement);
pub async fn update_order_status<B: OrderManagement>(
    claims: AdminClaims,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let status = body.into_inner().status.unwrap_or_default();
    let order = api.set_order_status(id, &status).await?;
    info!("💻️🔄️ {} set order #{} to {}", claims.username, order.id, order.status);
    Ok(HttpResponse::Ok().json(json!({ "message": "Status updated", "order": order })))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(login => Post "/admin/login" impl AdminManagement);
/// Route handler for the login endpoint.
///
/// On success a fresh session token is issued. The token is the only credential subsequent requests carry; it
/// expires after the configured TTL and is never renewed, so clients log in again when it lapses.
pub async fn login<B: AdminManagement>(
    api: web::Data<AuthApi<B>>,
    sessions: web::Data<SessionStore>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received login request");
    let LoginRequest { username, password } = body.into_inner();
    let (username, password) = match (username, password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => (u, p),
        _ => return Err(ServerError::InvalidRequestBody("username and password are required".to_string())),
    };
    let admin = api.authenticate(username.trim(), &password).await?;
    let token = sessions.issue(&admin);
    info!("💻️🔑️ {} logged in", admin.username);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token,
        "admin": { "id": admin.id, "username": admin.username },
        "expiresInMs": sessions.ttl().num_milliseconds(),
    })))
}

//----------------------------------------------   Stream  ----------------------------------------------------
route!(order_stream => Get "/admin/orders/stream");
/// Route handler for the admin event stream.
///
/// Authenticates once, from the `token` query parameter, then stays open until the client disconnects. All later
/// liveness checks happen inside the hub's broadcast pass, not here.
pub async fn order_stream(
    query: web::Query<StreamQuery>,
    sessions: web::Data<SessionStore>,
    hub: web::Data<EventHub>,
) -> Result<HttpResponse, ServerError> {
    let token = query.into_inner().token.unwrap_or_default();
    if sessions.validate(&token).is_none() {
        debug!("💻️📡️ Stream connection rejected: invalid or expired token");
        return Err(AuthError::InvalidToken.into());
    }
    let stream = hub.into_inner().register(token);
    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(stream))
}
