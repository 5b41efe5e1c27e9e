use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use log::*;
use ordercast_engine::{
    events::{EventHandlers, EventHooks, EventProducers, OrderCreatedEvent, OrderUpdatedEvent},
    run_migrations,
    sessions::SessionStore,
    AuthApi,
    OrderFlowApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    event_stream::EventHub,
    routes::{
        health,
        AdminOrdersRoute,
        LoginRoute,
        OrderStreamRoute,
        SubmitOrderRoute,
        UpdateOrderStatusRoute,
    },
    sweep_worker::start_sweep_worker,
};

/// Capacity of each event hook channel between the order flow and the hub.
const EVENT_BUFFER_SIZE: usize = 128;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    run_migrations(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.seed_admin {
        let auth_api = AuthApi::new(db.clone());
        auth_api
            .seed_admin(&config.admin_username, &config.admin_password)
            .await
            .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }

    // Session map and live-subscriber set are process-wide singletons; the workers only ever see them through
    // these two handles.
    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    let hub = Arc::new(EventHub::new(Arc::clone(&sessions)));
    let producers = start_event_pipeline(Arc::clone(&hub)).await;
    let _sweeper = start_sweep_worker(Arc::clone(&sessions), Arc::clone(&hub), config.sweep_period);

    let srv = create_server_instance(config, db, sessions, hub, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Wires the engine's order hooks to the hub and starts the handler tasks, returning the producers the order
/// flow api publishes into.
pub async fn start_event_pipeline(hub: Arc<EventHub>) -> EventProducers {
    let mut hooks = EventHooks::default();
    let created_hub = Arc::clone(&hub);
    hooks.on_order_created(move |ev: OrderCreatedEvent| {
        let hub = Arc::clone(&created_hub);
        Box::pin(async move {
            hub.broadcast("order_created", &ev.order);
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks.on_order_updated(move |ev: OrderUpdatedEvent| {
        let hub = Arc::clone(&hub);
        Box::pin(async move {
            hub.broadcast("order_updated", &ev.order);
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    producers
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    sessions: Arc<SessionStore>,
    hub: Arc<EventHub>,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let sessions = web::Data::from(sessions);
    let hub = web::Data::from(hub);
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let auth_api = AuthApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("oc::access_log"))
            .app_data(sessions.clone())
            .app_data(hub.clone())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(auth_api))
            .service(health)
            .service(SubmitOrderRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(AdminOrdersRoute::<SqliteDatabase>::new())
            .service(UpdateOrderStatusRoute::<SqliteDatabase>::new())
            .service(OrderStreamRoute::new())
    })
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("💻️ Server bound to {}:{}", config.host, config.port);
    Ok(srv)
}
