// SPDX-License-Identifier: GPL-3.0-only
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::api::extract::JsonBody;
use crate::api::handlers::{ApiHandlers, ListQuery};
use crate::config::Config;
use crate::error::Result;
use crate::parking::ParkingSpotService;
use crate::registry::{Page, ParkingSpot, ParkingSpotInput};

pub struct HttpServer {
    handlers: Arc<ApiHandlers>,
    addr: SocketAddr,
    cors_max_age: Duration,
}

impl HttpServer {
    pub fn new(service: ParkingSpotService, config: &Config) -> Self {
        Self {
            handlers: Arc::new(ApiHandlers::new(
                service,
                config.default_page_size,
                config.max_page_size,
            )),
            addr: config.api_bind,
            cors_max_age: Duration::from_secs(config.cors_max_age_secs),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(self.cors_max_age);

        Router::new()
            .route(
                "/parking-spot",
                get(list_parking_spots_handler).post(create_parking_spot_handler),
            )
            .route(
                "/parking-spot/:id",
                get(get_parking_spot_handler)
                    .put(update_parking_spot_handler)
                    .delete(delete_parking_spot_handler),
            )
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.handlers.clone())
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        info!(addr = %self.addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

async fn create_parking_spot_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    JsonBody(input): JsonBody<ParkingSpotInput>,
) -> Result<(StatusCode, Json<ParkingSpot>)> {
    handlers.create_parking_spot(input).await
}

async fn list_parking_spots_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ParkingSpot>>> {
    handlers.list_parking_spots(query).await
}

async fn get_parking_spot_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ParkingSpot>> {
    handlers.get_parking_spot(id).await
}

async fn update_parking_spot_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    Path(id): Path<Uuid>,
    JsonBody(input): JsonBody<ParkingSpotInput>,
) -> Result<Json<ParkingSpot>> {
    handlers.update_parking_spot(id, input).await
}

async fn delete_parking_spot_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, &'static str)> {
    handlers.delete_parking_spot(id).await
}
