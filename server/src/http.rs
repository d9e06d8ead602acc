use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, Method, header},
    response::IntoResponse,
    routing::{get, post},
};
use entity::{Compensation, Employee, ReportingStructure};
use platform_api::ApiResult;
use products_hr::EmployeeService;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee records server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employee", post(create_employee_handler))
        .route(
            "/employee/{id}",
            get(read_employee_handler).put(update_employee_handler),
        )
        .route("/reportingStructure/{id}", get(reporting_structure_handler))
        .route("/compensation", post(create_compensation_handler))
        .route("/compensation/{id}", get(read_compensation_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(allow_origin)
}

async fn create_employee_handler(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> ApiResult<Json<Employee>> {
    debug!("received employee create request");
    state.service.create_employee(employee).await.map(Json)
}

async fn read_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    debug!(employee_id = %id, "received employee read request");
    state.service.read_employee(&id).await.map(Json)
}

async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(employee): Json<Employee>,
) -> ApiResult<Json<Employee>> {
    debug!(employee_id = %id, "received employee update request");
    state.service.update_employee(&id, employee).await.map(Json)
}

async fn reporting_structure_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReportingStructure>> {
    debug!(employee_id = %id, "received reporting structure request");
    state.service.reporting_structure(&id).await.map(Json)
}

async fn create_compensation_handler(
    State(state): State<AppState>,
    Json(compensation): Json<Compensation>,
) -> ApiResult<Json<Compensation>> {
    debug!(
        employee_id = %compensation.employee.employee_id,
        "received compensation create request"
    );
    state
        .service
        .create_compensation(compensation)
        .await
        .map(Json)
}

async fn read_compensation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Compensation>> {
    debug!(employee_id = %id, "received compensation read request");
    state.service.compensation_for_employee(&id).await.map(Json)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
