use crate::config::Config;
use crate::data::{Catalog, ScheduleConflict, Timetable};
use crate::error::GenerationError;
use crate::run::{GenerationRun, Generator};
use crate::settings::GenerationSettings;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use log::info;
use std::sync::Arc;

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = match &self {
            GenerationError::RunInProgress => StatusCode::CONFLICT,
            GenerationError::ConflictNotFound(_) | GenerationError::NoCompletedRun => {
                StatusCode::NOT_FOUND
            }
            GenerationError::NoActiveAcademicYear | GenerationError::EmptyClassCatalog(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            GenerationError::WorkerAborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

async fn load_catalog_handler(
    State(generator): State<Arc<Generator>>,
    Json(catalog): Json<Catalog>,
) -> StatusCode {
    generator.load_catalog(catalog).await;
    StatusCode::NO_CONTENT
}

async fn generate_handler(
    State(generator): State<Arc<Generator>>,
    Json(settings): Json<GenerationSettings>,
) -> Result<(StatusCode, Json<GenerationRun>), GenerationError> {
    let run = generator.start(settings).await?;
    Ok((StatusCode::ACCEPTED, Json(run)))
}

async fn run_handler(
    State(generator): State<Arc<Generator>>,
) -> Result<Json<GenerationRun>, StatusCode> {
    generator.observe().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn timetable_handler(
    State(generator): State<Arc<Generator>>,
) -> Result<Json<Timetable>, GenerationError> {
    generator
        .timetable()
        .await
        .map(Json)
        .ok_or(GenerationError::NoCompletedRun)
}

async fn resolve_conflict_handler(
    State(generator): State<Arc<Generator>>,
    Path(conflict_id): Path<String>,
) -> Result<Json<ScheduleConflict>, GenerationError> {
    generator.resolve_conflict(&conflict_id).await.map(Json)
}

pub fn router(generator: Arc<Generator>) -> Router {
    Router::new()
        .route("/v1/catalog", put(load_catalog_handler))
        .route("/v1/schedule/generate", post(generate_handler))
        .route("/v1/schedule/run", get(run_handler))
        .route("/v1/schedule/timetable", get(timetable_handler))
        .route(
            "/v1/schedule/conflicts/:conflict_id/resolve",
            post(resolve_conflict_handler),
        )
        .with_state(generator)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let app = router(Arc::new(config.generator()));

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
