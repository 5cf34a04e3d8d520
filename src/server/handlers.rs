use super::{error::ApiError, AppState};
use crate::core::types::{Component, Direction, OutputFormat};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct DependencyQuery {
    pub recursive: Option<String>,
    pub format: Option<String>,
}

impl DependencyQuery {
    /// Only the literal `true` turns on the transitive closure.
    pub fn is_recursive(&self) -> bool {
        self.recursive.as_deref() == Some("true")
    }

    pub fn output_format(&self) -> Result<OutputFormat, ApiError> {
        match self.format.as_deref() {
            None | Some("") => Ok(OutputFormat::Json),
            Some(name) => Ok(name.parse()?),
        }
    }
}

pub async fn list_types(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let mut resolver = state.resolver.lock().await;
    Ok(Json(resolver.describe().await?))
}

pub async fn list_components(
    State(state): State<AppState>,
    Path(component_type): Path<String>,
) -> Result<Json<Vec<Component>>, ApiError> {
    let mut resolver = state.resolver.lock().await;
    Ok(Json(resolver.list(&component_type).await?))
}

pub async fn usage(
    State(state): State<AppState>,
    Path((component_type, id)): Path<(String, String)>,
    Query(query): Query<DependencyQuery>,
) -> Result<Response, ApiError> {
    resolve(state, Direction::Backward, component_type, id, query).await
}

pub async fn references(
    State(state): State<AppState>,
    Path((component_type, id)): Path<(String, String)>,
    Query(query): Query<DependencyQuery>,
) -> Result<Response, ApiError> {
    resolve(state, Direction::Forward, component_type, id, query).await
}

async fn resolve(
    state: AppState,
    direction: Direction,
    component_type: String,
    id: String,
    query: DependencyQuery,
) -> Result<Response, ApiError> {
    // Reject the format before doing any remote work.
    let format = query.output_format()?;
    let recursive = query.is_recursive();

    let components = {
        let mut resolver = state.resolver.lock().await;
        match direction {
            Direction::Backward => resolver.usage(&component_type, &id, recursive).await?,
            Direction::Forward => resolver.references(&component_type, &id, recursive).await?,
        }
    };

    let rendered = state.serializer.render(&components, format)?;
    let headers = [(header::CONTENT_TYPE, rendered.content_type)];
    Ok((headers, rendered.body).into_response())
}

pub async fn quit(State(state): State<AppState>) -> StatusCode {
    info!("Shutdown requested over HTTP");
    state.shutdown.notify_one();
    StatusCode::ACCEPTED
}
