//! Configuration endpoint handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use strata_store::strata_core::{ConfigDocument, ConfigKey, Format, Project};
use strata_store::{ConfigInfo, Pagination, VersionPage};

use crate::error::AppError;
use crate::extractors::{ConfigPath, FormatQuery, MutationQuery, ProjectPath, RecoverPath, VersionsQuery};
use crate::handlers::request::ConfigPayload;
use crate::handlers::response::{
    CreatedResponse, DeletedResponse, RecoveredResponse, UpdatedResponse,
};
use crate::settings::Settings;
use crate::state::AppState;

/// Handler for POST /configs/{project}/{name}.
#[instrument(skip_all, fields(project = %path.project, name = %path.name))]
pub async fn create_config(
    State(state): State<AppState>,
    Path(path): Path<ConfigPath>,
    Query(query): Query<FormatQuery>,
    Json(payload): Json<ConfigPayload>,
) -> Result<Json<CreatedResponse>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    let outcome = state
        .store()
        .create(&key, &payload.content, payload.message)
        .await?;

    Ok(Json(CreatedResponse {
        message: format!(
            "Config {} created successfully as version {}",
            path.name, outcome.version
        ),
        commit_sha: outcome.commit_sha,
    }))
}

/// Handler for GET /configs/{project}/{name}.
#[instrument(skip_all, fields(project = %path.project, name = %path.name))]
pub async fn read_config(
    State(state): State<AppState>,
    Path(path): Path<ConfigPath>,
    Query(query): Query<FormatQuery>,
) -> Result<Json<ConfigDocument>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    let document = state.store().read(&key).await?;
    Ok(Json(document))
}

/// Handler for PUT /configs/{project}/{name}.
#[instrument(skip_all, fields(project = %path.project, name = %path.name))]
pub async fn update_config(
    State(state): State<AppState>,
    Path(path): Path<ConfigPath>,
    Query(query): Query<FormatQuery>,
    Json(payload): Json<ConfigPayload>,
) -> Result<Json<UpdatedResponse>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    let outcome = state
        .store()
        .update(&key, &payload.content, payload.message)
        .await?;

    Ok(Json(UpdatedResponse {
        message: format!("Config {} updated successfully", path.name),
        version: outcome.version,
        commit_sha: outcome.commit_sha,
    }))
}

/// Handler for DELETE /configs/{project}/{name}.
#[instrument(skip_all, fields(project = %path.project, name = %path.name))]
pub async fn delete_config(
    State(state): State<AppState>,
    Path(path): Path<ConfigPath>,
    Query(query): Query<MutationQuery>,
) -> Result<Json<DeletedResponse>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    state.store().delete(&key, query.message).await?;

    Ok(Json(DeletedResponse {
        message: format!("Config {} deleted successfully", path.name),
    }))
}

/// Handler for GET /configs/{project}.
#[instrument(skip_all, fields(project = %path.project))]
pub async fn list_configs(
    State(state): State<AppState>,
    Path(path): Path<ProjectPath>,
) -> Result<Json<Vec<ConfigInfo>>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;

    let configs = state
        .store()
        .list_configs(&Project::new(path.project))
        .await?;
    Ok(Json(configs))
}

/// Handler for GET /configs/{project}/{name}/versions.
#[instrument(skip_all, fields(project = %path.project, name = %path.name, skip = query.skip, limit = query.limit))]
pub async fn list_versions(
    State(state): State<AppState>,
    Path(path): Path<ConfigPath>,
    Query(query): Query<VersionsQuery>,
) -> Result<Json<VersionPage>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    let page = state
        .store()
        .list_versions(
            &key,
            Pagination {
                skip: query.skip,
                limit: query.limit,
            },
        )
        .await?;
    Ok(Json(page))
}

/// Handler for POST /configs/{project}/{name}/recover/{version}.
#[instrument(skip_all, fields(project = %path.project, name = %path.name, version = path.version))]
pub async fn recover_config(
    State(state): State<AppState>,
    Path(path): Path<RecoverPath>,
    Query(query): Query<MutationQuery>,
) -> Result<Json<RecoveredResponse>, AppError> {
    path.validate().map_err(AppError::BadRequest)?;
    let key = resolve_key(state.settings(), &path.project, &path.name, &query.format)?;

    let outcome = state
        .store()
        .recover(&key, path.version, query.message)
        .await?;

    Ok(Json(RecoveredResponse {
        message: format!(
            "Config {} restored to version {}",
            path.name, outcome.original_version
        ),
        original_version: outcome.original_version,
        new_version: outcome.new_version,
        commit_sha: outcome.commit_sha,
    }))
}

/// Parses the format parameter and checks it against the deployment's
/// supported set. Unknown and disabled formats fail the same way.
fn resolve_key(
    settings: &Settings,
    project: &str,
    name: &str,
    format: &str,
) -> Result<ConfigKey, AppError> {
    let parsed = format
        .parse::<Format>()
        .map_err(|_| unsupported(format))?;
    if !settings.is_supported(parsed) {
        return Err(unsupported(format));
    }
    Ok(ConfigKey::new(project, name, parsed))
}

fn unsupported(format: &str) -> AppError {
    AppError::BadRequest(format!("Unsupported format: {format}"))
}
