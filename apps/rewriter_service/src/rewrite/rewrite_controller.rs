use axum::{
    response::Html,
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde::Serialize;

use super::page::render_page;
use super::rewrite_service::{PassOutcome, RewriteService};
use super::types::RewriteForm;
use crate::app_module::AppState;
use crate::error::RewriteError;

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub text: String,
}

pub fn rewrite_page_router() -> Router {
    Router::new().route("/", get(show_page).post(submit_page))
}

pub fn rewrite_api_router() -> Router {
    Router::new().route("/v1/rewrite", post(rewrite))
}

pub async fn show_page() -> Result<Html<String>, RewriteError> {
    let html = render_page(&RewriteForm::default(), &PassOutcome::CollectingInputs)?;
    Ok(Html(html))
}

#[tracing::instrument(skip_all)]
pub async fn submit_page(
    Extension(ctx): Extension<AppState>,
    Form(form): Form<RewriteForm>,
) -> Result<Html<String>, RewriteError> {
    let outcome = ctx.service.rewrite_service.run_pass(&form).await;
    Ok(Html(render_page(&form, &outcome)?))
}

#[tracing::instrument(skip_all)]
pub async fn rewrite(
    Extension(ctx): Extension<AppState>,
    Json(form): Json<RewriteForm>,
) -> Result<Json<RewriteResponse>, RewriteError> {
    let request = RewriteService::validate(&form)?;
    let text = ctx.service.rewrite_service.rewrite(request).await?;
    Ok(Json(RewriteResponse { text }))
}
