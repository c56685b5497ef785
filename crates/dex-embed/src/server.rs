//! Actix-web server for the embed service.
//!
//! Routes, shared state, and the status mapping around the primary manga
//! lookup: 200 when it succeeds, 400 when it fails. The embed page is
//! rendered from whatever fields could be resolved either way.

use crate::embed::EmbedResolver;
use crate::render;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Shared application state for actix-web handlers.
///
/// Wrapped in `web::Data`, so one resolver (and one rate budget behind
/// its client) serves every request across all workers.
pub struct AppState {
    /// Embed resolver holding the rate-limited API client
    pub resolver: EmbedResolver,
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render::render_index_page())
}

#[get("/title/{manga_id}")]
pub async fn embed(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let manga_id = path.into_inner();
    create_embed(&data, &manga_id).await
}

/// Same as [`embed`]; the trailing segment is a human-readable name hint
/// carried by shared links and ignored here.
#[get("/title/{manga_id}/{slug}")]
pub async fn embed_with_slug(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (manga_id, _slug) = path.into_inner();
    create_embed(&data, &manga_id).await
}

async fn create_embed(state: &AppState, manga_id: &str) -> HttpResponse {
    let primary = state.resolver.client().get_manga(manga_id).await;

    let record = match &primary {
        Ok(manga) => Some(manga),
        Err(e) => {
            warn!(manga_id = manga_id, error = %e, "Primary manga lookup failed");
            None
        }
    };

    let fields = state.resolver.resolve(record, manga_id).await;
    let body = render::render_embed_page(&fields);

    let mut response = if primary.is_ok() {
        HttpResponse::Ok()
    } else {
        HttpResponse::BadRequest()
    };
    response.content_type("text/html; charset=utf-8").body(body)
}

/// Register the service's routes
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(embed).service(embed_with_slug);
}

/// Run the server until shutdown
pub async fn run(state: AppState, bind_address: &str, port: u16) -> Result<()> {
    let state = web::Data::new(state);

    info!(bind_address = bind_address, port = port, "Starting embed server");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((bind_address, port))
        .with_context(|| format!("Failed to bind {}:{}", bind_address, port))?
        .run()
        .await
        .context("Server error")
}
