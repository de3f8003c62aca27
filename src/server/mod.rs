//! Fragment server
//!
//! Serves rendered fragments for a host page, and re-exposes the document
//! source under `/posts` with directory listings, so another instance can
//! read it through an `HttpSource`.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::content::Category;
use crate::Inkwell;

/// Build the router for an Inkwell instance
pub fn router(inkwell: Inkwell) -> Router {
    Router::new()
        .route("/fragments/feed", get(feed_handler))
        .route("/fragments/about", get(about_handler))
        .route("/fragments/:category", get(collection_handler))
        .route("/fragments/stories/:id", get(story_handler))
        .route("/fragments/prompts/:id", get(prompt_handler))
        .route("/meta", get(meta_handler))
        .route("/posts/*path", get(posts_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(inkwell)
}

/// Start the fragment server
pub async fn start(inkwell: &Inkwell, ip: &str, port: u16) -> Result<()> {
    let app = router(inkwell.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Reading posts from {}", inkwell.source().describe());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn feed_handler(State(inkwell): State<Inkwell>) -> Html<String> {
    Html(inkwell.assembler().render_feed().await)
}

async fn about_handler(State(inkwell): State<Inkwell>) -> Html<String> {
    Html(inkwell.assembler().render_about())
}

async fn collection_handler(
    State(inkwell): State<Inkwell>,
    Path(category): Path<String>,
) -> Response {
    match category.parse::<Category>() {
        Ok(category) => Html(inkwell.assembler().render_collection(category).await).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn story_handler(State(inkwell): State<Inkwell>, Path(id): Path<String>) -> Html<String> {
    Html(inkwell.assembler().render_story_page(&id).await)
}

async fn prompt_handler(State(inkwell): State<Inkwell>, Path(id): Path<String>) -> Html<String> {
    Html(inkwell.assembler().render_prompt_page(&id).await)
}

async fn meta_handler(State(inkwell): State<Inkwell>) -> Html<String> {
    Html(inkwell.meta_tags())
}

/// Pass a request through to the document source
async fn posts_handler(State(inkwell): State<Inkwell>, Path(path): Path<String>) -> Response {
    match inkwell.source().fetch(&path).await {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if path.is_empty() || path.ends_with('/') {
                (status, Html(response.body)).into_response()
            } else {
                (status, response.body).into_response()
            }
        }
        Err(e) => {
            tracing::warn!("Failed to serve posts/{}: {}", path, e);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
