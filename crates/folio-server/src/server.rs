//! Post server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;

use folio_markdown::{render_from, scan_posts, DirectorySource, PostSummary, RenderOptions};
use folio_static::{normalize_base_url, AssetPipeline, PostView, Site, TemplateEngine};

/// Message shown when a post cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load blog post. Please try again later.";

/// Configuration for the post server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing `.md` posts
    pub posts_dir: PathBuf,

    /// Directory of static files (images, downloads) served as-is
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site title
    pub title: String,

    /// Markdown rendering switches
    pub render: RenderOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            public_dir: PathBuf::from("public"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            title: "Blog".to_string(),
            render: RenderOptions {
                highlight: true,
                external_links_new_tab: true,
                ..Default::default()
            },
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// Shared server state.
struct ServerState {
    config: ServerConfig,
    site: Site,
    source: DirectorySource,
    templates: TemplateEngine,
}

/// Serves posts, rendering each one from disk on every request.
pub struct PostServer {
    config: ServerConfig,
}

impl PostServer {
    /// Create a new post server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the router without binding a socket.
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            site: Site {
                title: self.config.title.clone(),
                base_url: normalize_base_url("/"),
                styles: vec![],
            },
            source: DirectorySource::new(&self.config.posts_dir),
            templates: TemplateEngine::new(),
            config: self.config.clone(),
        });

        Router::new()
            .route("/", get(index_handler))
            .route("/blog/{slug}", get(post_handler))
            .route("/blog/{slug}/", get(post_handler))
            .route("/data/blog-posts.json", get(posts_json_handler))
            .route("/assets/main.css", get(css_handler))
            .fallback_service(ServeDir::new(&self.config.public_dir))
            .with_state(state)
    }

    /// Start the server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_text = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_text
            .parse()
            .map_err(|_| ServerError::InvalidAddress(addr_text.clone()))?;

        let app = self.router();

        tracing::info!("Serving posts from {}", self.config.posts_dir.display());
        tracing::info!("Starting server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Current catalog, empty when the posts directory is missing.
fn load_posts(state: &ServerState) -> Vec<PostSummary> {
    match scan_posts(&state.config.posts_dir) {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Failed to scan posts: {}", e);
            Vec::new()
        }
    }
}

/// Handler for the blog index.
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let views: Vec<PostView> = load_posts(&state)
        .iter()
        .map(|p| PostView::new(&state.site, p))
        .collect();

    page(state.templates.render_index(&state.site, &views), StatusCode::OK)
}

/// Handler for a single post.
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    // A `slug` key may differ from the file name
    let id = load_posts(&state)
        .into_iter()
        .find(|p| p.slug == slug)
        .map(|p| p.id)
        .unwrap_or_else(|| slug.clone());

    let Some(rendered) = render_from(&state.source, &id, state.config.render) else {
        tracing::debug!("No content for post {}", slug);
        return page(
            state.templates.render_error(&state.site, LOAD_ERROR_MESSAGE),
            StatusCode::NOT_FOUND,
        );
    };

    let summary = PostSummary::from_front_matter(&id, &rendered.front_matter);
    let view = PostView::new(&state.site, &summary);

    page(
        state
            .templates
            .render_post(&state.site, &view, &rendered.html),
        StatusCode::OK,
    )
}

/// Handler for the JSON post index.
async fn posts_json_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<PostSummary>> {
    Json(load_posts(&state))
}

/// Handler for the stylesheet.
async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::main_css(false),
    )
}

fn page(rendered: Result<String, minijinja::Error>, status: StatusCode) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}
