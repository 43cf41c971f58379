use crate::prelude::{eprintln, *};
use axum::{
    extract::{DefaultBodyLimit, Form, Path, Request, State},
    http::{header, Method},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use colored::Colorize;
use mdedit_core::editor::{plan_save, EditorView};
use mdedit_core::eol::LineEnding;
use mdedit_core::page;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Notify;
use tower_http::catch_panic::CatchPanicLayer;

type HandlerResult<T> = std::result::Result<T, Error>;

/// Largest accepted request body. Browsers percent-encode the textarea, which
/// can triple the size of the document being saved.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, clap::Args)]
pub struct ServeOptions {
    /// Markdown file(s) to edit
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Port to listen on
    #[arg(short, long, env = "MDEDIT_PORT", default_value = "10101")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "MDEDIT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Run in daemon mode (don't open a browser)
    #[arg(short, long, env = "MDEDIT_DAEMON", default_value = "false")]
    pub daemon: bool,
}

/// Shared by every request
pub struct AppState {
    /// Convention assumed when a file gives no clear answer
    pub host_default: LineEnding,
    pub files: Vec<String>,
    pub shutdown: Notify,
}

#[derive(Debug, serde::Deserialize)]
struct SaveForm {
    content: String,
    eol: Option<String>,
}

/// The line ending native to the given OS (as in `std::env::consts::OS`)
pub fn host_default(os: &str) -> LineEnding {
    match os {
        "windows" => LineEnding::Crlf,
        _ => LineEnding::Lf,
    }
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = f!("{}:{}", options.host, options.port);

    let state = Arc::new(AppState {
        host_default: host_default(std::env::consts::OS),
        files: options.files.clone(),
        shutdown: Notify::new(),
    });

    if global.verbose {
        eprintln!(
            "Default line ending for this platform: {}",
            state.host_default
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Listening on http://{addr}");

    let urls: Vec<String> = options
        .files
        .iter()
        .map(|file| page::edit_url(&options.host, options.port, file))
        .collect();

    for url in &urls {
        eprintln!("{} {}", "Editing".green().bold(), url);
    }

    if !options.daemon {
        tokio::spawn(crate::browser::open_all(urls));
    }

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    if global.verbose {
        eprintln!("Server stopped");
    }

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/edit/{*path}", get(edit_handler).post(save_handler))
        .route("/shutdown", post(shutdown_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(reject_cross_origin))
        .layer(middleware::from_fn(log_request))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

async fn shutdown_signal(state: Arc<AppState>) {
    tokio::select! {
        _ = state.shutdown.notified() => log::info!("Shutdown requested"),
        _ = tokio::signal::ctrl_c() => log::info!("Interrupted"),
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {:?}",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed()
    );
    response
}

/// Whether an `Origin` header value names the same host the request was sent to.
fn is_same_origin(origin: &str, host: Option<&str>) -> bool {
    let origin_host = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"));

    match (origin_host, host) {
        (Some(origin_host), Some(host)) => origin_host.eq_ignore_ascii_case(host),
        _ => false,
    }
}

/// Reject state-changing requests sent by pages served from another origin.
/// Requests without an `Origin` header (command-line clients) pass through.
async fn reject_cross_origin(request: Request, next: Next) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let headers = request.headers();
    if let Some(origin) = headers.get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
        if !is_same_origin(origin, host) {
            log::warn!("Rejected {} {} from {origin}", request.method(), request.uri());
            return Error::CrossOrigin(origin.to_string()).into_response();
        }
    }

    next.run(request).await
}

fn checked_path(path: String) -> HandlerResult<String> {
    if path.trim().is_empty() {
        return Err(Error::EmptyPath);
    }
    Ok(path)
}

async fn index_handler(State(state): State<Arc<AppState>>) -> HandlerResult<Redirect> {
    let first = state.files.first().ok_or(Error::EmptyPath)?;
    Ok(Redirect::to(&page::edit_path(first)))
}

async fn edit_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> HandlerResult<Html<String>> {
    let path = checked_path(path)?;
    log::info!("Reading file {path}");

    let content = crate::files::load(&path).await?;
    let view = EditorView::open(path, content, state.host_default);
    log::info!("{}: {}", view.file, view.current);

    Ok(Html(page::render_editor(&view)))
}

async fn save_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Form(form): Form<SaveForm>,
) -> HandlerResult<Html<String>> {
    let path = checked_path(path)?;

    let plan = plan_save(&form.content, form.eol.as_deref());
    if let Some(warning) = &plan.warning {
        log::warn!("{path}: {warning}");
    }

    crate::files::save(&path, &plan.content).await?;
    match plan.applied {
        Some(ending) => log::info!("Saved {path} with {ending} line endings"),
        None => log::info!("Saved {path} unconverted"),
    }

    let view = EditorView::after_save(path, form.content, &plan, state.host_default);
    Ok(Html(page::render_editor(&view)))
}

async fn shutdown_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    state.shutdown.notify_one();
    Html(page::render_shutdown())
}
