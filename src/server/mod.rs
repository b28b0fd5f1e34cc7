//! Preview server that renders pages per request

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::PostStore;
use crate::pages::{self, POSTS_ROUTE};
use crate::Blog;

/// Server state
pub struct ServerState {
    config: SiteConfig,
    static_dir: PathBuf,
    store: RwLock<PostStore>,
}

impl ServerState {
    pub fn new(config: SiteConfig, static_dir: PathBuf, store: PostStore) -> Self {
        Self {
            config,
            static_dir,
            store: RwLock::new(store),
        }
    }

    /// Swap in a freshly loaded store
    pub async fn replace_store(&self, store: PostStore) {
        *self.store.write().await = store;
    }
}

/// Build the router for the given state
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(POSTS_ROUTE, get(index_handler))
        .route(&format!("{}/", POSTS_ROUTE), get(index_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let store = blog.load_store()?;
    tracing::info!("Loaded {} posts", store.len());

    let state = Arc::new(ServerState::new(
        blog.config.clone(),
        blog.static_dir.clone(),
        store,
    ));

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}{}", ip, port, POSTS_ROUTE);
    println!("Press Ctrl+C to stop.");

    if watch {
        let blog = blog.clone();
        let state = state.clone();
        let handle = tokio::runtime::Handle::current();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&blog, &state, &handle) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Reload the store whenever content changes
fn watch_and_reload(
    blog: &Blog,
    state: &ServerState,
    handle: &tokio::runtime::Handle,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if blog.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", blog.content_dir);
    }

    for result in rx {
        match result {
            Ok(events) => {
                tracing::info!("{} files changed, reloading posts", events.len());
                match blog.load_store() {
                    Ok(store) => handle.block_on(state.replace_store(store)),
                    Err(e) => tracing::error!("Reload failed: {}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let store = state.store.read().await;
    Html(pages::index_page(&state.config, &*store))
}

/// Serve a post page, then a static file, then the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();

    {
        let store = state.store.read().await;
        for candidate in route_candidates(&path) {
            if let Some(html) = pages::post_page(&state.config, &*store, &candidate) {
                return Html(html).into_response();
            }
        }
    }

    if is_static_file(&state, &path) {
        let mut service = ServeDir::new(&state.static_dir);
        return match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        };
    }

    if path == "/" {
        return Redirect::temporary(POSTS_ROUTE).into_response();
    }

    tracing::debug!("No page for {}", path);
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found_page(&state.config, Some(&path))),
    )
        .into_response()
}

/// Exact path first, then with the trailing slash toggled
fn route_candidates(path: &str) -> Vec<String> {
    let mut candidates = vec![path.to_string()];
    if path.len() > 1 && path.ends_with('/') {
        candidates.push(path.trim_end_matches('/').to_string());
    } else if !path.ends_with('/') {
        candidates.push(format!("{}/", path));
    }
    candidates
}

/// Whether `path` names a regular file under the static dir
fn is_static_file(state: &ServerState, path: &str) -> bool {
    let relative = Path::new(path.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return false;
    }
    state.static_dir.join(relative).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostOrder;
    use crate::content::{Post, TrustedHtml};
    use tower::ServiceExt;

    fn state(static_dir: PathBuf) -> Arc<ServerState> {
        let mut post = Post::new("hello.md", "/p1", "Hello");
        post.author = "Ann".to_string();
        post.date = "2020-01-01".to_string();
        post.html = TrustedHtml::new("<p>Hi</p>");
        let store = PostStore::new(vec![post], PostOrder::Date);
        Arc::new(ServerState::new(SiteConfig::default(), static_dir, store))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_route_candidates() {
        assert_eq!(route_candidates("/p1"), vec!["/p1", "/p1/"]);
        assert_eq!(route_candidates("/p1/"), vec!["/p1/", "/p1"]);
        assert_eq!(route_candidates("/"), vec!["/"]);
    }

    #[tokio::test]
    async fn test_index_route() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(router(state(dir.path().to_path_buf())), "/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/p1">Hello | By - Ann | On 2020-01-01</a>"#));
    }

    #[tokio::test]
    async fn test_post_route() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path().to_path_buf()));

        let (status, body) = get(app.clone(), "/p1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h4>Posted By Ann on 2020-01-01</h4>"));

        let (status, _) = get(app, "/p1/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_route_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(router(state(dir.path().to_path_buf())), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("<h1>Page not found</h1>"));
        assert!(!body.contains("Posted By"));
    }

    #[tokio::test]
    async fn test_home_redirects_to_index() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(state(dir.path().to_path_buf()))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/posts");
    }

    #[tokio::test]
    async fn test_static_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.css"), "body {}").unwrap();
        let (status, body) = get(router(state(dir.path().to_path_buf())), "/site.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body {}");
    }

    #[tokio::test]
    async fn test_replace_store() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path().to_path_buf());
        state.replace_store(PostStore::default()).await;

        let (status, _) = get(router(state), "/p1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
