//! HTTP boundary for hypermedia clients.
//!
//! Extracts request parameters, calls [`ContactOperations`], and turns the
//! result into an HTML page (through the injected [`Renderer`]) or a
//! `303 See Other` redirect.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Redirect to `/contacts` |
//! | `GET`  | `/contacts?q=&flash=` | List or search contacts |
//! | `GET`  | `/contacts/new` | New contact form |
//! | `POST` | `/contacts/new` | Create, then redirect to the list with a flash |
//! | `GET`  | `/contacts/{id}` | Contact details |
//! | `GET`  | `/contacts/{id}/edit` | Edit form |
//! | `POST` | `/contacts/{id}/edit` | Edit with blank-field fallback, redirect to details |
//! | `POST` | `/contacts/{id}/delete` | Delete, redirect to the list |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! | Error | Status |
//! |-------|--------|
//! | unknown id | `404 Not Found` |
//! | malformed id | `400 Bad Request` |
//! | storage failure | `500 Internal Server Error`, generic body |

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use contacts_core::error::ContactError;
use contacts_core::models::ContactForm;
use contacts_core::operations::{ContactOperations, Outcome};
use contacts_core::store::ContactStore;

use crate::config::Config;
use crate::db;
use crate::render::{PlainHtmlRenderer, Renderer};
use crate::sqlite_store::SqliteContactStore;

/// Shared state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    ops: ContactOperations,
    renderer: Arc<dyn Renderer>,
}

/// Starts the HTTP server with the built-in [`PlainHtmlRenderer`].
///
/// Opens the configured database, runs [`ContactStore::initialize`], binds
/// to `[server].bind`, and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    run_server_with_renderer(config, Arc::new(PlainHtmlRenderer)).await
}

/// Like [`run_server`], with a caller-provided [`Renderer`].
pub async fn run_server_with_renderer(
    config: &Config,
    renderer: Arc<dyn Renderer>,
) -> anyhow::Result<()> {
    let pool = db::connect(&config.db).await?;
    let store = Arc::new(SqliteContactStore::new(pool));
    store.initialize().await?;

    let app = router(
        store,
        renderer,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        db = %config.db.path.display(),
        "contacts server listening"
    );
    println!("Contacts server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router over any [`ContactStore`].
///
/// Requests still running after `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn router(
    store: Arc<dyn ContactStore>,
    renderer: Arc<dyn Renderer>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        ops: ContactOperations::new(store),
        renderer,
    };

    Router::new()
        .route("/", get(handle_index))
        .route("/contacts", get(handle_list))
        .route("/contacts/new", get(handle_new_form).post(handle_create))
        .route("/contacts/{id}", get(handle_detail))
        .route("/contacts/{id}/edit", get(handle_edit_form).post(handle_edit))
        .route("/contacts/{id}/delete", post(handle_delete))
        .route("/health", get(handle_health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

/// A [`ContactError`] on its way out as an HTTP response.
struct AppError(ContactError);

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            ContactError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()).into_response(),
            ContactError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
            }
            ContactError::Storage(ref detail) => {
                tracing::error!(%detail, "storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Where the browser goes after a successful mutation.
fn redirect_for(outcome: &Outcome) -> Redirect {
    match outcome {
        Outcome::Created { flash, .. } => Redirect::to(&format!(
            "/contacts?flash={}",
            urlencoding::encode(flash)
        )),
        Outcome::Updated { id } => Redirect::to(&format!("/contacts/{}", id)),
        Outcome::Deleted { .. } => Redirect::to("/contacts"),
    }
}

// ============ GET / ============

async fn handle_index() -> Redirect {
    Redirect::to("/contacts")
}

// ============ GET /contacts ============

#[derive(Debug, Deserialize)]
struct ListParams {
    q: Option<String>,
    flash: Option<String>,
}

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let list = state.ops.list_or_search(params.q.as_deref()).await?;
    let flash = params.flash.as_deref().filter(|f| !f.is_empty());
    Ok(Html(state.renderer.render_list(&list, flash)))
}

// ============ /contacts/new ============

async fn handle_new_form(State(state): State<AppState>) -> Html<String> {
    Html(state.renderer.render_new_form())
}

async fn handle_create(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect, AppError> {
    let outcome = state.ops.create(form).await?;
    Ok(redirect_for(&outcome))
}

// ============ /contacts/{id} ============

async fn handle_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let contact = state.ops.get(&id).await?;
    Ok(Html(state.renderer.render_detail(&contact)))
}

async fn handle_edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let contact = state.ops.get(&id).await?;
    Ok(Html(state.renderer.render_edit_form(&contact)))
}

async fn handle_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect, AppError> {
    let outcome = state.ops.edit(&id, form).await?;
    Ok(redirect_for(&outcome))
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let outcome = state.ops.delete(&id).await?;
    Ok(redirect_for(&outcome))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use contacts_core::models::Contact;
    use contacts_core::store::memory::InMemoryContactStore;
    use tower::ServiceExt;

    /// Delegates to an in-memory store but stalls on `list_all`.
    struct SlowListStore {
        inner: InMemoryContactStore,
        delay: Duration,
    }

    #[async_trait]
    impl ContactStore for SlowListStore {
        async fn initialize(&self) -> contacts_core::Result<()> {
            self.inner.initialize().await
        }

        async fn list_all(&self) -> contacts_core::Result<Vec<Contact>> {
            tokio::time::sleep(self.delay).await;
            self.inner.list_all().await
        }

        async fn search(&self, term: &str) -> contacts_core::Result<Vec<Contact>> {
            self.inner.search(term).await
        }

        async fn get_by_id(&self, id: i64) -> contacts_core::Result<Contact> {
            self.inner.get_by_id(id).await
        }

        async fn create(&self, form: &ContactForm) -> contacts_core::Result<i64> {
            self.inner.create(form).await
        }

        async fn update(&self, id: i64, form: &ContactForm) -> contacts_core::Result<()> {
            self.inner.update(id, form).await
        }

        async fn delete(&self, id: i64) -> contacts_core::Result<()> {
            self.inner.delete(id).await
        }
    }

    fn slow_app() -> Router {
        let store = Arc::new(SlowListStore {
            inner: InMemoryContactStore::new(),
            delay: Duration::from_secs(5),
        });
        router(
            store,
            Arc::new(PlainHtmlRenderer),
            Duration::from_millis(50),
        )
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let resp = slow_app().oneshot(get_request("/contacts")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_unaffected_by_timeout() {
        let resp = slow_app().oneshot(get_request("/contacts?q=foo")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = slow_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[axum::http::header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_redirect_targets() {
        let created = redirect_for(&Outcome::Created {
            id: 4,
            flash: "Created New User".to_string(),
        });
        assert_eq!(location(created), "/contacts?flash=Created%20New%20User");
        assert_eq!(location(redirect_for(&Outcome::Updated { id: 4 })), "/contacts/4");
        assert_eq!(location(redirect_for(&Outcome::Deleted { id: 4 })), "/contacts");
    }

    #[test]
    fn test_error_status_codes() {
        let status = |e: ContactError| AppError(e).into_response().status();
        assert_eq!(status(ContactError::NotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ContactError::InvalidId("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ContactError::storage("disk I/O error")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
