/// Router assembly
///
/// [`AppState`] carries the store and configuration into every handler;
/// [`build_router`] mounts the routes and wraps them in tracing and CORS.
///
/// # Example
///
/// ```no_run
/// use secondbrain_api::{app::{build_router, AppState}, config::Config};
/// use secondbrain_shared::store::MemoryStore;
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use secondbrain_shared::{auth::middleware::authenticate, store::BrainStore};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// State handed to every handler through `State<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BrainStore>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn BrainStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and verify tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the application router
///
/// ```text
/// /
/// ├── GET /health
/// └── /api/v1/
///     ├── POST   /signup
///     ├── POST   /signin
///     ├── POST   /content       # bearer
///     ├── GET    /content       # bearer
///     ├── DELETE /content       # bearer
///     ├── POST   /brain/share   # bearer
///     └── GET    /brain/:shareLink
/// ```
///
/// Requests are traced by `TraceLayer` at INFO; routes marked `bearer` sit
/// behind [`jwt_auth_layer`].
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin))
        .route("/brain/:shareLink", get(routes::brain::view_shared_brain));

    let protected_routes = Router::new()
        .route(
            "/content",
            post(routes::content::create_content)
                .get(routes::content::list_content)
                .delete(routes::content::delete_content),
        )
        .route("/brain/share", post(routes::brain::share_brain))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Permissive unless specific origins are configured
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allows_any() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Bearer authentication for the protected routes
///
/// Validates the bearer token and injects an `AuthContext` into the
/// request extensions. Any failure answers 403.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context = authenticate(req.headers(), state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
