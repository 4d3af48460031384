pub mod config;
pub mod handler;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::get;
use gateway_core::ObjectStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError, load_dotenv};

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub bearer_token: Arc<str>,
    pub public_scheme: Arc<str>,
    pub max_upload_size: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, config: &Config) -> Self {
        Self {
            store,
            bearer_token: Arc::from(config.bearer_token.as_str()),
            public_scheme: Arc::from(config.public_scheme.as_str()),
            max_upload_size: config.max_upload_size,
        }
    }
}

/// ルーターを構築する
///
/// `/` はヘルスチェック、それ以外のパスはすべてオブジェクトキーとして扱う
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler::health))
        .route(
            "/*key",
            get(handler::get_object)
                .post(handler::upload)
                .put(handler::upload)
                .delete(handler::delete_object),
        )
        .layer(DefaultBodyLimit::max(state.max_upload_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
