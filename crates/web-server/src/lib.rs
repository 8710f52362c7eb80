use axum::{
    routing::{get, post},
    Router,
};
use database::DbRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: DbRepository,
}

/// Builds the application router with every route and middleware attached.
///
/// Kept separate from `run_server` so tests can drive the exact production
/// router in-process.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/questions/",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/questions/:id",
            get(handlers::get_question).delete(handlers::delete_question),
        )
        .route(
            "/questions/:id/",
            get(handlers::get_question).delete(handlers::delete_question),
        )
        .route(
            "/questions/:id/answers/",
            post(handlers::create_answer_for_question),
        )
        .route("/answers/", post(handlers::create_answer))
        .route(
            "/answers/:id",
            get(handlers::get_answer).delete(handlers::delete_answer),
        )
        .route(
            "/answers/:id/",
            get(handlers::get_answer).delete(handlers::delete_answer),
        )
        .with_state(state)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, repo: DbRepository) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState { repo });
    let app = build_router(app_state);

    tracing::info!("Server is running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
