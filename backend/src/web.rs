mod analyze;
mod basic;

use axum::Router;
use nutriscan_common::config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

struct AppState {}

pub async fn run() {
    let state = Arc::new(AppState {});

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = add_routes(Router::new(), &[basic::add_route, analyze::add_route])
        .with_state(state)
        .layer(cors);

    let bind = config::get("HTTP_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn add_routes<T>(app: Router<T>, funcs: &[fn(Router<T>) -> Router<T>]) -> Router<T> {
    let mut app = app;
    for func in funcs {
        app = func(app);
    }
    app
}
