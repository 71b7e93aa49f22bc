use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler,
        disputes::disputes_handler,
        documents::documents_handler,
        parcels::parcels_handler,
        surveys::{surveyor_auth_handler, surveys_handler},
        transfers::transfers_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Surveyor login/logout stay public; everything else under /surveys
    // requires auth.
    let survey_routes = Router::new()
        .merge(surveys_handler().layer(middleware::from_fn(auth)))
        .merge(surveyor_auth_handler());

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/parcels", parcels_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/transfers",
            transfers_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/disputes",
            disputes_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/surveys", survey_routes)
        .nest(
            "/documents",
            documents_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
