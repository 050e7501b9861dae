use axum::{middleware, routing::get, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{assignments, bookmarks, reviews, stats, submissions};
use crate::middleware::auth;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resource routes; bearer auth is applied per group below
        .merge(assignment_routes())
        .merge(submission_routes())
        .merge(review_routes())
        .merge(bookmark_routes())
        .merge(stats_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn assignment_routes() -> Router {
    use axum::routing::{post, put};

    let public = Router::new()
        .route("/assignments", get(assignments::list))
        .route("/assignments/home", get(assignments::home))
        .route(
            "/assignments/:id",
            get(assignments::get).delete(assignments::delete),
        );

    // Creation and update carry the caller's identity; delete stays public
    // and is owner-checked against the stored creator email
    let protected = Router::new()
        .route("/assignments", post(assignments::create))
        .route("/assignments/:id", put(assignments::update))
        .route_layer(middleware::from_fn(auth::require_identity));

    public.merge(protected)
}

fn submission_routes() -> Router {
    use axum::routing::{patch, post};

    // Grading is open to any peer; the self-grading check runs against the
    // stored record, not the token
    let public = Router::new().route("/submissions/:id", patch(submissions::grade));

    let protected = Router::new()
        .route(
            "/submissions",
            get(submissions::list).post(submissions::create),
        )
        .route_layer(middleware::from_fn(auth::require_identity));

    public.merge(protected)
}

fn review_routes() -> Router {
    use axum::routing::post;

    let public = Router::new().route("/reviews", get(reviews::list));

    let protected = Router::new()
        .route("/reviews", post(reviews::create))
        .route_layer(middleware::from_fn(auth::require_identity));

    public.merge(protected)
}

fn bookmark_routes() -> Router {
    use axum::routing::{delete, post};

    Router::new()
        .route("/bookmarks", get(bookmarks::list).post(bookmarks::create))
        .route("/bookmarks/:assignment_id", delete(bookmarks::remove))
        .route_layer(middleware::from_fn(auth::require_identity))
}

fn stats_routes() -> Router {
    Router::new().route("/stats", get(stats::dashboard))
}

async fn root() -> &'static str {
    "EduCircle API is running"
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
