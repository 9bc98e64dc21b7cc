// routes.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{admin, applications, auth as auth_handler, jobs, messages, proposals, questions, reviews},
    middleware::{auth, maybe_auth, role_check},
    models::usermodel::UserRole,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route(
            "/me",
            get(auth_handler::me).layer(middleware::from_fn(auth)),
        );

    // Listing and reading jobs is public; writes go through auth, and
    // job creation is a client action.
    let job_routes = Router::new()
        .route("/", get(jobs::list_jobs))
        .route(
            "/",
            post(jobs::create_job).layer(middleware::from_fn(auth)),
        )
        .route("/:id", get(jobs::get_job))
        .route(
            "/:id/status",
            put(jobs::update_job_status).layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id/proposals",
            get(proposals::get_job_proposals).layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id/applications",
            get(applications::get_job_applications).layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id/messages",
            get(messages::get_job_messages).layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id/questions",
            get(questions::get_job_questions).layer(middleware::from_fn(maybe_auth)),
        );

    let proposal_routes = Router::new()
        .route("/", post(proposals::create_proposal))
        .route("/my", get(proposals::get_my_proposals))
        .route("/:id/status", put(proposals::update_proposal_status))
        .layer(middleware::from_fn(auth));

    let application_routes = Router::new()
        .route("/", post(applications::create_application))
        .route("/:id/details", get(applications::get_application_details))
        .route("/:id/status", put(applications::update_application_status))
        .layer(middleware::from_fn(auth));

    let message_routes = Router::new()
        .route("/", post(messages::send_message))
        .layer(middleware::from_fn(auth));

    let question_routes = Router::new()
        .route("/", post(questions::post_question))
        .route("/my", get(questions::get_my_job_questions))
        .route("/:id/answer", put(questions::answer_question))
        .route("/:id/react", post(questions::react_to_question))
        .route("/:id", delete(questions::delete_question))
        .layer(middleware::from_fn(auth));

    let review_routes = Router::new().route(
        "/",
        post(reviews::create_review).layer(middleware::from_fn(auth)),
    );

    let user_routes = Router::new().route("/:id/reviews", get(reviews::get_user_reviews));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/:id", delete(admin::delete_user))
        .route("/jobs", get(admin::list_jobs))
        .route("/jobs/:id", delete(admin::delete_job))
        .layer(middleware::from_fn(|req, next| {
            role_check(req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    let api_route = Router::new()
        .nest("/auth", auth_routes)
        .nest("/jobs", job_routes)
        .nest("/proposals", proposal_routes)
        .nest("/applications", application_routes)
        .nest("/messages", message_routes)
        .nest("/questions", question_routes)
        .nest("/reviews", review_routes)
        .nest("/users", user_routes)
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
