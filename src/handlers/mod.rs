// HTTP handlers and route builders

pub mod auth;
pub mod bot;
pub mod employees;
pub mod health;

use crate::app::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;

/// Success envelope shared by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::get_session))
}

// Bot pairing routes
pub fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/session/create", post(bot::create_session))
        .route("/session/get", get(bot::list_sessions))
        .route("/session/delete/{id}", delete(bot::delete_session))
}

// Employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(employees::add_employee))
        .route("/get", get(employees::list_employees))
        .route("/update/{id}", put(employees::update_employee))
}

/// Everything served under /api
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes())
        .nest("/bot", bot_routes())
        .nest("/employees", employee_routes())
}
