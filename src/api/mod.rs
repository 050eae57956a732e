// HTTP surface: GET /foodtrucks and health check

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
