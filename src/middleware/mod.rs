// Middleware modules

pub mod cors;
pub mod session;

pub use cors::dynamic_cors_middleware;
pub use session::{session_resolver, ResolvedSession, SESSION_COOKIE};
