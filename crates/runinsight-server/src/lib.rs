//! RunInsight HTTP service: question classification and per-user stats.

pub mod routes;
pub mod state;
pub mod validation;

pub use routes::build_router;
pub use state::AppState;
