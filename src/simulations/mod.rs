use crate::state::AppState;
use axum::Router;

mod dto;
mod figures;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::simulation_routes()
}
