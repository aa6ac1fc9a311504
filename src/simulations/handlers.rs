use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    simulations::{
        dto::{DeletedResponse, Pagination, SimulationPayload},
        repo::Simulation,
    },
    state::AppState,
};

pub fn simulation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/simulations",
            get(list_simulations).post(create_simulation),
        )
        .route(
            "/simulations/:id",
            get(get_simulation)
                .put(update_simulation)
                .delete(delete_simulation),
        )
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_simulation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SimulationPayload>,
) -> Result<Json<Simulation>, (StatusCode, String)> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "invalid simulation payload");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let simulation = Simulation::create(&state.db, user.id, &payload)
        .await
        .map_err(internal)?;

    info!(simulation_id = %simulation.id, "simulation created");
    Ok(Json(simulation))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_simulations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Simulation>>, (StatusCode, String)> {
    if let Err(e) = p.validate() {
        warn!(error = %e, "invalid pagination");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let simulations = Simulation::list_by_user(&state.db, user.id, p.limit, p.skip)
        .await
        .map_err(internal)?;
    Ok(Json(simulations))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_simulation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Simulation>, (StatusCode, String)> {
    let simulation = Simulation::find_by_id(&state.db, id)
        .await
        .map_err(internal)?;
    // Someone else's record reads as absent
    match simulation {
        Some(s) if s.user_id == user.id => Ok(Json(s)),
        _ => Err(not_found()),
    }
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_simulation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SimulationPayload>,
) -> Result<Json<Simulation>, (StatusCode, String)> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "invalid simulation payload");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    match Simulation::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(s) if s.user_id == user.id => {}
        _ => return Err(not_found()),
    }

    let updated = Simulation::update(&state.db, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    info!(simulation_id = %updated.id, "simulation updated");
    Ok(Json(updated))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_simulation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, (StatusCode, String)> {
    match Simulation::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(s) if s.user_id == user.id => {}
        _ => return Err(not_found()),
    }

    Simulation::delete(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    info!(simulation_id = %id, "simulation deleted");
    Ok(Json(DeletedResponse {
        detail: "Simulation deleted successfully".into(),
    }))
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Simulation not found".into())
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "storage error");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
}
