use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::simulations::dto::SimulationPayload;
use crate::simulations::figures::SimulationFigures;

/// Simulation record in the database. The four derived columns are
/// always written together with the inputs they are computed from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Simulation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_value: f64,
    pub down_payment_percentage: f64,
    pub contract_years: i32,
    pub down_payment_value: f64,
    pub financing_amount: f64,
    pub additional_costs: f64,
    pub monthly_savings: f64,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const RETURNING: &str = r#"
    RETURNING id, user_id, property_value, down_payment_percentage, contract_years,
              down_payment_value, financing_amount, additional_costs, monthly_savings,
              name, notes, created_at, updated_at
"#;

impl Simulation {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        payload: &SimulationPayload,
    ) -> anyhow::Result<Simulation> {
        let figures = SimulationFigures::from_inputs(
            payload.property_value,
            payload.down_payment_percentage,
            payload.contract_years,
        );
        let sql = format!(
            r#"
            INSERT INTO simulations
                (user_id, property_value, down_payment_percentage, contract_years,
                 down_payment_value, financing_amount, additional_costs, monthly_savings,
                 name, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            {RETURNING}
            "#
        );
        let simulation = sqlx::query_as::<_, Simulation>(&sql)
            .bind(user_id)
            .bind(payload.property_value)
            .bind(payload.down_payment_percentage)
            .bind(payload.contract_years)
            .bind(figures.down_payment_value)
            .bind(figures.financing_amount)
            .bind(figures.additional_costs)
            .bind(figures.monthly_savings)
            .bind(&payload.name)
            .bind(&payload.notes)
            .fetch_one(db)
            .await?;
        Ok(simulation)
    }

    /// Rewrite inputs and recompute every derived column. Returns None
    /// when the record does not exist.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        payload: &SimulationPayload,
    ) -> anyhow::Result<Option<Simulation>> {
        let figures = SimulationFigures::from_inputs(
            payload.property_value,
            payload.down_payment_percentage,
            payload.contract_years,
        );
        let sql = format!(
            r#"
            UPDATE simulations
            SET property_value = $2,
                down_payment_percentage = $3,
                contract_years = $4,
                down_payment_value = $5,
                financing_amount = $6,
                additional_costs = $7,
                monthly_savings = $8,
                name = $9,
                notes = $10,
                updated_at = now()
            WHERE id = $1
            {RETURNING}
            "#
        );
        let simulation = sqlx::query_as::<_, Simulation>(&sql)
            .bind(id)
            .bind(payload.property_value)
            .bind(payload.down_payment_percentage)
            .bind(payload.contract_years)
            .bind(figures.down_payment_value)
            .bind(figures.financing_amount)
            .bind(figures.additional_costs)
            .bind(figures.monthly_savings)
            .bind(&payload.name)
            .bind(&payload.notes)
            .fetch_optional(db)
            .await?;
        Ok(simulation)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Simulation>> {
        let simulation = sqlx::query_as::<_, Simulation>(
            r#"
            SELECT id, user_id, property_value, down_payment_percentage, contract_years,
                   down_payment_value, financing_amount, additional_costs, monthly_savings,
                   name, notes, created_at, updated_at
            FROM simulations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(simulation)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Simulation>> {
        let rows = sqlx::query_as::<_, Simulation>(
            r#"
            SELECT id, user_id, property_value, down_payment_percentage, contract_years,
                   down_payment_value, financing_amount, additional_costs, monthly_savings,
                   name, notes, created_at, updated_at
            FROM simulations
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Simulation>> {
        let sql = format!(
            r#"
            DELETE FROM simulations
            WHERE id = $1
            {RETURNING}
            "#
        );
        let simulation = sqlx::query_as::<_, Simulation>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(simulation)
    }
}
