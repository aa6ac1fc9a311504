use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Property value must be positive")]
    PropertyValue,
    #[error("Down payment percentage must be between 0 and 100")]
    DownPaymentPercentage,
    #[error("Contract years must not be negative")]
    ContractYears,
    #[error("Skip and limit must not be negative")]
    Pagination,
}

/// Request body shared by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationPayload {
    pub property_value: f64,
    pub down_payment_percentage: f64,
    pub contract_years: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SimulationPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.property_value > 0.0) {
            return Err(ValidationError::PropertyValue);
        }
        if !(0.0..=100.0).contains(&self.down_payment_percentage) {
            return Err(ValidationError::DownPaymentPercentage);
        }
        if self.contract_years < 0 {
            return Err(ValidationError::ContractYears);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    100
}

impl Pagination {
    /// Postgres rejects negative LIMIT/OFFSET, so catch them before the query.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.skip < 0 || self.limit < 0 {
            return Err(ValidationError::Pagination);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: f64, pct: f64, years: i32) -> SimulationPayload {
        SimulationPayload {
            property_value: value,
            down_payment_percentage: pct,
            contract_years: years,
            name: None,
            notes: None,
        }
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(payload(500_000.0, 0.0, 30).validate().is_ok());
        assert!(payload(500_000.0, 100.0, 30).validate().is_ok());
        assert!(payload(0.01, 20.0, 0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_property_value() {
        assert!(matches!(
            payload(0.0, 20.0, 30).validate(),
            Err(ValidationError::PropertyValue)
        ));
        assert!(matches!(
            payload(-1.0, 20.0, 30).validate(),
            Err(ValidationError::PropertyValue)
        ));
        assert!(matches!(
            payload(f64::NAN, 20.0, 30).validate(),
            Err(ValidationError::PropertyValue)
        ));
    }

    #[test]
    fn rejects_out_of_range_percentage() {
        assert!(matches!(
            payload(100.0, -0.1, 30).validate(),
            Err(ValidationError::DownPaymentPercentage)
        ));
        assert!(matches!(
            payload(100.0, 100.1, 30).validate(),
            Err(ValidationError::DownPaymentPercentage)
        ));
    }

    #[test]
    fn rejects_negative_contract_years() {
        assert!(matches!(
            payload(100.0, 20.0, -1).validate(),
            Err(ValidationError::ContractYears)
        ));
    }

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn pagination_rejects_negative_values() {
        let p = Pagination { skip: -1, limit: 100 };
        assert!(matches!(p.validate(), Err(ValidationError::Pagination)));
        let p = Pagination { skip: 0, limit: -5 };
        assert!(matches!(p.validate(), Err(ValidationError::Pagination)));
    }

    #[test]
    fn optional_fields_default_to_none() {
        let p: SimulationPayload = serde_json::from_str(
            r#"{"property_value": 1.0, "down_payment_percentage": 5.0, "contract_years": 2}"#,
        )
        .unwrap();
        assert!(p.name.is_none());
        assert!(p.notes.is_none());
    }
}
