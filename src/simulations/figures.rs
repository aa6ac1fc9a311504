/// Share of the property value set aside for taxes, fees and moving costs.
const ADDITIONAL_COSTS_RATE: f64 = 0.15;

/// Derived figures of a simulation. Always recomputed from the three
/// inputs at write time; never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationFigures {
    pub down_payment_value: f64,
    pub financing_amount: f64,
    pub additional_costs: f64,
    pub monthly_savings: f64,
}

impl SimulationFigures {
    pub fn from_inputs(
        property_value: f64,
        down_payment_percentage: f64,
        contract_years: i32,
    ) -> Self {
        let down_payment_value = property_value * (down_payment_percentage / 100.0);
        let financing_amount = property_value - down_payment_value;
        let additional_costs = property_value * ADDITIONAL_COSTS_RATE;
        // Zero-length contracts save the whole amount in one go
        let monthly_savings = if contract_years == 0 {
            additional_costs
        } else {
            additional_costs / (contract_years as f64 * 12.0)
        };
        Self {
            down_payment_value,
            financing_amount,
            additional_costs,
            monthly_savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn reference_example() {
        let f = SimulationFigures::from_inputs(500_000.0, 20.0, 30);
        assert!((f.down_payment_value - 100_000.0).abs() < EPS);
        assert!((f.financing_amount - 400_000.0).abs() < EPS);
        assert!((f.additional_costs - 75_000.0).abs() < EPS);
        assert!((f.monthly_savings - 208.333_333).abs() < 1e-3);
    }

    #[test]
    fn down_payment_and_financing_sum_to_property_value() {
        for (value, pct, years) in [
            (350_000.0, 0.0, 10),
            (350_000.0, 100.0, 10),
            (123_456.78, 33.3, 25),
            (1.0, 50.0, 1),
        ] {
            let f = SimulationFigures::from_inputs(value, pct, years);
            assert!(
                (f.down_payment_value + f.financing_amount - value).abs() < EPS,
                "value={value} pct={pct}"
            );
        }
    }

    #[test]
    fn zero_contract_years_saves_everything_at_once() {
        let f = SimulationFigures::from_inputs(200_000.0, 10.0, 0);
        assert_eq!(f.monthly_savings, f.additional_costs);
    }

    #[test]
    fn full_down_payment_leaves_nothing_to_finance() {
        let f = SimulationFigures::from_inputs(400_000.0, 100.0, 20);
        assert!((f.down_payment_value - 400_000.0).abs() < EPS);
        assert!(f.financing_amount.abs() < EPS);
    }
}
