//! Carbon estimator: activity × details → kg CO2.

use serde_json::Value;

use super::activity::{
    Activity, ActivityDetails, ClothingFrequency, Commute, CommuteDetails, DairyType,
    ElectronicsFrequency, FlightType, FoodWasteFrequency, FuelType, MeatType,
};
use super::factors::{EmissionFactors, FACTORS};
use crate::error::CarbonError;

/// Estimate the footprint of one activity. Missing fields take their
/// documented defaults and unlisted categories their fallback; badly shaped
/// fields, or quantities too large to give a finite total, are
/// `InvalidDetails`.
pub fn estimate_carbon(activity: Activity, details: &Value) -> Result<f64, CarbonError> {
    let parsed = ActivityDetails::parse(activity, details)?;
    let kg = estimate_parsed(&parsed, &FACTORS);
    if !kg.is_finite() {
        return Err(CarbonError::InvalidDetails(format!(
            "quantities for {activity} are too large to estimate"
        )));
    }
    Ok(kg)
}

/// Same as [`estimate_carbon`] for a tag that has not been validated yet.
pub fn estimate_carbon_str(activity_type: &str, details: &Value) -> Result<f64, CarbonError> {
    estimate_carbon(activity_type.parse()?, details)
}

fn commute_km(details: &CommuteDetails, f: &EmissionFactors) -> f64 {
    f.commute_km(details.commute.unwrap_or(Commute::Short))
}

pub fn estimate_parsed(details: &ActivityDetails, f: &EmissionFactors) -> f64 {
    let kg = match details {
        ActivityDetails::Flight(d) => {
            f.flight_km(d.flight_type.unwrap_or(FlightType::Short)) * f.flight_per_km
        }
        ActivityDetails::Driving(d) => {
            commute_km(d, f) * f.car_per_km(d.fuel_type.unwrap_or(FuelType::Petrol))
        }
        ActivityDetails::Train(d) | ActivityDetails::Tube(d) => commute_km(d, f) * f.rail_per_km,
        ActivityDetails::Bus(d) => commute_km(d, f) * f.bus_per_km,

        ActivityDetails::Meat(d) => {
            d.servings_per_week.unwrap_or(0.0)
                * f.serving_kg
                * f.meat(d.kind.unwrap_or(MeatType::Beef))
        }
        ActivityDetails::Dairy(d) => {
            d.servings_per_week.unwrap_or(0.0)
                * f.serving_kg
                * f.dairy(d.kind.unwrap_or(DairyType::Milk))
        }
        ActivityDetails::FoodWaste(d) => {
            f.food_waste_kg(d.frequency.unwrap_or(FoodWasteFrequency::Weekly))
                * f.food_waste_per_kg
        }

        ActivityDetails::Clothing(d) => {
            f.clothing(d.frequency.unwrap_or(ClothingFrequency::Monthly))
        }
        ActivityDetails::Electronics(d) => {
            f.electronics(d.frequency.unwrap_or(ElectronicsFrequency::Rare))
        }
        ActivityDetails::OnlineShopping(d) => {
            d.orders_per_month.unwrap_or(0.0) * f.online_order
                + d.returns_per_month.unwrap_or(0.0) * f.online_return
        }

        ActivityDetails::ElectricityUse(d) => {
            d.kwh_per_month.unwrap_or(0.0) * f.electricity_per_kwh
        }
        ActivityDetails::GasUse(d) => d.kwh_per_month.unwrap_or(0.0) * f.gas_per_kwh,
        ActivityDetails::WaterUse(d) => {
            d.litres_per_day.unwrap_or(0.0) * f.water_per_litre * f.days_per_month
        }

        ActivityDetails::PlasticWaste(d) => {
            d.bags_per_week.unwrap_or(0.0) * f.plastic_bag * f.weeks_per_year / f.months_per_year
        }
        ActivityDetails::GeneralWaste(d) => {
            d.kg_per_week.unwrap_or(0.0) * f.weeks_per_year / f.months_per_year
                * f.general_waste_per_kg
        }
        ActivityDetails::Recycling(d) => {
            ((100.0 - d.percent.unwrap_or(0.0)) * f.recycling_per_missed_percent).max(0.0)
        }

        ActivityDetails::Streaming(d) => {
            d.hours_per_week.unwrap_or(0.0) * f.streaming_per_hour * f.weeks_per_month
        }
        ActivityDetails::Gaming(d) => {
            d.hours_per_week.unwrap_or(0.0) * f.gaming_per_hour * f.weeks_per_month
        }
        ActivityDetails::Events(d) => d.per_year.unwrap_or(0.0) * f.event / f.months_per_year,
        ActivityDetails::HotelStays(d) => {
            d.nights_per_year.unwrap_or(0.0) * f.hotel_night / f.months_per_year
        }
    };

    // Inputs are validated non-negative, so this only normalises -0.0.
    kg.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn est(activity: &str, details: Value) -> f64 {
        estimate_carbon_str(activity, &details).unwrap()
    }

    #[test]
    fn test_driving_defaults_commute_to_short() {
        assert_eq!(est("driving", json!({"fuel_type": "petrol"})), 8.0 * 0.192);
        assert_eq!(est("driving", json!({"fuel_type": "petrol"})), 1.536);
    }

    #[test]
    fn test_driving_medium_diesel() {
        assert_relative_eq!(
            est("driving", json!({"commute": "medium", "fuel_type": "diesel"})),
            16.0 * 0.171,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_flight() {
        assert_eq!(est("flight", json!({"flight_type": "long"})), 230.0);
        assert_relative_eq!(est("flight", json!({})), 57.5, epsilon = 1e-9);
    }

    #[test]
    fn test_public_transport() {
        assert_relative_eq!(est("train", json!({"commute": "long"})), 32.0 * 0.041, epsilon = 1e-9);
        assert_eq!(
            est("tube", json!({"commute": "long"})),
            est("train", json!({"commute": "long"}))
        );
        assert_relative_eq!(est("bus", json!({})), 8.0 * 0.105, epsilon = 1e-9);
    }

    #[test]
    fn test_diet() {
        assert_relative_eq!(est("meat", json!({"servings_per_week": 5})), 27.0, epsilon = 1e-9);
        assert_relative_eq!(
            est("meat", json!({"servings_per_week": 5, "type": "chicken"})),
            6.9,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            est("dairy", json!({"servings_per_week": 10, "type": "cheese"})),
            27.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(est("dairy", json!({"servings_per_week": 10})), 3.8, epsilon = 1e-9);
        assert_eq!(est("meat", json!({})), 0.0);
    }

    #[test]
    fn test_food_waste() {
        assert_relative_eq!(est("food_waste", json!({})), 9.0, epsilon = 1e-9);
        assert_relative_eq!(est("food_waste", json!({"frequency": "rare"})), 2.25, epsilon = 1e-9);
    }

    #[test]
    fn test_shopping() {
        assert_eq!(est("clothing", json!({})), 10.0);
        assert_eq!(est("clothing", json!({"frequency": "weekly"})), 40.0);
        assert_eq!(est("electronics", json!({"frequency": "frequent"})), 200.0);
        assert_relative_eq!(
            est(
                "online_shopping",
                json!({"orders_per_month": 4, "returns_per_month": "2"})
            ),
            10.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_household() {
        assert_relative_eq!(est("electricity_use", json!({"kwh_per_month": 300})), 69.9, epsilon = 1e-9);
        assert_relative_eq!(est("gas_use", json!({"kwh_per_month": 1000})), 184.0, epsilon = 1e-9);
        assert_relative_eq!(
            est("water_use", json!({"litres_per_day": 150})),
            1.35,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_waste() {
        assert_relative_eq!(
            est("plastic_waste", json!({"bags_per_week": 3})),
            3.0 * 0.5 * 52.0 / 12.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            est("general_waste", json!({"kg_per_week": 10})),
            65.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(est("recycling", json!({"percent": 40})), 12.0, epsilon = 1e-9);
        assert_eq!(est("recycling", json!({"percent": 100})), 0.0);
        assert_eq!(est("recycling", json!({"percent": 150})), 0.0);
        assert_relative_eq!(est("recycling", json!({})), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lifestyle() {
        assert_relative_eq!(est("streaming", json!({"hours_per_week": 10})), 2.2, epsilon = 1e-9);
        assert_relative_eq!(est("gaming", json!({"hours_per_week": 10})), 2.0, epsilon = 1e-9);
        assert_relative_eq!(est("events", json!({"per_year": 6})), 10.0, epsilon = 1e-9);
        assert_relative_eq!(est("hotel_stays", json!({"nights_per_year": 12})), 82.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_activity() {
        assert_eq!(
            estimate_carbon_str("unknown_activity", &json!({})),
            Err(CarbonError::InvalidActivity("unknown_activity".into()))
        );
    }

    #[test]
    fn test_unlisted_categories_use_fallback_factors() {
        assert_eq!(est("driving", json!({"commute": "very_long"})), 1.536);
        assert_eq!(est("flight", json!({"flight_type": "medium"})), 230.0);
        assert_eq!(est("clothing", json!({"frequency": "daily"})), 10.0);
        assert_eq!(est("electronics", json!({"frequency": "weekly"})), 50.0);
        assert_relative_eq!(est("food_waste", json!({"frequency": "daily"})), 4.5, epsilon = 1e-9);
        assert_relative_eq!(
            est("meat", json!({"servings_per_week": 5, "type": "venison"})),
            10.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            est("dairy", json!({"servings_per_week": 5, "type": "kefir"})),
            2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_invalid_details() {
        let err = estimate_carbon_str("flight", &json!({"flight_type": 3})).unwrap_err();
        assert!(matches!(err, CarbonError::InvalidDetails(_)));

        let err = estimate_carbon_str("gas_use", &json!(["kwh", 3])).unwrap_err();
        assert!(matches!(err, CarbonError::InvalidDetails(_)));

        let err = estimate_carbon_str("gas_use", &json!({"kwh_per_month": "lots"})).unwrap_err();
        assert!(matches!(err, CarbonError::InvalidDetails(_)));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let err = estimate_carbon_str("meat", &json!({"servings_per_week": 1e308})).unwrap_err();
        assert!(matches!(err, CarbonError::InvalidDetails(_)));

        let err = estimate_carbon_str(
            "online_shopping",
            &json!({"orders_per_month": 1.5e308, "returns_per_month": 1e308}),
        )
        .unwrap_err();
        assert!(matches!(err, CarbonError::InvalidDetails(_)));
    }

    fn valid_details(activity: Activity) -> Value {
        match activity {
            Activity::Flight => json!({"flight_type": "long"}),
            Activity::Driving => json!({"commute": "long", "fuel_type": "electric"}),
            Activity::Train | Activity::Tube | Activity::Bus => json!({"commute": "medium"}),
            Activity::Meat => json!({"servings_per_week": 3, "type": "lamb"}),
            Activity::Dairy => json!({"servings_per_week": 7, "type": "cheese"}),
            Activity::FoodWaste => json!({"frequency": "rare"}),
            Activity::Clothing => json!({"frequency": "weekly"}),
            Activity::Electronics => json!({"frequency": "frequent"}),
            Activity::OnlineShopping => json!({"orders_per_month": 2, "returns_per_month": 1}),
            Activity::ElectricityUse | Activity::GasUse => json!({"kwh_per_month": 250}),
            Activity::WaterUse => json!({"litres_per_day": 120}),
            Activity::PlasticWaste => json!({"bags_per_week": 2}),
            Activity::GeneralWaste => json!({"kg_per_week": 4}),
            Activity::Recycling => json!({"percent": 60}),
            Activity::Streaming | Activity::Gaming => json!({"hours_per_week": 7}),
            Activity::Events => json!({"per_year": 3}),
            Activity::HotelStays => json!({"nights_per_year": 5}),
        }
    }

    #[test]
    fn test_deterministic_and_non_negative() {
        for activity in Activity::ALL {
            let details = valid_details(activity);
            let first = estimate_carbon(activity, &details).unwrap();
            let second = estimate_carbon(activity, &details).unwrap();
            assert_eq!(first, second, "{activity} not deterministic");
            assert!(first > 0.0, "{activity} should be positive for {details}");
        }

        for activity in Activity::ALL {
            let kg = estimate_carbon(activity, &json!({})).unwrap();
            assert!(kg >= 0.0, "{activity} negative with defaults");
        }
    }
}
