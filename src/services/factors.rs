//! Emission factors, in kg CO2 per unit unless stated otherwise.
//!
//! One immutable table shared by every request. Changing a value here
//! changes the estimate for new entries only; stored entries keep the
//! carbon_kg they were created with.

use super::activity::{
    ClothingFrequency, Commute, DairyType, ElectronicsFrequency, FlightType, FoodWasteFrequency,
    FuelType, MeatType,
};

#[derive(Debug)]
pub struct EmissionFactors {
    pub flight_short_km: f64,
    pub flight_long_km: f64,
    pub flight_per_km: f64,

    pub commute_short_km: f64,
    pub commute_medium_km: f64,
    pub commute_long_km: f64,
    pub petrol_car_per_km: f64,
    pub other_car_per_km: f64,
    pub rail_per_km: f64,
    pub bus_per_km: f64,

    /// kg of food in one serving
    pub serving_kg: f64,
    pub beef: f64,
    pub lamb: f64,
    pub pork: f64,
    pub chicken: f64,
    pub fish: f64,
    /// Meat types outside the list above
    pub meat_other: f64,
    pub milk: f64,
    pub cheese: f64,
    pub butter: f64,
    pub yoghurt: f64,
    pub dairy_other: f64,

    /// kg of food wasted per period
    pub food_waste_rare_kg: f64,
    pub food_waste_weekly_kg: f64,
    pub food_waste_other_kg: f64,
    pub food_waste_per_kg: f64,

    pub clothing_monthly: f64,
    pub clothing_weekly: f64,
    pub electronics_rare: f64,
    pub electronics_frequent: f64,
    pub online_order: f64,
    pub online_return: f64,

    pub electricity_per_kwh: f64,
    pub gas_per_kwh: f64,
    pub water_per_litre: f64,

    pub plastic_bag: f64,
    pub general_waste_per_kg: f64,
    pub recycling_per_missed_percent: f64,

    pub streaming_per_hour: f64,
    pub gaming_per_hour: f64,
    pub event: f64,
    pub hotel_night: f64,

    pub days_per_month: f64,
    pub weeks_per_month: f64,
    pub weeks_per_year: f64,
    pub months_per_year: f64,
}

pub static FACTORS: EmissionFactors = EmissionFactors {
    flight_short_km: 500.0,
    flight_long_km: 2000.0,
    flight_per_km: 0.115,

    commute_short_km: 8.0,
    commute_medium_km: 16.0,
    commute_long_km: 32.0,
    petrol_car_per_km: 0.192,
    other_car_per_km: 0.171,
    rail_per_km: 0.041,
    bus_per_km: 0.105,

    serving_kg: 0.2,
    beef: 27.0,
    lamb: 24.0,
    pork: 12.0,
    chicken: 6.9,
    fish: 6.0,
    meat_other: 10.0,
    milk: 1.9,
    cheese: 13.5,
    butter: 24.0,
    yoghurt: 2.2,
    dairy_other: 2.0,

    food_waste_rare_kg: 0.5,
    food_waste_weekly_kg: 2.0,
    food_waste_other_kg: 1.0,
    food_waste_per_kg: 4.5,

    clothing_monthly: 10.0,
    clothing_weekly: 40.0,
    electronics_rare: 50.0,
    electronics_frequent: 200.0,
    online_order: 1.0,
    online_return: 3.0,

    electricity_per_kwh: 0.233,
    gas_per_kwh: 0.184,
    water_per_litre: 0.0003,

    plastic_bag: 0.5,
    general_waste_per_kg: 1.5,
    recycling_per_missed_percent: 0.2,

    streaming_per_hour: 0.055,
    gaming_per_hour: 0.05,
    event: 20.0,
    hotel_night: 82.0,

    days_per_month: 30.0,
    weeks_per_month: 4.0,
    weeks_per_year: 52.0,
    months_per_year: 12.0,
};

impl EmissionFactors {
    pub fn flight_km(&self, flight_type: FlightType) -> f64 {
        match flight_type {
            FlightType::Short => self.flight_short_km,
            FlightType::Long => self.flight_long_km,
        }
    }

    pub fn commute_km(&self, commute: Commute) -> f64 {
        match commute {
            Commute::Short => self.commute_short_km,
            Commute::Medium => self.commute_medium_km,
            Commute::Long => self.commute_long_km,
        }
    }

    pub fn car_per_km(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Petrol => self.petrol_car_per_km,
            FuelType::Other => self.other_car_per_km,
        }
    }

    pub fn meat(&self, meat: MeatType) -> f64 {
        match meat {
            MeatType::Beef => self.beef,
            MeatType::Lamb => self.lamb,
            MeatType::Pork => self.pork,
            MeatType::Chicken => self.chicken,
            MeatType::Fish => self.fish,
            MeatType::Other => self.meat_other,
        }
    }

    pub fn dairy(&self, dairy: DairyType) -> f64 {
        match dairy {
            DairyType::Milk => self.milk,
            DairyType::Cheese => self.cheese,
            DairyType::Butter => self.butter,
            DairyType::Yoghurt => self.yoghurt,
            DairyType::Other => self.dairy_other,
        }
    }

    pub fn food_waste_kg(&self, frequency: FoodWasteFrequency) -> f64 {
        match frequency {
            FoodWasteFrequency::Rare => self.food_waste_rare_kg,
            FoodWasteFrequency::Weekly => self.food_waste_weekly_kg,
            FoodWasteFrequency::Other => self.food_waste_other_kg,
        }
    }

    pub fn clothing(&self, frequency: ClothingFrequency) -> f64 {
        match frequency {
            ClothingFrequency::Monthly => self.clothing_monthly,
            ClothingFrequency::Weekly => self.clothing_weekly,
        }
    }

    pub fn electronics(&self, frequency: ElectronicsFrequency) -> f64 {
        match frequency {
            ElectronicsFrequency::Rare => self.electronics_rare,
            ElectronicsFrequency::Frequent => self.electronics_frequent,
        }
    }
}
