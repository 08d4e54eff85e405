//! Activity taxonomy and the typed parameter records each activity accepts.
//!
//! Callers send `details` as a loose JSON object. It is parsed once, at the
//! boundary, into one of the records below. Unknown keys are ignored, missing
//! keys stay `None` and pick up their documented default in the estimator,
//! and anything of the wrong shape is rejected as `InvalidDetails`.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::CarbonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Flight,
    Driving,
    Train,
    Tube,
    Bus,
    Meat,
    Dairy,
    FoodWaste,
    Clothing,
    Electronics,
    OnlineShopping,
    ElectricityUse,
    GasUse,
    WaterUse,
    PlasticWaste,
    GeneralWaste,
    Recycling,
    Streaming,
    Gaming,
    Events,
    HotelStays,
}

impl Activity {
    pub const ALL: [Activity; 21] = [
        Activity::Flight,
        Activity::Driving,
        Activity::Train,
        Activity::Tube,
        Activity::Bus,
        Activity::Meat,
        Activity::Dairy,
        Activity::FoodWaste,
        Activity::Clothing,
        Activity::Electronics,
        Activity::OnlineShopping,
        Activity::ElectricityUse,
        Activity::GasUse,
        Activity::WaterUse,
        Activity::PlasticWaste,
        Activity::GeneralWaste,
        Activity::Recycling,
        Activity::Streaming,
        Activity::Gaming,
        Activity::Events,
        Activity::HotelStays,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Flight => "flight",
            Activity::Driving => "driving",
            Activity::Train => "train",
            Activity::Tube => "tube",
            Activity::Bus => "bus",
            Activity::Meat => "meat",
            Activity::Dairy => "dairy",
            Activity::FoodWaste => "food_waste",
            Activity::Clothing => "clothing",
            Activity::Electronics => "electronics",
            Activity::OnlineShopping => "online_shopping",
            Activity::ElectricityUse => "electricity_use",
            Activity::GasUse => "gas_use",
            Activity::WaterUse => "water_use",
            Activity::PlasticWaste => "plastic_waste",
            Activity::GeneralWaste => "general_waste",
            Activity::Recycling => "recycling",
            Activity::Streaming => "streaming",
            Activity::Gaming => "gaming",
            Activity::Events => "events",
            Activity::HotelStays => "hotel_stays",
        }
    }

    pub fn category(self) -> ActivityCategory {
        match self {
            Activity::Flight
            | Activity::Driving
            | Activity::Train
            | Activity::Tube
            | Activity::Bus => ActivityCategory::Transport,
            Activity::Meat | Activity::Dairy | Activity::FoodWaste => ActivityCategory::Food,
            Activity::Clothing | Activity::Electronics | Activity::OnlineShopping => {
                ActivityCategory::Shopping
            }
            Activity::ElectricityUse | Activity::GasUse | Activity::WaterUse => {
                ActivityCategory::Energy
            }
            Activity::PlasticWaste | Activity::GeneralWaste | Activity::Recycling => {
                ActivityCategory::Waste
            }
            Activity::Streaming | Activity::Gaming | Activity::Events | Activity::HotelStays => {
                ActivityCategory::Lifestyle
            }
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CarbonError::InvalidActivity(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Transport,
    Food,
    Shopping,
    Energy,
    Waste,
    Lifestyle,
}

impl ActivityCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Energy => "energy",
            Self::Waste => "waste",
            Self::Lifestyle => "lifestyle",
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transport" => Ok(Self::Transport),
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "energy" => Ok(Self::Energy),
            "waste" => Ok(Self::Waste),
            "lifestyle" => Ok(Self::Lifestyle),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Categorical options
// ============================================================================

/// Unlisted strings select a fallback, so a categorical field only fails
/// when it is not a string at all. `else` names a listed variant as the
/// fallback; `otherwise` adds an unlabelled variant with its own factor.
macro_rules! lenient_enum {
    (
        $(#[$doc:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? } else $fallback:ident
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($variant,)+
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::$fallback,
                }
            }
        }
    };
    (
        $(#[$doc:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? } otherwise $other:ident
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($variant,)+
            $other,
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::$other,
                }
            }
        }
    };
}

lenient_enum! {
    /// Anything but "short" is priced as a long flight.
    FlightType { Short => "short", Long => "long" } else Long
}

lenient_enum! {
    /// Unlisted distances count as a short commute.
    Commute { Short => "short", Medium => "medium", Long => "long" } else Short
}

lenient_enum! {
    /// Petrol has its own factor; every other fuel shares the lower one.
    FuelType { Petrol => "petrol" } otherwise Other
}

lenient_enum! {
    MeatType {
        Beef => "beef",
        Lamb => "lamb",
        Pork => "pork",
        Chicken => "chicken",
        Fish => "fish",
    } otherwise Other
}

lenient_enum! {
    DairyType {
        Milk => "milk",
        Cheese => "cheese",
        Butter => "butter",
        Yoghurt => "yoghurt",
    } otherwise Other
}

lenient_enum! {
    FoodWasteFrequency { Rare => "rare", Weekly => "weekly" } otherwise Other
}

lenient_enum! {
    ClothingFrequency { Monthly => "monthly", Weekly => "weekly" } else Monthly
}

lenient_enum! {
    ElectronicsFrequency { Rare => "rare", Frequent => "frequent" } else Rare
}

// ============================================================================
// Per-activity records
// ============================================================================

/// `flight_type` defaults to short.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightDetails {
    #[serde(default)]
    pub flight_type: Option<FlightType>,
}

/// Shared by driving, train, tube and bus. `commute` defaults to short,
/// `fuel_type` to petrol and only matters when driving.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommuteDetails {
    #[serde(default)]
    pub commute: Option<Commute>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
}

/// Meat and dairy. `type` defaults to beef or milk respectively.
#[derive(Debug, Clone, Deserialize)]
pub struct ServingsDetails<K> {
    #[serde(default, deserialize_with = "quantity")]
    pub servings_per_week: Option<f64>,
    #[serde(default = "none", rename = "type")]
    pub kind: Option<K>,
}

/// food_waste defaults to weekly, clothing to monthly, electronics to rare.
#[derive(Debug, Clone, Deserialize)]
pub struct FrequencyDetails<F> {
    #[serde(default = "none")]
    pub frequency: Option<F>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnlineShoppingDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub orders_per_month: Option<f64>,
    #[serde(default, deserialize_with = "quantity")]
    pub returns_per_month: Option<f64>,
}

/// Electricity and gas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnergyDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub kwh_per_month: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaterDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub litres_per_day: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlasticWasteDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub bags_per_week: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralWasteDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub kg_per_week: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecyclingDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub percent: Option<f64>,
}

/// Streaming and gaming.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenTimeDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub per_year: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelDetails {
    #[serde(default, deserialize_with = "quantity")]
    pub nights_per_year: Option<f64>,
}

/// A validated parameter bag, tagged by the activity it belongs to.
#[derive(Debug, Clone)]
pub enum ActivityDetails {
    Flight(FlightDetails),
    Driving(CommuteDetails),
    Train(CommuteDetails),
    Tube(CommuteDetails),
    Bus(CommuteDetails),
    Meat(ServingsDetails<MeatType>),
    Dairy(ServingsDetails<DairyType>),
    FoodWaste(FrequencyDetails<FoodWasteFrequency>),
    Clothing(FrequencyDetails<ClothingFrequency>),
    Electronics(FrequencyDetails<ElectronicsFrequency>),
    OnlineShopping(OnlineShoppingDetails),
    ElectricityUse(EnergyDetails),
    GasUse(EnergyDetails),
    WaterUse(WaterDetails),
    PlasticWaste(PlasticWasteDetails),
    GeneralWaste(GeneralWasteDetails),
    Recycling(RecyclingDetails),
    Streaming(ScreenTimeDetails),
    Gaming(ScreenTimeDetails),
    Events(EventsDetails),
    HotelStays(HotelDetails),
}

impl ActivityDetails {
    pub fn parse(activity: Activity, details: &Value) -> Result<Self, CarbonError> {
        if !details.is_object() {
            return Err(CarbonError::InvalidDetails(
                "details must be a JSON object".into(),
            ));
        }

        Ok(match activity {
            Activity::Flight => Self::Flight(record(details)?),
            Activity::Driving => Self::Driving(record(details)?),
            Activity::Train => Self::Train(record(details)?),
            Activity::Tube => Self::Tube(record(details)?),
            Activity::Bus => Self::Bus(record(details)?),
            Activity::Meat => Self::Meat(record(details)?),
            Activity::Dairy => Self::Dairy(record(details)?),
            Activity::FoodWaste => Self::FoodWaste(record(details)?),
            Activity::Clothing => Self::Clothing(record(details)?),
            Activity::Electronics => Self::Electronics(record(details)?),
            Activity::OnlineShopping => Self::OnlineShopping(record(details)?),
            Activity::ElectricityUse => Self::ElectricityUse(record(details)?),
            Activity::GasUse => Self::GasUse(record(details)?),
            Activity::WaterUse => Self::WaterUse(record(details)?),
            Activity::PlasticWaste => Self::PlasticWaste(record(details)?),
            Activity::GeneralWaste => Self::GeneralWaste(record(details)?),
            Activity::Recycling => Self::Recycling(record(details)?),
            Activity::Streaming => Self::Streaming(record(details)?),
            Activity::Gaming => Self::Gaming(record(details)?),
            Activity::Events => Self::Events(record(details)?),
            Activity::HotelStays => Self::HotelStays(record(details)?),
        })
    }
}

fn record<T: for<'de> Deserialize<'de>>(details: &Value) -> Result<T, CarbonError> {
    T::deserialize(details).map_err(|e| CarbonError::InvalidDetails(e.to_string()))
}

fn none<T>() -> Option<T> {
    None
}

/// Numbers and numeric strings coerce to `f64`; `null` counts as missing.
/// Booleans, arrays, objects, negative and non-finite values are rejected.
fn quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        Some(n) => Err(D::Error::custom(format!(
            "expected a non-negative number, got {n}"
        ))),
        None => Err(D::Error::custom(format!("expected a number, got {value}"))),
    }
}
