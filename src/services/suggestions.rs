//! Category-level offset ideas: community projects and habit changes with a
//! link to act on them.

use serde::Serialize;

use super::activity::ActivityCategory;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetSuggestion {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

const fn s(title: &'static str, description: &'static str, link: &'static str) -> OffsetSuggestion {
    OffsetSuggestion {
        title,
        description,
        link,
    }
}

static TRANSPORT: [OffsetSuggestion; 4] = [
    s(
        "Join a tree-planting day",
        "Plant trees locally to offset CO₂ from transport.",
        "https://www.tcv.org.uk/get-involved/volunteering",
    ),
    s(
        "Community car-sharing schemes",
        "Reduce emissions by sharing rides in your area.",
        "https://www.enterprisecarclub.co.uk",
    ),
    s(
        "Switch to public transport",
        "Commit to train or bus for regular commutes.",
        "https://www.nationalrail.co.uk/",
    ),
    s(
        "Offset flight emissions",
        "Donate to verified carbon offset projects for flights.",
        "https://www.goldstandard.org/take-action/offset-your-emissions",
    ),
];

static ENERGY: [OffsetSuggestion; 3] = [
    s(
        "Support community solar",
        "Invest or volunteer in a local renewable energy project.",
        "https://www.communityenergyengland.org",
    ),
    s(
        "Home energy retrofits",
        "Help install insulation, draught-proofing or LED lighting for low-income households.",
        "https://www.retrofitacademy.org",
    ),
    s(
        "Switch to renewable energy",
        "Choose a green energy provider for your home.",
        "https://www.ofgem.gov.uk/energy-switching",
    ),
];

static FOOD: [OffsetSuggestion; 3] = [
    s(
        "Community gardening",
        "Grow food locally and reduce transport emissions.",
        "https://www.farmgarden.org.uk",
    ),
    s(
        "Food redistribution volunteering",
        "Help charities save and redistribute surplus food.",
        "https://fareshare.org.uk/volunteer",
    ),
    s(
        "Switch to plant-based meals",
        "Reduce meat and dairy consumption for a week/month.",
        "https://www.veganuary.com/",
    ),
];

static SHOPPING: [OffsetSuggestion; 3] = [
    s(
        "Donate or swap clothing",
        "Avoid buying new by donating old items or using clothes swaps.",
        "https://www.traid.org.uk",
    ),
    s(
        "Buy second-hand electronics",
        "Reduce carbon footprint by reusing devices.",
        "https://www.cex.co.uk/",
    ),
    s(
        "Reduce online shopping deliveries",
        "Consolidate orders to cut delivery emissions.",
        "https://www.carbontrust.com/resources/carbon-footprint-calculator",
    ),
];

static LIFESTYLE: [OffsetSuggestion; 2] = [
    s(
        "Limit streaming resolution",
        "Watch HD less often or reduce streaming hours to lower energy use.",
        "https://www.carbontrust.com/resources/carbon-footprint-calculator",
    ),
    s(
        "Volunteer at events",
        "Assist at local events to support community projects and reduce footprint indirectly.",
        "https://do-it.org/",
    ),
];

static DEFAULT: [OffsetSuggestion; 2] = [
    s(
        "Habitat restoration volunteering",
        "Help restore local habitats to absorb CO₂ and support wildlife.",
        "https://www.conservationvolunteers.org.uk",
    ),
    s(
        "Support reforestation charities",
        "Donate to UK or global tree planting initiatives.",
        "https://ecologi.com",
    ),
];

/// `None` selects the general list. Waste has no list of its own.
pub fn category_suggestions(category: Option<ActivityCategory>) -> &'static [OffsetSuggestion] {
    match category {
        Some(ActivityCategory::Transport) => &TRANSPORT,
        Some(ActivityCategory::Energy) => &ENERGY,
        Some(ActivityCategory::Food) => &FOOD,
        Some(ActivityCategory::Shopping) => &SHOPPING,
        Some(ActivityCategory::Lifestyle) => &LIFESTYLE,
        Some(ActivityCategory::Waste) | None => &DEFAULT,
    }
}

/// Parse the `category` query value. Matching is case-insensitive and
/// "default" selects the general list.
pub fn parse_category(raw: &str) -> Result<Option<ActivityCategory>, AppError> {
    if raw.eq_ignore_ascii_case("default") {
        return Ok(None);
    }
    raw.parse::<ActivityCategory>().map(Some).map_err(|_| {
        AppError::Validation(format!(
            "Invalid category '{raw}'. Must be one of transport, energy, food, shopping, waste, lifestyle, default"
        ))
    })
}
