/// Lower bounds (inclusive) of each suggestion tier, in kg CO2.
const TIER_LOW: f64 = 50.0;
const TIER_MEDIUM: f64 = 200.0;
const TIER_HIGH: f64 = 500.0;

/// Offset suggestions for an estimate, most important first. Always
/// non-empty.
pub fn suggest_offsets(carbon_kg: f64) -> Vec<String> {
    let tier: &[&str] = if carbon_kg < TIER_LOW {
        &[
            "Plant 1 tree (absorbs ~20kg CO₂/year)",
            "Cycle instead of driving once a week",
            "Volunteer with local environmental group",
        ]
    } else if carbon_kg < TIER_MEDIUM {
        &[
            "Plant 5 trees",
            "Switch 2 meat meals to vegetarian per week",
            "Join a community gardening project",
        ]
    } else if carbon_kg < TIER_HIGH {
        &[
            "Plant 10 trees",
            "Use public transport instead of car twice a week",
            "Upgrade to LED lighting at home",
            "Participate in local habitat restoration volunteering",
        ]
    } else {
        &[
            "Plant 20+ trees",
            "Switch to renewable energy provider",
            "Reduce air travel where possible",
            "Contribute to reforestation charities",
        ]
    };

    tier.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_offsets_ranges() {
        assert!(suggest_offsets(30.0)[0].contains("Plant 1 tree"));
        assert!(suggest_offsets(150.0)[0].contains("Plant 5 trees"));
        assert!(suggest_offsets(300.0)[0].contains("Plant 10 trees"));
        assert!(suggest_offsets(600.0)[0].contains("Plant 20+"));
    }

    #[test]
    fn test_boundaries_are_inclusive_lower() {
        assert!(suggest_offsets(49.999)[0].contains("Plant 1 tree"));
        assert!(suggest_offsets(50.0)[0].contains("Plant 5 trees"));
        assert!(suggest_offsets(200.0)[0].contains("Plant 10 trees"));
        assert!(suggest_offsets(500.0)[0].contains("Plant 20+"));
    }

    #[test]
    fn test_zero_and_tier_sizes() {
        assert_eq!(suggest_offsets(0.0).len(), 3);
        assert_eq!(suggest_offsets(100.0).len(), 3);
        assert_eq!(suggest_offsets(250.0).len(), 4);
        assert_eq!(suggest_offsets(10_000.0).len(), 4);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(suggest_offsets(123.4), suggest_offsets(123.4));
    }
}
