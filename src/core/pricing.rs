use crate::models::{Confidence, PriceBreakdown, RuleBasedEstimate, VehicleFeatures};

/// Starting point of every rule-based estimate
pub const BASE_PRICE: i64 = 5000;

/// No estimate is ever returned below this price
pub const MIN_PRICE: f64 = 3000.0;

/// Manufacturers that attract the brand premium (matched case-insensitively)
pub const LUXURY_BRANDS: [&str; 5] = ["bmw", "mercedes-benz", "porsche", "jaguar", "audi"];

/// Body styles that attract the body type premium
pub const PREMIUM_BODIES: [&str; 2] = ["convertible", "hardtop"];

const HORSEPOWER_RATE: i64 = 50;
const ENGINE_SIZE_RATE: i64 = 10;
const WEIGHT_RATE: i64 = 2;
const CYLINDER_RATE: i64 = 500;
const CITY_MPG_RATE: i64 = 100;
const BRAND_PREMIUM: i64 = 10_000;
const BODY_TYPE_PREMIUM: i64 = 5_000;
const TURBO_PREMIUM: i64 = 3_000;

/// Rule-based pricing engine
///
/// Pricing formula:
/// price = max(3000, round(
///     5000 +
///     horsepower * 50 +
///     engine_size * 10 +
///     curb_weight * 2 +
///     brand_premium +             # 10000 for luxury manufacturers
///     body_type_premium +         # 5000 for convertible / hardtop
///     turbo_premium +             # 3000 for turbo aspiration
///     cylinders * 500 -
///     city_mpg * 100 +
///     drivetrain_premium,         # 2000 for 4wd, 1000 for rwd
/// 2))
///
/// The engine holds no state and never fails. Out-of-range inputs such as
/// negative horsepower produce correspondingly signed contributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Estimate a price together with its itemized breakdown
    pub fn estimate(&self, features: &VehicleFeatures) -> RuleBasedEstimate {
        let breakdown = calculate_breakdown(features);
        let unclamped = round_to_cents((breakdown.base_price + breakdown.total_adjustment()) as f64);

        // The floor does not feed back into the breakdown
        let price = if unclamped < MIN_PRICE { MIN_PRICE } else { unclamped };

        RuleBasedEstimate {
            price,
            breakdown,
            confidence: Confidence::High,
        }
    }
}

/// Compute every line item of the pricing formula
pub fn calculate_breakdown(features: &VehicleFeatures) -> PriceBreakdown {
    PriceBreakdown {
        base_price: BASE_PRICE,
        horsepower_impact: i64::from(features.horsepower) * HORSEPOWER_RATE,
        engine_size_impact: i64::from(features.engine_size) * ENGINE_SIZE_RATE,
        weight_impact: i64::from(features.curb_weight) * WEIGHT_RATE,
        brand_premium: brand_premium(&features.company),
        body_type_premium: body_type_premium(&features.car_body),
        turbo_premium: turbo_premium(&features.aspiration),
        cylinder_impact: i64::from(features.cylinder_number) * CYLINDER_RATE,
        mpg_adjustment: -(i64::from(features.city_mpg) * CITY_MPG_RATE),
        drivetrain_premium: drivetrain_premium(&features.drive_wheel),
    }
}

/// Premium for luxury manufacturers, case-insensitive
#[inline]
pub fn brand_premium(company: &str) -> i64 {
    if LUXURY_BRANDS.iter().any(|brand| company.eq_ignore_ascii_case(brand)) {
        BRAND_PREMIUM
    } else {
        0
    }
}

#[inline]
pub fn body_type_premium(car_body: &str) -> i64 {
    if PREMIUM_BODIES.contains(&car_body) {
        BODY_TYPE_PREMIUM
    } else {
        0
    }
}

#[inline]
pub fn turbo_premium(aspiration: &str) -> i64 {
    if aspiration == "turbo" {
        TURBO_PREMIUM
    } else {
        0
    }
}

#[inline]
pub fn drivetrain_premium(drive_wheel: &str) -> i64 {
    match drive_wheel {
        "4wd" => 2000,
        "rwd" => 1000,
        _ => 0,
    }
}

/// Round to two decimal places, halves away from zero
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_features() -> VehicleFeatures {
        VehicleFeatures {
            symboling: 3,
            fuel_type: "gas".to_string(),
            aspiration: "std".to_string(),
            door_number: 2,
            car_body: "convertible".to_string(),
            drive_wheel: "rwd".to_string(),
            engine_location: "front".to_string(),
            wheel_base: 88.6,
            car_length: 168.8,
            car_width: 64.1,
            car_height: 48.8,
            curb_weight: 2548,
            engine_type: "dohc".to_string(),
            cylinder_number: 4,
            engine_size: 130,
            fuel_system: "mpfi".to_string(),
            bore_ratio: 3.47,
            stroke: 2.68,
            compression_ratio: 9.0,
            horsepower: 111,
            peak_rpm: 5000,
            city_mpg: 21,
            highway_mpg: 27,
            company: "alfa-romero".to_string(),
        }
    }

    #[test]
    fn test_estimate_reference_vehicle() {
        let estimate = PricingEngine::new().estimate(&create_test_features());

        assert_eq!(estimate.price, 22846.0);
        assert_eq!(estimate.breakdown.horsepower_impact, 5550);
        assert_eq!(estimate.breakdown.engine_size_impact, 1300);
        assert_eq!(estimate.breakdown.weight_impact, 5096);
        assert_eq!(estimate.breakdown.brand_premium, 0);
        assert_eq!(estimate.breakdown.body_type_premium, 5000);
        assert_eq!(estimate.breakdown.turbo_premium, 0);
        assert_eq!(estimate.breakdown.cylinder_impact, 2000);
        assert_eq!(estimate.breakdown.mpg_adjustment, -2100);
        assert_eq!(estimate.breakdown.drivetrain_premium, 1000);
        assert_eq!(estimate.confidence, Confidence::High);
    }

    #[test]
    fn test_floor_keeps_unadjusted_breakdown() {
        let mut features = create_test_features();
        features.horsepower = 0;
        features.engine_size = 0;
        features.curb_weight = 0;
        features.cylinder_number = 0;
        features.city_mpg = 500;
        features.car_body = "sedan".to_string();
        features.drive_wheel = "fwd".to_string();
        features.company = "bmw".to_string();

        let estimate = PricingEngine::new().estimate(&features);

        assert_eq!(estimate.price, MIN_PRICE);
        assert_eq!(estimate.breakdown.mpg_adjustment, -50_000);
        assert_eq!(estimate.breakdown.brand_premium, 10_000);
        assert_eq!(BASE_PRICE + estimate.breakdown.total_adjustment(), -35_000);
    }

    #[test]
    fn test_brand_premium_ignores_case() {
        assert_eq!(brand_premium("BMW"), brand_premium("bmw"));
        assert_eq!(brand_premium("Mercedes-Benz"), 10_000);
        assert_eq!(brand_premium("audi"), 10_000);
        assert_eq!(brand_premium("toyota"), 0);
    }

    #[test]
    fn test_other_categories_are_case_sensitive() {
        assert_eq!(body_type_premium("hardtop"), 5000);
        assert_eq!(body_type_premium("Hardtop"), 0);
        assert_eq!(turbo_premium("turbo"), 3000);
        assert_eq!(turbo_premium("TURBO"), 0);
        assert_eq!(drivetrain_premium("4wd"), 2000);
        assert_eq!(drivetrain_premium("4WD"), 0);
        assert_eq!(drivetrain_premium("fwd"), 0);
    }

    #[test]
    fn test_negative_inputs_produce_signed_contributions() {
        let mut features = create_test_features();
        features.horsepower = -10;

        let breakdown = calculate_breakdown(&features);
        assert_eq!(breakdown.horsepower_impact, -500);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(22846.0), 22846.0);
        assert_eq!(round_to_cents(10.126), 10.13);
        assert_eq!(round_to_cents(-10.126), -10.13);
    }
}
