use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of columns in the model feature vector
pub const FEATURE_COUNT: usize = 24;

/// Wire names of the categorical fields, in feature-vector order
pub const CATEGORICAL_FIELDS: [&str; 8] = [
    "fueltype",
    "aspiration",
    "carbody",
    "drivewheel",
    "enginelocation",
    "enginetype",
    "fuelsystem",
    "company",
];

/// Vehicle attributes submitted for a price estimate
///
/// POST /predict
///
/// Every field is required. Wire names follow the columns of the
/// training dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VehicleFeatures {
    pub symboling: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "fueltype")]
    pub fuel_type: String,
    #[validate(length(min = 1))]
    pub aspiration: String,
    #[serde(rename = "doornumber")]
    pub door_number: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "carbody")]
    pub car_body: String,
    #[validate(length(min = 1))]
    #[serde(rename = "drivewheel")]
    pub drive_wheel: String,
    #[validate(length(min = 1))]
    #[serde(rename = "enginelocation")]
    pub engine_location: String,
    #[serde(rename = "wheelbase")]
    pub wheel_base: f64,
    #[serde(rename = "carlength")]
    pub car_length: f64,
    #[serde(rename = "carwidth")]
    pub car_width: f64,
    #[serde(rename = "carheight")]
    pub car_height: f64,
    #[serde(rename = "curbweight")]
    pub curb_weight: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "enginetype")]
    pub engine_type: String,
    #[serde(rename = "cylindernumber")]
    pub cylinder_number: i32,
    #[serde(rename = "enginesize")]
    pub engine_size: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "fuelsystem")]
    pub fuel_system: String,
    #[serde(rename = "boreratio")]
    pub bore_ratio: f64,
    pub stroke: f64,
    #[serde(rename = "compressionratio")]
    pub compression_ratio: f64,
    pub horsepower: i32,
    #[serde(rename = "peakrpm")]
    pub peak_rpm: i32,
    #[serde(rename = "citympg")]
    pub city_mpg: i32,
    #[serde(rename = "highwaympg")]
    pub highway_mpg: i32,
    #[validate(length(min = 1))]
    pub company: String,
}

/// A single column of the feature vector before encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl VehicleFeatures {
    /// All fields keyed by wire name, in feature-vector order
    pub fn fields(&self) -> [(&'static str, FeatureValue<'_>); FEATURE_COUNT] {
        use FeatureValue::{Categorical, Numeric};

        [
            ("symboling", Numeric(f64::from(self.symboling))),
            ("fueltype", Categorical(&self.fuel_type)),
            ("aspiration", Categorical(&self.aspiration)),
            ("doornumber", Numeric(f64::from(self.door_number))),
            ("carbody", Categorical(&self.car_body)),
            ("drivewheel", Categorical(&self.drive_wheel)),
            ("enginelocation", Categorical(&self.engine_location)),
            ("wheelbase", Numeric(self.wheel_base)),
            ("carlength", Numeric(self.car_length)),
            ("carwidth", Numeric(self.car_width)),
            ("carheight", Numeric(self.car_height)),
            ("curbweight", Numeric(f64::from(self.curb_weight))),
            ("enginetype", Categorical(&self.engine_type)),
            ("cylindernumber", Numeric(f64::from(self.cylinder_number))),
            ("enginesize", Numeric(f64::from(self.engine_size))),
            ("fuelsystem", Categorical(&self.fuel_system)),
            ("boreratio", Numeric(self.bore_ratio)),
            ("stroke", Numeric(self.stroke)),
            ("compressionratio", Numeric(self.compression_ratio)),
            ("horsepower", Numeric(f64::from(self.horsepower))),
            ("peakrpm", Numeric(f64::from(self.peak_rpm))),
            ("citympg", Numeric(f64::from(self.city_mpg))),
            ("highwaympg", Numeric(f64::from(self.highway_mpg))),
            ("company", Categorical(&self.company)),
        ]
    }

    /// Categorical fields only, as (wire name, raw value)
    pub fn categorical_fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields().into_iter().filter_map(|(name, value)| match value {
            FeatureValue::Categorical(raw) => Some((name, raw)),
            FeatureValue::Numeric(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VehicleFeatures {
        serde_json::from_value(serde_json::json!({
            "symboling": 3, "fueltype": "gas", "aspiration": "std", "doornumber": 2,
            "carbody": "convertible", "drivewheel": "rwd", "enginelocation": "front",
            "wheelbase": 88.6, "carlength": 168.8, "carwidth": 64.1, "carheight": 48.8,
            "curbweight": 2548, "enginetype": "dohc", "cylindernumber": 4, "enginesize": 130,
            "fuelsystem": "mpfi", "boreratio": 3.47, "stroke": 2.68, "compressionratio": 9.0,
            "horsepower": 111, "peakrpm": 5000, "citympg": 21, "highwaympg": 27,
            "company": "alfa-romero"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_wire_names() {
        let features = sample();
        assert_eq!(features.curb_weight, 2548);
        assert_eq!(features.car_body, "convertible");
        assert_eq!(features.company, "alfa-romero");
    }

    #[test]
    fn test_missing_field_rejected() {
        let result: Result<VehicleFeatures, _> =
            serde_json::from_value(serde_json::json!({ "symboling": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_categorical_fields_match_declared_order() {
        let features = sample();
        let names: Vec<&str> = features.categorical_fields().map(|(name, _)| name).collect();
        assert_eq!(names, CATEGORICAL_FIELDS);
    }

    #[test]
    fn test_empty_category_fails_validation() {
        let mut features = sample();
        assert!(features.validate().is_ok());

        features.company = String::new();
        assert!(features.validate().is_err());
    }
}
