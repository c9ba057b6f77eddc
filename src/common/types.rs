// src/common/types.rs

use core::fmt;

// --- Capacities ---

/// Longest inbound host line kept; longer lines are truncated.
pub const MAX_LINE_LEN: usize = 64;
/// Alert lines accepted per cycle.
pub const MAX_ALERT_LINES: usize = 8;
/// Longest SMS body the formatter produces.
pub const MAX_SMS_LEN: usize = 320;
/// Longest recipient phone number (E.164 is at most 15 digits plus '+').
pub const MAX_RECIPIENT_LEN: usize = 20;

// --- Sensor Data ---

/// One sample of all water-quality sensors, taken once per cycle.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub turbidity_voltage: f32,
    pub ph: f32,
}

impl SensorReading {
    pub const fn new(temperature_c: f32, turbidity_voltage: f32, ph: f32) -> Self {
        Self {
            temperature_c,
            turbidity_voltage,
            ph,
        }
    }

    /// Value of the given measured category. `Other` has no reading.
    pub fn value_of(&self, category: Category) -> Option<f32> {
        match category {
            Category::Temperature => Some(self.temperature_c),
            Category::Turbidity => Some(self.turbidity_voltage),
            Category::PH => Some(self.ph),
            Category::Other => None,
        }
    }
}

/// Latest known GPS position.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub valid: bool,
}

impl GeoFix {
    /// No position decoded yet.
    pub const NONE: GeoFix = GeoFix {
        latitude: 0.0,
        longitude: 0.0,
        valid: false,
    };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoFix {
            latitude,
            longitude,
            valid: true,
        }
    }

    /// Finite and within the WGS84 coordinate ranges.
    pub fn is_plausible(latitude: f64, longitude: f64) -> bool {
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }
}

// --- Categories & Severity ---

/// Measured quantity an alert or classification refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Temperature,
    Turbidity,
    PH,
    /// Anything the host sends that is not one of the measured quantities.
    Other,
}

impl Category {
    /// The measured categories, in telemetry/classification order.
    pub const MEASURED: [Category; 3] = [Category::Temperature, Category::Turbidity, Category::PH];

    /// Human-readable name, as used in the host protocol and SMS text.
    pub const fn name(&self) -> &'static str {
        match self {
            Category::Temperature => "Temperature",
            Category::Turbidity => "Turbidity",
            Category::PH => "pH",
            Category::Other => "Other",
        }
    }

    /// Host alert-line prefix (`"<Name>:"`), `None` for `Other`.
    pub const fn prefix(&self) -> Option<&'static str> {
        match self {
            Category::Temperature => Some("Temperature:"),
            Category::Turbidity => Some("Turbidity:"),
            Category::PH => Some("pH:"),
            Category::Other => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a value relative to its category's safe range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Normal,
    High,
}

impl Severity {
    /// Phrase used in SMS text ("is too low", ...).
    pub const fn phrase(&self) -> &'static str {
        match self {
            Severity::Low => "is too low",
            Severity::Normal => "is normal",
            Severity::High => "is too high",
        }
    }
}

/// A reading value tagged with its category and severity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClassifiedValue {
    pub category: Category,
    pub value: f32,
    pub severity: Severity,
}

impl ClassifiedValue {
    pub fn is_alert(&self) -> bool {
        self.severity != Severity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefixes() {
        assert_eq!(Category::Temperature.prefix(), Some("Temperature:"));
        assert_eq!(Category::PH.prefix(), Some("pH:"));
        assert_eq!(Category::Turbidity.prefix(), Some("Turbidity:"));
        assert_eq!(Category::Other.prefix(), None);
    }

    #[test]
    fn test_value_of() {
        let reading = SensorReading::new(25.0, 3.2, 7.1);
        assert_eq!(reading.value_of(Category::Temperature), Some(25.0));
        assert_eq!(reading.value_of(Category::Turbidity), Some(3.2));
        assert_eq!(reading.value_of(Category::PH), Some(7.1));
        assert_eq!(reading.value_of(Category::Other), None);
    }

    #[test]
    fn test_fix_plausibility() {
        assert!(GeoFix::is_plausible(-1.2921, 36.8219));
        assert!(GeoFix::is_plausible(90.0, -180.0));
        assert!(!GeoFix::is_plausible(90.5, 0.0));
        assert!(!GeoFix::is_plausible(0.0, 181.0));
        assert!(!GeoFix::is_plausible(f64::NAN, 0.0));
        assert!(!GeoFix::NONE.valid);
    }
}
