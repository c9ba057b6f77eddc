// src/common/threshold.rs

//! Static safe ranges per measured category and the three-way classification
//! shared by the telemetry path and the SMS formatter.

use super::types::{Category, ClassifiedValue, SensorReading, Severity};
use heapless::Vec;

/// Safe range for one category. Both bounds are themselves inside the range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThresholdRule {
    pub category: Category,
    pub low: f32,
    pub high: f32,
    /// Unit suffix appended directly after the value in SMS text.
    pub unit: &'static str,
}

impl ThresholdRule {
    /// Strict comparisons: a value equal to a bound is `Normal`, and so is NaN.
    pub fn severity(&self, value: f32) -> Severity {
        if value < self.low {
            Severity::Low
        } else if value > self.high {
            Severity::High
        } else {
            Severity::Normal
        }
    }
}

pub const TEMPERATURE_RULE: ThresholdRule = ThresholdRule {
    category: Category::Temperature,
    low: 20.0,
    high: 32.0,
    unit: "C",
};

pub const TURBIDITY_RULE: ThresholdRule = ThresholdRule {
    category: Category::Turbidity,
    low: 5.0,
    high: 15.0,
    unit: " NTU",
};

pub const PH_RULE: ThresholdRule = ThresholdRule {
    category: Category::PH,
    low: 6.5,
    high: 8.5,
    unit: "",
};

/// Rule for a measured category; `None` for `Category::Other`.
pub const fn rule_for(category: Category) -> Option<&'static ThresholdRule> {
    match category {
        Category::Temperature => Some(&TEMPERATURE_RULE),
        Category::Turbidity => Some(&TURBIDITY_RULE),
        Category::PH => Some(&PH_RULE),
        Category::Other => None,
    }
}

/// Severity of `value` for `category`, `None` if the category has no rule.
pub fn severity_for(category: Category, value: f32) -> Option<Severity> {
    rule_for(category).map(|rule| rule.severity(value))
}

/// Classifies every measured value of a reading, in Temperature, Turbidity, pH order.
pub fn classify(reading: &SensorReading) -> [ClassifiedValue; 3] {
    Category::MEASURED.map(|category| {
        // MEASURED only holds categories with a value and a rule
        let value = reading.value_of(category).unwrap_or(f32::NAN);
        ClassifiedValue {
            category,
            value,
            severity: severity_for(category, value).unwrap_or(Severity::Normal),
        }
    })
}

/// The out-of-range subset of [`classify`].
pub fn alerts(reading: &SensorReading) -> Vec<ClassifiedValue, 3> {
    classify(reading)
        .into_iter()
        .filter(ClassifiedValue::is_alert)
        .collect()
}
