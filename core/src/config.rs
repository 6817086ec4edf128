//! Calculation settings — defaults, partial overrides, industry presets.
//!
//! Callers send a `SettingsOverride` with only the fields they care
//! about. `resolve_settings` merges it over a defaults value and returns
//! a fresh `Settings`; the defaults are never touched.

use crate::types::{Currency, VendorId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Monthly per-device list price for subscription vendors.
    pub base_price:             Currency,
    /// Fraction 0–1 taken off the subscription price.
    pub volume_discount:        f64,
    /// Global FTE cost. Displayed by hosts; personnel cost in the TCO
    /// model comes from each vendor's own cost schedule.
    pub fte_cost:               Currency,
    /// Kept for host compatibility, not read by the engine.
    pub maintenance_percentage: f64,
    pub device_count:           u32,
    pub locations:              u32,
    pub years_to_project:       u32,
    /// Global fallback risk reduction fraction 0–1.
    pub risk_reduction:         f64,
    /// Fraction 0–1 of the insurance premium saved.
    pub insurance_reduction:    f64,
    /// Currency per hour of downtime, part of the contract only.
    pub downtime_cost:          Currency,
    pub industry_risk_factor:   f64,
    pub risk_cost_per_device:   Currency,
    pub default_vendors:        Vec<VendorId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_price:             3.0,
            volume_discount:        0.15,
            fte_cost:               100_000.0,
            maintenance_percentage: 0.18,
            device_count:           500,
            locations:              2,
            years_to_project:       3,
            risk_reduction:         0.35,
            insurance_reduction:    0.10,
            downtime_cost:          5_000.0,
            industry_risk_factor:   1.0,
            risk_cost_per_device:   100.0,
            default_vendors:        vec!["portnox".into(), "cisco".into(), "aruba".into()],
        }
    }
}

/// A partial settings value. Absent fields fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOverride {
    pub base_price:             Option<Currency>,
    pub volume_discount:        Option<f64>,
    pub fte_cost:               Option<Currency>,
    pub maintenance_percentage: Option<f64>,
    pub device_count:           Option<u32>,
    pub locations:              Option<u32>,
    pub years_to_project:       Option<u32>,
    pub risk_reduction:         Option<f64>,
    pub insurance_reduction:    Option<f64>,
    pub downtime_cost:          Option<Currency>,
    pub industry_risk_factor:   Option<f64>,
    pub risk_cost_per_device:   Option<Currency>,
    pub default_vendors:        Option<Vec<VendorId>>,
    /// Supplies `industry_risk_factor` unless that is given explicitly.
    pub industry:               Option<Industry>,
}

impl SettingsOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Load an override document from disk.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let over: SettingsOverride = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(over)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Retail,
    Government,
    Education,
    Manufacturing,
    Energy,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Retail,
        Industry::Government,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Energy,
    ];

    pub fn risk_multiplier(&self) -> f64 {
        match self {
            Industry::Technology    => 1.2,
            Industry::Healthcare    => 1.8,
            Industry::Finance       => 2.0,
            Industry::Retail        => 1.3,
            Industry::Government    => 1.5,
            Industry::Education     => 1.1,
            Industry::Manufacturing => 1.4,
            Industry::Energy        => 1.6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Technology    => "Technology",
            Industry::Healthcare    => "Healthcare",
            Industry::Finance       => "Financial Services",
            Industry::Retail        => "Retail",
            Industry::Government    => "Government",
            Industry::Education     => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Energy        => "Energy & Utilities",
        }
    }
}

/// Merge `over` onto `defaults`, returning a new value.
pub fn resolve_settings(defaults: &Settings, over: Option<&SettingsOverride>) -> Settings {
    let Some(o) = over else {
        return defaults.clone();
    };

    let industry_risk_factor = o
        .industry_risk_factor
        .or_else(|| o.industry.map(|i| i.risk_multiplier()))
        .unwrap_or(defaults.industry_risk_factor);

    Settings {
        base_price:             o.base_price.unwrap_or(defaults.base_price),
        volume_discount:        o.volume_discount.unwrap_or(defaults.volume_discount),
        fte_cost:               o.fte_cost.unwrap_or(defaults.fte_cost),
        maintenance_percentage: o.maintenance_percentage.unwrap_or(defaults.maintenance_percentage),
        device_count:           o.device_count.unwrap_or(defaults.device_count),
        locations:              o.locations.unwrap_or(defaults.locations),
        years_to_project:       o.years_to_project.unwrap_or(defaults.years_to_project),
        risk_reduction:         o.risk_reduction.unwrap_or(defaults.risk_reduction),
        insurance_reduction:    o.insurance_reduction.unwrap_or(defaults.insurance_reduction),
        downtime_cost:          o.downtime_cost.unwrap_or(defaults.downtime_cost),
        industry_risk_factor,
        risk_cost_per_device:   o.risk_cost_per_device.unwrap_or(defaults.risk_cost_per_device),
        default_vendors: o
            .default_vendors
            .clone()
            .unwrap_or_else(|| defaults.default_vendors.clone()),
    }
}
