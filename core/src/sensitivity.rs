//! Sensitivity analysis — how TCO and ROI move when one assumption moves.
//!
//! A sweep varies one parameter from −range% to +range% of its resolved
//! value in evenly spaced steps and recomputes the vendor's TCO and its
//! ROI against a baseline at every point. A tornado runs a ±range% swing
//! for every parameter and ranks them by TCO impact.

use crate::{
    config::{Settings, SettingsOverride},
    engine::TcoEngine,
    types::{Currency, Percent, VendorId},
};
use serde::{Deserialize, Serialize};

/// Default swing for tornado analysis, percent.
pub const TORNADO_RANGE_PCT: f64 = 20.0;

/// Widest swing accepted, percent. Larger or negative ranges are folded
/// into [0, MAX_RANGE_PCT].
pub const MAX_RANGE_PCT: f64 = 100.0;

/// Most points a sweep will compute.
pub const MAX_STEPS: usize = 11;

/// ROI a price point must beat to count as the base-price breakeven.
pub const PRICE_BREAKEVEN_ROI_PCT: Percent = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityParameter {
    DeviceCount,
    BasePrice,
    VolumeDiscount,
    Locations,
    YearsToProject,
}

impl SensitivityParameter {
    pub const ALL: [SensitivityParameter; 5] = [
        SensitivityParameter::DeviceCount,
        SensitivityParameter::BasePrice,
        SensitivityParameter::VolumeDiscount,
        SensitivityParameter::Locations,
        SensitivityParameter::YearsToProject,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SensitivityParameter::DeviceCount    => "Device Count",
            SensitivityParameter::BasePrice      => "Price per Device",
            SensitivityParameter::VolumeDiscount => "Volume Discount",
            SensitivityParameter::Locations      => "Locations",
            SensitivityParameter::YearsToProject => "Analysis Period",
        }
    }

    /// Current value of this parameter in `settings`.
    pub fn value(&self, settings: &Settings) -> f64 {
        match self {
            SensitivityParameter::DeviceCount    => f64::from(settings.device_count),
            SensitivityParameter::BasePrice      => settings.base_price,
            SensitivityParameter::VolumeDiscount => settings.volume_discount,
            SensitivityParameter::Locations      => f64::from(settings.locations),
            SensitivityParameter::YearsToProject => f64::from(settings.years_to_project),
        }
    }

    /// Snap a raw value onto this parameter's domain: counts to whole
    /// numbers within the `u32` range, prices to cents, discounts into [0, 1].
    pub fn round(&self, raw: f64) -> f64 {
        match self {
            SensitivityParameter::DeviceCount
            | SensitivityParameter::Locations
            | SensitivityParameter::YearsToProject => {
                raw.round().clamp(0.0, f64::from(u32::MAX))
            }
            SensitivityParameter::BasePrice => ((raw * 100.0).round() / 100.0).max(0.0),
            SensitivityParameter::VolumeDiscount => {
                ((raw * 10_000.0).round() / 10_000.0).clamp(0.0, 1.0)
            }
        }
    }

    /// Write `value` into `settings`. `value` should already be rounded.
    pub fn set(&self, settings: &mut Settings, value: f64) {
        match self {
            SensitivityParameter::DeviceCount    => settings.device_count = value as u32,
            SensitivityParameter::BasePrice      => settings.base_price = value,
            SensitivityParameter::VolumeDiscount => settings.volume_discount = value,
            SensitivityParameter::Locations      => settings.locations = value as u32,
            SensitivityParameter::YearsToProject => settings.years_to_project = value as u32,
        }
    }
}

/// |range_pct| capped at MAX_RANGE_PCT. Non-finite ranges become 0.
pub fn effective_range(range_pct: f64) -> f64 {
    if range_pct.is_finite() {
        range_pct.abs().min(MAX_RANGE_PCT)
    } else {
        0.0
    }
}

/// Distinct values from −range% to +range% of `base`, ascending.
/// Fewer than two steps yields just the base value; more than
/// MAX_STEPS is capped.
pub fn variations(
    parameter: SensitivityParameter,
    base: f64,
    range_pct: f64,
    steps: usize,
) -> Vec<f64> {
    if steps < 2 {
        return vec![parameter.round(base)];
    }
    let steps = steps.min(MAX_STEPS);
    let range_pct = effective_range(range_pct);

    let step_size = 2.0 * range_pct / (steps - 1) as f64;
    let mut values: Vec<f64> = (0..steps)
        .map(|i| {
            let pct_change = -range_pct + i as f64 * step_size;
            parameter.round(base * (1.0 + pct_change / 100.0))
        })
        .collect();
    values.dedup();
    values
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SensitivityRating {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
}

impl SensitivityRating {
    pub fn from_elasticity(elasticity: f64) -> Self {
        if elasticity < 0.5 {
            SensitivityRating::Low
        } else if elasticity < 1.0 {
            SensitivityRating::MediumLow
        } else if elasticity < 1.5 {
            SensitivityRating::Medium
        } else if elasticity < 2.0 {
            SensitivityRating::MediumHigh
        } else {
            SensitivityRating::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensitivityRating::Low        => "Low",
            SensitivityRating::MediumLow  => "Medium-Low",
            SensitivityRating::Medium     => "Medium",
            SensitivityRating::MediumHigh => "Medium-High",
            SensitivityRating::High       => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub value: f64,
    pub tco:   Currency,
    /// ROI against the sweep's baseline; 0 when the baseline is unknown.
    pub roi:   Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensitivitySweep {
    pub vendor:     VendorId,
    pub baseline:   VendorId,
    pub parameter:  SensitivityParameter,
    pub base_value: f64,
    pub base_tco:   Currency,
    pub points:     Vec<SensitivityPoint>,
    pub elasticity: f64,
    pub rating:     SensitivityRating,
    /// See `breakeven`.
    pub breakeven:  Option<f64>,
}

/// Midpoint arc elasticity between the lowest and highest value points.
pub fn arc_elasticity(points: &[SensitivityPoint]) -> f64 {
    let (Some(lo), Some(hi)) = (points.first(), points.last()) else {
        return 0.0;
    };

    let value_mid = (hi.value + lo.value) / 2.0;
    let tco_mid = (hi.tco + lo.tco) / 2.0;
    if value_mid == 0.0 || tco_mid == 0.0 {
        return 0.0;
    }

    let value_change = (hi.value - lo.value) / value_mid;
    let tco_change = (hi.tco - lo.tco) / tco_mid;
    if value_change == 0.0 {
        return 0.0;
    }

    (tco_change / value_change).abs()
}

/// Breakeven of a sweep whose points are in ascending value order.
///
///   DeviceCount → smallest fleet with a positive ROI.
///   BasePrice   → highest price that still returns more than
///                 PRICE_BREAKEVEN_ROI_PCT.
///   otherwise   → None.
pub fn breakeven(parameter: SensitivityParameter, points: &[SensitivityPoint]) -> Option<f64> {
    match parameter {
        SensitivityParameter::DeviceCount => {
            points.iter().find(|p| p.roi > 0.0).map(|p| p.value)
        }
        SensitivityParameter::BasePrice => points
            .iter()
            .rev()
            .find(|p| p.roi > PRICE_BREAKEVEN_ROI_PCT)
            .map(|p| p.value),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TornadoBar {
    pub parameter:  SensitivityParameter,
    pub low_value:  f64,
    pub high_value: f64,
    pub low_tco:    Currency,
    pub high_tco:   Currency,
    /// |high_tco − low_tco|
    pub impact:     Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TornadoAnalysis {
    pub vendor:         VendorId,
    pub range_pct:      f64,
    pub base_tco:       Currency,
    /// Sorted by impact, largest first.
    pub bars:           Vec<TornadoBar>,
    pub most_sensitive: Option<SensitivityParameter>,
}

impl TcoEngine {
    /// Sweep `parameter` for `vendor_id`, measuring ROI against `baseline_id`.
    /// `None` if the vendor is unknown.
    pub fn sensitivity(
        &self,
        vendor_id: &str,
        baseline_id: &str,
        parameter: SensitivityParameter,
        range_pct: f64,
        steps: usize,
        over: Option<&SettingsOverride>,
    ) -> Option<SensitivitySweep> {
        let settings = self.resolve(over);
        let base_tco = self.tco_with(vendor_id, &settings)?.three_year_tco;
        let base_value = parameter.value(&settings);

        let mut points = Vec::with_capacity(steps.clamp(1, MAX_STEPS));
        for value in variations(parameter, base_value, range_pct, steps) {
            let mut varied = settings.clone();
            parameter.set(&mut varied, value);

            let tco = self.tco_with(vendor_id, &varied)?.three_year_tco;
            let roi = self
                .roi_with(vendor_id, baseline_id, &varied)
                .map(|r| r.roi)
                .unwrap_or(0.0);
            points.push(SensitivityPoint { value, tco, roi });
        }

        let elasticity = arc_elasticity(&points);
        let breakeven = breakeven(parameter, &points);

        log::debug!(
            "sensitivity: {vendor_id} {:?} over {} points, elasticity={elasticity:.3}",
            parameter,
            points.len()
        );

        Some(SensitivitySweep {
            vendor: vendor_id.into(),
            baseline: baseline_id.into(),
            parameter,
            base_value,
            base_tco,
            points,
            elasticity,
            rating: SensitivityRating::from_elasticity(elasticity),
            breakeven,
        })
    }

    /// ±`range_pct` swing of every parameter, ranked by TCO impact.
    /// `None` if the vendor is unknown.
    pub fn tornado(
        &self,
        vendor_id: &str,
        range_pct: f64,
        over: Option<&SettingsOverride>,
    ) -> Option<TornadoAnalysis> {
        let settings = self.resolve(over);
        let base_tco = self.tco_with(vendor_id, &settings)?.three_year_tco;
        let range_pct = effective_range(range_pct);

        let mut bars = Vec::with_capacity(SensitivityParameter::ALL.len());
        for parameter in SensitivityParameter::ALL {
            let base = parameter.value(&settings);
            let low_value = parameter.round(base * (1.0 - range_pct / 100.0));
            let high_value = parameter.round(base * (1.0 + range_pct / 100.0));

            let mut low = settings.clone();
            parameter.set(&mut low, low_value);
            let mut high = settings.clone();
            parameter.set(&mut high, high_value);

            let low_tco = self.tco_with(vendor_id, &low)?.three_year_tco;
            let high_tco = self.tco_with(vendor_id, &high)?.three_year_tco;

            bars.push(TornadoBar {
                parameter,
                low_value,
                high_value,
                low_tco,
                high_tco,
                impact: (high_tco - low_tco).abs(),
            });
        }

        // Stable: ties keep declaration order.
        bars.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        let most_sensitive = bars.first().filter(|b| b.impact > 0.0).map(|b| b.parameter);

        Some(TornadoAnalysis {
            vendor: vendor_id.into(),
            range_pct,
            base_tco,
            bars,
            most_sensitive,
        })
    }
}
