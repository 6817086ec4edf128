//! ROI of one vendor against a baseline vendor.
//!
//! Savings are NOT clamped: a vendor dearer than its baseline shows
//! negative savings and negative ROI. Every ratio guards its
//! denominator and yields 0 instead of NaN or infinity.

use crate::{
    tco::TcoBreakdown,
    types::{Currency, Percent},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub savings:            Currency,
    pub savings_percentage: Percent,
    /// Savings relative to the candidate vendor's own TCO.
    pub roi:                Percent,
    /// Months to recover the initial investment. 0 means no payback
    /// under these assumptions, not an immediate one.
    pub payback_period:     f64,
    #[serde(rename = "baselineTCO")]
    pub baseline_tco:       Currency,
    #[serde(rename = "vendorTCO")]
    pub vendor_tco:         Currency,
}

/// `numerator / denominator × 100`, or 0 when the denominator is 0.
pub(crate) fn percent_of(numerator: f64, denominator: f64) -> Percent {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

pub fn compute_roi_from(
    vendor: &TcoBreakdown,
    baseline: &TcoBreakdown,
    years_to_project: u32,
) -> RoiResult {
    let savings = baseline.three_year_tco - vendor.three_year_tco;

    let monthly_savings = if years_to_project == 0 {
        0.0
    } else {
        savings / f64::from(years_to_project) / 12.0
    };
    let payback_period = if monthly_savings > 0.0 {
        vendor.total_initial_cost / monthly_savings
    } else {
        0.0
    };

    RoiResult {
        savings,
        savings_percentage: percent_of(savings, baseline.three_year_tco),
        roi:                percent_of(savings, vendor.three_year_tco),
        payback_period,
        baseline_tco:       baseline.three_year_tco,
        vendor_tco:         vendor.three_year_tco,
    }
}
