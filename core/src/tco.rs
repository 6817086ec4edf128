//! TCO model — scales a vendor's cost schedule to an organisation's
//! size and footprint and projects it over the configured years.
//!
//! SCALING RULES:
//!   - Hardware, implementation and maintenance scale with size AND sites.
//!   - Licensing, support, operations and personnel scale with size only.
//!   - Cloud vendors add a per-device subscription.

use crate::{
    config::Settings,
    types::Currency,
    vendor::VendorRecord,
};
use serde::{Deserialize, Serialize};

/// Size-factor breakpoints, ascending. The last threshold passed wins.
const SMALL_ORG_DEVICES:  u32 = 1_000;
const LARGE_ORG_DEVICES:  u32 = 5_000;
const XLARGE_ORG_DEVICES: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TcoBreakdown {
    // One-time
    pub initial_hardware:       Currency,
    pub initial_licensing:      Currency,
    pub initial_implementation: Currency,
    pub total_initial_cost:     Currency,
    // Recurring
    pub annual_maintenance:     Currency,
    pub annual_support:         Currency,
    pub annual_operations:      Currency,
    pub annual_personnel:       Currency,
    pub annual_subscription:    Currency,
    pub total_annual_cost:      Currency,
    /// TCO over `years_to_project`; the name is kept for consumers.
    #[serde(rename = "threeYearTCO")]
    pub three_year_tco:         Currency,
}

/// One row of the year-by-year cost schedule. Year 0 is the initial
/// investment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCost {
    pub year:       u32,
    pub label:      String,
    pub one_time:   Currency,
    pub recurring:  Currency,
    pub total:      Currency,
    pub cumulative: Currency,
}

/// Device-count multiplier.
///
///   < 1000    → 0.8
///   1000–5000 → 1.0
///   > 5000    → 1.5
///   > 10000   → 2.0
pub fn size_factor(device_count: u32) -> f64 {
    let mut factor = 1.0;
    if device_count < SMALL_ORG_DEVICES {
        factor = 0.8;
    }
    if device_count > LARGE_ORG_DEVICES {
        factor = 1.5;
    }
    if device_count > XLARGE_ORG_DEVICES {
        factor = 2.0;
    }
    factor
}

/// Sub-linear site multiplier: `sqrt(locations / 2)`. Two sites is the
/// identity, zero sites collapses site-bound costs to zero.
pub fn location_factor(locations: u32) -> f64 {
    (f64::from(locations) / 2.0).sqrt()
}

/// Annual subscription for a cloud vendor, zero otherwise.
pub fn annual_subscription(vendor: &VendorRecord, settings: &Settings) -> Currency {
    if !vendor.is_cloud() {
        return 0.0;
    }
    let discounted_monthly = settings.base_price * (1.0 - settings.volume_discount);
    f64::from(settings.device_count) * discounted_monthly * 12.0
}

/// Scale `vendor`'s cost schedule under `settings`.
pub fn compute_breakdown(vendor: &VendorRecord, settings: &Settings) -> TcoBreakdown {
    let size = size_factor(settings.device_count);
    let sites = location_factor(settings.locations);
    let costs = &vendor.costs;

    let initial_hardware       = costs.initial_hardware * size * sites;
    let initial_licensing      = costs.initial_licensing * size;
    let initial_implementation = costs.initial_implementation * size * sites;
    let total_initial_cost     = initial_hardware + initial_licensing + initial_implementation;

    let annual_maintenance = costs.annual_maintenance * size * sites;
    let annual_support     = costs.annual_support * size;
    let annual_operations  = costs.annual_operations * size;
    // Vendor-embedded FTE figures are authoritative; Settings::fte_cost is not used.
    let annual_personnel   = costs.fte_cost * costs.fte_count * size;
    let annual_subscription = annual_subscription(vendor, settings);

    let total_annual_cost = annual_maintenance
        + annual_support
        + annual_operations
        + annual_personnel
        + annual_subscription;

    let three_year_tco =
        total_initial_cost + total_annual_cost * f64::from(settings.years_to_project);

    log::debug!(
        "tco: {} size={size} sites={sites:.3} initial={total_initial_cost:.2} annual={total_annual_cost:.2} tco={three_year_tco:.2}",
        vendor.id
    );

    TcoBreakdown {
        initial_hardware,
        initial_licensing,
        initial_implementation,
        total_initial_cost,
        annual_maintenance,
        annual_support,
        annual_operations,
        annual_personnel,
        annual_subscription,
        total_annual_cost,
        three_year_tco,
    }
}

impl TcoBreakdown {
    /// Year-by-year schedule: the initial investment at year 0, then one
    /// row per projected year. The final cumulative equals the TCO.
    pub fn yearly_costs(&self, years: u32) -> Vec<YearlyCost> {
        let mut schedule = Vec::with_capacity(years as usize + 1);
        let mut cumulative = self.total_initial_cost;

        schedule.push(YearlyCost {
            year:       0,
            label:      "Initial".into(),
            one_time:   self.total_initial_cost,
            recurring:  0.0,
            total:      self.total_initial_cost,
            cumulative,
        });

        for year in 1..=years {
            cumulative += self.total_annual_cost;
            schedule.push(YearlyCost {
                year,
                label:     format!("Year {year}"),
                one_time:  0.0,
                recurring: self.total_annual_cost,
                total:     self.total_annual_cost,
                cumulative,
            });
        }

        schedule
    }
}
