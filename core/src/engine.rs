//! The calculation engine — the one entry point hosts call.
//!
//! PIPELINE (per selected vendor, fixed order):
//!   1. Resolve settings (defaults + override), once per call.
//!   2. Resolve the vendor against the injected catalog; skip if unknown.
//!   3. TCO breakdown.
//!   4. ROI against the baseline vendor.
//!   5. Risk assessment.
//!   6. Comparisons of every other vendor against the reference vendor.
//!   7. Summary: lowest TCO, fastest payback, highest ROI.
//!
//! RULES:
//!   - Pure: no I/O, no clock, no randomness, no shared mutable state.
//!   - Never fails on data problems. Unknown ids are skipped, missing
//!     settings are defaulted, zero denominators yield 0.
//!   - Results are built fresh on every call.

use crate::{
    catalog::VendorCatalog,
    config::{resolve_settings, Settings, SettingsOverride},
    risk::{compute_assessment, RiskAssessment},
    roi::{compute_roi_from, percent_of, RoiResult},
    tco::{compute_breakdown, TcoBreakdown, YearlyCost},
    types::{Currency, Percent, VendorId},
    vendor::{VendorRecord, VendorType},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The vendor comparisons are anchored on when it is selected.
pub const SUBJECT_VENDOR: &str = "portnox";

/// The incumbent every vendor's ROI is measured against.
pub const DEFAULT_BASELINE_VENDOR: &str = "cisco";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorResult {
    pub id:           VendorId,
    pub name:         String,
    #[serde(rename = "type")]
    pub vendor_type:  VendorType,
    pub tco:          TcoBreakdown,
    /// `None` when the baseline vendor is not in the catalog.
    pub roi:          Option<RoiResult>,
    pub risk:         RiskAssessment,
    pub yearly_costs: Vec<YearlyCost>,
}

/// `vendor1` is the reference vendor. Positive figures favour it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub vendor1:                   VendorId,
    pub vendor2:                   VendorId,
    pub tco_savings:               Currency,
    pub tco_savings_percentage:    Percent,
    pub initial_cost_difference:   Currency,
    pub annual_cost_difference:    Currency,
    pub risk_reduction_difference: i32,
}

/// One vendor singled out by a summary metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorHighlight {
    pub vendor_id: VendorId,
    pub value:     f64,
}

/// Headline picks across the resolved vendors. Zero TCOs and zero
/// paybacks mean "no data" and never win; ties go to the earlier vendor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    /// Smallest positive `threeYearTCO`.
    pub lowest_tco:      Option<VendorHighlight>,
    /// Smallest positive `paybackPeriod`, months.
    pub fastest_payback: Option<VendorHighlight>,
    /// Largest positive ROI.
    pub highest_roi:     Option<VendorHighlight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    pub vendors:     Vec<VendorResult>,
    pub comparisons: Vec<Comparison>,
    #[serde(default)]
    pub summary:     ResultsSummary,
}

impl CalculationResults {
    pub fn vendor(&self, id: &str) -> Option<&VendorResult> {
        self.vendors.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct TcoEngine {
    catalog:  Arc<VendorCatalog>,
    defaults: Settings,
    baseline: VendorId,
}

impl TcoEngine {
    pub fn new(catalog: Arc<VendorCatalog>) -> Self {
        Self {
            catalog,
            defaults: Settings::default(),
            baseline: DEFAULT_BASELINE_VENDOR.into(),
        }
    }

    /// Engine over the built-in catalog and default settings.
    pub fn builtin() -> Self {
        Self::new(Arc::new(VendorCatalog::builtin()))
    }

    pub fn with_defaults(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_baseline(mut self, baseline: impl Into<VendorId>) -> Self {
        self.baseline = baseline.into();
        self
    }

    /// Replace the whole catalog. Records are never patched in place.
    pub fn with_catalog(mut self, catalog: Arc<VendorCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &Arc<VendorCatalog> {
        &self.catalog
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn get_vendor(&self, id: &str) -> Option<&VendorRecord> {
        self.catalog.get(id)
    }

    pub fn resolve(&self, over: Option<&SettingsOverride>) -> Settings {
        resolve_settings(&self.defaults, over)
    }

    pub fn compute_tco(
        &self,
        vendor_id: &str,
        over: Option<&SettingsOverride>,
    ) -> Option<TcoBreakdown> {
        let settings = self.resolve(over);
        self.tco_with(vendor_id, &settings)
    }

    pub fn compute_roi(
        &self,
        vendor_id: &str,
        baseline_id: &str,
        over: Option<&SettingsOverride>,
    ) -> Option<RoiResult> {
        let settings = self.resolve(over);
        self.roi_with(vendor_id, baseline_id, &settings)
    }

    pub fn compute_risk_assessment(
        &self,
        vendor_id: &str,
        over: Option<&SettingsOverride>,
    ) -> Option<RiskAssessment> {
        let settings = self.resolve(over);
        let vendor = self.lookup(vendor_id)?;
        Some(compute_assessment(vendor, &settings))
    }

    /// Full comparison over `selected`. An empty selection falls back
    /// to the resolved `default_vendors`.
    pub fn compute_all<S: AsRef<str>>(
        &self,
        selected: &[S],
        over: Option<&SettingsOverride>,
    ) -> CalculationResults {
        let settings = self.resolve(over);

        let ids: Vec<&str> = if selected.is_empty() {
            settings.default_vendors.iter().map(String::as_str).collect()
        } else {
            selected.iter().map(AsRef::as_ref).collect()
        };

        let baseline_tco = self
            .catalog
            .get(&self.baseline)
            .map(|v| compute_breakdown(v, &settings));
        if baseline_tco.is_none() {
            log::warn!("engine: baseline vendor '{}' not in catalog, ROI omitted", self.baseline);
        }

        let mut results = CalculationResults::default();

        for id in ids {
            let Some(vendor) = self.lookup(id) else {
                continue;
            };

            let tco = compute_breakdown(vendor, &settings);
            let roi = baseline_tco
                .as_ref()
                .map(|base| compute_roi_from(&tco, base, settings.years_to_project));
            let risk = compute_assessment(vendor, &settings);
            let yearly_costs = tco.yearly_costs(settings.years_to_project);

            results.vendors.push(VendorResult {
                id: vendor.id.clone(),
                name: vendor.name.clone(),
                vendor_type: vendor.vendor_type,
                tco,
                roi,
                risk,
                yearly_costs,
            });
        }

        if results.vendors.len() > 1 {
            results.comparisons = compare_against_reference(&results.vendors);
        }
        results.summary = summarize(&results.vendors);

        log::debug!(
            "engine: computed {} vendors, {} comparisons",
            results.vendors.len(),
            results.comparisons.len()
        );

        results
    }

    // ── Internals ─────────────────────────────────────────────

    fn lookup(&self, vendor_id: &str) -> Option<&VendorRecord> {
        let vendor = self.catalog.get(vendor_id);
        if vendor.is_none() {
            log::warn!("engine: unknown vendor id '{vendor_id}', skipped");
        }
        vendor
    }

    pub(crate) fn tco_with(&self, vendor_id: &str, settings: &Settings) -> Option<TcoBreakdown> {
        self.lookup(vendor_id).map(|v| compute_breakdown(v, settings))
    }

    pub(crate) fn roi_with(
        &self,
        vendor_id: &str,
        baseline_id: &str,
        settings: &Settings,
    ) -> Option<RoiResult> {
        let vendor_tco = self.tco_with(vendor_id, settings)?;
        let baseline_tco = self.tco_with(baseline_id, settings)?;
        Some(compute_roi_from(&vendor_tco, &baseline_tco, settings.years_to_project))
    }
}

impl Default for TcoEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compare every non-reference vendor against the reference: the subject
/// vendor when selected, otherwise the first resolved vendor.
fn compare_against_reference(vendors: &[VendorResult]) -> Vec<Comparison> {
    let reference = vendors
        .iter()
        .find(|v| v.id == SUBJECT_VENDOR)
        .unwrap_or(&vendors[0]);

    vendors
        .iter()
        .filter(|other| other.id != reference.id)
        .map(|other| {
            let tco_savings = other.tco.three_year_tco - reference.tco.three_year_tco;
            Comparison {
                vendor1: reference.id.clone(),
                vendor2: other.id.clone(),
                tco_savings,
                tco_savings_percentage: percent_of(tco_savings, other.tco.three_year_tco),
                initial_cost_difference: other.tco.total_initial_cost
                    - reference.tco.total_initial_cost,
                annual_cost_difference: other.tco.total_annual_cost
                    - reference.tco.total_annual_cost,
                risk_reduction_difference: i32::from(reference.risk.risk_reduction)
                    - i32::from(other.risk.risk_reduction),
            }
        })
        .collect()
}

fn summarize(vendors: &[VendorResult]) -> ResultsSummary {
    let mut summary = ResultsSummary::default();

    for v in vendors {
        let tco = v.tco.three_year_tco;
        if tco > 0.0 && summary.lowest_tco.as_ref().map_or(true, |h| tco < h.value) {
            summary.lowest_tco = Some(VendorHighlight { vendor_id: v.id.clone(), value: tco });
        }

        let Some(roi) = v.roi.as_ref() else {
            continue;
        };
        let payback = roi.payback_period;
        if payback > 0.0 && summary.fastest_payback.as_ref().map_or(true, |h| payback < h.value) {
            summary.fastest_payback =
                Some(VendorHighlight { vendor_id: v.id.clone(), value: payback });
        }
        if roi.roi > 0.0 && summary.highest_roi.as_ref().map_or(true, |h| roi.roi > h.value) {
            summary.highest_roi = Some(VendorHighlight { vendor_id: v.id.clone(), value: roi.roi });
        }
    }

    summary
}
