//! Breach-risk, compliance and insurance model for a vendor.
//!
//! The no-control exposure (`base_breach_risk`) depends only on the
//! settings. The vendor record only decides how much of it is removed.

use crate::{
    config::Settings,
    types::{Currency, Minutes, Percent},
    vendor::VendorRecord,
};
use serde::{Deserialize, Serialize};

/// Compliance cost avoided per device at a 100 compliance score.
pub const COMPLIANCE_COST_PER_DEVICE: Currency = 20.0;

/// Insurance premium as a fraction of breach-risk exposure.
pub const INSURANCE_PREMIUM_RATE: f64 = 0.10;

pub const MTTR_CLOUD:           Minutes = 30;
pub const MTTR_STRONG_RESPONSE: Minutes = 60;
pub const MTTR_FAIR_RESPONSE:   Minutes = 120;
pub const MTTR_BASELINE:        Minutes = 240;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Copied from the catalog, 0–100.
    pub risk_reduction:           u8,
    pub base_breach_risk:         Currency,
    pub reduced_breach_risk:      Currency,
    pub breach_cost_savings:      Currency,
    /// The vendor's compliance feature score, 0–100.
    pub compliance_coverage:      u8,
    pub compliance_savings:       Currency,
    /// Mean time to respond, minutes.
    pub mttr:                     Minutes,
    pub insurance_reduction:      Percent,
    pub annual_insurance_savings: Currency,
}

/// Response-time tier. Cloud delivery beats feature scores.
pub fn mttr_minutes(vendor: &VendorRecord) -> Minutes {
    let threat_response = vendor.features.threat_response;
    if vendor.is_cloud() {
        MTTR_CLOUD
    } else if threat_response > 70 {
        MTTR_STRONG_RESPONSE
    } else if threat_response > 50 {
        MTTR_FAIR_RESPONSE
    } else {
        MTTR_BASELINE
    }
}

pub fn compute_assessment(vendor: &VendorRecord, settings: &Settings) -> RiskAssessment {
    let devices = f64::from(settings.device_count);
    let reduction = f64::from(vendor.risk_reduction) / 100.0;

    let base_breach_risk =
        devices * settings.risk_cost_per_device * settings.industry_risk_factor;
    let reduced_breach_risk = base_breach_risk * (1.0 - reduction);
    let breach_cost_savings = base_breach_risk - reduced_breach_risk;

    let compliance_coverage = vendor.features.compliance;
    let compliance_savings =
        devices * COMPLIANCE_COST_PER_DEVICE * (f64::from(compliance_coverage) / 100.0);

    let annual_insurance_savings =
        base_breach_risk * INSURANCE_PREMIUM_RATE * settings.insurance_reduction;

    RiskAssessment {
        risk_reduction: vendor.risk_reduction,
        base_breach_risk,
        reduced_breach_risk,
        breach_cost_savings,
        compliance_coverage,
        compliance_savings,
        mttr: mttr_minutes(vendor),
        insurance_reduction: settings.insurance_reduction * 100.0,
        annual_insurance_savings,
    }
}
