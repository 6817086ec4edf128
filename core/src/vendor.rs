//! Vendor records — the static schema behind the catalog.
//!
//! A record is never mutated after the catalog is built. All derived
//! figures (TCO, ROI, risk) are computed from it, never written back.

use crate::{
    error::{TcoError, TcoResult},
    types::{Currency, VendorId},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VendorType {
    CloudNative,
    OnPremises,
    CloudHybrid,
    Cloud,
    None,
}

impl VendorType {
    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorType::CloudNative => "cloud-native",
            VendorType::OnPremises  => "on-premises",
            VendorType::CloudHybrid => "cloud-hybrid",
            VendorType::Cloud       => "cloud",
            VendorType::None        => "none",
        }
    }

    /// True for every type whose name contains "cloud". Cloud vendors
    /// carry a per-device subscription and the fastest response tier.
    pub fn is_cloud(&self) -> bool {
        self.as_str().contains("cloud")
    }
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability scores, each on a 0–100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureScores {
    pub zero_trust:          u8,
    pub endpoint_visibility: u8,
    pub cloud_integration:   u8,
    pub multi_vendor:        u8,
    pub remote_access:       u8,
    pub user_experience:     u8,
    pub cloud_native:        u8,
    pub automation:          u8,
    pub threat_response:     u8,
    pub scalability:         u8,
    pub compliance:          u8,
    pub cost_effectiveness:  u8,
    pub ease_of_deployment:  u8,
}

impl FeatureScores {
    /// (wire name, score) pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, u8); 13] {
        [
            ("zeroTrust",          self.zero_trust),
            ("endpointVisibility", self.endpoint_visibility),
            ("cloudIntegration",   self.cloud_integration),
            ("multiVendor",        self.multi_vendor),
            ("remoteAccess",       self.remote_access),
            ("userExperience",     self.user_experience),
            ("cloudNative",        self.cloud_native),
            ("automation",         self.automation),
            ("threatResponse",     self.threat_response),
            ("scalability",        self.scalability),
            ("compliance",         self.compliance),
            ("costEffectiveness",  self.cost_effectiveness),
            ("easeOfDeployment",   self.ease_of_deployment),
        ]
    }
}

/// Unscaled cost schedule. Scaling by device count and locations
/// happens in `tco::compute_breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostSchedule {
    // One-time
    pub initial_hardware:       Currency,
    pub initial_licensing:      Currency,
    pub initial_implementation: Currency,
    // Recurring, per year
    pub annual_maintenance:     Currency,
    pub annual_support:         Currency,
    pub annual_operations:      Currency,
    // Personnel
    pub fte_cost:               Currency,
    pub fte_count:              f64,
}

impl CostSchedule {
    fn currency_entries(&self) -> [(&'static str, Currency); 7] {
        [
            ("initialHardware",       self.initial_hardware),
            ("initialLicensing",      self.initial_licensing),
            ("initialImplementation", self.initial_implementation),
            ("annualMaintenance",     self.annual_maintenance),
            ("annualSupport",         self.annual_support),
            ("annualOperations",      self.annual_operations),
            ("fteCost",               self.fte_cost),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id:              VendorId,
    pub name:            String,
    #[serde(rename = "type")]
    pub vendor_type:     VendorType,
    #[serde(default)]
    pub description:     String,
    pub deployment_time: String,
    pub complexity:      String,
    pub features:        FeatureScores,
    pub costs:           CostSchedule,
    /// Claimed breach-risk reduction vs. no control, 0–100.
    pub risk_reduction:  u8,
}

impl VendorRecord {
    pub fn is_cloud(&self) -> bool {
        self.vendor_type.is_cloud()
    }

    /// Check the record invariants: non-negative finite costs,
    /// non-negative FTE count, scores and risk reduction within 0–100.
    pub fn validate(&self) -> TcoResult<()> {
        let invalid = |reason: String| TcoError::InvalidVendor {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".into()));
        }

        for (field, value) in self.costs.currency_entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("costs.{field} must be >= 0, got {value}")));
            }
        }

        let fte = self.costs.fte_count;
        if !fte.is_finite() || fte < 0.0 {
            return Err(invalid(format!("costs.fteCount must be >= 0, got {fte}")));
        }

        if self.risk_reduction > 100 {
            return Err(invalid(format!(
                "riskReduction must be within 0-100, got {}",
                self.risk_reduction
            )));
        }

        if let Some((name, score)) = self.features.entries().into_iter().find(|(_, s)| *s > 100) {
            return Err(invalid(format!("features.{name} must be within 0-100, got {score}")));
        }

        Ok(())
    }
}
