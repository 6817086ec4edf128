//! Vendor catalog — read-only lookup table keyed by vendor id.
//!
//! Built once (from the built-in table or a JSON file) and never
//! mutated afterwards. Hosts that reload vendor data build a new
//! catalog and swap it in whole; see `TcoEngine::with_catalog`.

use crate::{
    error::{TcoError, TcoResult},
    types::VendorId,
    vendor::{CostSchedule, FeatureScores, VendorRecord, VendorType},
};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct VendorCatalog {
    vendors: HashMap<VendorId, VendorRecord>,
    order:   Vec<VendorId>,
}

#[derive(Debug, Clone, Deserialize)]
struct VendorCatalogFile {
    vendors: Vec<VendorRecord>,
}

impl VendorCatalog {
    /// Build a catalog from records, validating each one.
    /// Source order is preserved for listing.
    pub fn from_records(records: Vec<VendorRecord>) -> TcoResult<Self> {
        let mut vendors = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());

        for record in records {
            record.validate()?;
            if vendors.contains_key(&record.id) {
                return Err(TcoError::DuplicateVendor { id: record.id });
            }
            order.push(record.id.clone());
            vendors.insert(record.id.clone(), record);
        }

        Ok(Self { vendors, order })
    }

    /// Parse a catalog document of the form `{ "vendors": [ ... ] }`.
    pub fn from_json_str(json: &str) -> TcoResult<Self> {
        let file: VendorCatalogFile = serde_json::from_str(json)?;
        Self::from_records(file.vendors)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &str) -> TcoResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog = Self::from_json_str(&content)?;
        log::info!("catalog: loaded {} vendors from {path}", catalog.len());
        Ok(catalog)
    }

    /// O(1) lookup. Unknown ids yield `None`; callers skip them.
    pub fn get(&self, id: &str) -> Option<&VendorRecord> {
        self.vendors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vendors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vendor ids in source order.
    pub fn ids(&self) -> &[VendorId] {
        &self.order
    }

    /// Records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &VendorRecord> {
        self.order.iter().filter_map(|id| self.vendors.get(id))
    }

    /// The built-in NAC vendor table.
    pub fn builtin() -> Self {
        let records = vec![
            vendor(
                "portnox", "Portnox Cloud", VendorType::CloudNative, "Cloud-native NAC",
                "Days", "Low",
                [92, 95, 98, 90, 96, 88, 100, 90, 85, 92, 94, 88, 95],
                [0.0, 100_000.0, 20_000.0, 0.0, 30_000.0, 30_000.0, 80_000.0, 0.25],
                85,
            ),
            vendor(
                "cisco", "Cisco ISE", VendorType::OnPremises, "Enterprise NAC",
                "Months", "High",
                [45, 80, 50, 75, 70, 60, 20, 65, 75, 80, 85, 40, 40],
                [80_000.0, 120_000.0, 60_000.0, 25_000.0, 40_000.0, 80_000.0, 100_000.0, 1.5],
                60,
            ),
            vendor(
                "aruba", "Aruba ClearPass", VendorType::OnPremises, "Policy manager",
                "Weeks", "Moderate",
                [42, 75, 55, 85, 65, 65, 30, 60, 70, 78, 80, 45, 50],
                [70_000.0, 100_000.0, 50_000.0, 20_000.0, 35_000.0, 70_000.0, 90_000.0, 1.25],
                65,
            ),
            vendor(
                "forescout", "Forescout", VendorType::OnPremises, "Device visibility",
                "Weeks", "Moderate",
                [40, 90, 40, 75, 60, 55, 20, 70, 80, 75, 82, 35, 45],
                [90_000.0, 110_000.0, 55_000.0, 25_000.0, 40_000.0, 75_000.0, 95_000.0, 1.25],
                70,
            ),
            vendor(
                "fortinac", "FortiNAC", VendorType::OnPremises, "Fortinet NAC",
                "Weeks", "Moderate",
                [38, 70, 45, 65, 60, 60, 25, 65, 75, 70, 75, 55, 55],
                [60_000.0, 90_000.0, 45_000.0, 18_000.0, 35_000.0, 65_000.0, 85_000.0, 1.0],
                62,
            ),
            vendor(
                "juniper", "Juniper Mist", VendorType::CloudHybrid, "AI-driven NAC",
                "Days to Weeks", "Moderate",
                [60, 65, 75, 60, 75, 70, 70, 80, 65, 75, 70, 60, 65],
                [20_000.0, 105_000.0, 40_000.0, 5_000.0, 30_000.0, 45_000.0, 85_000.0, 0.75],
                70,
            ),
            vendor(
                "securew2", "SecureW2", VendorType::Cloud, "Cloud RADIUS",
                "Days", "Low",
                [60, 65, 75, 70, 75, 75, 85, 70, 65, 65, 65, 70, 75],
                [0.0, 85_000.0, 30_000.0, 0.0, 25_000.0, 40_000.0, 75_000.0, 0.75],
                65,
            ),
            vendor(
                "microsoft", "Microsoft NPS", VendorType::OnPremises, "Windows Server NAC",
                "Weeks", "Moderate",
                [30, 50, 45, 40, 65, 55, 25, 40, 35, 60, 50, 70, 50],
                [20_000.0, 45_000.0, 35_000.0, 8_000.0, 15_000.0, 50_000.0, 80_000.0, 0.8],
                40,
            ),
            vendor(
                "arista", "Arista Agni", VendorType::CloudHybrid, "Network control",
                "Weeks", "Moderate",
                [55, 60, 70, 50, 65, 60, 60, 75, 60, 75, 60, 55, 60],
                [25_000.0, 95_000.0, 45_000.0, 10_000.0, 28_000.0, 50_000.0, 85_000.0, 0.8],
                60,
            ),
            vendor(
                "foxpass", "Foxpass", VendorType::Cloud, "Cloud RADIUS/LDAP",
                "Hours to Days", "Low",
                [55, 55, 80, 65, 70, 75, 90, 65, 55, 60, 55, 80, 85],
                [0.0, 60_000.0, 15_000.0, 0.0, 18_000.0, 25_000.0, 70_000.0, 0.5],
                55,
            ),
            vendor(
                "no-nac", "No NAC Solution", VendorType::None, "High risk baseline",
                "N/A", "None",
                [0, 10, 0, 0, 10, 30, 0, 0, 0, 0, 0, 100, 100],
                [0.0; 8],
                0,
            ),
        ];

        let mut vendors = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            order.push(record.id.clone());
            vendors.insert(record.id.clone(), record);
        }
        Self { vendors, order }
    }
}

impl Default for VendorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Feature order: zeroTrust, endpointVisibility, cloudIntegration,
/// multiVendor, remoteAccess, userExperience, cloudNative, automation,
/// threatResponse, scalability, compliance, costEffectiveness,
/// easeOfDeployment.
///
/// Cost order: initialHardware, initialLicensing, initialImplementation,
/// annualMaintenance, annualSupport, annualOperations, fteCost, fteCount.
#[allow(clippy::too_many_arguments)]
fn vendor(
    id: &str,
    name: &str,
    vendor_type: VendorType,
    description: &str,
    deployment_time: &str,
    complexity: &str,
    f: [u8; 13],
    c: [f64; 8],
    risk_reduction: u8,
) -> VendorRecord {
    VendorRecord {
        id:              id.into(),
        name:            name.into(),
        vendor_type,
        description:     description.into(),
        deployment_time: deployment_time.into(),
        complexity:      complexity.into(),
        features: FeatureScores {
            zero_trust:          f[0],
            endpoint_visibility: f[1],
            cloud_integration:   f[2],
            multi_vendor:        f[3],
            remote_access:       f[4],
            user_experience:     f[5],
            cloud_native:        f[6],
            automation:          f[7],
            threat_response:     f[8],
            scalability:         f[9],
            compliance:          f[10],
            cost_effectiveness:  f[11],
            ease_of_deployment:  f[12],
        },
        costs: CostSchedule {
            initial_hardware:       c[0],
            initial_licensing:      c[1],
            initial_implementation: c[2],
            annual_maintenance:     c[3],
            annual_support:         c[4],
            annual_operations:      c[5],
            fte_cost:               c[6],
            fte_count:              c[7],
        },
        risk_reduction,
    }
}
