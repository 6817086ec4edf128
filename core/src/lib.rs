//! NAC TCO engine: total cost of ownership, ROI and risk comparisons
//! for network access control vendors.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod risk;
pub mod roi;
pub mod sensitivity;
pub mod store;
pub mod tco;
pub mod types;
pub mod vendor;

pub use catalog::VendorCatalog;
pub use config::{resolve_settings, Industry, Settings, SettingsOverride};
pub use engine::{
    CalculationResults, Comparison, ResultsSummary, TcoEngine, VendorHighlight, VendorResult,
};
pub use error::{TcoError, TcoResult};
