//! Shared primitive types used across the engine.

/// Stable catalog key for a vendor, e.g. `"portnox"`.
pub type VendorId = String;

/// A monetary amount in base currency units (USD).
pub type Currency = f64;

/// A percentage on the 0–100 scale.
pub type Percent = f64;

/// A duration in minutes.
pub type Minutes = u32;

/// The canonical scenario run identifier.
pub type RunId = String;
