//! Global constants for the polygon editor

/// Grid size used when the snap modifier is held
pub const DEFAULT_SNAP_UNIT: f64 = 10.0;

/// Grid size without the snap modifier (whole pixels)
pub const FINE_SNAP_UNIT: f64 = 1.0;

/// Application name used for config directories and logging
pub const APP_NAME: &str = "polyedit";
