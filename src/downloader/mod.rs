//! Sequential, throttled, idempotent download of one PVGIS TMY file per
//! municipality.

pub mod error;
pub mod fetch;
pub mod locator;
pub mod manifest;
pub mod run;
pub mod target;
pub mod throttle;
