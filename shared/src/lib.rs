//! MacroMate Shared Library
//!
//! Pure nutrition calculations used by the WASM bindings and the CLI:
//! unit normalization, BMI, BMR/TDEE, goal adjustment and macro splits,
//! plus the onboarding aggregate and dashboard progress built on them.

pub mod bmi;
pub mod dashboard;
pub mod energy;
pub mod errors;
pub mod goals;
pub mod macros;
pub mod measurement;
pub mod plan;
pub mod profile;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use bmi::*;
pub use dashboard::*;
pub use energy::*;
pub use errors::*;
pub use goals::*;
pub use macros::*;
pub use measurement::*;
pub use plan::*;
pub use profile::*;
pub use units::*;
pub use validation::*;
