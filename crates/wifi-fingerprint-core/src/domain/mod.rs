//! Domain types for location fingerprinting.

pub mod matrix;
pub mod reading;
pub mod record;

pub use matrix::SignalMatrix;
pub use reading::SignalReading;
pub use record::FingerprintRecord;
