//! # wifi-fingerprint-store
//!
//! Persistence for location fingerprints:
//!
//! - **Port**: [`RecordStore`] -- key-value persistence keyed by location label
//! - **Adapter**: [`JsonFileStore`] -- one JSON document per store file, with
//!   whole-file atomic writes and load-time matrix validation

pub mod error;
pub mod json_store;
pub mod port;

pub use error::StoreError;
pub use json_store::JsonFileStore;
pub use port::RecordStore;
