//! Consultant roster core: in-memory repositories, input forms, and the use cases the
//! web front end drives.

pub mod config;
pub mod consultants;
pub mod error;
pub mod store;
pub mod telemetry;
