//! Caller input: deserialized forms validated into typed payloads.

pub mod categories;
pub mod products;
