//! otacheck - Query a vendor OTA service for a device's latest firmware package

pub mod engine;
