//! Climate Chart - temperature and humidity chart for a CSV sensor data endpoint
//!
//! This library exposes the core modules for testing and reuse.

pub mod chart;
pub mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod source;
