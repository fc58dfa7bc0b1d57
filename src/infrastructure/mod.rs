//! Infrastructure layer - validators, in-memory adapters and services

pub mod audit;
pub mod logging;
pub mod observability;
pub mod process;
pub mod services;
pub mod validation;
