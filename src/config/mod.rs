//! Configuration module for the orrery server.

mod settings;

pub use settings::*;
