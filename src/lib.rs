pub mod catalog;
pub mod core;
pub mod gui;
pub mod persistence;
pub mod settings;
pub mod telemetry;
