//! Adapter implementations for synchronisation ports.

pub mod cache;
pub mod config_file;
pub mod memory;
