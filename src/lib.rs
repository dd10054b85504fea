// src/lib.rs

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// Supporting modules
pub mod config;
pub mod util;
