pub mod candidate;
pub mod error;
pub mod import;
pub mod policy;
pub mod repositories;
pub mod services;
pub mod tag;
