pub mod events;
pub mod factory;
pub mod import_engine;
