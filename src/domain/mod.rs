// Domain layer - Core business logic

pub mod command;
pub mod diff;
pub mod errors;
pub mod fields;
pub mod model;
pub mod presets;
pub mod summary;
