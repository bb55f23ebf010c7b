// Domain layer - Core session types and rules

pub mod errors;
pub mod model;
pub mod rules;
