//! Infrastructure layer: database access and external collaborators.

pub mod geo;
pub mod persistence;
