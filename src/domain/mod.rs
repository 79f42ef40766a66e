//! Domain layer: entities, repository traits, and in-flight messages.

pub mod click_message;
pub mod entities;
pub mod repositories;
