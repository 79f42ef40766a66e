//! Core business entities.

mod click;
mod mapping;

pub use click::{ClickEvent, NewClickEvent};
pub use mapping::{NewMapping, ShortMapping};
