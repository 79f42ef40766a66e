//! Small shared helpers.

pub mod codegen;
pub mod target_url;
pub mod user_agent;
