//! HTTP handlers.

mod index;
mod redirect;
mod shorten;
mod track;

pub use index::index_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use track::track_handler;
