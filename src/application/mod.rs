//! Application layer: services orchestrating the domain over the
//! repository traits.

pub mod recorder;
pub mod redirect;
pub mod shortener;
pub mod sweeper;
pub mod tracking;

pub use recorder::run_click_recorder;
pub use redirect::RedirectService;
pub use shortener::ShortenerService;
pub use sweeper::ExpirySweeper;
pub use tracking::{TrackData, TrackingService};
