//! HTTP handlers.

mod health;
mod intercept;
mod log;
mod software;

pub use health::health_handler;
pub use intercept::intercept_handler;
pub use log::log_tail_handler;
pub use software::{
    clear_link_software_handler, get_link_software_handler, set_link_software_handler,
    software_map_handler,
};
