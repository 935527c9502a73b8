//! Domain entities.

mod link;

pub use link::{LinkStatus, TrackedLink};
