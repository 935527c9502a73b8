//! Application services orchestrating the domain over the repositories.

mod auth_service;
mod redirect_service;
mod software_service;

pub use auth_service::AuthService;
pub use redirect_service::{InterceptOutcome, RedirectDecision, RedirectService, SkipReason};
pub use software_service::{LinkSoftware, SoftwareService};
