//! # Features Layer
//!
//! Feature modules: the reminding core, message delivery, the periodic
//! scheduler and per-user rate limiting.

pub mod delivery;
pub mod rate_limiting;
pub mod remind;
pub mod scheduler;

pub use delivery::{DiscordNotifier, Notifier};
pub use rate_limiting::RateLimiter;
pub use remind::{Note, ReminderService};
pub use scheduler::RemindScheduler;
