//! Command handler implementations

pub mod help;
pub mod remind;
pub mod stats;

pub use help::HelpHandler;
pub use remind::RemindHandler;
pub use stats::StatsHandler;
