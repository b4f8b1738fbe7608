// Core layer - configuration, errors, shared text utilities
pub mod core;

// Infrastructure - sqlite storage
pub mod database;

// Features layer - reminding, delivery, scheduling, rate limiting
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::config::Config;
pub use core::errors::{DeliveryError, RemindError, StorageError};

pub use features::{
    // Delivery
    DiscordNotifier, Notifier,
    // Rate limiting
    RateLimiter,
    // Reminding
    Note, RemindScheduler, ReminderService,
};
