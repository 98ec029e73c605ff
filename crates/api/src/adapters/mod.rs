//! Terminal-side implementations of core ports

pub mod notifier;

pub use notifier::NotificationFeed;
