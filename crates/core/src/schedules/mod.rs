//! Schedule management: gateway port, notifications and the service

pub mod ports;
pub mod service;

pub use ports::{Notification, NotificationLevel, Notifier, ScheduleGateway};
pub use service::{is_not_found, ScheduleService};
