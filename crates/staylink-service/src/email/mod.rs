//! Outbound email delivery.

pub mod notifier;

pub use notifier::EmailNotifier;
