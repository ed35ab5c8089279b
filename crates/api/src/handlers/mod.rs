//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod entry;
pub mod grievances;
pub mod webhooks;
