//! Domain logic for the voicebox feedback platform.
//!
//! Everything in this crate is pure: no I/O, no async, no database handles.
//! The `db` and `api` crates depend on it for the admission policy, the
//! payment-event classification, the error taxonomy, and shared types.

pub mod admission;
pub mod billing;
pub mod error;
pub mod roles;
pub mod types;
