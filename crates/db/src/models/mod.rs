//! Entity models: `FromRow` structs mirroring table rows, plus input DTOs.

pub mod billing;
pub mod grievance;
pub mod identity;
pub mod invite_token;
pub mod ledger;
pub mod tenant;
pub mod user;
