//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod grievance_repo;
pub mod identity_repo;
pub mod invite_token_repo;
pub mod ledger_repo;
pub mod purchase_repo;
pub mod subscription_repo;
pub mod tenant_repo;
pub mod user_repo;

pub use grievance_repo::GrievanceRepo;
pub use identity_repo::IdentityRepo;
pub use invite_token_repo::InviteTokenRepo;
pub use ledger_repo::LedgerRepo;
pub use purchase_repo::PurchaseRepo;
pub use subscription_repo::SubscriptionRepo;
pub use tenant_repo::TenantRepo;
pub use user_repo::UserRepo;
