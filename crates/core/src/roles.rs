//! Role names stored on identity rows and embedded in JWT claims.

/// Platform operator; may provision new tenants.
pub const ROLE_ADMIN: &str = "admin";

/// Tenant manager; may read the dashboard for their own tenant.
pub const ROLE_MANAGER: &str = "manager";

/// Anonymous employee; may submit grievances.
pub const ROLE_EMPLOYEE: &str = "employee";
