//! Request extractors: JWT authentication and role/key-based authorization.

pub mod auth;
pub mod rbac;
