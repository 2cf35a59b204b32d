//! Well-known role name constants.
//!
//! These must match the default seeded by the users migration and the
//! startup admin bootstrap.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
