//! Request handlers, one submodule per resource.
//!
//! Handlers resolve the actor via the `CurrentUser` extractor, consult the
//! central authorization policy through [`authorize`], delegate to the
//! repositories in `streamlay_db`, and map errors via `AppError`. No
//! handler compares role strings directly.

pub mod overlays;
pub mod streams;
pub mod users;

use streamlay_core::error::CoreError;
use streamlay_core::policy::{decide, Action, Actor, Decision, Resource};

use crate::error::AppError;

/// Run the authorization policy, converting a denial into a 403.
pub(crate) fn authorize(
    actor: &Actor,
    resource: Resource,
    action: Action,
) -> Result<(), AppError> {
    match decide(actor, resource, action) {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => Err(AppError::Core(CoreError::Forbidden(reason.into()))),
    }
}
