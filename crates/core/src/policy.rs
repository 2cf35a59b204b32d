//! Centralized authorization policy.
//!
//! All role and ownership checks live in [`decide`], a pure function over an
//! actor/resource/action triple. Handlers never compare role strings
//! themselves; they build a [`Resource`] and act on the [`Decision`].
//!
//! Rules are evaluated in order, first match wins:
//!
//! 1. Admins may do anything to streams and overlays.
//! 2. Stream mutation is admin-only; stream read/list is open to any
//!    authenticated actor.
//! 3. Creating a stream-attached overlay is admin-only; creating a
//!    user-owned overlay is open (the caller becomes the owner).
//! 4. Stream-attached overlays are readable by anyone authenticated but
//!    writable only by admins.
//! 5. User-owned overlays are readable and writable by their owner (or an
//!    admin).
//! 6. A user may read/update their own record; listing users and deleting
//!    any user is admin-only.

use crate::overlay::OverlayAttachment;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The authenticated identity making a request.
///
/// The role here is the live role re-read from the store for this request,
/// not the role frozen into the bearer token at issuance.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(id: DbId, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// The operation the actor is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    List,
    Update,
    Delete,
}

/// The resource the actor is acting on.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    /// A stream record (or the stream collection, for create/list).
    Stream,
    /// An existing overlay, or for `Action::Create` the attachment the new
    /// overlay would have. Stream existence is the handler's concern and is
    /// checked before the policy runs.
    Overlay(OverlayAttachment),
    /// A specific user record.
    UserRecord { target: DbId },
    /// The user collection as a whole (listing).
    UserDirectory,
}

/// The outcome of a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decide whether `actor` may perform `action` on `resource`.
///
/// Pure: no I/O, no side effects. Deny reasons are fixed strings surfaced
/// verbatim in 403 responses.
pub fn decide(actor: &Actor, resource: Resource, action: Action) -> Decision {
    match resource {
        // Admin override for streams and overlays.
        Resource::Stream | Resource::Overlay(_) if actor.is_admin() => Decision::Allow,

        Resource::Stream => match action {
            Action::Read | Action::List => Decision::Allow,
            Action::Create | Action::Update | Action::Delete => {
                Decision::Deny("Admin privileges required")
            }
        },

        Resource::Overlay(OverlayAttachment::Stream(_)) => match action {
            Action::Create => Decision::Deny("Only admin can create overlays for a stream"),
            // Broad-read policy: stream overlays are readable by any
            // authenticated actor.
            Action::Read | Action::List => Decision::Allow,
            Action::Update => Decision::Deny("Only admin can update stream overlays"),
            Action::Delete => Decision::Deny("Only admin can delete stream overlays"),
        },

        Resource::Overlay(OverlayAttachment::Owner(owner_id)) => match action {
            // Anyone authenticated may create an overlay they will own.
            Action::Create => Decision::Allow,
            Action::Read | Action::List => {
                if owner_id == actor.id {
                    Decision::Allow
                } else {
                    Decision::Deny("Not allowed")
                }
            }
            Action::Update => {
                if owner_id == actor.id {
                    Decision::Allow
                } else {
                    Decision::Deny("Only owner or admin can update this overlay")
                }
            }
            Action::Delete => {
                if owner_id == actor.id {
                    Decision::Allow
                } else {
                    Decision::Deny("Only owner or admin can delete this overlay")
                }
            }
        },

        Resource::UserRecord { target } => match action {
            Action::Read | Action::Update => {
                if actor.is_admin() || target == actor.id {
                    Decision::Allow
                } else {
                    Decision::Deny("Not allowed")
                }
            }
            // Deleting any user (including self) goes through the admin path.
            Action::Create | Action::Delete => {
                if actor.is_admin() {
                    Decision::Allow
                } else {
                    Decision::Deny("Admin privileges required")
                }
            }
            Action::List => Decision::Deny("Not allowed"),
        },

        Resource::UserDirectory => {
            if actor.is_admin() {
                Decision::Allow
            } else {
                Decision::Deny("Admin privileges required")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::ROLE_USER;

    fn admin() -> Actor {
        Actor::new(1, ROLE_ADMIN)
    }

    fn user(id: DbId) -> Actor {
        Actor::new(id, ROLE_USER)
    }

    // --- Streams ---

    #[test]
    fn admin_may_do_anything_to_streams() {
        for action in [
            Action::Create,
            Action::Read,
            Action::List,
            Action::Update,
            Action::Delete,
        ] {
            assert_eq!(decide(&admin(), Resource::Stream, action), Decision::Allow);
        }
    }

    #[test]
    fn non_admin_may_only_read_streams() {
        let u = user(5);
        assert_eq!(decide(&u, Resource::Stream, Action::Read), Decision::Allow);
        assert_eq!(decide(&u, Resource::Stream, Action::List), Decision::Allow);
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(
                decide(&u, Resource::Stream, action),
                Decision::Deny("Admin privileges required")
            );
        }
    }

    // --- Stream-attached overlays ---

    #[test]
    fn stream_overlay_creation_is_admin_only() {
        let attachment = OverlayAttachment::Stream(9);
        assert_eq!(
            decide(&admin(), Resource::Overlay(attachment), Action::Create),
            Decision::Allow
        );
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::Create),
            Decision::Deny("Only admin can create overlays for a stream")
        );
    }

    #[test]
    fn stream_overlay_reads_are_unrestricted() {
        let attachment = OverlayAttachment::Stream(9);
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::Read),
            Decision::Allow
        );
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::List),
            Decision::Allow
        );
    }

    #[test]
    fn stream_overlay_writes_are_admin_only() {
        let attachment = OverlayAttachment::Stream(9);
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::Update),
            Decision::Deny("Only admin can update stream overlays")
        );
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::Delete),
            Decision::Deny("Only admin can delete stream overlays")
        );
        assert_eq!(
            decide(&admin(), Resource::Overlay(attachment), Action::Update),
            Decision::Allow
        );
        assert_eq!(
            decide(&admin(), Resource::Overlay(attachment), Action::Delete),
            Decision::Allow
        );
    }

    // --- User-owned overlays ---

    #[test]
    fn anyone_may_create_an_owned_overlay() {
        let attachment = OverlayAttachment::Owner(5);
        assert_eq!(
            decide(&user(5), Resource::Overlay(attachment), Action::Create),
            Decision::Allow
        );
    }

    #[test]
    fn owner_reads_and_writes_own_overlay() {
        let attachment = OverlayAttachment::Owner(5);
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(
                decide(&user(5), Resource::Overlay(attachment), action),
                Decision::Allow
            );
        }
    }

    #[test]
    fn stranger_is_denied_on_owned_overlay() {
        let attachment = OverlayAttachment::Owner(5);
        assert_eq!(
            decide(&user(6), Resource::Overlay(attachment), Action::Read),
            Decision::Deny("Not allowed")
        );
        assert_eq!(
            decide(&user(6), Resource::Overlay(attachment), Action::Update),
            Decision::Deny("Only owner or admin can update this overlay")
        );
        assert_eq!(
            decide(&user(6), Resource::Overlay(attachment), Action::Delete),
            Decision::Deny("Only owner or admin can delete this overlay")
        );
    }

    #[test]
    fn admin_overrides_overlay_ownership() {
        let attachment = OverlayAttachment::Owner(5);
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(
                decide(&admin(), Resource::Overlay(attachment), action),
                Decision::Allow
            );
        }
    }

    // --- User records ---

    #[test]
    fn user_may_access_own_record_only() {
        assert_eq!(
            decide(&user(5), Resource::UserRecord { target: 5 }, Action::Read),
            Decision::Allow
        );
        assert_eq!(
            decide(&user(5), Resource::UserRecord { target: 5 }, Action::Update),
            Decision::Allow
        );
        assert_eq!(
            decide(&user(5), Resource::UserRecord { target: 6 }, Action::Read),
            Decision::Deny("Not allowed")
        );
    }

    #[test]
    fn user_deletion_is_admin_only() {
        assert_eq!(
            decide(&user(5), Resource::UserRecord { target: 5 }, Action::Delete),
            Decision::Deny("Admin privileges required")
        );
        assert_eq!(
            decide(&admin(), Resource::UserRecord { target: 5 }, Action::Delete),
            Decision::Allow
        );
        // Admin deleting themselves goes through the same admin path.
        assert_eq!(
            decide(&admin(), Resource::UserRecord { target: 1 }, Action::Delete),
            Decision::Allow
        );
    }

    #[test]
    fn user_listing_is_admin_only() {
        assert_eq!(
            decide(&admin(), Resource::UserDirectory, Action::List),
            Decision::Allow
        );
        assert_eq!(
            decide(&user(5), Resource::UserDirectory, Action::List),
            Decision::Deny("Admin privileges required")
        );
    }

    #[test]
    fn unknown_roles_are_treated_as_plain_users() {
        let odd = Actor::new(9, "moderator");
        assert_eq!(
            decide(&odd, Resource::Stream, Action::Create),
            Decision::Deny("Admin privileges required")
        );
        assert_eq!(decide(&odd, Resource::Stream, Action::Read), Decision::Allow);
    }
}
