//! Domain logic for the streamlay backend.
//!
//! Pure types and decision functions with no I/O: the error taxonomy,
//! role constants, overlay classification/validation, and the central
//! authorization policy.

pub mod error;
pub mod overlay;
pub mod policy;
pub mod roles;
pub mod types;
