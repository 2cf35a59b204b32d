//! Entity row structs and request/response DTOs.
//!
//! Row structs hold everything the table stores (including password
//! hashes); response types render ids as opaque string handles and never
//! carry credentials.

pub mod overlay;
pub mod stream;
pub mod user;
