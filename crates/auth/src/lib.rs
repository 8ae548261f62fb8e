//! `drawer-auth` — the authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: storage
//! comes in through ports, verified principals go out.

pub mod authenticator;
pub mod credentials;
pub mod directory;
pub mod principal;

pub use authenticator::Authenticator;
pub use credentials::CredentialStore;
pub use directory::{NewUser, UserDirectory, UserRecord, UserUpdate};
pub use principal::Principal;
