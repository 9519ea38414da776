//! Staff authentication.
//!
//! ## Module Organization
//!
//! - `depot`: Salvo depot keys and helpers for the authenticated principal
//! - `login`: Username/password login that issues session tokens
//! - `password`: Password hashing and verification with Argon2
//! - `token`: Bearer token generation, digests and header parsing
//! - `validator`: `CredentialValidator` seam and its implementations

pub mod depot;
pub mod login;
pub mod password;
pub mod token;
pub mod validator;

pub use depot::{get_principal_from_depot, get_validator_from_depot};
pub use validator::{
    CredentialValidator, CredentialValidatorHandler, SessionTokenValidator, StaffPrincipal,
    StaticTokenValidator, build_validator,
};
