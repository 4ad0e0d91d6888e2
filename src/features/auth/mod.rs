//! Identity provider adapter.
//!
//! Bearer tokens are validated against the issuer's JWKS and resolved into
//! the `Employee` that every report operation receives explicitly.

mod jwks;
mod validator;

pub mod model;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
