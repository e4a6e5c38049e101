//! Identity handling
//!
//! The server does not mint user accounts; it consumes bearer tokens
//! issued by the identity provider and resolves them into a
//! [`CurrentUser`] (`{id, name, role}`). Role names are `customer` and
//! `admin`. Validation happens once per request in the
//! [`middleware::require_auth`] layer; handlers read the result from
//! request extensions via the [`CurrentUser`] extractor.

mod extractor;
mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
