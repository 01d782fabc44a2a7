//! Virtono Provider CRD Definitions
//!
//! Managed resource types for Virtono infrastructure, the identity and
//! registration machinery the control plane routes them with, and the
//! validation applied before reconciliation.

pub mod common;
pub mod compute;
pub mod error;
pub mod identity;
pub mod list;
pub mod scheme;
mod schema;
pub mod validation;

pub use common::*;
pub use compute::*;
pub use error::*;
pub use identity::*;
pub use list::*;
pub use scheme::*;
pub use validation::*;

/// Build a scheme with every kind of this crate registered
///
/// The host application calls this once at startup and shares the result.
pub fn build_scheme() -> Result<Scheme, SchemeError> {
    let mut scheme = Scheme::new();
    compute::add_to_scheme(&mut scheme)?;
    Ok(scheme)
}
