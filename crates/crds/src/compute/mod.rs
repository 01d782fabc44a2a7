//! Compute CRDs
//!
//! Resources in the `compute.virtono.crossplane.io` group:
//! - VirtualMachines (Virtono VPS instances)

pub mod virtual_machine;

pub use virtual_machine::*;

use tracing::debug;

use crate::error::SchemeError;
use crate::scheme::Scheme;

/// Register every kind of the compute group with the scheme
///
/// Called once from the composition root before any object is decoded,
/// encoded or listed.
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), SchemeError> {
    let registration = scheme.register::<VirtualMachine>()?;
    debug!(?registration, kind = %VirtualMachine::identity(), "Compute kinds added to scheme");
    Ok(())
}
