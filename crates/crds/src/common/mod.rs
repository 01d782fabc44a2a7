//! Generic managed resource envelope
//!
//! Types shared by every managed resource kind, independent of the provider:
//! - Resource spec (deletion policy, provider config, connection details)
//! - Resource status (lifecycle conditions)
//! - The [`Managed`] trait giving uniform access to both

pub mod condition;
pub mod resource;

pub use condition::*;
pub use resource::*;

use kube::Resource;

/// A resource managed through a desired/observed state envelope
///
/// Implemented by each managed resource kind so generic code can read the
/// provider-agnostic spec, write conditions, and track the external name
/// without knowing the concrete kind.
pub trait Managed: Resource<DynamicType = ()> {
    /// Provider-agnostic part of the spec
    fn resource_spec(&self) -> &ResourceSpec;

    /// Provider-agnostic part of the status, if the status has been written
    fn resource_status(&self) -> Option<&ResourceStatus>;

    /// Provider-agnostic part of the status, creating an empty status if absent
    fn resource_status_mut(&mut self) -> &mut ResourceStatus;

    /// Set conditions on the status
    fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) {
        self.resource_status_mut().set_conditions(conditions);
    }

    /// Status of a condition type, `Unknown` until the reconciler reports it
    fn condition_status(&self, type_: ConditionType) -> ConditionStatus {
        self.resource_status()
            .map_or(ConditionStatus::Unknown, |s| s.condition_status(type_))
    }

    /// Name of the resource in the external system
    fn external_name(&self) -> Option<&str> {
        self.meta()
            .annotations
            .as_ref()
            .and_then(|a| a.get(EXTERNAL_NAME_ANNOTATION))
            .map(String::as_str)
    }

    /// Record the name of the resource in the external system
    fn set_external_name(&mut self, name: impl Into<String>) {
        self.meta_mut()
            .annotations
            .get_or_insert_with(Default::default)
            .insert(EXTERNAL_NAME_ANNOTATION.to_string(), name.into());
    }
}
