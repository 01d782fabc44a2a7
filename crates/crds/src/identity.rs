//! Type identity of custom resource kinds
//!
//! Group, version and kind are read from the resource type itself (through
//! [`kube::Resource`]) so the strings exist in exactly one place: the
//! `#[kube(...)]` attribute on the spec struct.

use std::fmt;

use kube::Resource;
use kube::core::GroupVersionKind;

/// Identity of a resource kind: group, version, kind and plural name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity {
    group: String,
    version: String,
    kind: String,
    plural: String,
}

impl TypeIdentity {
    /// Derive the identity of a statically typed resource
    pub fn of<K>() -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        Self {
            group: K::group(&()).into_owned(),
            version: K::version(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            plural: K::plural(&()).into_owned(),
        }
    }

    /// API group, e.g. `compute.virtono.crossplane.io`
    pub fn group(&self) -> &str {
        &self.group
    }

    /// API version within the group, e.g. `v1alpha1`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Kind name, e.g. `VirtualMachine`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Plural resource name, e.g. `virtualmachines`
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// `apiVersion` value: `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Group-qualified kind: `Kind.group`
    pub fn group_kind(&self) -> String {
        if self.group.is_empty() {
            self.kind.clone()
        } else {
            format!("{}.{}", self.kind, self.group)
        }
    }

    /// Kind qualified with its API version: `Kind.group/version`
    pub fn kind_api_version(&self) -> String {
        format!("{}.{}", self.kind, self.api_version())
    }

    /// Full group/version/kind triple
    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }

    /// Kind of the list wrapper, e.g. `VirtualMachineList`
    pub fn list_kind(&self) -> String {
        format!("{}List", self.kind)
    }

    /// Returns true if this identity names the given group/version/kind
    pub fn matches(&self, gvk: &GroupVersionKind) -> bool {
        self.group == gvk.group && self.version == gvk.version && self.kind == gvk.kind
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind_api_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::ConfigMap;

    fn identity() -> TypeIdentity {
        TypeIdentity {
            group: "compute.example.io".to_string(),
            version: "v1beta1".to_string(),
            kind: "Disk".to_string(),
            plural: "disks".to_string(),
        }
    }

    #[test]
    fn test_derived_strings() {
        let id = identity();
        assert_eq!(id.api_version(), "compute.example.io/v1beta1");
        assert_eq!(id.group_kind(), "Disk.compute.example.io");
        assert_eq!(id.kind_api_version(), "Disk.compute.example.io/v1beta1");
        assert_eq!(id.list_kind(), "DiskList");
        assert_eq!(id.to_string(), "Disk.compute.example.io/v1beta1");
    }

    #[test]
    fn test_group_version_kind() {
        let gvk = identity().group_version_kind();
        assert_eq!(gvk.group, "compute.example.io");
        assert_eq!(gvk.version, "v1beta1");
        assert_eq!(gvk.kind, "Disk");
        assert!(identity().matches(&gvk));
        assert!(!identity().matches(&GroupVersionKind::gvk("compute.example.io", "v1", "Disk")));
    }

    #[test]
    fn test_core_group_identity() {
        let id = TypeIdentity::of::<ConfigMap>();
        assert_eq!(id.group(), "");
        assert_eq!(id.version(), "v1");
        assert_eq!(id.kind(), "ConfigMap");
        assert_eq!(id.plural(), "configmaps");
        assert_eq!(id.api_version(), "v1");
        assert_eq!(id.group_kind(), "ConfigMap");
        assert_eq!(id.kind_api_version(), "ConfigMap.v1");
    }
}
