//! List wrapper for custom resource kinds
//!
//! Mirrors the Kubernetes `*List` shape: type meta, list meta (continue token,
//! resource version) and the ordered items.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::Resource;
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::TypeIdentity;

/// Point-in-time snapshot of resources of one kind
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList<K> {
    /// `group/version` of the listed kind
    pub api_version: String,

    /// List kind, e.g. `VirtualMachineList`
    pub kind: String,

    /// Continue token and resource version of the snapshot
    #[serde(default)]
    pub metadata: ListMeta,

    /// Items in list order; `null` decodes as an empty list
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "K: Deserialize<'de>")
    )]
    pub items: Vec<K>,
}

impl<K> ResourceList<K>
where
    K: Resource<DynamicType = ()>,
{
    /// Create a list of the given items with empty list metadata
    pub fn new(items: Vec<K>) -> Self {
        let identity = TypeIdentity::of::<K>();
        Self {
            api_version: identity.api_version(),
            kind: identity.list_kind(),
            metadata: ListMeta::default(),
            items,
        }
    }
}

impl<K> ResourceList<K> {
    /// Number of items in the list
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in list order
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.items.iter()
    }
}

impl<K> Default for ResourceList<K>
where
    K: Resource<DynamicType = ()>,
{
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<K> IntoIterator for ResourceList<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn config_map(name: &str) -> ConfigMap {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_list_type_meta() {
        let list = ResourceList::<ConfigMap>::default();
        assert_eq!(list.api_version, "v1");
        assert_eq!(list.kind, "ConfigMapList");
        assert!(list.is_empty());
    }

    #[test]
    fn test_items_keep_order() {
        let list = ResourceList::new(vec![config_map("b"), config_map("a"), config_map("c")]);
        let json = serde_json::to_string(&list).unwrap();
        let decoded: ResourceList<ConfigMap> = serde_json::from_str(&json).unwrap();

        let names: Vec<_> = decoded
            .iter()
            .filter_map(|cm| cm.metadata.name.as_deref())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_null_and_missing_items_decode_empty() {
        let decoded: ResourceList<ConfigMap> = serde_json::from_value(serde_json::json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "items": null
        }))
        .unwrap();
        assert!(decoded.is_empty());

        let decoded: ResourceList<ConfigMap> = serde_json::from_value(serde_json::json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": { "resourceVersion": "812", "continue": "abc" }
        }))
        .unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.metadata.resource_version.as_deref(), Some("812"));
        assert_eq!(decoded.metadata.continue_.as_deref(), Some("abc"));
    }

    #[test]
    fn test_items_without_default_impl() {
        // Item types are not required to implement Default
        #[derive(Debug, Deserialize, PartialEq)]
        struct Entry {
            name: String,
        }

        let decoded: ResourceList<Entry> = serde_json::from_value(serde_json::json!({
            "apiVersion": "example.io/v1",
            "kind": "EntryList"
        }))
        .unwrap();
        assert!(decoded.items.is_empty());

        let decoded: ResourceList<Entry> = serde_json::from_value(serde_json::json!({
            "apiVersion": "example.io/v1",
            "kind": "EntryList",
            "items": [{ "name": "first" }, { "name": "second" }]
        }))
        .unwrap();
        assert_eq!(
            decoded.items,
            vec![
                Entry { name: "first".to_string() },
                Entry { name: "second".to_string() },
            ]
        );
    }
}
