//! Type registry for custom resource kinds
//!
//! A [`Scheme`] maps group/version/kind to the registered resource
//! definition. The host application builds one in its composition root,
//! before serving anything, and shares it read-only afterwards. Decoding and
//! encoding go through the scheme so that unregistered kinds and documents
//! of the wrong type are refused.

use std::collections::BTreeMap;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::GroupVersionKind;
use kube::{CustomResourceExt, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::SchemeError;
use crate::identity::TypeIdentity;
use crate::list::ResourceList;

/// A kind known to the scheme
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredKind {
    /// Identity of the kind
    pub identity: TypeIdentity,

    /// Kind of the list wrapper
    pub list_kind: String,

    /// Generated CustomResourceDefinition
    pub crd: CustomResourceDefinition,
}

/// Outcome of a successful registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Kind was added to the scheme
    Added,
    /// Identical definition was already registered; nothing changed
    AlreadyRegistered,
}

/// Registry of resource kinds
#[derive(Clone, Debug, Default)]
pub struct Scheme {
    /// Keyed by `Kind.group/version`
    kinds: BTreeMap<String, RegisteredKind>,
    /// List kind key to item kind key
    lists: BTreeMap<String, String>,
}

fn gvk_key(group: &str, version: &str, kind: &str) -> String {
    if group.is_empty() {
        format!("{kind}.{version}")
    } else {
        format!("{kind}.{group}/{version}")
    }
}

impl Scheme {
    /// Create an empty scheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind and its list kind
    ///
    /// Registering the same definition again is a no-op. A different
    /// definition under an already registered group/version/kind is a
    /// conflict and leaves the scheme unchanged.
    pub fn register<K>(&mut self) -> Result<Registration, SchemeError>
    where
        K: Resource<DynamicType = ()> + CustomResourceExt,
    {
        let identity = TypeIdentity::of::<K>();
        let key = identity.kind_api_version();
        let crd = K::crd();

        if let Some(existing) = self.kinds.get(&key) {
            if existing.identity == identity && existing.crd == crd {
                debug!(kind = %key, "Kind already registered");
                return Ok(Registration::AlreadyRegistered);
            }
            return Err(SchemeError::Conflict(key));
        }

        let list_kind = identity.list_kind();
        let list_key = gvk_key(identity.group(), identity.version(), &list_kind);
        if self.kinds.contains_key(&list_key) || self.lists.contains_key(&list_key) {
            return Err(SchemeError::Conflict(list_key));
        }

        info!(kind = %key, list_kind = %list_kind, "Registered kind");
        self.lists.insert(list_key, key.clone());
        self.kinds.insert(
            key,
            RegisteredKind {
                identity,
                list_kind,
                crd,
            },
        );
        Ok(Registration::Added)
    }

    /// Returns true if the group/version/kind names a registered kind or list kind
    pub fn is_registered(&self, gvk: &GroupVersionKind) -> bool {
        let key = gvk_key(&gvk.group, &gvk.version, &gvk.kind);
        self.kinds.contains_key(&key) || self.lists.contains_key(&key)
    }

    /// Look up a registered kind
    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<&RegisteredKind> {
        self.kinds.get(&gvk_key(&gvk.group, &gvk.version, &gvk.kind))
    }

    /// Look up the item kind of a registered list kind
    pub fn lookup_list(&self, gvk: &GroupVersionKind) -> Option<&RegisteredKind> {
        self.lists
            .get(&gvk_key(&gvk.group, &gvk.version, &gvk.kind))
            .and_then(|key| self.kinds.get(key))
    }

    /// Registered kinds, ordered by `Kind.group/version`
    pub fn kinds(&self) -> impl Iterator<Item = &RegisteredKind> {
        self.kinds.values()
    }

    /// CustomResourceDefinitions of all registered kinds
    pub fn crds(&self) -> impl Iterator<Item = &CustomResourceDefinition> {
        self.kinds.values().map(|k| &k.crd)
    }

    /// Number of registered kinds (list kinds not counted)
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn require<K>(&self) -> Result<&RegisteredKind, SchemeError>
    where
        K: Resource<DynamicType = ()>,
    {
        let key = gvk_key(&K::group(&()), &K::version(&()), &K::kind(&()));
        self.kinds.get(&key).ok_or(SchemeError::NotRegistered(key))
    }

    /// Decode a YAML or JSON document into a registered kind
    pub fn decode<K>(&self, text: &str) -> Result<K, SchemeError>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let registered = self.require::<K>()?;
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        check_type_meta(
            &value,
            &registered.identity.api_version(),
            registered.identity.kind(),
        )?;
        Ok(serde_yaml::from_value(value)?)
    }

    /// Decode a YAML or JSON list document of a registered kind
    pub fn decode_list<K>(&self, text: &str) -> Result<ResourceList<K>, SchemeError>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let registered = self.require::<K>()?;
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        check_type_meta(
            &value,
            &registered.identity.api_version(),
            &registered.list_kind,
        )?;
        Ok(serde_yaml::from_value(value)?)
    }

    /// Encode a registered kind as YAML
    pub fn encode<K>(&self, object: &K) -> Result<String, SchemeError>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        self.require::<K>()?;
        Ok(serde_yaml::to_string(object)?)
    }

    /// Encode a list of a registered kind as YAML
    pub fn encode_list<K>(&self, list: &ResourceList<K>) -> Result<String, SchemeError>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        self.require::<K>()?;
        Ok(serde_yaml::to_string(list)?)
    }
}

fn check_type_meta(
    value: &serde_yaml::Value,
    api_version: &str,
    kind: &str,
) -> Result<(), SchemeError> {
    let found_api_version = value.get("apiVersion").and_then(serde_yaml::Value::as_str);
    let found_kind = value.get("kind").and_then(serde_yaml::Value::as_str);
    if found_api_version == Some(api_version) && found_kind == Some(kind) {
        return Ok(());
    }
    Err(SchemeError::TypeMismatch {
        expected: format!("{api_version}, Kind={kind}"),
        found: format!(
            "{}, Kind={}",
            found_api_version.unwrap_or("<none>"),
            found_kind.unwrap_or("<none>")
        ),
    })
}
