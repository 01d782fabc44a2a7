//! Provider-agnostic parts of a managed resource
//!
//! Every managed resource kind embeds [`ResourceSpec`] in its spec and
//! [`ResourceStatus`] in its status (flattened, so the fields sit next to
//! `forProvider` / `atProvider` on the wire).

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::condition::{Condition, ConditionStatus, ConditionType};
use crate::schema::string_enum_schema;

/// Annotation holding the name of the resource in the external system
pub const EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";

/// Provider config used when `providerConfigRef` is not set
pub const DEFAULT_PROVIDER_CONFIG: &str = "default";

/// Desired state shared by all managed resources
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Secret to which connection details of the external resource are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_connection_secret_to_ref: Option<SecretReference>,

    /// Where and how connection details of the external resource are published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_connection_details_to: Option<PublishConnectionDetailsTo>,

    /// Provider config used to connect to the external API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_ref: Option<Reference>,

    /// What happens to the external resource when this managed resource is deleted
    #[serde(default)]
    pub deletion_policy: DeletionPolicy,
}

impl ResourceSpec {
    /// Name of the provider config to use, falling back to `default`
    pub fn provider_config_name(&self) -> &str {
        self.provider_config_ref
            .as_ref()
            .map_or(DEFAULT_PROVIDER_CONFIG, |r| r.name.as_str())
    }
}

/// Deletion policy for the external resource
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Leave the external resource in place
    Orphan,
    /// Delete the external resource
    #[default]
    Delete,
}

impl DeletionPolicy {
    /// Every deletion policy, in declaration order
    pub const VARIANTS: [Self; 2] = [Self::Orphan, Self::Delete];

    /// Wire name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orphan => "Orphan",
            Self::Delete => "Delete",
        }
    }
}

string_enum_schema!(DeletionPolicy);

/// Reference to another Kubernetes object by name
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the referenced object
    pub name: String,

    /// Resolution policy for the reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}

impl Reference {
    /// Create a reference with the default resolution policy
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: None,
        }
    }
}

/// How a reference is resolved
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// When the reference is resolved (defaults to IfNotPresent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolvePolicy>,

    /// Whether resolution is required (defaults to Required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionPolicy>,
}

/// When a reference is resolved
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Resolve on every reconcile
    Always,
    /// Resolve only while the reference is unresolved
    IfNotPresent,
}

impl ResolvePolicy {
    /// Every resolve policy, in declaration order
    pub const VARIANTS: [Self; 2] = [Self::Always, Self::IfNotPresent];

    /// Wire name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::IfNotPresent => "IfNotPresent",
        }
    }
}

string_enum_schema!(ResolvePolicy);

/// Whether a reference must resolve
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Reconciliation fails while the reference cannot be resolved
    Required,
    /// An unresolvable reference is skipped
    Optional,
}

impl ResolutionPolicy {
    /// Every resolution policy, in declaration order
    pub const VARIANTS: [Self; 2] = [Self::Required, Self::Optional];

    /// Wire name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Optional => "Optional",
        }
    }
}

string_enum_schema!(ResolutionPolicy);

/// Reference to a Secret in a specific namespace
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    /// Name of the secret
    pub name: String,

    /// Namespace of the secret
    pub namespace: String,
}

/// Target for publishing connection details
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishConnectionDetailsTo {
    /// Name of the connection secret
    pub name: String,

    /// Store config used to publish the secret (defaults to `default`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_ref: Option<Reference>,

    /// Metadata applied to the published connection secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConnectionSecretMetadata>,
}

/// Metadata of a published connection secret
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSecretMetadata {
    /// Labels applied to the connection secret
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Annotations applied to the connection secret
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Secret type, e.g. `Opaque`
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<String>,
}

/// Observed state shared by all managed resources
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    /// Conditions of the resource, at most one per type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ResourceStatus {
    /// Get the condition of the given type, if one has been set
    pub fn get_condition(&self, type_: ConditionType) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }

    /// Status of the given condition type, `Unknown` when it has not been set
    pub fn condition_status(&self, type_: ConditionType) -> ConditionStatus {
        self.get_condition(type_)
            .map_or(ConditionStatus::Unknown, |c| c.status)
    }

    /// Set conditions, replacing any existing condition of the same type
    ///
    /// A condition equal to the existing one (ignoring the transition time)
    /// leaves the existing entry untouched, so `lastTransitionTime` only
    /// moves when something actually changed.
    pub fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) {
        for condition in conditions {
            match self.conditions.iter_mut().find(|c| c.type_ == condition.type_) {
                Some(existing) if existing.equal(&condition) => {}
                Some(existing) => *existing = condition,
                None => self.conditions.push(condition),
            }
        }
    }

    /// Returns true when the `Ready` condition is `True`
    pub fn is_ready(&self) -> bool {
        self.condition_status(ConditionType::Ready) == ConditionStatus::True
    }
}
