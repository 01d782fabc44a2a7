//! Lifecycle conditions for managed resources
//!
//! Conditions follow Kubernetes API conventions: at most one condition per
//! type, each carrying a status, a machine-readable reason and the time the
//! status last changed. Managed resources report two condition types:
//! - `Ready`: whether the external resource is available for use
//! - `Synced`: whether the last reconciliation succeeded

use chrono::{DateTime, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::string_enum_schema;

/// External resource is available for use.
pub const REASON_AVAILABLE: &str = "Available";
/// External resource is not available for use.
pub const REASON_UNAVAILABLE: &str = "Unavailable";
/// External resource is being created.
pub const REASON_CREATING: &str = "Creating";
/// External resource is being deleted.
pub const REASON_DELETING: &str = "Deleting";
/// Last reconciliation succeeded.
pub const REASON_RECONCILE_SUCCESS: &str = "ReconcileSuccess";
/// Last reconciliation failed.
pub const REASON_RECONCILE_ERROR: &str = "ReconcileError";
/// Reconciliation is paused via annotation.
pub const REASON_RECONCILE_PAUSED: &str = "ReconcilePaused";

/// Type of a managed resource condition
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// Availability of the external resource
    Ready,
    /// Outcome of the last reconciliation
    Synced,
}

impl ConditionType {
    /// Every condition type, in declaration order
    pub const VARIANTS: [Self; 2] = [Self::Ready, Self::Synced];

    /// Wire name of the condition type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Synced => "Synced",
        }
    }
}

string_enum_schema!(ConditionType);

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition status following Kubernetes conventions
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ConditionStatus {
    /// Condition is true
    True,
    /// Condition is false
    False,
    /// Condition status is unknown
    #[default]
    Unknown,
}

impl ConditionStatus {
    /// Every condition status, in declaration order
    pub const VARIANTS: [Self; 3] = [Self::True, Self::False, Self::Unknown];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

string_enum_schema!(ConditionStatus);

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition observed on a managed resource
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition (Ready or Synced)
    #[serde(rename = "type")]
    pub type_: ConditionType,

    /// Status of the condition (True, False, Unknown)
    pub status: ConditionStatus,

    /// Last time the condition transitioned from one status to another
    pub last_transition_time: DateTime<Utc>,

    /// Machine-readable reason for the condition's last transition
    pub reason: String,

    /// Human-readable detail about the transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `metadata.generation` of the resource this condition was set against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    /// Create a new condition stamped with the current time
    ///
    /// Timestamps are truncated to whole seconds, matching the precision
    /// the Kubernetes API server stores.
    pub fn new(type_: ConditionType, status: ConditionStatus, reason: impl Into<String>) -> Self {
        Self {
            type_,
            status,
            last_transition_time: Utc::now().trunc_subsecs(0),
            reason: reason.into(),
            message: None,
            observed_generation: None,
        }
    }

    /// Set the message and return self for chaining
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the observed generation and return self for chaining
    #[must_use]
    pub fn with_observed_generation(mut self, generation: i64) -> Self {
        self.observed_generation = Some(generation);
        self
    }

    /// External resource is available for use
    pub fn available() -> Self {
        Self::new(ConditionType::Ready, ConditionStatus::True, REASON_AVAILABLE)
    }

    /// External resource is not available for use
    pub fn unavailable() -> Self {
        Self::new(ConditionType::Ready, ConditionStatus::False, REASON_UNAVAILABLE)
    }

    /// External resource is being created
    pub fn creating() -> Self {
        Self::new(ConditionType::Ready, ConditionStatus::False, REASON_CREATING)
    }

    /// External resource is being deleted
    pub fn deleting() -> Self {
        Self::new(ConditionType::Ready, ConditionStatus::False, REASON_DELETING)
    }

    /// Last reconciliation succeeded
    pub fn reconcile_success() -> Self {
        Self::new(ConditionType::Synced, ConditionStatus::True, REASON_RECONCILE_SUCCESS)
    }

    /// Last reconciliation failed with the given error
    pub fn reconcile_error(message: impl Into<String>) -> Self {
        Self::new(ConditionType::Synced, ConditionStatus::False, REASON_RECONCILE_ERROR)
            .with_message(message)
    }

    /// Reconciliation is paused
    pub fn reconcile_paused() -> Self {
        Self::new(ConditionType::Synced, ConditionStatus::False, REASON_RECONCILE_PAUSED)
    }

    /// Compare two conditions ignoring `last_transition_time`
    pub fn equal(&self, other: &Self) -> bool {
        self.type_ == other.type_
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
            && self.observed_generation == other.observed_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_conditions() {
        let available = Condition::available();
        assert_eq!(available.type_, ConditionType::Ready);
        assert_eq!(available.status, ConditionStatus::True);
        assert_eq!(available.reason, REASON_AVAILABLE);

        for condition in [Condition::unavailable(), Condition::creating(), Condition::deleting()] {
            assert_eq!(condition.type_, ConditionType::Ready);
            assert_eq!(condition.status, ConditionStatus::False);
        }
    }

    #[test]
    fn test_reconcile_error_carries_message() {
        let condition = Condition::reconcile_error("cannot create VPS: quota exceeded");
        assert_eq!(condition.type_, ConditionType::Synced);
        assert_eq!(condition.status, ConditionStatus::False);
        assert_eq!(condition.reason, REASON_RECONCILE_ERROR);
        assert_eq!(
            condition.message.as_deref(),
            Some("cannot create VPS: quota exceeded")
        );
    }

    #[test]
    fn test_equal_ignores_transition_time() {
        let a = Condition::available();
        let mut b = Condition::available();
        b.last_transition_time = a.last_transition_time - chrono::Duration::hours(1);
        assert!(a.equal(&b));
        assert_ne!(a, b);

        let c = Condition::available().with_observed_generation(3);
        assert!(!a.equal(&c));
    }

    #[test]
    fn test_timestamp_truncated_to_seconds() {
        let condition = Condition::creating();
        assert_eq!(condition.last_transition_time.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_wire_format() {
        let condition = Condition::reconcile_success().with_observed_generation(2);
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["type"], "Synced");
        assert_eq!(value["status"], "True");
        assert_eq!(value["reason"], "ReconcileSuccess");
        assert_eq!(value["observedGeneration"], 2);
        assert!(value.get("lastTransitionTime").is_some());
        assert!(value.get("message").is_none());

        let decoded: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, condition);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConditionType::Ready.to_string(), "Ready");
        assert_eq!(ConditionType::Synced.to_string(), "Synced");
        assert_eq!(ConditionStatus::Unknown.to_string(), "Unknown");
        assert_eq!(ConditionStatus::default(), ConditionStatus::Unknown);
        for type_ in ConditionType::VARIANTS {
            assert_eq!(serde_json::to_value(type_).unwrap(), type_.as_str());
        }
        for status in ConditionStatus::VARIANTS {
            assert_eq!(serde_json::to_value(status).unwrap(), status.to_string());
        }
    }
}
