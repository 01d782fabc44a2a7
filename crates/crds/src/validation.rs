//! Validation of VirtualMachine desired state
//!
//! Decoding already rejects missing required fields and values outside the
//! enum domains (`virtualization`, `sshOptions`, `bios`). The checks here
//! cover what the type system cannot: ranges, empty strings, and rules that
//! span several fields. A reconciler runs them before writing any status.

use tracing::warn;

use crate::common::Condition;
use crate::compute::{SshOptions, VirtualMachine, VirtualMachineParameters};
use crate::error::ValidationError;

const CPU_PERCENT_MAX: i64 = 100;

/// How fields that only apply to another virtualization family are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject family-specific fields (`enableTuntap`, `enableIOPriority`,
    /// `shadowMemory`) on other virtualization types instead of warning
    pub reject_foreign_family_fields: bool,
}

impl ValidationPolicy {
    /// Reject family-specific fields set on the wrong virtualization type
    pub fn strict() -> Self {
        Self {
            reject_foreign_family_fields: true,
        }
    }
}

impl ValidationError {
    /// `Synced=False` condition reporting this error
    pub fn to_condition(&self) -> Condition {
        Condition::reconcile_error(self.to_string())
    }
}

impl VirtualMachineParameters {
    /// Validate the parameters, returning the first violation found
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<(), ValidationError> {
        require_non_empty("spec.forProvider.rootPassword", &self.root_password)?;
        require_non_empty("spec.forProvider.hostname", &self.hostname)?;

        require_positive("spec.forProvider.diskSpace", self.disk_space)?;
        require_positive("spec.forProvider.ram", self.ram)?;
        require_positive("spec.forProvider.cpuCores", self.cpu_cores)?;
        require_positive("spec.forProvider.userId", self.user_id)?;
        require_positive("spec.forProvider.osId", self.os_id)?;
        require_non_negative("spec.forProvider.bandwidth", self.bandwidth)?;

        for (field, value) in [
            ("spec.forProvider.serverGroupId", self.server_group_id),
            ("spec.forProvider.burstableRAM", self.burstable_ram),
            ("spec.forProvider.swapRAM", self.swap_ram),
            ("spec.forProvider.cpu", self.cpu),
            ("spec.forProvider.cpuPercent", self.cpu_percent),
            ("spec.forProvider.numIpv4", self.num_ipv4),
            ("spec.forProvider.numInternalIps", self.num_internal_ips),
            ("spec.forProvider.numIpv6", self.num_ipv6),
            ("spec.forProvider.numIpv6Subnets", self.num_ipv6_subnets),
            ("spec.forProvider.shadowMemory", self.shadow_memory),
            ("spec.forProvider.bootOrder", self.boot_order),
            ("spec.forProvider.enableTuntap", self.enable_tuntap),
            ("spec.forProvider.enableIOPriority", self.enable_io_priority),
            ("spec.forProvider.osReinstallLimit", self.os_reinstall_limit),
            ("spec.forProvider.sshPrivateKey", self.ssh_private_key),
        ] {
            if let Some(value) = value {
                require_non_negative(field, value)?;
            }
        }

        if let Some(percent) = self.cpu_percent {
            if percent > CPU_PERCENT_MAX {
                return Err(ValidationError::TooLarge {
                    field: "spec.forProvider.cpuPercent",
                    value: percent,
                    max: CPU_PERCENT_MAX,
                });
            }
        }

        self.validate_ssh()?;

        if self.vnc_password.is_some() && self.enable_vnc == Some(false) {
            return Err(ValidationError::VncPasswordWithoutVnc);
        }

        if self.bios.is_some() && !self.virtualization.is_kvm() {
            return Err(ValidationError::UnsupportedForVirtualization {
                field: "spec.forProvider.bios",
                supported: "KVM",
                virtualization: self.virtualization,
            });
        }

        self.validate_family_fields(policy)
    }

    fn validate_ssh(&self) -> Result<(), ValidationError> {
        if self.ssh_options != Some(SshOptions::UseSshKeys) {
            return Ok(());
        }
        let keys = match self.existing_ssh_keys.as_deref() {
            Some(keys) if !keys.is_empty() => keys,
            _ => return Err(ValidationError::MissingSshKeys),
        };
        if let Some(index) = keys.iter().position(|k| k.trim().is_empty()) {
            return Err(ValidationError::BlankSshKey { index });
        }
        Ok(())
    }

    fn validate_family_fields(&self, policy: &ValidationPolicy) -> Result<(), ValidationError> {
        let virtualization = self.virtualization;
        let foreign = [
            (
                "spec.forProvider.enableTuntap",
                self.enable_tuntap.is_some() && !virtualization.is_openvz(),
                "OpenVZ",
            ),
            (
                "spec.forProvider.enableIOPriority",
                self.enable_io_priority.is_some() && !virtualization.is_openvz(),
                "OpenVZ",
            ),
            (
                "spec.forProvider.shadowMemory",
                self.shadow_memory.is_some() && !virtualization.is_xen_hvm(),
                "Xen HVM",
            ),
        ];

        for (field, is_foreign, supported) in foreign {
            if !is_foreign {
                continue;
            }
            if policy.reject_foreign_family_fields {
                return Err(ValidationError::UnsupportedForVirtualization {
                    field,
                    supported,
                    virtualization,
                });
            }
            warn!(
                field,
                %virtualization,
                "Field only applies to {} virtualization and will be ignored by the provider",
                supported
            );
        }
        Ok(())
    }
}

impl VirtualMachine {
    /// Validate the desired state of this VirtualMachine
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<(), ValidationError> {
        self.spec.for_provider.validate(policy)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}
