//! VirtualMachine Custom Resource Definition
//!
//! Defines a cluster-scoped managed resource for a Virtono VPS. The spec
//! carries the desired VPS parameters under `forProvider`; the status carries
//! what the provider reported under `atProvider` plus lifecycle conditions.

use std::sync::LazyLock;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Managed, ResourceSpec, ResourceStatus};
use crate::identity::TypeIdentity;
use crate::list::ResourceList;
use crate::schema::string_enum_schema;

/// Configurable fields of a VirtualMachine
///
/// Required fields have no serde default, so a document missing any of them
/// fails to decode. Optional fields are `None` when unset, which means "use
/// the provider default"; `Some(0)` is a distinct, explicit request.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineParameters {
    /// Virtualization type the VPS is created with
    pub virtualization: Virtualization,

    /// Server group where the VPS is created and assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_group_id: Option<i64>,

    /// Password for the root user / administrator of the VPS
    pub root_password: String,

    /// Hostname of the VPS
    pub hostname: String,

    /// Allowed disk space for the VPS
    pub disk_space: i64,

    /// Amount of RAM the VPS always has
    pub ram: i64,

    /// Maximum amount of RAM the VPS can use
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "burstableRAM")]
    #[schemars(rename = "burstableRAM")]
    pub burstable_ram: Option<i64>,

    /// Swap RAM
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "swapRAM")]
    #[schemars(rename = "swapRAM")]
    pub swap_ram: Option<i64>,

    /// Monthly bandwidth limit of the VPS (0 for unlimited)
    pub bandwidth: i64,

    /// User under whom the VPS is created
    pub user_id: i64,

    /// CPU weight assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,

    /// CPU share in percent assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<i64>,

    /// Number of CPU cores used by the VPS
    pub cpu_cores: i64,

    /// Number of IPv4 addresses assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_ipv4: Option<i64>,

    /// Number of internal IP addresses assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_internal_ips: Option<i64>,

    /// Number of IPv6 addresses assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_ipv6: Option<i64>,

    /// Number of IPv6 subnets assigned to the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_ipv6_subnets: Option<i64>,

    /// Whether VNC is enabled for the VPS
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "enableVNC")]
    #[schemars(rename = "enableVNC")]
    pub enable_vnc: Option<bool>,

    /// VNC password (generated by the provider when VNC is enabled and this is unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnc_password: Option<String>,

    /// Shadow memory for Xen HVM guests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_memory: Option<i64>,

    /// ISO present on the server to create the VPS from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,

    /// Boot order of the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_order: Option<i64>,

    /// Enable `tuntap` (OpenVZ only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_tuntap: Option<i64>,

    /// Enable IO priority (OpenVZ only)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "enableIOPriority")]
    #[schemars(rename = "enableIOPriority")]
    pub enable_io_priority: Option<i64>,

    /// Suspend the VPS when the bandwidth limit is exceeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_if_bandwidth_exceeded: Option<bool>,

    /// Maximum number of OS re-installations allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_reinstall_limit: Option<i64>,

    /// Operating system template ID
    pub os_id: i64,

    /// Media group ID for OS templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,

    /// Virtual network interface type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,

    /// How SSH access is bootstrapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_options: Option<SshOptions>,

    /// Public SSH key (used with `add_ssh_keys`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,

    /// Provider-side ID of a stored private key, not key material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_private_key: Option<i64>,

    /// Public keys to install (required when sshOptions is `use_ssh_keys`)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "existingSSHKeys")]
    #[schemars(rename = "existingSSHKeys")]
    pub existing_ssh_keys: Option<Vec<String>>,

    /// BIOS type, applied only when booting from an ISO (KVM only, provider default `seabios`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bios: Option<Bios>,
}

impl VirtualMachineParameters {
    /// Create parameters with every optional field unset
    ///
    /// Sizing and ownership fields start at zero and are rejected by
    /// validation until the caller sets them.
    pub fn new(
        virtualization: Virtualization,
        hostname: impl Into<String>,
        root_password: impl Into<String>,
    ) -> Self {
        Self {
            virtualization,
            server_group_id: None,
            root_password: root_password.into(),
            hostname: hostname.into(),
            disk_space: 0,
            ram: 0,
            burstable_ram: None,
            swap_ram: None,
            bandwidth: 0,
            user_id: 0,
            cpu: None,
            cpu_percent: None,
            cpu_cores: 0,
            num_ipv4: None,
            num_internal_ips: None,
            num_ipv6: None,
            num_ipv6_subnets: None,
            enable_vnc: None,
            vnc_password: None,
            shadow_memory: None,
            iso: None,
            boot_order: None,
            enable_tuntap: None,
            enable_io_priority: None,
            suspend_if_bandwidth_exceeded: None,
            os_reinstall_limit: None,
            os_id: 0,
            media_group_id: None,
            nic: None,
            ssh_options: None,
            ssh_public_key: None,
            ssh_private_key: None,
            existing_ssh_keys: None,
            bios: None,
        }
    }
}

/// Virtualization type of a VPS
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Virtualization {
    /// OpenVZ container
    Openvz,
    /// Xen paravirtualized guest
    Xen,
    /// Xen fully virtualized (HVM) guest
    Xenhvm,
    /// KVM guest
    Kvm,
    /// XCP paravirtualized guest
    Xcp,
    /// XCP fully virtualized (HVM) guest
    Xcphvm,
    /// LXC container
    Lxc,
    /// Virtuozzo OpenVZ container
    Vzo,
    /// Virtuozzo KVM guest
    Vzk,
    /// Proxmox OpenVZ container
    Proxo,
    /// Proxmox KVM guest
    Proxk,
    /// Proxmox LXC container
    Proxl,
}

impl Virtualization {
    /// Every virtualization type, in declaration order
    pub const VARIANTS: [Self; 12] = [
        Self::Openvz,
        Self::Xen,
        Self::Xenhvm,
        Self::Kvm,
        Self::Xcp,
        Self::Xcphvm,
        Self::Lxc,
        Self::Vzo,
        Self::Vzk,
        Self::Proxo,
        Self::Proxk,
        Self::Proxl,
    ];

    /// Wire name of the virtualization type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Openvz => "openvz",
            Self::Xen => "xen",
            Self::Xenhvm => "xenhvm",
            Self::Kvm => "kvm",
            Self::Xcp => "xcp",
            Self::Xcphvm => "xcphvm",
            Self::Lxc => "lxc",
            Self::Vzo => "vzo",
            Self::Vzk => "vzk",
            Self::Proxo => "proxo",
            Self::Proxk => "proxk",
            Self::Proxl => "proxl",
        }
    }

    /// OpenVZ containers (plain, Virtuozzo or Proxmox hosted)
    pub fn is_openvz(&self) -> bool {
        matches!(self, Self::Openvz | Self::Vzo | Self::Proxo)
    }

    /// KVM guests (plain or Proxmox hosted)
    pub fn is_kvm(&self) -> bool {
        matches!(self, Self::Kvm | Self::Proxk)
    }

    /// Fully virtualized Xen guests
    pub fn is_xen_hvm(&self) -> bool {
        matches!(self, Self::Xenhvm | Self::Xcphvm)
    }
}

string_enum_schema!(Virtualization);

impl std::fmt::Display for Virtualization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SSH bootstrap mode
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SshOptions {
    /// Install the key given in `sshPublicKey`
    AddSshKeys,
    /// Let the provider generate a key pair
    GenerateKeys,
    /// Install the keys listed in `existingSSHKeys`
    UseSshKeys,
}

impl SshOptions {
    /// Every SSH bootstrap mode, in declaration order
    pub const VARIANTS: [Self; 3] = [Self::AddSshKeys, Self::GenerateKeys, Self::UseSshKeys];

    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddSshKeys => "add_ssh_keys",
            Self::GenerateKeys => "generate_keys",
            Self::UseSshKeys => "use_ssh_keys",
        }
    }
}

string_enum_schema!(SshOptions);

/// BIOS type
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Bios {
    /// Legacy BIOS (SeaBIOS)
    Seabios,
    /// UEFI firmware
    Uefi,
}

impl Bios {
    /// Every BIOS type, in declaration order
    pub const VARIANTS: [Self; 2] = [Self::Seabios, Self::Uefi];

    /// Wire name of the BIOS type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seabios => "seabios",
            Self::Uefi => "uefi",
        }
    }
}

string_enum_schema!(Bios);

/// Observable fields of a VirtualMachine
///
/// Every field defaults and unknown keys are ignored, so fields can be added
/// without breaking stored objects.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineObservation {
    /// Provider-reported state of the VPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observable_field: Option<String>,
}

/// VirtualMachineSpec defines the desired state of a VirtualMachine
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "compute.virtono.crossplane.io",
    version = "v1alpha1",
    kind = "VirtualMachine",
    plural = "virtualmachines",
    status = "VirtualMachineStatus",
    derive = "PartialEq",
    category = "crossplane",
    category = "managed",
    category = "virtono",
    printcolumn = r#"{"name":"READY","type":"string","jsonPath":".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name":"SYNCED","type":"string","jsonPath":".status.conditions[?(@.type=='Synced')].status"}"#,
    printcolumn = r#"{"name":"EXTERNAL-NAME","type":"string","jsonPath":".metadata.annotations.crossplane\\.io/external-name"}"#,
    printcolumn = r#"{"name":"AGE","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSpec {
    /// Provider-agnostic managed resource fields
    #[serde(flatten)]
    pub resource_spec: ResourceSpec,

    /// Desired VPS parameters
    pub for_provider: VirtualMachineParameters,
}

impl VirtualMachineSpec {
    /// Spec with default managed resource fields
    pub fn new(for_provider: VirtualMachineParameters) -> Self {
        Self {
            resource_spec: ResourceSpec::default(),
            for_provider,
        }
    }
}

/// VirtualMachineStatus represents the observed state of a VirtualMachine
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineStatus {
    /// Lifecycle conditions
    #[serde(flatten)]
    pub resource_status: ResourceStatus,

    /// Facts reported by the provider
    #[serde(default)]
    pub at_provider: VirtualMachineObservation,
}

/// List of VirtualMachines
pub type VirtualMachineList = ResourceList<VirtualMachine>;

static VIRTUAL_MACHINE_IDENTITY: LazyLock<TypeIdentity> =
    LazyLock::new(TypeIdentity::of::<VirtualMachine>);

impl VirtualMachine {
    /// Type identity of the VirtualMachine kind, computed once per process
    pub fn identity() -> &'static TypeIdentity {
        &VIRTUAL_MACHINE_IDENTITY
    }
}

impl Managed for VirtualMachine {
    fn resource_spec(&self) -> &ResourceSpec {
        &self.spec.resource_spec
    }

    fn resource_status(&self) -> Option<&ResourceStatus> {
        self.status.as_ref().map(|s| &s.resource_status)
    }

    fn resource_status_mut(&mut self) -> &mut ResourceStatus {
        &mut self.status.get_or_insert_with(Default::default).resource_status
    }
}
