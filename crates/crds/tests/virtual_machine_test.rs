//! End-to-end tests for the VirtualMachine resource
//!
//! Exercise the resource the way a control plane does: build the scheme at
//! startup, decode submitted objects through it, validate, and write status.

use virtono_crds::{
    Condition, ConditionStatus, ConditionType, Managed, Registration, SchemeError, SshOptions,
    ValidationError, ValidationPolicy, VirtualMachine, VirtualMachineList,
    VirtualMachineParameters, VirtualMachineSpec, Virtualization, build_scheme,
};

const VM_YAML: &str = r#"
apiVersion: compute.virtono.crossplane.io/v1alpha1
kind: VirtualMachine
metadata:
  name: vm1
  annotations:
    crossplane.io/external-name: vps-1001
spec:
  deletionPolicy: Orphan
  providerConfigRef:
    name: virtono-eu
  writeConnectionSecretToRef:
    name: vm1-conn
    namespace: crossplane-system
  forProvider:
    virtualization: kvm
    rootPassword: s3cret
    hostname: vm1.example.net
    diskSpace: 20
    ram: 1024
    burstableRAM: 0
    bandwidth: 1000
    userId: 7
    cpuCores: 2
    numIpv4: 1
    enableVNC: true
    osId: 101
    sshOptions: use_ssh_keys
    existingSSHKeys:
      - ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIExample user@host
    bios: uefi
"#;

fn minimal_params() -> VirtualMachineParameters {
    VirtualMachineParameters {
        disk_space: 20,
        ram: 1024,
        bandwidth: 1000,
        user_id: 7,
        cpu_cores: 2,
        os_id: 101,
        ..VirtualMachineParameters::new(Virtualization::Kvm, "vm1", "x")
    }
}

#[test]
fn test_minimal_parameters_round_trip() {
    let params = minimal_params();
    let json = serde_json::to_string(&params).unwrap();
    let decoded: VirtualMachineParameters = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, params);
    assert_eq!(decoded.burstable_ram, None);
    assert_eq!(decoded.cpu_percent, None);
    assert_eq!(decoded.num_ipv4, None);
    assert_eq!(decoded.enable_vnc, None);
    assert_eq!(decoded.ssh_options, None);
    assert_eq!(decoded.existing_ssh_keys, None);
    assert_eq!(decoded.bios, None);
}

#[test]
fn test_virtual_machine_round_trip_through_scheme() {
    let scheme = build_scheme().unwrap();

    let vm: VirtualMachine = scheme.decode(VM_YAML).unwrap();
    assert_eq!(vm.spec.for_provider.hostname, "vm1.example.net");
    assert_eq!(vm.spec.for_provider.burstable_ram, Some(0));
    assert_eq!(vm.spec.for_provider.swap_ram, None);
    assert_eq!(vm.spec.resource_spec.provider_config_name(), "virtono-eu");
    assert_eq!(vm.external_name(), Some("vps-1001"));
    assert!(vm.status.is_none());

    let yaml = scheme.encode(&vm).unwrap();
    assert!(yaml.contains("burstableRAM: 0"));
    assert!(!yaml.contains("swapRAM"));

    let again: VirtualMachine = scheme.decode(&yaml).unwrap();
    assert_eq!(again, vm);
}

#[test]
fn test_status_round_trip() {
    let scheme = build_scheme().unwrap();
    let mut vm = VirtualMachine::new("vm1", VirtualMachineSpec::new(minimal_params()));
    vm.set_conditions([Condition::available(), Condition::reconcile_success()]);
    vm.status.as_mut().unwrap().at_provider.observable_field = Some("running".to_string());

    let yaml = scheme.encode(&vm).unwrap();
    let decoded: VirtualMachine = scheme.decode(&yaml).unwrap();
    assert_eq!(decoded, vm);
    assert_eq!(decoded.condition_status(ConditionType::Ready), ConditionStatus::True);
    assert_eq!(decoded.condition_status(ConditionType::Synced), ConditionStatus::True);
}

#[test]
fn test_use_ssh_keys_with_empty_list_is_rejected_before_status() {
    let mut vm = VirtualMachine::new("vm1", VirtualMachineSpec::new(minimal_params()));
    vm.spec.for_provider.ssh_options = Some(SshOptions::UseSshKeys);
    vm.spec.for_provider.existing_ssh_keys = Some(Vec::new());

    let err = vm.validate(&ValidationPolicy::default()).unwrap_err();
    assert_eq!(err, ValidationError::MissingSshKeys);

    // The rejection is reported through a condition; the provider observation stays empty
    vm.set_conditions([err.to_condition()]);
    let status = vm.status.as_ref().unwrap();
    assert_eq!(status.at_provider.observable_field, None);
    assert_eq!(vm.condition_status(ConditionType::Synced), ConditionStatus::False);
    assert_eq!(vm.condition_status(ConditionType::Ready), ConditionStatus::Unknown);
}

#[test]
fn test_decoded_example_is_valid() {
    let scheme = build_scheme().unwrap();
    let vm: VirtualMachine = scheme.decode(VM_YAML).unwrap();
    assert_eq!(vm.validate(&ValidationPolicy::strict()), Ok(()));
}

#[test]
fn test_out_of_domain_bios_fails_to_decode() {
    let scheme = build_scheme().unwrap();
    let yaml = VM_YAML.replace("bios: uefi", "bios: legacy");
    let err = scheme.decode::<VirtualMachine>(&yaml).unwrap_err();
    assert!(matches!(err, SchemeError::Yaml(_)));
}

#[test]
fn test_missing_required_field_fails_to_decode() {
    let scheme = build_scheme().unwrap();
    let yaml = VM_YAML.replace("    osId: 101\n", "");
    assert!(scheme.decode::<VirtualMachine>(&yaml).is_err());
}

#[test]
fn test_empty_list_round_trip() {
    let scheme = build_scheme().unwrap();
    let list = VirtualMachineList::default();
    assert_eq!(list.kind, "VirtualMachineList");
    assert_eq!(list.api_version, "compute.virtono.crossplane.io/v1alpha1");

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["items"], serde_json::json!([]));

    let yaml = scheme.encode_list(&list).unwrap();
    let decoded = scheme.decode_list::<VirtualMachine>(&yaml).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded, list);
}

#[test]
fn test_list_preserves_order() {
    let scheme = build_scheme().unwrap();
    let names = ["vm-c", "vm-a", "vm-b"];
    let list = VirtualMachineList::new(
        names
            .iter()
            .map(|n| VirtualMachine::new(n, VirtualMachineSpec::new(minimal_params())))
            .collect(),
    );

    let yaml = scheme.encode_list(&list).unwrap();
    let decoded = scheme.decode_list::<VirtualMachine>(&yaml).unwrap();
    let decoded_names: Vec<_> = decoded
        .iter()
        .filter_map(|vm| vm.metadata.name.as_deref())
        .collect();
    assert_eq!(decoded_names, names);
}

#[test]
fn test_registration_is_idempotent() {
    let mut scheme = build_scheme().unwrap();
    assert_eq!(scheme.len(), 1);

    assert_eq!(
        scheme.register::<VirtualMachine>().unwrap(),
        Registration::AlreadyRegistered
    );
    virtono_crds::add_to_scheme(&mut scheme).unwrap();
    assert_eq!(scheme.len(), 1);

    let gvk = VirtualMachine::identity().group_version_kind();
    let registered = scheme.lookup(&gvk).unwrap();
    assert_eq!(registered.list_kind, "VirtualMachineList");
    assert_eq!(registered.crd.spec.scope, "Cluster");
}

#[test]
fn test_unregistered_scheme_refuses_decode() {
    let scheme = virtono_crds::Scheme::new();
    let err = scheme.decode::<VirtualMachine>(VM_YAML).unwrap_err();
    assert!(matches!(err, SchemeError::NotRegistered(_)));
}
