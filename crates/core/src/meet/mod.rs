//! Video-conference link provisioning

pub mod ports;
pub mod provisioner;

pub use provisioner::VideoLinkProvisioner;
