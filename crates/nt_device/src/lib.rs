use std::fmt;
use std::sync::Arc;

use nt_core::{ConnectionClass, DeviceProbe};

pub mod backends;

pub use backends::*;

/// Available device probe backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProbeKind {
    /// Read the host's sysfs and route table
    #[default]
    Sysfs,
    /// Report a configured connection and battery level
    Fixed,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Sysfs => f.write_str("sysfs"),
            ProbeKind::Fixed => f.write_str("fixed"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    pub kind: ProbeKind,
    pub connection: Option<ConnectionClass>,
    pub battery_percent: Option<u8>,
}

pub fn create_probe(config: &ProbeConfig) -> Arc<dyn DeviceProbe> {
    match config.kind {
        ProbeKind::Sysfs => Arc::new(SysfsProbe::new()),
        ProbeKind::Fixed => Arc::new(FixedProbe::new(
            config.connection.unwrap_or(ConnectionClass::WiFi),
            config.battery_percent,
        )),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_probe, ProbeConfig, ProbeKind};
}
