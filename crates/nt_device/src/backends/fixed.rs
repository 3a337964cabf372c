use nt_core::{BatteryLevel, ConnectionClass, DeviceProbe};

/// Probe that always reports the same snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe {
    connection: ConnectionClass,
    battery: BatteryLevel,
}

impl FixedProbe {
    /// A missing battery percentage behaves like an unreadable power source.
    pub fn new(connection: ConnectionClass, battery_percent: Option<u8>) -> Self {
        let battery = match battery_percent {
            Some(percent) => BatteryLevel::new(i64::from(percent.min(100)), 100),
            None => BatteryLevel::unreadable(),
        };
        Self { connection, battery }
    }
}

impl DeviceProbe for FixedProbe {
    fn name(&self) -> &str {
        "fixed"
    }

    fn connection_class(&self) -> ConnectionClass {
        self.connection
    }

    fn battery_level(&self) -> BatteryLevel {
        self.battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_probe_clamps_battery() {
        let probe = FixedProbe::new(ConnectionClass::None, Some(250));
        assert_eq!(probe.sample().battery_percent, 100);
        assert_eq!(probe.sample().connection, ConnectionClass::None);
    }
}
