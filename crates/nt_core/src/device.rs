use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transport class of the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionClass {
    WiFi,
    Cellular,
    Unknown,
    None,
}

impl ConnectionClass {
    pub fn is_connected(self) -> bool {
        self != ConnectionClass::None
    }

    /// Label shown in the screen header.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionClass::WiFi => "WiFi",
            ConnectionClass::Cellular => "Datos móviles",
            ConnectionClass::Unknown => "Desconocida",
            ConnectionClass::None => "Sin conexión",
        }
    }
}

impl fmt::Display for ConnectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConnectionClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wifi" | "wi-fi" => Ok(ConnectionClass::WiFi),
            "cellular" | "mobile" => Ok(ConnectionClass::Cellular),
            "unknown" => Ok(ConnectionClass::Unknown),
            "none" | "offline" => Ok(ConnectionClass::None),
            other => Err(format!("Invalid connection class: {}", other)),
        }
    }
}

/// Raw `(level, scale)` pair read from the power source. `None` means unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryLevel {
    pub level: Option<i64>,
    pub scale: Option<i64>,
}

impl BatteryLevel {
    pub fn new(level: i64, scale: i64) -> Self {
        Self {
            level: Some(level),
            scale: Some(scale),
        }
    }

    pub fn unreadable() -> Self {
        Self::default()
    }

    pub fn percent(self) -> u8 {
        battery_percent(self.level, self.scale)
    }
}

/// Percentage of `level` over `scale`, truncated toward zero.
///
/// Unreadable or sentinel (negative) values and a non-positive scale report 100.
pub fn battery_percent(level: Option<i64>, scale: Option<i64>) -> u8 {
    match (level, scale) {
        (Some(level), Some(scale)) if level >= 0 && scale > 0 => {
            (level.saturating_mul(100) / scale).clamp(0, 100) as u8
        }
        _ => 100,
    }
}

/// Connectivity and battery at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub connection: ConnectionClass,
    pub battery_percent: u8,
}

impl DeviceState {
    pub fn new(connection: ConnectionClass, battery_percent: u8) -> Self {
        Self {
            connection,
            battery_percent: battery_percent.min(100),
        }
    }
}

/// Read-only view of the host's connectivity and power source.
pub trait DeviceProbe: Send + Sync {
    /// Returns the name of the backend
    fn name(&self) -> &str;

    /// Classifies the active network, `None` when there is none
    fn connection_class(&self) -> ConnectionClass;

    /// Reads the battery `(level, scale)` pair
    fn battery_level(&self) -> BatteryLevel;

    /// Takes a snapshot. Never fails; unreadable values fall back to defaults.
    fn sample(&self) -> DeviceState {
        let state = DeviceState::new(self.connection_class(), self.battery_level().percent());
        tracing::debug!(
            probe = self.name(),
            connection = ?state.connection,
            battery = state.battery_percent,
            "sampled device state"
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_percent() {
        assert_eq!(battery_percent(Some(50), Some(100)), 50);
        assert_eq!(battery_percent(Some(199), Some(200)), 99);
        assert_eq!(battery_percent(Some(1), Some(3)), 33);
        assert_eq!(battery_percent(Some(0), Some(100)), 0);
        assert_eq!(battery_percent(Some(120), Some(100)), 100);
    }

    #[test]
    fn test_unreadable_battery_reports_full() {
        assert_eq!(battery_percent(None, Some(100)), 100);
        assert_eq!(battery_percent(Some(40), None), 100);
        assert_eq!(battery_percent(Some(-1), Some(100)), 100);
        assert_eq!(battery_percent(Some(40), Some(-1)), 100);
        assert_eq!(battery_percent(Some(40), Some(0)), 100);
        assert_eq!(BatteryLevel::unreadable().percent(), 100);
    }

    #[test]
    fn test_parse_connection_class() {
        assert_eq!("WiFi".parse::<ConnectionClass>().unwrap(), ConnectionClass::WiFi);
        assert_eq!("cellular".parse::<ConnectionClass>().unwrap(), ConnectionClass::Cellular);
        assert_eq!("none".parse::<ConnectionClass>().unwrap(), ConnectionClass::None);
        assert!("satellite".parse::<ConnectionClass>().is_err());
    }

    struct StubProbe;

    impl DeviceProbe for StubProbe {
        fn name(&self) -> &str {
            "stub"
        }

        fn connection_class(&self) -> ConnectionClass {
            ConnectionClass::Cellular
        }

        fn battery_level(&self) -> BatteryLevel {
            BatteryLevel::new(3, 4)
        }
    }

    #[test]
    fn test_sample_combines_readings() {
        let state = StubProbe.sample();
        assert_eq!(state, DeviceState::new(ConnectionClass::Cellular, 75));
        assert!(state.connection.is_connected());
    }
}
