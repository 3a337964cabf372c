//! Adaptive truncation: how many articles the screen shows for a device state.

use crate::device::ConnectionClass;

/// Battery percentage below which the low-battery cap applies.
pub const LOW_BATTERY_THRESHOLD: u8 = 20;

pub const LOW_BATTERY_CAP: usize = 3;
pub const CELLULAR_CAP: usize = 5;
pub const DEFAULT_CAP: usize = 10;

/// Maximum number of articles to display. Low battery wins over the connection type.
pub fn truncation_cap(battery_percent: u8, connection: ConnectionClass) -> usize {
    if battery_percent < LOW_BATTERY_THRESHOLD {
        LOW_BATTERY_CAP
    } else if connection == ConnectionClass::Cellular {
        CELLULAR_CAP
    } else {
        DEFAULT_CAP
    }
}

/// Keeps the first `truncation_cap` articles in source order, without padding.
pub fn truncate_articles<T>(
    battery_percent: u8,
    connection: ConnectionClass,
    mut articles: Vec<T>,
) -> Vec<T> {
    articles.truncate(truncation_cap(battery_percent, connection));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ConnectionClass; 4] = [
        ConnectionClass::WiFi,
        ConnectionClass::Cellular,
        ConnectionClass::Unknown,
        ConnectionClass::None,
    ];

    #[test]
    fn test_low_battery_cap_ignores_connection() {
        for battery in 0..LOW_BATTERY_THRESHOLD {
            for connection in ALL {
                assert_eq!(truncation_cap(battery, connection), 3);
            }
        }
    }

    #[test]
    fn test_connection_caps() {
        for battery in LOW_BATTERY_THRESHOLD..=100 {
            assert_eq!(truncation_cap(battery, ConnectionClass::Cellular), 5);
            assert_eq!(truncation_cap(battery, ConnectionClass::WiFi), 10);
            assert_eq!(truncation_cap(battery, ConnectionClass::Unknown), 10);
        }
    }

    #[test]
    fn test_low_battery_on_wifi_keeps_first_three() {
        let articles: Vec<u32> = (0..10).collect();
        assert_eq!(truncate_articles(15, ConnectionClass::WiFi, articles), vec![0, 1, 2]);
    }

    #[test]
    fn test_cellular_keeps_five() {
        let articles: Vec<u32> = (0..10).collect();
        assert_eq!(truncate_articles(80, ConnectionClass::Cellular, articles), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_short_list_is_unchanged() {
        assert_eq!(truncate_articles(80, ConnectionClass::WiFi, vec!["a", "b"]), vec!["a", "b"]);
        assert!(truncate_articles::<u8>(5, ConnectionClass::Cellular, vec![]).is_empty());
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let articles: Vec<u32> = (0..25).collect();
        let cases = [
            (10, ConnectionClass::WiFi),
            (50, ConnectionClass::Cellular),
            (90, ConnectionClass::Unknown),
        ];
        for (battery, connection) in cases {
            let once = truncate_articles(battery, connection, articles.clone());
            let twice = truncate_articles(battery, connection, once.clone());
            assert_eq!(once, twice);
            assert_eq!(once, articles[..truncation_cap(battery, connection)].to_vec());
        }
    }
}
