use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nt_core::{BatteryLevel, ConnectionClass, DeviceProbe};
use tracing::debug;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";
const NET_ROOT: &str = "/sys/class/net";
const PROC_NET: &str = "/proc/net";
const ROUTE_TABLE: &str = "route";
const IPV6_ROUTE_TABLE: &str = "ipv6_route";

const RTF_UP: u32 = 0x0001;
const CELLULAR_PREFIXES: &[&str] = &["wwan", "rmnet", "ccmni", "ppp"];

/// Linux probe backed by `/sys/class` and the kernel route table.
#[derive(Debug, Clone)]
pub struct SysfsProbe {
    power_supply: PathBuf,
    net: PathBuf,
    proc_net: PathBuf,
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsProbe {
    pub fn new() -> Self {
        Self::with_roots(POWER_SUPPLY_ROOT, NET_ROOT, PROC_NET)
    }

    /// `proc_net` holds the `route` and `ipv6_route` tables.
    pub fn with_roots(
        power_supply: impl Into<PathBuf>,
        net: impl Into<PathBuf>,
        proc_net: impl Into<PathBuf>,
    ) -> Self {
        Self {
            power_supply: power_supply.into(),
            net: net.into(),
            proc_net: proc_net.into(),
        }
    }

    fn battery_dir(&self) -> Option<PathBuf> {
        sorted_entries(&self.power_supply)
            .ok()?
            .into_iter()
            .find(|dir| read_trimmed(&dir.join("type")).as_deref() == Some("Battery"))
    }

    /// Interface carrying the IPv4 default route, then the IPv6 one. Falls
    /// back to the first interface that is up when neither table can be read.
    fn active_interface(&self) -> Option<String> {
        let ipv4 = self.read_table(ROUTE_TABLE);
        if let Some(interface) = ipv4.as_deref().and_then(parse_default_route) {
            return Some(interface);
        }
        let ipv6 = self.read_table(IPV6_ROUTE_TABLE);
        if let Some(interface) = ipv6.as_deref().and_then(parse_ipv6_default_route) {
            return Some(interface);
        }
        if ipv4.is_none() && ipv6.is_none() {
            debug!("No route table under {}, scanning interfaces", self.proc_net.display());
            return self.first_up_interface();
        }
        None
    }

    fn read_table(&self, name: &str) -> Option<String> {
        let path = self.proc_net.join(name);
        match fs::read_to_string(&path) {
            Ok(table) => Some(table),
            Err(e) => {
                debug!("Route table {} unreadable: {}", path.display(), e);
                None
            }
        }
    }

    fn first_up_interface(&self) -> Option<String> {
        sorted_entries(&self.net)
            .ok()?
            .into_iter()
            .filter(|dir| dir.file_name().map_or(false, |name| name != "lo"))
            .find(|dir| read_trimmed(&dir.join("operstate")).as_deref() == Some("up"))
            .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
    }

    fn classify(&self, interface: &str) -> ConnectionClass {
        let dir = self.net.join(interface);
        if dir.join("wireless").exists() || dir.join("phy80211").exists() {
            return ConnectionClass::WiFi;
        }
        let is_wwan = read_trimmed(&dir.join("uevent"))
            .map_or(false, |uevent| uevent.lines().any(|line| line.trim() == "DEVTYPE=wwan"));
        if is_wwan || CELLULAR_PREFIXES.iter().any(|prefix| interface.starts_with(prefix)) {
            return ConnectionClass::Cellular;
        }
        ConnectionClass::Unknown
    }
}

impl DeviceProbe for SysfsProbe {
    fn name(&self) -> &str {
        "sysfs"
    }

    fn connection_class(&self) -> ConnectionClass {
        match self.active_interface() {
            Some(interface) => {
                let class = self.classify(&interface);
                debug!("Active interface {} classified as {:?}", interface, class);
                class
            }
            None => ConnectionClass::None,
        }
    }

    fn battery_level(&self) -> BatteryLevel {
        let Some(dir) = self.battery_dir() else {
            debug!("No battery found under {}", self.power_supply.display());
            return BatteryLevel::unreadable();
        };

        if let Some(capacity) = read_number(&dir.join("capacity")) {
            return BatteryLevel {
                level: Some(capacity),
                scale: Some(100),
            };
        }

        for (now, full) in [("energy_now", "energy_full"), ("charge_now", "charge_full")] {
            if let (Some(level), Some(scale)) =
                (read_number(&dir.join(now)), read_number(&dir.join(full)))
            {
                return BatteryLevel::new(level, scale);
            }
        }

        BatteryLevel::unreadable()
    }
}

/// Picks the interface of the lowest-metric default route that is up.
pub fn parse_default_route(table: &str) -> Option<String> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 7 {
                return None;
            }
            let flags = u32::from_str_radix(fields[3], 16).ok()?;
            let metric = fields[6].parse::<u32>().ok()?;
            (fields[1] == "00000000" && (flags & RTF_UP) != 0).then(|| (metric, fields[0]))
        })
        .min_by_key(|(metric, _)| *metric)
        .map(|(_, interface)| interface.to_string())
}

/// Same for `/proc/net/ipv6_route`: `::/0` routes that are up, loopback excluded.
pub fn parse_ipv6_default_route(table: &str) -> Option<String> {
    table
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 10 {
                return None;
            }
            let is_default = fields[0].bytes().all(|b| b == b'0') && fields[1] == "00";
            let metric = u32::from_str_radix(fields[5], 16).ok()?;
            let flags = u32::from_str_radix(fields[8], 16).ok()?;
            let interface = fields[9];
            (is_default && (flags & RTF_UP) != 0 && interface != "lo").then(|| (metric, interface))
        })
        .min_by_key(|(metric, _)| *metric)
        .map(|(_, interface)| interface.to_string())
}

fn sorted_entries(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_number(path: &Path) -> Option<i64> {
    read_trimmed(path)?.parse().ok()
}
