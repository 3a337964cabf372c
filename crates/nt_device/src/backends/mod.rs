pub mod fixed;
pub mod sysfs;

pub use fixed::FixedProbe;
pub use sysfs::SysfsProbe;
