pub mod device;
pub mod error;
pub mod policy;
pub mod source;
pub mod types;

pub use device::{battery_percent, BatteryLevel, ConnectionClass, DeviceProbe, DeviceState};
pub use error::{Error, SearchError};
pub use policy::{truncate_articles, truncation_cap};
pub use source::NewsSource;
pub use types::{Article, NewsResponse, SearchResult, SUCCESS_STATUS};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{
        Article, ConnectionClass, DeviceProbe, DeviceState, Error, NewsResponse, NewsSource,
        Result, SearchError, SearchResult,
    };
}
