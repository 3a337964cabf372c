pub mod cli;
pub mod client;
pub mod controller;
pub mod logging;

pub use cli::{DeviceArgs, FeedArgs, HumanDuration, LogArgs};
pub use client::NewsDataClient;
pub use controller::{SearchController, SearchState, Screen, Submission, MOUNT_QUERY};
pub use logging::{init_logging, LogTarget, Logger};

pub mod prelude {
    pub use super::controller::{SearchController, SearchState, Screen, Submission};
    pub use nt_core::{Article, DeviceState, Error, Result, SearchError, SearchResult};
}
