//! Search request lifecycle for one screen.
//!
//! Every submission samples the device, then either short-circuits on a
//! missing connection or runs exactly one request and truncates its results.
//! At most one submission is in flight; others are rejected, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nt_core::policy::{truncate_articles, truncation_cap};
use nt_core::{
    Article, DeviceProbe, DeviceState, NewsResponse, NewsSource, SearchError, SearchResult,
};
use tokio::sync::watch;

use crate::logging::Logger;

/// Query used when the screen is first shown.
pub const MOUNT_QUERY: &str = "Colombia";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Article>),
    Error(SearchError),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// What the result region shows for this state. `Empty` means no search
    /// has run yet; a search with no hits is `Results` with an empty list.
    pub fn view(&self) -> SearchResult {
        match self {
            SearchState::Idle => SearchResult::Empty,
            SearchState::Loading => SearchResult::Loading,
            SearchState::Success(articles) => SearchResult::Results(articles.clone()),
            SearchState::Error(SearchError::NoConnection) => SearchResult::NoConnection,
            SearchState::Error(error) => SearchResult::Error(error.to_string()),
        }
    }
}

/// Everything the screen renders, published as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub device: Option<DeviceState>,
    pub query: String,
    pub state: SearchState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Finished(SearchState),
    /// Another request was in flight; nothing was sampled or sent.
    Rejected,
}

/// Applies the provider response to the device state sampled for the request.
pub fn complete(response: &NewsResponse, device: DeviceState) -> SearchState {
    if !response.is_success() {
        return SearchState::Error(SearchError::Application {
            status: response.status.clone(),
        });
    }
    match response.articles() {
        Ok(Some(articles)) => SearchState::Success(truncate_articles(
            device.battery_percent,
            device.connection,
            articles,
        )),
        Ok(None) => SearchState::Error(SearchError::Application {
            status: response.status.clone(),
        }),
        Err(e) => {
            tracing::error!("Failed to decode articles: {}", e);
            SearchState::Error(SearchError::transport(&e))
        }
    }
}

struct Inner {
    source: Arc<dyn NewsSource>,
    probe: Arc<dyn DeviceProbe>,
    screen: watch::Sender<Screen>,
    in_flight: AtomicBool,
}

#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

impl SearchController {
    pub fn new(source: Arc<dyn NewsSource>, probe: Arc<dyn DeviceProbe>) -> Self {
        let (screen, _) = watch::channel(Screen::default());
        Self {
            inner: Arc::new(Inner {
                source,
                probe,
                screen,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.inner.screen.subscribe()
    }

    pub fn screen(&self) -> Screen {
        self.inner.screen.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Initial load with the fixed query.
    pub async fn mount(&self) -> Submission {
        self.submit(MOUNT_QUERY, Logger::new().with_prefix("[mount]")).await
    }

    /// User-initiated search. An empty query is sent as-is.
    pub async fn search(&self, query: &str) -> Submission {
        self.submit(query, Logger::new().with_prefix("[search]")).await
    }

    async fn submit(&self, query: &str, logger: Logger) -> Submission {
        let Some(guard) = InFlight::acquire(&self.inner) else {
            logger.debug("Request already in flight, ignoring submission");
            return Submission::Rejected;
        };

        let device = self.inner.probe.sample();
        if !device.connection.is_connected() {
            logger.warn("No active network, request not sent");
            let state = SearchState::Error(SearchError::NoConnection);
            guard.finish(device, query, state.clone());
            return Submission::Finished(state);
        }

        self.inner.screen.send_modify(|screen| {
            screen.device = Some(device);
            screen.query = query.to_string();
            screen.state = SearchState::Loading;
        });
        logger.info(&format!(
            "Fetching {:?} from {} ({}, battery {}%)",
            query,
            self.inner.source.name(),
            device.connection,
            device.battery_percent
        ));

        let state = match self.inner.source.latest(query).await {
            Ok(response) => complete(&response, device),
            Err(e) => {
                logger.error(&format!("Request failed: {}", e));
                SearchState::Error(SearchError::transport(&e))
            }
        };

        match &state {
            SearchState::Success(articles) => logger.info(&format!(
                "Showing {} articles (cap {})",
                articles.len(),
                truncation_cap(device.battery_percent, device.connection)
            )),
            SearchState::Error(e @ SearchError::Application { .. }) => logger.warn(&e.to_string()),
            _ => {}
        }

        guard.finish(device, query, state.clone());
        Submission::Finished(state)
    }
}

/// Holds the in-flight slot. Dropping it without `finish` (panic or
/// cancellation) replaces a lingering `Loading` with `Interrupted`.
struct InFlight<'a> {
    inner: &'a Inner,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn acquire(inner: &'a Inner) -> Option<Self> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                inner,
                finished: false,
            })
    }

    fn finish(mut self, device: DeviceState, query: &str, state: SearchState) {
        self.finished = true;
        let in_flight = &self.inner.in_flight;
        // Release inside the write so subscribers never see a final state
        // while submissions are still being rejected.
        self.inner.screen.send_modify(|screen| {
            screen.device = Some(device);
            screen.query = query.to_string();
            screen.state = state;
            in_flight.store(false, Ordering::Release);
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let in_flight = &self.inner.in_flight;
        self.inner.screen.send_if_modified(|screen| {
            in_flight.store(false, Ordering::Release);
            if screen.state.is_loading() {
                screen.state = SearchState::Error(SearchError::Interrupted);
                true
            } else {
                false
            }
        });
        tracing::warn!("Request interrupted before completion");
    }
}
