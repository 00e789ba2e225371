//! Execution engine module
//!
//! Drives one stream at a time through its pages and request windows.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Orchestrates data sync with state management
//! - `SyncConfig` / `SyncContext` - Per-run configuration and inputs
//! - Message types and sinks for output (Schema, Record, State)
//!
//! A stream sync moves through these states:
//!
//! ```text
//! START -> REQUEST -> PAGINATE -> REQUEST            (next page, same window)
//!                              -> WINDOW_DONE -> REQUEST   (next window)
//!                                             -> DONE
//! ```

mod types;

pub use types::{JsonLinesSink, Message, MessageSink, SyncConfig, SyncContext, SyncStats};

use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::http::RestClient;
use crate::pagination::{NextPage, PageCursor, PageResponse};
use crate::state::{BookmarkTracker, StateManager};
use crate::streams::StreamDefinition;
use crate::window::{resolve_start, RequestWindow, WindowPlanner};
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// REST transport
    client: Box<dyn RestClient>,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: Box<dyn RestClient>, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// The REST transport
    pub fn client(&self) -> &dyn RestClient {
        self.client.as_ref()
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync one stream to completion
    ///
    /// `now` is the upper bound of every request window for this sync.
    /// Records, checkpoints and the final state go to `sink`.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDefinition,
        context: &SyncContext,
        now: DateTime<Utc>,
        sink: &mut dyn MessageSink,
    ) -> Result<SyncStats> {
        let started = Instant::now();
        let mut stats = SyncStats::new();

        // START
        sink.emit(Message::schema(stream))?;

        let paginator = stream.pagination.build();
        let decoder = JsonDecoder::with_path(stream.records_path);

        let mut tracker = match stream.replication_key {
            Some(key) => {
                let persisted = self.state.get_bookmark(stream.name, key).await;
                Some(BookmarkTracker::new(key, persisted)?)
            }
            None => None,
        };

        let planner = stream.window.map(|limits| WindowPlanner::new(limits, now));
        let mut window = planner.as_ref().map(|p| {
            let bookmark = tracker.as_ref().and_then(BookmarkTracker::instant);
            p.window_at(resolve_start(None, bookmark, context.start_date))
        });
        let mut cursor = paginator.initial_cursor();

        match &window {
            Some(w) => info!("Requesting {} from {} to {}", stream.name, w.from, w.to),
            None => info!("Requesting {}", stream.name),
        }

        loop {
            // REQUEST
            let request = stream.build_request(
                window.as_ref(),
                context.timezone_id,
                paginator.page_params(cursor),
            )?;
            let body = self.client.send(&request).await?;
            stats.add_page();

            // PAGINATE
            let records = decoder.decode(&body)?;
            stats.add_records(records.len());
            debug!(
                stream = stream.name,
                records = records.len(),
                "Page {}",
                stats.pages_fetched
            );

            for record in &records {
                sink.emit(Message::record(
                    stream.name,
                    stream.post_process(record.clone()),
                    now,
                ))?;
            }

            if let Some(tracker) = tracker.as_mut() {
                if tracker.observe_page(&records)? {
                    if let Some(bookmark) = tracker.bookmark() {
                        self.state
                            .set_bookmark(
                                stream.name,
                                tracker.replication_key(),
                                bookmark.clone(),
                            )
                            .await?;
                    }
                }
            }

            if self.config.emit_state_per_page {
                sink.emit(Message::state(self.state.snapshot().await))?;
            }

            let next = paginator.next_page(&PageResponse {
                body: &body,
                records: &records,
                request: &request,
            })?;

            match next {
                NextPage::Continue(PageCursor::Page(page)) => {
                    cursor = Some(PageCursor::Page(page));
                    continue;
                }
                NextPage::Continue(PageCursor::Date(start)) => {
                    let (Some(planner), Some(current)) = (planner.as_ref(), window) else {
                        return Err(Error::config(format!(
                            "Stream '{}' returned a date cursor without a request window",
                            stream.name
                        )));
                    };
                    let restarted = planner.window_at(start);
                    if restarted != current {
                        window = Some(restarted);
                        cursor = paginator.initial_cursor();
                        info!(
                            "Requesting {} from {} to {}",
                            stream.name, restarted.from, restarted.to
                        );
                        continue;
                    }
                    debug!(stream = stream.name, "Date cursor did not move the window");
                }
                NextPage::Done => {}
            }

            // WINDOW_DONE
            stats.add_window();
            match advance(planner.as_ref(), window.as_ref()) {
                Some(next_window) => {
                    window = Some(next_window);
                    cursor = paginator.initial_cursor();
                    info!(
                        "Requesting {} from {} to {}",
                        stream.name, next_window.from, next_window.to
                    );
                }
                None => break,
            }
        }

        // DONE
        sink.emit(Message::state(self.state.snapshot().await))?;

        stats.add_stream();
        stats.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "Completed sync for {}: {} records in {} pages",
            stream.name, stats.records_synced, stats.pages_fetched
        );

        self.stats.merge(&stats);
        Ok(stats)
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = SyncStats::default();
    }
}

/// The window after `window`, if the stream is windowed and not yet at `now`
fn advance(
    planner: Option<&WindowPlanner>,
    window: Option<&RequestWindow>,
) -> Option<RequestWindow> {
    planner?.advance(window?)
}

#[cfg(test)]
mod tests;
