//! CLI runner - executes commands
//!
//! Singer messages go to stdout as JSON lines; logs go to stderr.

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::{JsonLinesSink, MessageSink, SyncConfig, SyncContext, SyncEngine, SyncStats};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RestClient};
use crate::state::StateManager;
use crate::streams::{
    all_streams, resolve_utc_timezone_id, select_streams, selected_stream_ids, Catalog,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let mut out = std::io::stdout();
        match &self.cli.command {
            Commands::Spec => Self::spec(&mut out),
            Commands::Check => self.check(&mut out).await,
            Commands::Discover => Self::discover(&mut out),
            Commands::Read {
                streams,
                catalog,
                state_per_page,
            } => {
                let streams = match catalog {
                    Some(path) => {
                        let selected = Self::catalog_selection(path)?;
                        if selected.is_empty() {
                            warn!("Catalog selects no streams, nothing to sync");
                            return Ok(());
                        }
                        selected
                    }
                    None => streams.clone(),
                };
                let mut sink = JsonLinesSink::new(out);
                self.read(&streams, *state_per_page, &mut sink).await?;
                Ok(())
            }
        }
    }

    /// Load config
    fn load_config(&self) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json(json_str);
        }
        match &self.cli.config {
            Some(path) => TapConfig::from_file(path),
            None => Err(Error::config(
                "No config given (use --config or --config-json)",
            )),
        }
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Streams selected by the catalog file at `path`
    pub fn catalog_selection(path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read catalog file: {e}")))?;
        let catalog: Value = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid catalog JSON: {e}")))?;
        selected_stream_ids(&catalog)
    }

    fn client(config: &TapConfig) -> Result<HttpClient> {
        HttpClient::with_auth(config.http_config(), config.auth())
    }

    /// Print the config specification
    pub fn spec(out: &mut impl Write) -> Result<()> {
        output_message(
            out,
            &json!({
                "type": "SPEC",
                "spec": {"connectionSpecification": TapConfig::spec()}
            }),
        )
    }

    /// Check connection by resolving the UTC timezone id
    pub async fn check(&self, out: &mut impl Write) -> Result<()> {
        let config = self.load_config()?;
        let client = Self::client(&config)?;
        check_connection(&client, out).await
    }

    /// Print the catalog of every stream
    pub fn discover(out: &mut impl Write) -> Result<()> {
        let catalog = serde_json::to_value(Catalog::from_streams(&all_streams()))?;
        output_message(out, &catalog)
    }

    /// Sync the selected streams, one after another
    pub async fn read(
        &self,
        stream_names: &[String],
        state_per_page: bool,
        sink: &mut dyn MessageSink,
    ) -> Result<SyncStats> {
        let config = self.load_config()?;
        let state = self.load_state()?.with_auto_save(state_per_page);
        let client = Self::client(&config)?;
        read_streams(
            Box::new(client),
            &config,
            state,
            stream_names,
            SyncConfig::new().with_state_per_page(state_per_page),
            sink,
        )
        .await
    }
}

/// Resolve the UTC timezone and report a connection status
pub async fn check_connection(client: &dyn RestClient, out: &mut impl Write) -> Result<()> {
    match resolve_utc_timezone_id(client).await {
        Ok(timezone_id) => output_message(
            out,
            &json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "SUCCEEDED",
                    "message": format!("UTC timezone id {timezone_id}")
                }
            }),
        ),
        Err(e) => {
            output_message(
                out,
                &json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {"status": "FAILED", "message": e.to_string()}
                }),
            )?;
            Err(Error::ConnectionCheck {
                message: e.to_string(),
            })
        }
    }
}

/// Sync `stream_names` (all streams when empty) through `client`
///
/// The UTC timezone id is resolved once, before any stream syncs, and only
/// when a selected stream needs it. State is saved after each stream.
pub async fn read_streams(
    client: Box<dyn RestClient>,
    config: &TapConfig,
    state: StateManager,
    stream_names: &[String],
    sync_config: SyncConfig,
    sink: &mut dyn MessageSink,
) -> Result<SyncStats> {
    let streams = select_streams(stream_names)?;
    let start_date = config.start_date(Utc::now())?;

    let timezone_id = if streams.iter().any(|s| s.needs_timezone()) {
        Some(resolve_utc_timezone_id(client.as_ref()).await?)
    } else {
        None
    };
    let context = SyncContext {
        timezone_id,
        start_date,
    };

    let mut engine = SyncEngine::new(client, state.clone()).with_config(sync_config);
    for stream in &streams {
        engine
            .sync_stream(stream, &context, Utc::now(), sink)
            .await?;
        state.save().await?;
    }

    let stats = engine.stats().clone();
    info!(
        "Synced {} streams: {} records in {} pages",
        stats.streams_synced, stats.records_synced, stats.pages_fetched
    );
    Ok(stats)
}

/// Write one JSON line
fn output_message(out: &mut impl Write, msg: &Value) -> Result<()> {
    serde_json::to_writer(&mut *out, msg)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
