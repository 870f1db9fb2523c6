//! Terminal host and entry point.
//!
//! A thin line-oriented driver around [`MapSession`]: it loads the
//! configuration, opens the layer manifest, wires the geocoder and the data
//! source into a worker, and then feeds stdin lines to the session while
//! worker responses and debounced search terms arrive on their own.
//!
//! # Usage
//!
//! ```text
//! aemap [--config <file>] [key=value ...]
//! ```
//!
//! Overrides: `lat`, `lng`, `zoom`, `api_key`, `locale`, `route`, `theme`,
//! `theme_file`, `trace_level`, `layers`.
//!
//! # Commands
//!
//! - any plain line: types that text into the search box
//! - `:enter [text]`: confirms `text`, or the current input
//! - `:go <path>`: navigates
//! - `:marker <id>`: clicks an interview marker
//! - `:feature <layer> <index>`: clicks a feature of an overlay
//! - `:toggle <layer> on|off`: checks or unchecks an overlay
//! - `:quit`: exits (as does end of input)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

use aemap::data::FileDataSource;
use aemap::geocode::{Geocoder, ReqwestClient};
use aemap::worker::MapWorker;
use aemap::{Config, Event, MapError, MapSession};

/// Render width when `COLUMNS` is unset.
const DEFAULT_COLS: usize = 100;

/// A parsed input line.
#[derive(Debug)]
enum Command {
    Event(Event),
    /// `:enter` without text, confirming the current input.
    ConfirmCurrent,
    Quit,
    Invalid(String),
}

/// Maps an input line to a command.
fn parse_command(line: &str) -> Command {
    let Some(command) = line.strip_prefix(':') else {
        return Command::Event(Event::SearchInput(line.to_string()));
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.as_slice() {
        ["quit" | "q"] => Command::Quit,
        ["enter"] => Command::ConfirmCurrent,
        ["enter", ..] => {
            let text = command.trim_start().strip_prefix("enter").unwrap_or_default().trim();
            Command::Event(Event::SearchConfirm(text.to_string()))
        }
        ["go", path] => Command::Event(Event::Navigate((*path).to_string())),
        ["marker", id] => Command::Event(Event::MarkerClicked((*id).to_string())),
        ["feature", layer, index] => match index.parse() {
            Ok(feature_index) => Command::Event(Event::FeatureClicked {
                layer_key: (*layer).to_string(),
                feature_index,
            }),
            Err(_) => Command::Invalid(format!("not a feature index: {index}")),
        },
        ["toggle", layer, state @ ("on" | "off")] => Command::Event(Event::ToggleOverlay {
            layer_key: (*layer).to_string(),
            visible: *state == "on",
        }),
        _ => Command::Invalid(format!("unknown command: {line}")),
    }
}

/// Splits arguments into an optional `--config` path and `key=value`
/// overrides.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<(Option<PathBuf>, BTreeMap<String, String>), MapError> {
    let mut config_path = None;
    let mut overrides = BTreeMap::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            let path = args
                .next()
                .ok_or_else(|| MapError::Config("--config needs a path".to_string()))?;
            config_path = Some(PathBuf::from(path));
        } else if let Some((key, value)) = arg.split_once('=') {
            overrides.insert(key.to_string(), value.to_string());
        } else {
            return Err(MapError::Config(format!("expected key=value, got {arg}")));
        }
    }

    Ok((config_path, overrides))
}

fn terminal_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_COLS)
}

/// Builds the session: data source, geocoder, worker and initial state.
fn start(config: &Config) -> aemap::Result<MapSession<ReqwestClient, FileDataSource>> {
    let _guard = tracing::debug_span!("host_start").entered();

    let manifest = config
        .data
        .manifest
        .clone()
        .ok_or_else(|| MapError::Config("no layer manifest configured, set `manifest` under [data]".to_string()))?;
    let data = FileDataSource::open(&manifest)?;
    tracing::debug!(manifest = %manifest.display(), layer_count = data.keys().count(), "opened layer manifest");

    let geocoder = Geocoder::new(ReqwestClient::new()?, config.geocode.clone());
    let worker = MapWorker::new(geocoder, data);
    Ok(MapSession::new(aemap::initialize(config), worker, config.debounce()))
}

async fn run() -> aemap::Result<()> {
    let (config_path, overrides) = parse_args(std::env::args().skip(1))?;
    let mut config = Config::load(config_path.as_deref())?;
    config.apply_overrides(&overrides);

    let trace_file = aemap::observability::init_tracing(&config);
    tracing::debug!(trace_file = ?trace_file, "host starting");

    let mut session = start(&config)?;

    let cols = terminal_cols();
    session.dispatch(&Event::Mount);
    aemap::ui::render(session.state(), cols)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let should_render = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(line.trim_end()) {
                    Command::Quit => break,
                    Command::Event(event) => session.dispatch(&event),
                    Command::ConfirmCurrent => {
                        let term = session.state().ui.search_term.clone();
                        session.dispatch(&Event::SearchConfirm(term))
                    }
                    Command::Invalid(message) => {
                        eprintln!("{message}");
                        false
                    }
                }
            }
            should_render = session.pump() => should_render,
        };

        if should_render {
            aemap::ui::render(session.state(), cols)?;
        }
    }

    tracing::debug!("host exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("aemap: {e}");
            ExitCode::FAILURE
        }
    }
}
