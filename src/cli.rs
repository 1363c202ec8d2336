//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::jsonl_sink_adapter::JsonlSinkAdapter;
use crate::adapters::synthetic_adapter::{SeriesShape, SyntheticAdapter};
use crate::domain::backtest::{walk_forward, DEFAULT_WINDOW};
use crate::domain::composite::CompositeEngine;
use crate::domain::error::SigtraderError;
use crate::domain::execution::{ExecutionRouter, RiskSettings};
use crate::domain::features::extract_features;
use crate::domain::indicator::latest_atr;
use crate::domain::timeframe::aggregate;
use crate::ports::candle_port::CandlePort;
use crate::ports::config_port::ConfigPort;
use crate::ports::sink_port::SinkPort;

const ATR_PERIOD: usize = 14;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Composite trading signal engine and backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ShapeArg {
    Trend,
    Oscillating,
    Stepped,
}

impl From<ShapeArg> for SeriesShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Trend => SeriesShape::Trend,
            ShapeArg::Oscillating => SeriesShape::Oscillating,
            ShapeArg::Stepped => SeriesShape::Stepped,
        }
    }
}

impl std::fmt::Display for ShapeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShapeArg::Trend => "trend",
            ShapeArg::Oscillating => "oscillating",
            ShapeArg::Stepped => "stepped",
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a composite signal for a symbol
    Signal {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Target timeframe in minutes; 1-minute candles are aggregated up
        #[arg(long, default_value_t = 1)]
        timeframe: u32,
        /// 1-minute candles to fetch
        #[arg(long, default_value_t = 120)]
        points: usize,
        /// Directory of CSV candle files; synthetic data when omitted
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ShapeArg::Oscillating)]
        shape: ShapeArg,
        /// Route an execution command against this account balance
        #[arg(long)]
        balance: Option<f64>,
        /// Directory for JSON-lines persistence of computed records
        #[arg(long)]
        sink: Option<PathBuf>,
    },
    /// Replay a walk-forward backtest for a symbol
    Backtest {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
        #[arg(long, default_value_t = 720)]
        points: usize,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ShapeArg::Stepped)]
        shape: ShapeArg,
        #[arg(long)]
        sink: Option<PathBuf>,
    },
    /// Start the web server
    #[cfg(feature = "web")]
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Signal {
            symbol,
            config,
            timeframe,
            points,
            data,
            shape,
            balance,
            sink,
        } => run_signal(
            &symbol,
            config.as_ref(),
            timeframe,
            points,
            data,
            shape.into(),
            balance,
            sink,
        ),
        Command::Backtest {
            symbol,
            config,
            window,
            points,
            data,
            shape,
            sink,
        } => run_backtest(
            &symbol,
            config.as_ref(),
            window,
            points,
            data,
            shape.into(),
            sink,
        ),
        #[cfg(feature = "web")]
        Command::Serve { config, addr } => run_serve(config.as_ref(), &addr),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Risk parameters from the `[risk]` config section, with documented
/// defaults for absent keys. The supplier owns validation.
pub fn build_risk_settings(config: &dyn ConfigPort) -> RiskSettings {
    let defaults = RiskSettings::default();
    RiskSettings {
        max_position_pct: config.get_double("risk", "max_position_pct", defaults.max_position_pct),
        max_drawdown_pct: config.get_double("risk", "max_drawdown_pct", defaults.max_drawdown_pct),
        stop_multiplier: config.get_double("risk", "stop_multiplier", defaults.stop_multiplier),
        take_profit_multiplier: config.get_double(
            "risk",
            "take_profit_multiplier",
            defaults.take_profit_multiplier,
        ),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, SigtraderError> {
    match path {
        Some(path) => FileConfigAdapter::from_file(path)
            .map(Some)
            .map_err(|e| SigtraderError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// CLI `--data` wins over the config's `[data] path`; synthetic candles when
/// neither names a CSV directory.
fn resolve_data_path(
    cli_data: Option<PathBuf>,
    config: Option<&FileConfigAdapter>,
) -> Option<PathBuf> {
    cli_data.or_else(|| {
        config
            .and_then(|c| c.get_string("data", "path"))
            .map(PathBuf::from)
    })
}

fn build_candle_port(data: Option<PathBuf>, shape: SeriesShape) -> Box<dyn CandlePort> {
    match data {
        Some(base_path) => Box::new(CsvAdapter::new(base_path)),
        None => Box::new(SyntheticAdapter::new(shape)),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_signal(
    symbol: &str,
    config_path: Option<&PathBuf>,
    timeframe: u32,
    points: usize,
    data: Option<PathBuf>,
    shape: SeriesShape,
    balance: Option<f64>,
    sink_path: Option<PathBuf>,
) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    let settings = config
        .as_ref()
        .map(|c| build_risk_settings(c))
        .unwrap_or_default();

    let port = build_candle_port(resolve_data_path(data, config.as_ref()), shape);
    eprintln!("Fetching {points} candles for {symbol}");
    let mut candles = port.fetch_candles(symbol, 1, points)?;
    if timeframe > 1 {
        candles = aggregate(&candles, timeframe);
        eprintln!("Aggregated to {} candles at {timeframe}m", candles.len());
    }
    if candles.is_empty() {
        return Err(SigtraderError::NoData {
            symbol: symbol.to_string(),
            timeframe_min: timeframe,
        });
    }

    let features = extract_features(symbol, timeframe, &candles);
    let signal = CompositeEngine::new().compute(&features);
    println!("{}", serde_json::to_string_pretty(&signal)?);

    let sink = sink_path.map(JsonlSinkAdapter::new);
    if let Some(sink) = &sink {
        sink.record_signal(&signal)?;
    }

    if let Some(balance) = balance {
        let price = candles.last().map(|c| c.close).unwrap_or(0.0);
        match latest_atr(&candles, ATR_PERIOD) {
            Some(atr) => {
                let router = ExecutionRouter::new(settings);
                match router.route(&signal, balance, price, atr) {
                    Some(command) => {
                        println!("{}", serde_json::to_string_pretty(&command)?);
                        if let Some(sink) = &sink {
                            sink.record_execution(&command)?;
                        }
                    }
                    None => eprintln!(
                        "no execution: composite {:.2} inside neutral zone",
                        signal.composite
                    ),
                }
            }
            None => eprintln!("no execution: need {ATR_PERIOD} candles for atr"),
        }
    }
    Ok(())
}

fn run_backtest(
    symbol: &str,
    config_path: Option<&PathBuf>,
    window: usize,
    points: usize,
    data: Option<PathBuf>,
    shape: SeriesShape,
    sink_path: Option<PathBuf>,
) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;

    let port = build_candle_port(resolve_data_path(data, config.as_ref()), shape);
    eprintln!("Fetching {points} candles for {symbol}");
    let candles = port.fetch_candles(symbol, 1, points)?;
    if candles.len() <= window {
        return Err(SigtraderError::InsufficientData {
            symbol: symbol.to_string(),
            bars: candles.len(),
            minimum: window + 1,
        });
    }

    eprintln!(
        "Replaying {} steps with a {window}-bar window",
        candles.len() - window
    );
    let result = walk_forward(symbol, &candles, window);
    eprintln!(
        "trades={} win_rate={:.2} sharpe={:.3} max_drawdown={:.2}",
        result.trades, result.win_rate, result.sharpe, result.max_drawdown
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(sink_path) = sink_path {
        let line = serde_json::to_string(&result)?;
        std::fs::create_dir_all(&sink_path)?;
        std::fs::write(sink_path.join("backtest.json"), line)?;
    }
    Ok(())
}

#[cfg(feature = "web")]
fn run_serve(config_path: Option<&PathBuf>, addr: &str) -> Result<(), SigtraderError> {
    use crate::adapters::web::{build_router, AppState};
    use std::sync::Arc;

    let config = load_config(config_path)?;
    let data_path = resolve_data_path(None, config.as_ref());
    let window = config
        .as_ref()
        .map(|c| c.get_int("signal", "window", DEFAULT_WINDOW as i64) as usize)
        .unwrap_or(DEFAULT_WINDOW);

    let candles: Arc<dyn CandlePort + Send + Sync> = match data_path {
        Some(path) => Arc::new(CsvAdapter::new(path)),
        None => Arc::new(SyntheticAdapter::new(SeriesShape::Stepped)),
    };
    let state = AppState {
        candles,
        signal_points: 120,
        backtest_points: 720,
        window,
    };

    eprintln!("Listening on {addr}");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, build_router(state)).await?;
        Ok::<(), std::io::Error>(())
    })?;
    Ok(())
}
