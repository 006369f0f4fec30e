//! AIoT Dashboard CLI
//!
//! Terminal front end for the sensor dashboard:
//! - Watch live charts
//! - Print readings and the humidity forecast
//! - Send LED commands
//! - Submit readings and check the backend

use aiot_dashboard::api::NewReading;
use aiot_dashboard::config::{generate_default_config, Config, LoggingConfig};
use aiot_dashboard::dashboard::Dashboard;
use aiot_dashboard::refresh::RefreshTimer;
use aiot_dashboard::render::render_dashboard;
use aiot_dashboard::{Reading, SensorApi, SensorApiClient};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aiot-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live temperature/humidity dashboard for an AIoT sensor backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sensor API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show live charts, refreshed on the configured interval (default)
    Watch {
        /// Also refresh the humidity forecast every cycle
        #[arg(long)]
        with_prediction: bool,
    },

    /// Print the current readings, oldest first
    Readings,

    /// Print the humidity forecast
    Predict,

    /// Switch an LED channel
    Led {
        /// Channel name (e.g. led1)
        channel: String,
        /// New state
        #[arg(value_enum)]
        state: LedState,
    },

    /// Submit a reading, as a sensor node would
    Push {
        /// Temperature in °C
        #[arg(long)]
        temperature: f64,
        /// Relative humidity in %
        #[arg(long)]
        humidity: f64,
    },

    /// Check that the backend is up
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedState {
    On,
    Off,
}

impl From<LedState> for bool {
    fn from(state: LedState) -> bool {
        state == LedState::On
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, report) = Config::discover(cli.config.as_deref()).with_context(|| {
        format!("loading config from {}", display_path(cli.config.as_deref()))
    })?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    report.log();

    match cli.command.unwrap_or(Commands::Watch {
        with_prediction: false,
    }) {
        Commands::Watch { with_prediction } => watch(&config, with_prediction).await,
        Commands::Readings => print_readings(&config, cli.format).await,
        Commands::Predict => predict(&config, cli.format).await,
        Commands::Led { channel, state } => led(&config, &channel, state.into()).await,
        Commands::Push {
            temperature,
            humidity,
        } => {
            let client = client(&config)?;
            let ack = client
                .submit_reading(NewReading::new(temperature, humidity))
                .await?;
            if ack.is_ok() {
                println!("Lectura enviada: {:.1} °C, {:.1} %", temperature, humidity);
                Ok(())
            } else {
                anyhow::bail!("backend answered status {:?}", ack.status)
            }
        }
        Commands::Status => {
            let client = client(&config)?;
            match client.health_check().await {
                Ok(banner) => {
                    println!("{} OK: {}", config.api.base_url, banner.trim());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{} unreachable: {}", config.api.base_url, e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

/// Initialize tracing; logs go to stderr so stdout stays clean for output
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("aiot_dashboard={}", config.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

fn client(config: &Config) -> anyhow::Result<SensorApiClient> {
    SensorApiClient::new(config.client_config()).context("building HTTP client")
}

async fn watch(config: &Config, with_prediction: bool) -> anyhow::Result<()> {
    tracing::info!(
        "AIoT Dashboard v{} watching {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let dashboard = Arc::new(RwLock::new(Dashboard::new(
        client(config)?,
        config.dashboard_options(),
    )));
    let timer = Arc::new(RefreshTimer::new(
        Arc::clone(&dashboard),
        config.refresh.interval(),
    ));
    let mut reports = timer.subscribe();
    let handle = Arc::clone(&timer).start();

    loop {
        tokio::select! {
            report = reports.recv() => match report {
                Ok(report) => {
                    if with_prediction {
                        let api = dashboard.read().await.api();
                        let fetched = api.fetch_prediction().await;
                        // failure is logged and leaves the previous value on screen
                        let _ = dashboard.write().await.apply_prediction(fetched);
                    }

                    let guard = dashboard.read().await;
                    // clear screen, cursor home
                    print!("\x1B[2J\x1B[H");
                    println!("AIoT Dashboard  {}  (ciclo {})\n", config.api.base_url, report.cycle);
                    print!(
                        "{}",
                        render_dashboard(
                            guard.charts(),
                            guard.status(),
                            guard.prediction(),
                            config.display.timezone,
                            config.display.chart_width,
                        )
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "renderer fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    timer.stop();
    handle.abort();
    Ok(())
}

async fn print_readings(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let client = client(config)?;
    let readings = client.fetch_readings().await?;
    let readings = config.api.order.arrange(&readings);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&readings)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for reading in &readings {
                writer.serialize(reading)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => print_table(&readings, config),
    }

    Ok(())
}

fn print_table(readings: &[Reading], config: &Config) {
    if readings.is_empty() {
        println!("No readings");
        return;
    }

    println!("{:<10} {:>12} {:>10}", "HORA", "TEMP (°C)", "HUM (%)");
    println!("{}", "-".repeat(34));
    for reading in readings {
        println!(
            "{:<10} {:>12.1} {:>10.1}",
            reading.label(config.display.timezone),
            reading.temperature,
            reading.humidity
        );
    }
    println!("\n{} readings", readings.len());
}

async fn predict(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client(config)?, config.dashboard_options());
    let text = dashboard.request_prediction().await?;

    match (format, dashboard.prediction()) {
        (OutputFormat::Json, Some(prediction)) => println!(
            "{}",
            serde_json::json!({ "predicted_humidity_10_steps": prediction.humidity })
        ),
        _ => println!("{}", text),
    }
    Ok(())
}

async fn led(config: &Config, channel: &str, state: bool) -> anyhow::Result<()> {
    if !config.display.led_channels.iter().any(|c| c == channel) {
        tracing::warn!(
            channel,
            known = ?config.display.led_channels,
            "channel not in configured led_channels, sending anyway"
        );
    }

    let dashboard = Dashboard::new(client(config)?, config.dashboard_options());
    let feedback = dashboard.toggle_led(channel, state).await;

    if feedback.success {
        println!("{}", feedback.message);
        Ok(())
    } else {
        eprintln!("{}", feedback.message);
        std::process::exit(1);
    }
}
