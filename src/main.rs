use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alert_core::{DecisionPath, FlowController};
use alert_domain::Script;
use alertflow_rust::render::Style;
use alertflow_rust::{inspect, AppConfig, AppError, Session, SessionClock, SessionReport};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_TEXT: &str = "Operación consistente con el perfil y el historial del cliente.";

#[derive(Parser, Debug)]
#[command(name = "alertflow", version, about = "Investigación guiada de la alerta 2025-452")]
struct Cli {
    /// Desactiva los colores ANSI
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sesión interactiva (por defecto)
    Run {
        /// Vuelca el log de eventos (JSON por línea) al salir
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Muestra el grafo, el orden de presentación y el hash
    Inspect {
        #[arg(long)]
        json: bool,
    },
    /// Recorrido guionado no interactivo
    Replay {
        #[arg(long, value_enum)]
        path: PathArg,
        /// Texto para los pasos que piden entrada
        #[arg(long, default_value = DEFAULT_TEXT)]
        text: String,
        /// Sin esperas reales
        #[arg(long)]
        fast: bool,
        #[arg(long)]
        session: Option<Uuid>,
        #[arg(long)]
        events: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PathArg {
    Verdadero,
    Falso,
}

impl From<PathArg> for DecisionPath {
    fn from(value: PathArg) -> Self {
        match value {
            PathArg::Verdadero => DecisionPath::TruePositive,
            PathArg::Falso => DecisionPath::FalsePositive,
        }
    }
}

fn init_logging(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter).map_err(|e| AppError::Logging(e.to_string()))?;
    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                                  .try_init()
                                  .map_err(|e| AppError::Logging(e.to_string()))
}

fn dump_events(path: &Path, report: &SessionReport) -> Result<(), AppError> {
    let mut out = BufWriter::new(File::create(path)?);
    for event in &report.events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    out.flush()?;
    log::info!("{} event(s) written to {}", report.events.len(), path.display());
    Ok(())
}

async fn execute(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let style = Style::new(config.color && !cli.no_color);
    let script = Script::investigation()?;
    let graph = Arc::clone(script.graph());

    match cli.command.unwrap_or(Command::Run { events: None }) {
        Command::Inspect { json } => {
            let text = if json { inspect::to_json(&script)? } else { inspect::summary(&script) };
            println!("{text}");
        }
        Command::Run { events } => {
            let controller = FlowController::builder(graph).timing(config.timing)
                                                           .start(std::time::Duration::ZERO);
            let mut session = Session::new(script, controller, SessionClock::runtime(), io::stdout(), style);
            let lines = BufReader::new(tokio::io::stdin()).lines();
            let report = session.run(lines).await?;
            log::info!("session closed at step {} (finished: {})", report.last_step, report.finished);
            if let Some(path) = events {
                dump_events(&path, &report)?;
            }
        }
        Command::Replay { path, text, fast, session, events } => {
            let mut builder = FlowController::builder(graph).timing(config.timing);
            if let Some(id) = session {
                builder = builder.session_id(id);
            }
            let controller = builder.start(std::time::Duration::ZERO);
            let clock = if fast { SessionClock::fast() } else { SessionClock::runtime() };
            let mut session = Session::new(script, controller, clock, io::stdout(), style);
            let report = session.replay(path.into(), &text).await?;
            if !report.finished {
                log::warn!("scripted walk stopped at step {}", report.last_step);
            }
            if let Some(path) = events {
                dump_events(&path, &report)?;
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = init_logging(&config.log_filter) {
        eprintln!("{e}");
    }
    if let Err(e) = execute(cli, config).await {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
