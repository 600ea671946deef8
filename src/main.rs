use clap::Parser;
use rageval::config::{CliOverrides, HandlerKind, HarnessConfig};
use rageval::evals::{Evaluator, ReportWriter};
use rageval::handler::{HttpQaHandler, QaHandler};
use rageval::mock::MockRagServer;
use rageval::suite::EvalSuite;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rageval")]
#[command(about = "Hallucination and context-retrieval evaluator for RAG QA handlers")]
struct Args {
    /// Suite file (TOML or JSON). Defaults to the built-in HighLevel suite
    #[arg(short, long)]
    suite: Option<PathBuf>,

    /// Harness config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// QA handler to evaluate
    #[arg(long, value_enum)]
    handler: Option<HandlerKind>,

    /// Base URL of the chat service (http handler)
    #[arg(long)]
    base_url: Option<String>,

    /// Also write a JSON report into this directory
    #[arg(short, long)]
    report_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            info!("Loading harness config from {:?}", path);
            HarnessConfig::load(path)?
        }
        None => HarnessConfig::default(),
    };
    let config = config.with_overrides(CliOverrides {
        handler: args.handler,
        base_url: args.base_url,
        report_dir: args.report_dir,
    });

    let suite = match &args.suite {
        Some(path) => {
            info!("Loading suite from {:?}", path);
            EvalSuite::load(path)?
        }
        None => EvalSuite::builtin(),
    };

    let handler: Box<dyn QaHandler> = match config.handler {
        HandlerKind::Mock => {
            info!("Using in-memory mock RAG server");
            Box::new(MockRagServer::default())
        }
        HandlerKind::Http => {
            let http = HttpQaHandler::new(&config.http)?;
            info!("Using HTTP handler at {}", http.url());
            Box::new(http)
        }
    };

    let evaluator = Evaluator::new(suite).with_latency_thresholds(config.latency.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = evaluator.run(handler.as_ref(), &mut out)?;

    if let Some(dir) = &config.report_dir {
        let path = ReportWriter::new(dir).save_report(&summary)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}
