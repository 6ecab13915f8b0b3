mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use prep_core::{DashboardFilter, ResearchTarget, StatusFilter};
use prep_engine::{EngineHandle, ReqwestResearchClient};
use prep_logging::prep_info;

use app::{PageOutcome, ResearchPage};
use config::AppConfig;

#[derive(Parser)]
#[command(name = "prep_dashboard")]
#[command(about = "Interview preparation dashboard for the terminal")]
struct Cli {
    /// Path to a RON config file (defaults to ./prep_dashboard.ron when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the research service base url
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show company research for the next interview
    Research {
        /// Ask for a specific company instead of the next interview
        #[arg(short, long)]
        company: Option<String>,

        /// Do not offer a retry when loading fails
        #[arg(long)]
        no_prompt: bool,
    },

    /// List configured interviews
    Dashboard {
        /// Match against company or subject
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter by status (all, upcoming, completed)
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },

    /// Probe the research service health endpoint
    Health,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate()?;
    }
    logging::initialize(config.log_destination, config.level(), &config.log_file);
    prep_info!("using research service at {}", config.base_url);

    match cli.command {
        Commands::Research { company, no_prompt } => {
            let engine = start_engine(&config)?;
            let target = company.map_or(ResearchTarget::Latest, ResearchTarget::Company);
            let page = ResearchPage::new(
                engine,
                config.engine_settings().settle_timeout,
                io::stdout().lock(),
                io::stdin().lock(),
                config.prompt_retry && !no_prompt,
            );
            let (outcome, _) = page.run(target)?;
            Ok(match outcome {
                PageOutcome::Loaded => ExitCode::SUCCESS,
                PageOutcome::Failed => ExitCode::FAILURE,
            })
        }
        Commands::Dashboard { search, status } => {
            let filter = DashboardFilter::new(search, status);
            app::run_dashboard(&mut io::stdout().lock(), &config.interviews, &filter)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Health => {
            let engine = start_engine(&config)?;
            let wait = config.engine_settings().settle_timeout;
            let healthy = app::run_health(&engine, &mut io::stdout().lock(), wait)?;
            Ok(if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn start_engine(config: &AppConfig) -> anyhow::Result<EngineHandle> {
    let client = ReqwestResearchClient::new(config.client_settings())
        .with_context(|| format!("invalid research service url {:?}", config.base_url))?;
    EngineHandle::new(Arc::new(client), config.engine_settings())
        .context("failed to start fetch worker")
}
