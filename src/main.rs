use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use planr::agent::CampaignAgent;
use planr::config::Config;
use planr::domain::{Brief, Campaign};
use planr::kb::KnowledgeBase;
use planr::llm::{LlmClient, MockLlmClient, OpenAiClient, OpenAiConfig};
use planr::scoring::CreativeScorer;
use planr::validation::{ConsistencyChecker, TextMatcher};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("planr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("planr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Generate {
            brief,
            kb,
            mock,
            output,
        } => handle_generate(brief, kb.as_ref(), *mock, output.as_ref(), config).await,
        Commands::Check { brief, campaign } => handle_check(brief, campaign),
        Commands::Score {
            campaign,
            product,
            kb,
        } => handle_score(campaign, product, kb.as_ref(), config),
    }
}

fn load_kb(flag: Option<&PathBuf>, config: &Config) -> Result<Arc<KnowledgeBase>> {
    let path = flag.cloned().or_else(|| config.kb_path.clone());
    match path {
        Some(path) => {
            let kb = KnowledgeBase::load(&path)
                .context(format!("Failed to load knowledge base from {}", path.display()))?;
            info!("Loaded knowledge base from {}", path.display());
            Ok(Arc::new(kb))
        }
        None => {
            info!("No knowledge base configured, feature scoring degrades to length heuristics");
            Ok(Arc::new(KnowledgeBase::empty()))
        }
    }
}

async fn handle_generate(
    brief_path: &PathBuf,
    kb: Option<&PathBuf>,
    mock: bool,
    output: Option<&PathBuf>,
    config: &Config,
) -> Result<()> {
    let brief = Brief::from_file(brief_path)
        .context(format!("Failed to load brief from {}", brief_path.display()))?;
    let kb = load_kb(kb, config)?;

    let client: Arc<dyn LlmClient> = if mock {
        println!("{}", "Using mock generator".yellow());
        Arc::new(MockLlmClient::new())
    } else {
        let llm_config = OpenAiConfig {
            model: config.llm.model.clone(),
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
            timeout: std::time::Duration::from_millis(config.llm.timeout_ms),
        };
        Arc::new(OpenAiClient::new(llm_config).context("Failed to create LLM client")?)
    };

    let agent = CampaignAgent::new(client, kb, config);
    let report = agent
        .process_brief(&brief)
        .await
        .context(format!("Failed to process brief {}", brief.campaign_id))?;

    let creative_count = report.campaign.creatives().count();
    let flag_count = report.metrics.hallucination_flags.len();
    println!(
        "{} {} ({} creatives scored, {} hallucination flags)",
        "Generated:".green(),
        report.campaign.campaign_id,
        creative_count,
        flag_count
    );

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            fs::write(path, json).context(format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Report written to:".green(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_check(brief_path: &PathBuf, campaign_path: &PathBuf) -> Result<()> {
    let brief = Brief::from_file(brief_path)
        .context(format!("Failed to load brief from {}", brief_path.display()))?;
    let campaign = Campaign::from_file(campaign_path).context(format!(
        "Failed to load campaign from {}",
        campaign_path.display()
    ))?;

    let result = ConsistencyChecker::new().check(&campaign, &brief);
    if result.ok {
        println!("{} {}", "Consistent:".green(), campaign.campaign_id);
        Ok(())
    } else {
        for violation in &result.violations {
            println!("{} {}", "Violation:".red(), violation);
        }
        eyre::bail!("{} consistency violation(s) found", result.violations.len());
    }
}

fn handle_score(
    campaign_path: &PathBuf,
    product: &str,
    kb: Option<&PathBuf>,
    config: &Config,
) -> Result<()> {
    let campaign = Campaign::from_file(campaign_path).context(format!(
        "Failed to load campaign from {}",
        campaign_path.display()
    ))?;
    let kb = load_kb(kb, config)?;

    let scorer = CreativeScorer::new(kb, config.scoring, TextMatcher::new(config.matching));
    for ad_group in &campaign.ad_groups {
        println!("{} {}", "Ad group:".cyan(), ad_group.id);
        for creative in &ad_group.creatives {
            let score = scorer.score(creative, product);
            println!("  {} {:.3}  {}", "Score:".green(), score, creative.id);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging()?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load config")?;

    run_application(&cli, &config).await
}
