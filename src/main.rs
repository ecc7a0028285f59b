use clap::Parser;
use chrono::NaiveDate;
use greens_grid::core::{ConfigProvider, EffortLookup};
use greens_grid::utils::error::ErrorSeverity;
use greens_grid::utils::{logger, validation::Validate};
use greens_grid::{
    CliConfig, CsvEffortLog, DateCollector, GreensSummary, GreensTracker, Result, SegmentId,
    StravaClient, TomlConfig,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (若有指定)
    let toml = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || toml.as_ref().is_some_and(|t| t.verbose_logging());
    if cli.json_logs || toml.as_ref().is_some_and(|t| t.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting greens");

    let provider: &dyn ConfigProvider = match &toml {
        Some(config) => config,
        None => &cli,
    };

    // 驗證配置
    let validated = match &toml {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validated {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match run(provider, today).await {
        Ok(summary) => print_summary(&summary, cli.json)?,
        Err(e) => {
            tracing::error!(
                "❌ Greens run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(provider: &dyn ConfigProvider, today: NaiveDate) -> Result<GreensSummary> {
    let segments: Vec<SegmentId> = provider
        .segments()
        .iter()
        .map(|id| SegmentId::from(id.as_str()))
        .collect();

    if let Some(path) = provider.effort_log() {
        tracing::info!("📁 Reading efforts from {}", path);
        let lookup = CsvEffortLog::open(path)?;
        return track(lookup, provider, segments, today).await;
    }

    // Validation guarantees a token in API mode.
    let token = provider.access_token().unwrap_or_default();
    let lookup = StravaClient::new(provider.api_base(), token)
        .with_page_size(provider.page_size())
        .with_timeout(Duration::from_secs(provider.timeout_seconds()))?;
    track(lookup, provider, segments, today).await
}

async fn track<L: EffortLookup + 'static>(
    lookup: L,
    provider: &dyn ConfigProvider,
    segments: Vec<SegmentId>,
    today: NaiveDate,
) -> Result<GreensSummary> {
    let collector = DateCollector::new(lookup, provider.concurrent_requests());
    GreensTracker::new(collector, segments).run(today).await
}

fn print_summary(summary: &GreensSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("🟩 Greens logged: {}", summary.total_efforts);
    println!("📅 Grid days covered: {}/366", summary.covered_days);
    match summary.verdict.next_required_date() {
        None => println!("✅ Grid complete!"),
        Some(_) => println!("➡️  Next green day: {}", summary.verdict),
    }
    Ok(())
}
