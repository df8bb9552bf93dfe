use clap::Parser;
use sla_hours::adapters::csv_batch;
use sla_hours::utils::error::ErrorSeverity;
use sla_hours::utils::validation::{self, Validate};
use sla_hours::utils::logger;
use sla_hours::{EnvConfig, SlaConfig};

#[derive(Parser)]
#[command(name = "sla-batch")]
#[command(about = "Compute deadlines for a CSV of requests (id,start,hours)")]
struct Args {
    /// Path to TOML calendar configuration file
    #[arg(short, long, default_value = "sla-config.toml")]
    config: String,

    /// Input CSV with id,start,hours columns
    #[arg(short, long)]
    input: String,

    /// Output CSV; written to stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Dry run - validate config and input without computing deadlines
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting sla-batch");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match SlaConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    EnvConfig::from_env()?.apply_to(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    match process(&args, &config).await {
        Ok(count) => {
            tracing::info!("✅ Processed {} requests", count);
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn process(args: &Args, config: &SlaConfig) -> sla_hours::Result<usize> {
    validation::validate_path("input", &args.input)?;
    if let Some(output) = &args.output {
        validation::validate_path("output", output)?;
    }

    let requests = csv_batch::read_requests_from_path(&args.input)?;
    tracing::info!("📥 Read {} requests from {}", requests.len(), args.input);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No deadlines will be computed");
        for request in &requests {
            println!(
                "{}: start {} ({} hours)",
                request.id,
                request.start.to_rfc3339(),
                request
                    .hours
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| format!("default {}", config.default_hours()))
            );
        }
        return Ok(requests.len());
    }

    let service = config.build_service()?;
    let responses = service.calculate_batch(&requests).await?;

    match &args.output {
        Some(path) => {
            csv_batch::write_responses_to_path(path, &responses)?;
            tracing::info!("📁 Output saved to: {}", path);
        }
        None => csv_batch::write_responses(std::io::stdout().lock(), &responses)?,
    }

    Ok(responses.len())
}

fn display_config_summary(config: &SlaConfig) {
    let window = config
        .working_hours()
        .map(|w| format!("{:02}:00-{:02}:00", w.start_hour, w.end_hour))
        .unwrap_or_else(|_| "invalid".to_string());

    tracing::info!("📋 Working window: {} ({})", window, config.timezone_name());
    tracing::info!(
        "📋 Holidays: {} fixed, {} recurring",
        config.holidays.dates.len(),
        config.holidays.recurring.len()
    );
    if let Some(url) = config.holidays_url() {
        tracing::info!("📋 Holiday source: {}", url);
    }
    tracing::info!("📋 Default duration: {} business hours", config.default_hours());
}
