use anyhow::Context;
use clap::Parser;
use serde_json::json;
use sla_hours::domain::model::{parse_instant, DeadlineRequest};
use sla_hours::utils::error::{ErrorSeverity, SlaError};
use sla_hours::utils::{logger, validation::Validate};
use sla_hours::{CliConfig, EnvConfig, SlaConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sla-hours");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match &cli.config {
        Some(path) => SlaConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => SlaConfig::default(),
    };
    EnvConfig::from_env()?.apply_to(&mut config);
    cli.apply_to(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    if let Err(e) = run(&cli, &config).await {
        exit_with(e);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &SlaConfig) -> sla_hours::Result<()> {
    let service = config.build_service()?;
    let tz = service.timezone();

    // 時鐘只在程式邊界讀取
    let start = match &cli.start {
        Some(raw) => parse_instant(raw, &tz)?,
        None => chrono::Utc::now().with_timezone(&tz),
    };

    let request = DeadlineRequest {
        id: "cli".to_string(),
        start: start.fixed_offset(),
        hours: cli.hours,
    };
    let response = service.calculate(&request).await?;

    let status = match &cli.status_at {
        Some(raw) => {
            let now = parse_instant(raw, &tz)?.fixed_offset();
            Some(service.status(&response.deadline, &now).await?)
        }
        None => None,
    };

    let deadline_local = response.deadline.with_timezone(&tz);
    if cli.json {
        let output = json!({
            "start": response.start.to_rfc3339(),
            "hours": response.hours,
            "deadline": deadline_local.to_rfc3339(),
            "timezone": tz.name(),
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("📅 Deadline: {}", deadline_local.format("%A %Y-%m-%d %H:%M %Z"));
        println!("   ({} business hours from {})", response.hours, response.start.to_rfc3339());
        if let Some(status) = status {
            println!(
                "⏱️ Status: {:?}, {:.2} business hours remaining",
                status.state, status.remaining_hours
            );
        }
    }

    Ok(())
}

fn exit_with(e: SlaError) -> ! {
    tracing::error!(
        "❌ Deadline calculation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
