use clap::Parser;
use lead_outreach::core::RowOutcome;
use lead_outreach::utils::logger::{self, LogFormat};
use lead_outreach::utils::validation::Validate;
use lead_outreach::{
    CliArgs, LeadError, LocalStorage, MessageTemplate, OutreachConfig, OutreachPipeline,
    SmtpMailer, SupabaseLeadStore, TokioPacer,
};

fn fail(e: &LeadError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_flag(args.json_logs), args.verbose);

    // 驗證配置，任何 I/O 之前
    if let Err(e) = args.validate() {
        fail(&e);
    }
    let config = match OutreachConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Outreach config: {:?}", config);

    let mailer = match SmtpMailer::connect(&config.mail).await {
        Ok(mailer) => mailer,
        Err(e) => fail(&e),
    };
    let store = SupabaseLeadStore::new(&config.store);
    let template = MessageTemplate::new(&config.public_app_url, &config.mail.sender_name);

    let pipeline = OutreachPipeline::new(
        LocalStorage::current_dir(),
        store,
        mailer,
        TokioPacer,
        template,
        config.delay,
    );

    let summary = match pipeline.run(&args.csv_path).await {
        Ok(summary) => summary,
        Err(e) => fail(&e),
    };

    for row in &summary.rows {
        match &row.outcome {
            RowOutcome::Sent => {}
            RowOutcome::Unrecorded(reason) => {
                eprintln!("⚠️  Sent to {} but not recorded: {}", row.email, reason)
            }
            RowOutcome::Failed(reason) => eprintln!("❌ Error sending to {}: {}", row.email, reason),
            RowOutcome::Skipped(reason) => eprintln!("⏭️  Skipped '{}': {}", row.email, reason),
        }
    }

    println!(
        "✅ Outreach finished: {} sent, {} unrecorded, {} failed, {} skipped ({} rows)",
        summary.sent,
        summary.unrecorded,
        summary.failed,
        summary.skipped,
        summary.total()
    );

    Ok(())
}
