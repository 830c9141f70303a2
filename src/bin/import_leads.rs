use clap::Parser;
use lead_outreach::core::ImportReport;
use lead_outreach::utils::logger::{self, LogFormat};
use lead_outreach::utils::validation::Validate;
use lead_outreach::{
    CliArgs, ImportEngine, ImportPipeline, LeadError, LocalStorage, StoreConfig, SupabaseLeadStore,
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
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Store config: {:?}", config);

    let store = SupabaseLeadStore::new(&config);
    let pipeline = ImportPipeline::new(LocalStorage::current_dir(), store, args.csv_path.clone());
    let engine = ImportEngine::new(pipeline);

    match engine.run().await {
        Ok(ImportReport::NothingToInsert) => {
            println!("No rows to insert");
        }
        Ok(ImportReport::Inserted(count)) => {
            tracing::info!("✅ Inserted {} leads from {}", count, args.csv_path);
            println!("✅ Inserted {} leads from {}", count, args.csv_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}
