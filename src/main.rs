use anyhow::Context;
use clap::Parser;
use customer_import::domain::ports::{ConfigProvider, CustomerRepository, RootResolver};
use customer_import::utils::error::{EXIT_SAVE_FAILED, EXIT_SUCCESS};
use customer_import::utils::{logger, report, validation::Validate};
use customer_import::{
    CliConfig, Command, DryRunRepository, HttpCustomerRepository, ImportCommand, ImportConfig,
    ImportError, LocalRoot,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting customer-import CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<ImportError>() {
            Some(import_error) => {
                // 記錄詳細錯誤信息
                tracing::error!(
                    "❌ Import failed: {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    import_error.category(),
                    import_error.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", import_error.recovery_suggestion());

                // 輸出用戶友好的錯誤信息
                eprintln!("❌ {}", import_error.user_friendly_message());
                eprintln!("💡 {}", import_error.recovery_suggestion());
                import_error.exit_code()
            }
            None => {
                tracing::error!("❌ Import failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        },
    };

    std::process::exit(exit_code);
}

async fn run(cli: &CliConfig) -> anyhow::Result<i32> {
    let config = cli.load_import_config()?;

    // 驗證配置
    config.validate()?;

    let root = match config.root_dir() {
        Some(dir) => LocalRoot::new(dir),
        None => LocalRoot::current_dir()
            .map_err(ImportError::from)
            .context("cannot determine the current directory")?,
    };

    let Command::CustomerImport { profile, source } = &cli.command;

    // 先確認來源檔案存在，再檢查 repository 設定
    root.resolve_source(source)?;

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - customers will not be saved");
        import(cli, &config, root, DryRunRepository, profile, source).await
    } else {
        let repository = HttpCustomerRepository::from_config(&config.repository)?;
        tracing::info!("Saving customers to {}", repository.endpoint());
        import(cli, &config, root, repository, profile, source).await
    }
}

async fn import<R: CustomerRepository>(
    cli: &CliConfig,
    config: &ImportConfig,
    root: LocalRoot,
    repository: R,
    profile: &str,
    source: &str,
) -> anyhow::Result<i32> {
    let command = ImportCommand::from_config(config, root, repository);
    let summary = command.execute(profile, source).await?;

    println!("Imported customers using profile: {} from source: {}", profile, source);
    println!(
        "Created: {}, skipped: {}, failed: {}",
        summary.created, summary.skipped, summary.failed
    );

    if let Some(path) = &cli.report {
        report::write_report(path, &summary)
            .with_context(|| format!("cannot write import report to {}", path.display()))?;
    }

    if summary.has_failures() {
        eprintln!("❌ {} customers could not be saved", summary.failed);
        return Ok(EXIT_SAVE_FAILED);
    }

    Ok(EXIT_SUCCESS)
}
