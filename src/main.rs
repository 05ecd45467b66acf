use cart_sync::utils::error::{CartError, ErrorSeverity};
use cart_sync::utils::logger::{self, LogFormat};
use cart_sync::utils::validation::Validate;
use cart_sync::{CartSession, CatalogConfig, CliConfig, Gesture, LogDisplay, TotalDisplay};
use clap::Parser;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_flag(config.log_json), config.verbose);

    tracing::info!("Starting cart-sync");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        report(&e);
        std::process::exit(exit_code(e.severity()));
    }
}

fn run(config: &CliConfig) -> Result<(), CartError> {
    tracing::info!("📁 Loading catalog from: {}", config.catalog);
    let catalog = CatalogConfig::from_file(&config.catalog)?;
    catalog.validate()?;
    tracing::info!("✅ Catalog '{}' loaded", catalog.session_name());

    let (mut session, scan) = CartSession::from_source(&catalog);
    for rejected in &scan.rejected {
        eprintln!("⚠️ {}", rejected.user_friendly_message());
    }

    session.subscribe(TotalDisplay::new(std::io::stdout()));
    session.subscribe(LogDisplay::new());

    if catalog.preload() && !config.no_preload {
        session.preload();
    }

    let mut failed = 0usize;
    for raw in &config.actions {
        let outcome = raw
            .parse::<Gesture>()
            .and_then(|gesture| session.apply(&gesture));
        match outcome {
            Ok(true) => {}
            Ok(false) => tracing::info!("Action '{}' had no effect", raw),
            Err(e) => {
                failed += 1;
                report(&e);
            }
        }
    }

    let snapshot = session.cart().snapshot();
    if config.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for line in &snapshot.items {
            println!(
                "{:<12} {:<24} {:>4} x {:>8} = {:>9}",
                line.id, line.name, line.quantity, line.unit_price, line.line_total
            );
        }
        println!("{} items, total {}", snapshot.item_count, snapshot.total);
    }

    if failed > 0 {
        return Err(CartError::InvalidGesture {
            input: format!("{} of {} actions", failed, config.actions.len()),
            reason: "some actions could not be applied".to_string(),
        });
    }
    Ok(())
}

fn report(e: &CartError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
