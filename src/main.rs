use students_demo::{run_and_report, DemoConfig, PgConnector};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Однопоточный runtime: вся последовательность строго по шагам
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let config = DemoConfig::default();
    let connector = PgConnector::new(config.pg.clone());

    rt.block_on(async {
        let mut out = std::io::stdout();
        // ошибка демо обрабатывается внутри и не меняет код выхода
        run_and_report(&connector, &config, &mut out).await;
    });

    if log::log_enabled!(log::Level::Debug) {
        log::debug!("metrics:\n{}", students_demo::monitoring::gather_metrics());
    }
    Ok(())
}
