use log::LevelFilter;
use std::env;

/// Test logger writing file and line, `Warn` unless `RUST_LOG` says otherwise.
pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}
