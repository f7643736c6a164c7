use anyhow::{Context as _, Result};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle, WriteMode};
use log::error;

use crate::commander::store::data_dir;

const LOG_SPEC: &str = "warn,slackcommander=debug,slackargs=debug,slackcommander_model=debug";

/// Starts logging to a file in the data directory, duplicated to stderr.
///
/// The returned handle must be kept alive for buffered records to be written out.
pub fn init() -> Result<LoggerHandle> {
    let log_dir = data_dir()?.join("logs");
    let logger = Logger::try_with_str(LOG_SPEC)
        .context("Invalid log spec")?
        .log_to_file(FileSpec::default().directory(log_dir))
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Debug)
        .start()
        .context("Cannot start logger")?;

    let orig_hook = std::panic::take_hook();
    let logger_for_panic = logger.clone();
    std::panic::set_hook(Box::new(move |panic_info| {
        // No exit, handler panics are recovered by the dispatcher
        error!("Panic: {panic_info}");
        logger_for_panic.flush();
        orig_hook(panic_info);
    }));
    Ok(logger)
}
