use crate::errors::AppResult;
use flexi_logger::{Logger, default_format};

/// Start the stderr logger. `RUST_LOG` wins over the configured level.
/// stdout stays reserved for command output.
pub fn init(level: &str) -> AppResult<()> {
    Logger::try_with_env_or_str(level)?
        .format(default_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
