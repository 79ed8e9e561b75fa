use flexi_logger::{
    filter::{self, LogLineFilter},
    Age, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

use super::configuration::sections::LogConfiguration;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_RETENTION: usize = 31;

pub struct IgnoreReqwest;

impl LogLineFilter for IgnoreReqwest {
    fn write(
        &self,
        now: &mut flexi_logger::DeferredNow,
        record: &log::Record,
        log_line_writer: &dyn filter::LogLineWriter,
    ) -> std::io::Result<()> {
        let path = record.module_path().unwrap_or_default();

        if is_http_internal(path) {
            return Ok(());
        }

        log_line_writer.write(now, record)
    }
}

fn is_http_internal(module_path: &str) -> bool {
    ["reqwest", "hyper", "hyper_util", "h2", "rustls"]
        .iter()
        .any(|prefix| module_path == *prefix || module_path.starts_with(&format!("{prefix}::")))
}

/// Starts the logger. Files rotate daily in the configured directory, one
/// per day kept for `retention` days, and every line is duplicated to stderr.
/// The returned handle must live as long as the program.
pub fn init(
    conf: &LogConfiguration,
    verbosity: Option<log::LevelFilter>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = match verbosity {
        Some(v) => v.to_string().to_lowercase(),
        None => conf
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    };

    let mut file_spec = FileSpec::default().basename(env!("CARGO_PKG_NAME"));
    if let Some(directory) = &conf.directory {
        file_spec = file_spec.directory(directory);
    }

    Logger::try_with_str(level)?
        .log_to_file(file_spec)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(conf.retention.unwrap_or(DEFAULT_RETENTION)),
        )
        .duplicate_to_stderr(Duplicate::All)
        .format(flexi_logger::detailed_format)
        .filter(Box::new(IgnoreReqwest))
        .start()
}
