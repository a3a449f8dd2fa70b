//! Log setup for the command line front end.

use std::io::{self, Write};

use env_logger::fmt::Formatter;
use log::Record;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Severity {
	Error,
	Warning,
	Info,
	Debug,
}

impl From<log::Level> for Severity {
	fn from(level: log::Level) -> Self {
		match level {
			log::Level::Error => Severity::Error,
			log::Level::Warn => Severity::Warning,
			log::Level::Info => Severity::Info,
			log::Level::Debug | log::Level::Trace => Severity::Debug,
		}
	}
}

#[derive(Serialize)]
struct Line<'a> {
	severity: Severity,
	target: &'a str,
	message: String,
	timestamp: chrono::DateTime<chrono::Utc>,
}

/// One JSON object per log line.
pub fn json_format(fmt: &mut Formatter, record: &Record) -> io::Result<()> {
	writeln!(
		fmt,
		"{}",
		serde_json::to_string(&Line {
			severity: record.level().into(),
			target: record.target(),
			message: format!("{}", record.args()),
			timestamp: chrono::Utc::now(),
		})
		.unwrap_or_else(|_| format!(
			"ERROR: Unable to serialize {}",
			record.args()
		))
	)
}

/// Initializes `env_logger` with an `info` default, switching to JSON lines
/// when `json` is set.
pub fn init(json: bool) {
	let mut builder = env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	);
	if json {
		builder.format(json_format);
	}
	builder.init();
}
