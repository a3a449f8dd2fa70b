use snafu::{Backtrace, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub")]
pub enum Error {
	/// An error occurred while sending or receiving a HTTP request or response
	/// respectively.
	#[snafu(display("Source: {}\nBacktrace:\n{}", source, backtrace))]
	Http {
		source: reqwest::Error,
		backtrace: Backtrace,
	},

	/// GitHub answered with a non-success status code.
	#[snafu(display("Status code: {}\nBody:\n{:#?}", status, body))]
	Response {
		status: reqwest::StatusCode,
		text: String,
		body: serde_json::Value,
	},

	/// The response body is not valid JSON.
	#[snafu(display("Source: {}\nBacktrace:\n{}", source, backtrace))]
	Parse {
		source: serde_json::Error,
		backtrace: Backtrace,
	},

	/// The response body is valid JSON but not of the expected kind.
	#[snafu(display("Expected a JSON {}, found a JSON {}", expected, found))]
	UnexpectedShape {
		expected: &'static str,
		found: &'static str,
	},

	/// A JSON object could not be mapped into a typed record.
	#[snafu(display("Unable to map response into {}: {}", type_name, source))]
	Mapping {
		type_name: &'static str,
		source: serde_json::Error,
	},

	/// An element of a JSON array could not be mapped into a typed record.
	#[snafu(display(
		"Unable to map element {} of response into {}: {}",
		index,
		type_name,
		source
	))]
	ElementMapping {
		type_name: &'static str,
		index: usize,
		source: serde_json::Error,
	},

	/// A pagination link leads away from the configured API root.
	#[snafu(display("Refusing to follow pagination link {}", url))]
	ForeignLink { url: String },

	/// A removal succeeded but GitHub still sent content back.
	#[snafu(display("Status code: {}\nUnexpected body:\n{}", status, text))]
	UnexpectedBody {
		status: reqwest::StatusCode,
		text: String,
	},

	/// Client configuration is incomplete or invalid.
	#[snafu(display("Error creating client: {}", msg))]
	Config { msg: String },

	/// A required environment variable is missing.
	#[snafu(display("Environment variable {}: {}", name, source))]
	EnvVar {
		name: &'static str,
		source: dotenv::Error,
	},

	/// The configured API url cannot be parsed.
	#[snafu(display("Invalid API url: {}", source))]
	InvalidUrl { source: url::ParseError },

	/// A string is not one of the dependabot alert states.
	#[snafu(display("Unknown dependabot alert state: {}", input))]
	InvalidAlertState { input: String },

	/// A string does not name a GitHub repository.
	#[snafu(display("Not a repository name: {}", input))]
	InvalidRepoName { input: String },
}

impl Error {
	/// HTTP status attached to the error, if GitHub answered at all.
	pub fn status(&self) -> Option<reqwest::StatusCode> {
		match self {
			Error::Http { source, .. } => source.status(),
			Error::Response { status, .. }
			| Error::UnexpectedBody { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Whether the error came from the transport or from GitHub, as
	/// opposed to decoding the response.
	pub fn is_transport(&self) -> bool {
		matches!(
			self,
			Error::Http { .. }
				| Error::Response { .. }
				| Error::UnexpectedBody { .. }
		)
	}
}
