use std::collections::HashSet;

use hyperx::header::TypedHeaders;
use parking_lot::Mutex;
use reqwest::{
	header::{HeaderMap, ACCEPT, USER_AGENT},
	Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::{ensure, ResultExt};

use crate::{
	config::ClientConfig,
	error::{self, Error},
	format::{self, Formatted, OutputFormat},
	params::Params,
	Result,
};

const API_VERSION: &str = "2022-11-28";
const FALLBACK_ERROR_MESSAGE: &str = "GitHub request failed";

/// Builds an API path from raw segments, percent-encoding each one.
pub fn api_path(segments: &[&str]) -> String {
	segments
		.iter()
		.map(|segment| format!("/{}", urlencoding::encode(segment)))
		.collect()
}

/// One REST call: verb, path, query parameters and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub query: Params,
	pub body: Option<Params>,
}

impl Request {
	pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
		Self {
			method,
			path: path.into(),
			query: Params::new(),
			body: None,
		}
	}

	pub fn get<P: Into<String>>(path: P) -> Self {
		Self::new(Method::GET, path)
	}

	pub fn post<P: Into<String>>(path: P, body: Params) -> Self {
		Self::new(Method::POST, path).body(body)
	}

	pub fn patch<P: Into<String>>(path: P, body: Params) -> Self {
		Self::new(Method::PATCH, path).body(body)
	}

	pub fn put<P: Into<String>>(path: P, body: Params) -> Self {
		Self::new(Method::PUT, path).body(body)
	}

	pub fn delete<P: Into<String>>(path: P) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Sets the query string parameters; `None` sends none.
	pub fn query(mut self, params: Option<Params>) -> Self {
		self.query = params.unwrap_or_default();
		self
	}

	pub fn body(mut self, body: Params) -> Self {
		self.body = Some(body);
		self
	}

	pub fn path_and_query(&self) -> String {
		format!("{}{}", self.path, self.query.to_query())
	}
}

/// What the client remembers about its latest failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
	pub status: Option<StatusCode>,
	/// Raw error text, the response body when GitHub sent one.
	pub text: String,
	/// The error body parsed as JSON, when it was JSON.
	pub json: Option<Value>,
}

pub struct Client {
	client: reqwest::Client,
	auth_key: String,
	api_root: String,
	default_error_message: Option<String>,
	last_error: Mutex<Option<ApiError>>,
}

/// HTTP util methods.
impl Client {
	pub fn new(config: &ClientConfig) -> Result<Self> {
		config.validate()?;

		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self {
			client: builder.build().context(error::Http)?,
			auth_key: config.access_token.clone(),
			api_root: config.api_root().to_string(),
			default_error_message: config.default_error_message.clone(),
			last_error: Mutex::new(None),
		})
	}

	/// Absolute url of a request.
	pub fn url(&self, request: &Request) -> String {
		format!("{}{}", self.api_root, request.path_and_query())
	}

	async fn execute(
		&self,
		method: Method,
		url: &str,
		body: Option<&Params>,
	) -> Result<reqwest::Response> {
		let mut builder = self
			.client
			.request(method.clone(), url)
			.bearer_auth(&self.auth_key)
			.header(ACCEPT, "application/vnd.github+json")
			.header("X-GitHub-Api-Version", API_VERSION)
			.header(
				USER_AGENT,
				concat!("gh-rest/", env!("CARGO_PKG_VERSION")),
			);
		if let Some(body) = body {
			builder = builder.json(&body.to_json());
		}
		let request = builder.build().context(error::Http)?;

		log::debug!("{} {}", method, url);

		let response =
			self.client.execute(request).await.context(error::Http)?;
		let status = response.status();

		if status.is_success() {
			Ok(response)
		} else {
			let text = response.text().await.context(error::Http)?;

			// Try to decode the response error as JSON otherwise store
			// it as plain text in a JSON object.
			let body = serde_json::from_str(&text)
				.unwrap_or_else(|_| serde_json::json!({ "message": text }));

			error::Response { status, text, body }.fail()
		}
	}

	/// Sends `request`, supplying the relevant headers for authentication
	/// and API versioning. Non-success statuses become errors.
	pub async fn request(&self, request: &Request) -> Result<reqwest::Response> {
		self.execute(request.method.clone(), &self.url(request), request.body.as_ref())
			.await
	}

	async fn fetch_text(&self, request: &Request) -> Result<String> {
		self.request(request)
			.await?
			.text()
			.await
			.context(error::Http)
	}

	/// Sends `request` and maps the JSON object it returns.
	pub async fn send<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
		let result = self
			.fetch_text(request)
			.await
			.and_then(|text| format::typed_object(&text));
		self.record(result)
	}

	/// Sends `request` and formats the JSON object it returns.
	pub async fn send_as<T: DeserializeOwned>(
		&self,
		request: &Request,
		output: OutputFormat,
	) -> Result<Formatted<T>> {
		let result = self
			.fetch_text(request)
			.await
			.and_then(|text| format::format_object(text, output));
		self.record(result)
	}

	/// Sends `request` and maps every element of the JSON array it returns.
	pub async fn send_list<T: DeserializeOwned>(
		&self,
		request: &Request,
	) -> Result<Vec<T>> {
		let result = self
			.fetch_text(request)
			.await
			.and_then(|text| format::typed_list(&text));
		self.record(result)
	}

	/// Sends `request` and formats the JSON array it returns.
	pub async fn send_list_as<T: DeserializeOwned>(
		&self,
		request: &Request,
		output: OutputFormat,
	) -> Result<Formatted<Vec<T>>> {
		let result = self
			.fetch_text(request)
			.await
			.and_then(|text| format::format_list(text, output));
		self.record(result)
	}

	// Originally adapted from:
	// https://github.com/XAMPPRocky/gh-auditor/blob/ca67641c0a29d64fc5c6b4244b45ae601604f3c1/src/lib.rs#L232-L267
	async fn fetch_all<T: DeserializeOwned>(
		&self,
		request: &Request,
	) -> Result<Vec<T>> {
		let mut entities = Vec::new();
		let mut visited = HashSet::new();
		let mut next = Some(self.url(request));

		while let Some(url) = next {
			// The token is sent along, so never leave the API root.
			ensure!(
				is_under_root(&self.api_root, &url),
				error::ForeignLink { url }
			);
			if !visited.insert(url.clone()) {
				log::warn!("Pagination loops back to {}", url);
				break;
			}

			let response = self.execute(Method::GET, &url, None).await?;
			next = next_link(response.headers());

			let text = response.text().await.context(error::Http)?;
			let mut page = format::typed_list(&text)?;
			entities.append(&mut page);
		}

		Ok(entities)
	}

	/// Gets all entries across all pages of a list resource, following the
	/// `Link` header.
	pub async fn send_all<T: DeserializeOwned>(
		&self,
		request: &Request,
	) -> Result<Vec<T>> {
		let result = self.fetch_all(request).await;
		self.record(result)
	}

	async fn remove(&self, request: &Request) -> Result<()> {
		let response = self.request(request).await?;
		let status = response.status();
		if status == StatusCode::NO_CONTENT {
			return Ok(());
		}

		let text = response.text().await.context(error::Http)?;
		if text.trim().is_empty() {
			Ok(())
		} else {
			error::UnexpectedBody { status, text }.fail()
		}
	}

	/// Sends a removal. Succeeds only on an empty success response (GitHub
	/// answers 204); anything else is logged, recorded and returned.
	pub async fn delete(&self, request: &Request) -> Result<()> {
		let result = self.remove(request).await;
		self.record(result)
	}

	fn record<T>(&self, result: Result<T>) -> Result<T> {
		match result {
			Ok(value) => {
				*self.last_error.lock() = None;
				Ok(value)
			}
			Err(e) => {
				let api_error = self.api_error(&e);
				log::error!(
					"GitHub request failed ({}): {}",
					api_error
						.status
						.map(|s| s.to_string())
						.unwrap_or_else(|| "no status".to_string()),
					api_error.text
				);
				*self.last_error.lock() = Some(api_error);
				Err(e)
			}
		}
	}

	fn api_error(&self, e: &Error) -> ApiError {
		let (text, json) = match e {
			Error::Response { text, body, .. } => (text.clone(), Some(body.clone())),
			Error::UnexpectedBody { text, .. } => {
				(text.clone(), serde_json::from_str(text).ok())
			}
			other => (other.to_string(), None),
		};
		let text = if text.trim().is_empty() {
			self.default_error_message
				.clone()
				.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
		} else {
			text
		};
		ApiError {
			status: e.status(),
			text,
			json,
		}
	}

	/// The latest failure, cleared by the next successful call.
	pub fn last_error(&self) -> Option<ApiError> {
		self.last_error.lock().clone()
	}

	pub fn last_error_text(&self) -> Option<String> {
		self.last_error.lock().as_ref().map(|e| e.text.clone())
	}

	pub fn last_error_json(&self) -> Option<Value> {
		self.last_error.lock().as_ref().and_then(|e| e.json.clone())
	}

	/// Writes the latest failure to the error log, if there is one.
	pub fn log_last_error(&self) {
		if let Some(e) = self.last_error.lock().as_ref() {
			match &e.json {
				Some(json) => log::error!("{:#}", json),
				None => log::error!("{}", e.text),
			}
		}
	}
}

fn is_under_root(api_root: &str, url: &str) -> bool {
	url.strip_prefix(api_root)
		.map(|rest| {
			rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')
		})
		.unwrap_or(false)
}

fn next_link(headers: &HeaderMap) -> Option<String> {
	headers
		.decode::<hyperx::header::Link>()
		.ok()
		.and_then(|v| {
			v.values()
				.iter()
				.find(|link| {
					link.rel()
						.map(|rel| {
							rel.contains(&hyperx::header::RelationType::Next)
						})
						.unwrap_or(false)
				})
				.map(|l| l.link())
				.map(str::to_owned)
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_api_path_encodes_segments() {
		assert_eq!(
			api_path(&["repos", "o", "r", "commits", "abc123"]),
			"/repos/o/r/commits/abc123"
		);
		assert_eq!(
			api_path(&["repos", "o", "r", "releases", "tags", "v1.0 beta/x"]),
			"/repos/o/r/releases/tags/v1.0%20beta%2Fx"
		);
		assert_eq!(
			api_path(&["repos", "o", "r", "compare", "main...dev"]),
			"/repos/o/r/compare/main...dev"
		);
	}

	#[test]
	fn test_request_path_and_query() {
		let request = Request::get("/repos/o/r/releases").query(Some(
			Params::new().with("per_page", "10").with("page", "2"),
		));
		assert_eq!(
			request.path_and_query(),
			"/repos/o/r/releases?per_page=10&page=2"
		);
		assert_eq!(Request::get("/x").query(None).path_and_query(), "/x");
	}

	#[test]
	fn test_next_link() {
		let mut headers = HeaderMap::new();
		headers.insert(
			"link",
			"<https://api.github.com/repos/o/r/releases?page=2>; rel=\"next\", <https://api.github.com/repos/o/r/releases?page=5>; rel=\"last\""
				.parse()
				.unwrap(),
		);
		assert_eq!(
			next_link(&headers).as_deref(),
			Some("https://api.github.com/repos/o/r/releases?page=2")
		);

		let mut headers = HeaderMap::new();
		headers.insert(
			"link",
			"<https://api.github.com/repos/o/r/releases?page=1>; rel=\"prev\""
				.parse()
				.unwrap(),
		);
		assert_eq!(next_link(&headers), None);
		assert_eq!(next_link(&HeaderMap::new()), None);
	}

	#[test]
	fn test_is_under_root() {
		let root = "http://127.0.0.1:8080";
		assert!(is_under_root(root, "http://127.0.0.1:8080/repos/o/r?page=2"));
		assert!(is_under_root(root, "http://127.0.0.1:8080"));
		assert!(!is_under_root(root, "http://127.0.0.1:80801/repos/o/r"));
		assert!(!is_under_root(root, "https://evil.example.com/repos/o/r"));
	}

	#[test]
	fn test_last_error_falls_back_to_default_message() {
		let client = Client::new(
			&ClientConfig::new("token").with_default_error_message("oops"),
		)
		.unwrap();
		let err = error::Response {
			status: StatusCode::BAD_GATEWAY,
			text: "",
			body: serde_json::json!({ "message": "" }),
		}
		.fail::<()>()
		.unwrap_err();
		assert!(client.record::<()>(Err(err)).is_err());
		let last = client.last_error().unwrap();
		assert_eq!(last.text, "oops");
		assert_eq!(last.status, Some(StatusCode::BAD_GATEWAY));

		assert!(client.record(Ok(())).is_ok());
		assert!(client.last_error().is_none());
	}
}
