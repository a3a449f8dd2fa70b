use crate::{
	format::{Formatted, OutputFormat},
	github::*,
	http::Request,
	params::Params,
	Result,
};

use super::repo_path;

resource_manager! {
	/// Commits, comparisons and commit comments of a repository.
	CommitsManager
}

impl CommitsManager {
	fn list_request(repo: &impl RepositoryHandle, params: Option<Params>) -> Request {
		Request::get(repo_path(repo, &["commits"])).query(params)
	}

	/// Lists commits, newest first. `params` may filter by `sha`, `path`,
	/// `author`, `since`, `until` and paginate with `per_page`/`page`.
	pub async fn list(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<Commit>> {
		self.client.send_list(&Self::list_request(repo, params)).await
	}

	pub async fn list_as(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<Commit>>> {
		self.client
			.send_list_as(&Self::list_request(repo, params), format)
			.await
	}

	/// Lists commits across every page.
	pub async fn list_all(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<Commit>> {
		self.client.send_all(&Self::list_request(repo, params)).await
	}

	fn get_request(
		repo: &impl RepositoryHandle,
		reference: &str,
		params: Option<Params>,
	) -> Request {
		Request::get(repo_path(repo, &["commits", reference])).query(params)
	}

	/// Returns a single commit by SHA, branch or tag name.
	pub async fn get(
		&self,
		repo: &impl RepositoryHandle,
		reference: &str,
		params: Option<Params>,
	) -> Result<Commit> {
		self.client
			.send(&Self::get_request(repo, reference, params))
			.await
	}

	pub async fn get_as(
		&self,
		repo: &impl RepositoryHandle,
		reference: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Commit>> {
		self.client
			.send_as(&Self::get_request(repo, reference, params), format)
			.await
	}

	fn compare_request(
		repo: &impl RepositoryHandle,
		base: &str,
		head: &str,
		params: Option<Params>,
	) -> Request {
		let basehead = format!("{}...{}", base, head);
		Request::get(repo_path(repo, &["compare", basehead.as_str()])).query(params)
	}

	/// Compares two commits, branches or tags.
	pub async fn compare(
		&self,
		repo: &impl RepositoryHandle,
		base: &str,
		head: &str,
		params: Option<Params>,
	) -> Result<CommitComparison> {
		self.client
			.send(&Self::compare_request(repo, base, head, params))
			.await
	}

	pub async fn compare_as(
		&self,
		repo: &impl RepositoryHandle,
		base: &str,
		head: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<CommitComparison>> {
		self.client
			.send_as(&Self::compare_request(repo, base, head, params), format)
			.await
	}

	fn branches_where_head_request(
		repo: &impl RepositoryHandle,
		sha: &str,
	) -> Request {
		Request::get(repo_path(repo, &["commits", sha, "branches-where-head"]))
	}

	/// Branches whose head is `sha`.
	pub async fn branches_where_head(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
	) -> Result<Vec<BranchShort>> {
		self.client
			.send_list(&Self::branches_where_head_request(repo, sha))
			.await
	}

	pub async fn branches_where_head_as(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		format: OutputFormat,
	) -> Result<Formatted<Vec<BranchShort>>> {
		self.client
			.send_list_as(&Self::branches_where_head_request(repo, sha), format)
			.await
	}

	fn pull_requests_request(
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
	) -> Request {
		Request::get(repo_path(repo, &["commits", sha, "pulls"])).query(params)
	}

	/// Pull requests associated with a commit.
	pub async fn pull_requests(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
	) -> Result<Vec<PullRequest>> {
		self.client
			.send_list(&Self::pull_requests_request(repo, sha, params))
			.await
	}

	pub async fn pull_requests_as(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<PullRequest>>> {
		self.client
			.send_list_as(&Self::pull_requests_request(repo, sha, params), format)
			.await
	}

	fn comments_request(
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
	) -> Request {
		Request::get(repo_path(repo, &["commits", sha, "comments"]))
			.query(params)
	}

	pub async fn comments(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
	) -> Result<Vec<CommitComment>> {
		self.client
			.send_list(&Self::comments_request(repo, sha, params))
			.await
	}

	pub async fn comments_as(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<CommitComment>>> {
		self.client
			.send_list_as(&Self::comments_request(repo, sha, params), format)
			.await
	}

	fn create_comment_request(
		repo: &impl RepositoryHandle,
		sha: &str,
		body: &str,
		params: Option<Params>,
	) -> Request {
		Request::post(
			repo_path(repo, &["commits", sha, "comments"]),
			Params::merged(params, "body", body),
		)
	}

	/// Comments on a commit. `params` may add `path`, `position` or `line`;
	/// `body` always wins over a `body` key in `params`.
	pub async fn create_comment(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		body: &str,
		params: Option<Params>,
	) -> Result<CommitComment> {
		self.client
			.send(&Self::create_comment_request(repo, sha, body, params))
			.await
	}

	pub async fn create_comment_as(
		&self,
		repo: &impl RepositoryHandle,
		sha: &str,
		body: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<CommitComment>> {
		self.client
			.send_as(
				&Self::create_comment_request(repo, sha, body, params),
				format,
			)
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reqwest::Method;

	#[test]
	fn test_get_path() {
		let request = CommitsManager::get_request(&("o", "r"), "abc123", None);
		assert_eq!(request.method, Method::GET);
		assert_eq!(request.path_and_query(), "/repos/o/r/commits/abc123");
	}

	#[test]
	fn test_compare_path() {
		let request = CommitsManager::compare_request(
			&RepoName::new("o", "r"),
			"main",
			"feature",
			Some(Params::new().with("per_page", 5)),
		);
		assert_eq!(
			request.path_and_query(),
			"/repos/o/r/compare/main...feature?per_page=5"
		);
	}

	#[test]
	fn test_create_comment_always_sends_body() {
		let request =
			CommitsManager::create_comment_request(&("o", "r"), "abc", "lgtm", None);
		assert_eq!(request.method, Method::POST);
		assert_eq!(
			request.body.unwrap().to_json(),
			serde_json::json!({ "body": "lgtm" })
		);

		let request = CommitsManager::create_comment_request(
			&("o", "r"),
			"abc",
			"lgtm",
			Some(Params::new().with("path", "src/lib.rs").with("line", 3)),
		);
		assert_eq!(
			request.body.unwrap().to_json(),
			serde_json::json!({ "path": "src/lib.rs", "line": 3, "body": "lgtm" })
		);
	}
}
