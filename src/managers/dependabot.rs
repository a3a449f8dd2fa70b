use crate::{
	format::{Formatted, OutputFormat},
	github::*,
	http::{api_path, Request},
	params::Params,
	Result,
};

use super::repo_path;

resource_manager! {
	/// Dependabot alerts of repositories, organizations and enterprises.
	DependabotAlertsManager
}

impl DependabotAlertsManager {
	fn list_for_repo_request(
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Request {
		Request::get(repo_path(repo, &["dependabot", "alerts"])).query(params)
	}

	/// Lists alerts of a repository. `params` may filter by `state`,
	/// `severity`, `ecosystem`, `package`, `manifest` and `scope`.
	pub async fn list_for_repo(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<DependabotAlert>> {
		self.client
			.send_list(&Self::list_for_repo_request(repo, params))
			.await
	}

	pub async fn list_for_repo_as(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<DependabotAlert>>> {
		self.client
			.send_list_as(&Self::list_for_repo_request(repo, params), format)
			.await
	}

	pub async fn list_all_for_repo(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<DependabotAlert>> {
		self.client
			.send_all(&Self::list_for_repo_request(repo, params))
			.await
	}

	fn list_for_org_request(org: &str, params: Option<Params>) -> Request {
		Request::get(api_path(&["orgs", org, "dependabot", "alerts"]))
			.query(params)
	}

	/// Lists alerts across an organization. Each alert carries its
	/// `repository`.
	pub async fn list_for_org(
		&self,
		org: &str,
		params: Option<Params>,
	) -> Result<Vec<DependabotAlert>> {
		self.client
			.send_list(&Self::list_for_org_request(org, params))
			.await
	}

	pub async fn list_for_org_as(
		&self,
		org: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<DependabotAlert>>> {
		self.client
			.send_list_as(&Self::list_for_org_request(org, params), format)
			.await
	}

	fn list_for_enterprise_request(
		enterprise: &str,
		params: Option<Params>,
	) -> Request {
		Request::get(api_path(&["enterprises", enterprise, "dependabot", "alerts"]))
			.query(params)
	}

	pub async fn list_for_enterprise(
		&self,
		enterprise: &str,
		params: Option<Params>,
	) -> Result<Vec<DependabotAlert>> {
		self.client
			.send_list(&Self::list_for_enterprise_request(enterprise, params))
			.await
	}

	pub async fn list_for_enterprise_as(
		&self,
		enterprise: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<DependabotAlert>>> {
		self.client
			.send_list_as(
				&Self::list_for_enterprise_request(enterprise, params),
				format,
			)
			.await
	}

	fn alert_path(repo: &impl RepositoryHandle, number: i64) -> String {
		repo_path(repo, &["dependabot", "alerts", number.to_string().as_str()])
	}

	pub async fn get(
		&self,
		repo: &impl RepositoryHandle,
		number: i64,
	) -> Result<DependabotAlert> {
		self.client
			.send(&Request::get(Self::alert_path(repo, number)))
			.await
	}

	pub async fn get_as(
		&self,
		repo: &impl RepositoryHandle,
		number: i64,
		format: OutputFormat,
	) -> Result<Formatted<DependabotAlert>> {
		self.client
			.send_as(&Request::get(Self::alert_path(repo, number)), format)
			.await
	}

	fn update_request(
		repo: &impl RepositoryHandle,
		number: i64,
		state: DependabotAlertState,
		params: Option<Params>,
	) -> Request {
		Request::patch(
			Self::alert_path(repo, number),
			Params::merged(params, "state", state),
		)
	}

	/// Moves an alert to `state`. Dismissals take `dismissed_reason` and
	/// `dismissed_comment` from `params`; a `state` key in `params` is
	/// replaced by `state`.
	pub async fn update(
		&self,
		repo: &impl RepositoryHandle,
		number: i64,
		state: DependabotAlertState,
		params: Option<Params>,
	) -> Result<DependabotAlert> {
		self.client
			.send(&Self::update_request(repo, number, state, params))
			.await
	}

	pub async fn update_as(
		&self,
		repo: &impl RepositoryHandle,
		number: i64,
		state: DependabotAlertState,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<DependabotAlert>> {
		self.client
			.send_as(&Self::update_request(repo, number, state, params), format)
			.await
	}
}
