use crate::{
	format::{Formatted, OutputFormat},
	github::*,
	http::Request,
	params::Params,
	Result,
};

use super::repo_path;

resource_manager! {
	/// Custom deployment branch and tag policies of an environment.
	DeploymentBranchPoliciesManager
}

fn policies_path(repo: &impl RepositoryHandle, environment: &str) -> String {
	repo_path(repo, &["environments", environment, "deployment-branch-policies"])
}

fn policy_path(
	repo: &impl RepositoryHandle,
	environment: &str,
	id: i64,
) -> String {
	format!("{}/{}", policies_path(repo, environment), id)
}

impl DeploymentBranchPoliciesManager {
	fn list_request(
		repo: &impl RepositoryHandle,
		environment: &str,
		params: Option<Params>,
	) -> Request {
		Request::get(policies_path(repo, environment)).query(params)
	}

	/// Lists the policies of `environment`. The listing is an object
	/// holding `total_count` and `branch_policies`.
	pub async fn list(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		params: Option<Params>,
	) -> Result<DeploymentBranchPolicies> {
		self.client
			.send(&Self::list_request(repo, environment, params))
			.await
	}

	pub async fn list_as(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<DeploymentBranchPolicies>> {
		self.client
			.send_as(&Self::list_request(repo, environment, params), format)
			.await
	}

	pub async fn get(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
	) -> Result<DeploymentBranchPolicy> {
		self.client
			.send(&Request::get(policy_path(repo, environment, id)))
			.await
	}

	pub async fn get_as(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
		format: OutputFormat,
	) -> Result<Formatted<DeploymentBranchPolicy>> {
		self.client
			.send_as(&Request::get(policy_path(repo, environment, id)), format)
			.await
	}

	fn create_request(
		repo: &impl RepositoryHandle,
		environment: &str,
		name: &str,
		params: Option<Params>,
	) -> Request {
		Request::post(
			policies_path(repo, environment),
			Params::merged(params, "name", name),
		)
	}

	/// Creates a policy matching `name` (a fnmatch pattern). `params` may
	/// set `type` to `branch` or `tag`.
	pub async fn create(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		name: &str,
		params: Option<Params>,
	) -> Result<DeploymentBranchPolicy> {
		self.client
			.send(&Self::create_request(repo, environment, name, params))
			.await
	}

	pub async fn create_as(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		name: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<DeploymentBranchPolicy>> {
		self.client
			.send_as(
				&Self::create_request(repo, environment, name, params),
				format,
			)
			.await
	}

	fn update_request(
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
		name: &str,
		params: Option<Params>,
	) -> Request {
		Request::put(
			policy_path(repo, environment, id),
			Params::merged(params, "name", name),
		)
	}

	/// Replaces the pattern of a policy.
	pub async fn update(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
		name: &str,
		params: Option<Params>,
	) -> Result<DeploymentBranchPolicy> {
		self.client
			.send(&Self::update_request(repo, environment, id, name, params))
			.await
	}

	pub async fn update_as(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
		name: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<DeploymentBranchPolicy>> {
		self.client
			.send_as(
				&Self::update_request(repo, environment, id, name, params),
				format,
			)
			.await
	}

	pub async fn delete(
		&self,
		repo: &impl RepositoryHandle,
		environment: &str,
		id: i64,
	) -> Result<()> {
		self.client
			.delete(&Request::delete(policy_path(repo, environment, id)))
			.await
	}
}
