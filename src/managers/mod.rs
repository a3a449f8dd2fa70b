use crate::{config::ClientConfig, github::RepositoryHandle, http::api_path, Result};

mod branch_policies;
mod commits;
mod dependabot;
mod releases;

pub use branch_policies::DeploymentBranchPoliciesManager;
pub use commits::CommitsManager;
pub use dependabot::DependabotAlertsManager;
pub use releases::ReleasesManager;

/// `/repos/{owner}/{name}` followed by `rest`, every segment encoded.
pub(crate) fn repo_path(repo: &impl RepositoryHandle, rest: &[&str]) -> String {
	let mut segments = vec!["repos", repo.owner(), repo.name()];
	segments.extend_from_slice(rest);
	api_path(&segments)
}

/// Every resource manager, each with its own client built from the same
/// configuration.
pub struct Github {
	pub commits: CommitsManager,
	pub releases: ReleasesManager,
	pub dependabot_alerts: DependabotAlertsManager,
	pub branch_policies: DeploymentBranchPoliciesManager,
}

impl Github {
	pub fn new(config: &ClientConfig) -> Result<Self> {
		Ok(Self {
			commits: CommitsManager::new(config)?,
			releases: ReleasesManager::new(config)?,
			dependabot_alerts: DependabotAlertsManager::new(config)?,
			branch_policies: DeploymentBranchPoliciesManager::new(config)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::github::RepoName;

	#[test]
	fn test_repo_path() {
		assert_eq!(repo_path(&("o", "r"), &[]), "/repos/o/r");
		assert_eq!(
			repo_path(&RepoName::new("my org", "r"), &["commits"]),
			"/repos/my%20org/r/commits"
		);
	}

	#[test]
	fn test_managers_do_not_share_errors() {
		let github = Github::new(&ClientConfig::new("token")).unwrap();
		assert!(github.commits.client().last_error().is_none());
		assert!(github.releases.client().last_error().is_none());
	}
}
