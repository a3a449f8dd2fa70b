use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error, params::ParamValue, Result};

/// Anything that names a repository.
pub trait RepositoryHandle {
	fn owner(&self) -> &str;
	fn name(&self) -> &str;
}

impl RepositoryHandle for (&str, &str) {
	fn owner(&self) -> &str {
		self.0
	}

	fn name(&self) -> &str {
		self.1
	}
}

impl RepositoryHandle for (String, String) {
	fn owner(&self) -> &str {
		&self.0
	}

	fn name(&self) -> &str {
		&self.1
	}
}

/// An `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
	pub owner: String,
	pub name: String,
}

impl RepoName {
	pub fn new<O: Into<String>, N: Into<String>>(owner: O, name: N) -> Self {
		Self {
			owner: owner.into(),
			name: name.into(),
		}
	}
}

impl RepositoryHandle for RepoName {
	fn owner(&self) -> &str {
		&self.owner
	}

	fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Display for RepoName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.owner, self.name)
	}
}

/// Accepts `owner/name`, `https://github.com/owner/name(.git)` and
/// `git@github.com:owner/name(.git)`.
impl FromStr for RepoName {
	type Err = error::Error;

	fn from_str(input: &str) -> Result<Self> {
		let trimmed = input.trim().trim_end_matches('/').trim_end_matches(".git");

		let path = if let Some(rest) = trimmed.strip_prefix("git@") {
			rest.splitn(2, ':').nth(1)
		} else if trimmed.starts_with("https://") || trimmed.starts_with("http://")
		{
			trimmed.splitn(4, '/').nth(3)
		} else {
			Some(trimmed)
		};

		let mut parts = path.unwrap_or_default().split('/');
		match (parts.next(), parts.next(), parts.next()) {
			(Some(owner), Some(name), None)
				if !owner.is_empty() && !name.is_empty() =>
			{
				Ok(RepoName::new(owner, name))
			}
			_ => error::InvalidRepoName { input }.fail(),
		}
	}
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub enum UserType {
	User,
	Organization,
	Bot,
	#[serde(other)]
	Unknown,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	#[serde(default)]
	pub login: String,
	pub id: Option<i64>,
	pub node_id: Option<String>,
	pub avatar_url: Option<String>,
	pub html_url: Option<String>,
	#[serde(rename = "type")]
	pub type_field: Option<UserType>,
	pub site_admin: Option<bool>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
	pub id: Option<i64>,
	pub node_id: Option<String>,
	#[serde(default)]
	pub name: String,
	pub full_name: Option<String>,
	pub owner: Option<User>,
	pub private: Option<bool>,
	pub html_url: Option<String>,
	pub description: Option<String>,
	pub fork: Option<bool>,
	pub default_branch: Option<String>,
}

impl RepositoryHandle for Repository {
	fn owner(&self) -> &str {
		match (&self.owner, &self.full_name) {
			(Some(User { login, .. }), _) if !login.is_empty() => login.as_str(),
			(_, Some(full_name)) => {
				full_name.split('/').next().unwrap_or_default()
			}
			_ => "",
		}
	}

	fn name(&self) -> &str {
		&self.name
	}
}

// Commits

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitActor {
	pub name: Option<String>,
	pub email: Option<String>,
	pub date: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitTree {
	pub sha: Option<String>,
	pub url: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
	pub verified: Option<bool>,
	pub reason: Option<String>,
	pub signature: Option<String>,
	pub payload: Option<String>,
}

/// The git-level part of a commit.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetails {
	pub url: Option<String>,
	pub author: Option<GitActor>,
	pub committer: Option<GitActor>,
	pub message: Option<String>,
	pub comment_count: Option<i64>,
	pub tree: Option<CommitTree>,
	pub verification: Option<Verification>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitParent {
	#[serde(default)]
	pub sha: String,
	pub url: Option<String>,
	pub html_url: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitStats {
	pub additions: Option<i64>,
	pub deletions: Option<i64>,
	pub total: Option<i64>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitFile {
	pub sha: Option<String>,
	#[serde(default)]
	pub filename: String,
	pub status: Option<String>,
	pub additions: Option<i64>,
	pub deletions: Option<i64>,
	pub changes: Option<i64>,
	pub blob_url: Option<String>,
	pub raw_url: Option<String>,
	pub contents_url: Option<String>,
	pub patch: Option<String>,
	pub previous_filename: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
	pub sha: String,
	pub node_id: Option<String>,
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub comments_url: Option<String>,
	pub commit: Option<CommitDetails>,
	// Author might be missing when the git identity maps to no account
	pub author: Option<User>,
	pub committer: Option<User>,
	#[serde(default)]
	pub parents: Vec<CommitParent>,
	pub stats: Option<CommitStats>,
	#[serde(default)]
	pub files: Vec<CommitFile>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
	Diverged,
	Ahead,
	Behind,
	Identical,
	#[serde(other)]
	Unknown,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitComparison {
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub permalink_url: Option<String>,
	pub diff_url: Option<String>,
	pub patch_url: Option<String>,
	pub base_commit: Option<Commit>,
	pub merge_base_commit: Option<Commit>,
	pub status: Option<ComparisonStatus>,
	pub ahead_by: Option<i64>,
	pub behind_by: Option<i64>,
	pub total_commits: Option<i64>,
	#[serde(default)]
	pub commits: Vec<Commit>,
	#[serde(default)]
	pub files: Vec<CommitFile>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitComment {
	pub id: i64,
	pub node_id: Option<String>,
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub body: Option<String>,
	pub path: Option<String>,
	pub position: Option<i64>,
	pub line: Option<i64>,
	pub commit_id: Option<String>,
	pub user: Option<User>,
	pub author_association: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCommit {
	pub sha: Option<String>,
	pub url: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchShort {
	#[serde(default)]
	pub name: String,
	pub commit: Option<BranchCommit>,
	pub protected: Option<bool>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
	pub id: Option<i64>,
	pub number: i64,
	pub node_id: Option<String>,
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub state: Option<String>,
	pub title: Option<String>,
	pub body: Option<String>,
	pub user: Option<User>,
	pub draft: Option<bool>,
	pub merge_commit_sha: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
	pub closed_at: Option<DateTime<Utc>>,
	pub merged_at: Option<DateTime<Utc>>,
}

// Releases

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
	pub id: i64,
	pub node_id: Option<String>,
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub assets_url: Option<String>,
	pub upload_url: Option<String>,
	pub tarball_url: Option<String>,
	pub zipball_url: Option<String>,
	pub tag_name: Option<String>,
	pub target_commitish: Option<String>,
	pub name: Option<String>,
	pub body: Option<String>,
	pub draft: Option<bool>,
	pub prerelease: Option<bool>,
	pub author: Option<User>,
	pub created_at: Option<DateTime<Utc>>,
	pub published_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub assets: Vec<ReleaseAsset>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAsset {
	pub id: i64,
	pub node_id: Option<String>,
	pub url: Option<String>,
	pub browser_download_url: Option<String>,
	pub name: Option<String>,
	pub label: Option<String>,
	pub state: Option<String>,
	pub content_type: Option<String>,
	pub size: Option<i64>,
	pub download_count: Option<i64>,
	pub uploader: Option<User>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

/// Generated release notes, not yet attached to a release.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNotes {
	pub name: Option<String>,
	pub body: Option<String>,
}

// Dependabot

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependabotAlertState {
	AutoDismissed,
	Dismissed,
	Fixed,
	Open,
	#[serde(other)]
	Unknown,
}

impl DependabotAlertState {
	pub fn as_str(&self) -> &'static str {
		match self {
			DependabotAlertState::AutoDismissed => "auto_dismissed",
			DependabotAlertState::Dismissed => "dismissed",
			DependabotAlertState::Fixed => "fixed",
			DependabotAlertState::Open => "open",
			DependabotAlertState::Unknown => "unknown",
		}
	}
}

impl FromStr for DependabotAlertState {
	type Err = error::Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"auto_dismissed" => Ok(DependabotAlertState::AutoDismissed),
			"dismissed" => Ok(DependabotAlertState::Dismissed),
			"fixed" => Ok(DependabotAlertState::Fixed),
			"open" => Ok(DependabotAlertState::Open),
			other => error::InvalidAlertState { input: other }.fail(),
		}
	}
}

impl fmt::Display for DependabotAlertState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<DependabotAlertState> for ParamValue {
	fn from(state: DependabotAlertState) -> Self {
		ParamValue::from(state.as_str())
	}
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissedReason {
	FixStarted,
	Inaccurate,
	NoBandwidth,
	NotUsed,
	TolerableRisk,
	#[serde(other)]
	Unknown,
}

impl DismissedReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			DismissedReason::FixStarted => "fix_started",
			DismissedReason::Inaccurate => "inaccurate",
			DismissedReason::NoBandwidth => "no_bandwidth",
			DismissedReason::NotUsed => "not_used",
			DismissedReason::TolerableRisk => "tolerable_risk",
			DismissedReason::Unknown => "unknown",
		}
	}
}

impl From<DismissedReason> for ParamValue {
	fn from(reason: DismissedReason) -> Self {
		ParamValue::from(reason.as_str())
	}
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyPackage {
	pub ecosystem: Option<String>,
	pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
	pub package: Option<DependencyPackage>,
	pub manifest_path: Option<String>,
	pub scope: Option<String>,
	pub relationship: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchedVersion {
	pub identifier: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityVulnerability {
	pub package: Option<DependencyPackage>,
	pub severity: Option<String>,
	pub vulnerable_version_range: Option<String>,
	pub first_patched_version: Option<PatchedVersion>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryIdentifier {
	#[serde(rename = "type")]
	pub identifier_type: Option<String>,
	pub value: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReference {
	pub url: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cvss {
	pub score: Option<f64>,
	pub vector_string: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cwe {
	pub cwe_id: Option<String>,
	pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAdvisory {
	pub ghsa_id: Option<String>,
	pub cve_id: Option<String>,
	pub summary: Option<String>,
	pub description: Option<String>,
	pub severity: Option<String>,
	#[serde(default)]
	pub identifiers: Vec<AdvisoryIdentifier>,
	#[serde(default)]
	pub references: Vec<AdvisoryReference>,
	#[serde(default)]
	pub vulnerabilities: Vec<SecurityVulnerability>,
	pub cvss: Option<Cvss>,
	#[serde(default)]
	pub cwes: Vec<Cwe>,
	pub published_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
	pub withdrawn_at: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependabotAlert {
	pub number: i64,
	pub state: Option<DependabotAlertState>,
	pub dependency: Option<Dependency>,
	pub security_advisory: Option<SecurityAdvisory>,
	pub security_vulnerability: Option<SecurityVulnerability>,
	pub url: Option<String>,
	pub html_url: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
	pub dismissed_at: Option<DateTime<Utc>>,
	pub dismissed_by: Option<User>,
	pub dismissed_reason: Option<DismissedReason>,
	pub dismissed_comment: Option<String>,
	pub fixed_at: Option<DateTime<Utc>>,
	pub auto_dismissed_at: Option<DateTime<Utc>>,
	// Only present on organization and enterprise listings
	pub repository: Option<Repository>,
}

// Deployment branch policies

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchPolicyType {
	Branch,
	Tag,
	#[serde(other)]
	Unknown,
}

impl BranchPolicyType {
	pub fn as_str(&self) -> &'static str {
		match self {
			BranchPolicyType::Branch => "branch",
			BranchPolicyType::Tag => "tag",
			BranchPolicyType::Unknown => "unknown",
		}
	}
}

impl From<BranchPolicyType> for ParamValue {
	fn from(policy_type: BranchPolicyType) -> Self {
		ParamValue::from(policy_type.as_str())
	}
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentBranchPolicy {
	pub id: i64,
	pub node_id: Option<String>,
	pub name: Option<String>,
	#[serde(rename = "type")]
	pub policy_type: Option<BranchPolicyType>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentBranchPolicies {
	pub total_count: Option<i64>,
	#[serde(default)]
	pub branch_policies: Vec<DeploymentBranchPolicy>,
}
