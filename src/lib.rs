//! Resource managers over the GitHub REST API.
//!
//! Each manager covers one resource group, builds the request path and
//! query from identifiers plus an optional [`Params`] bag, sends a single
//! request and hands the body back as a typed record, or as raw text or a
//! JSON tree through the `_as` variants taking an [`OutputFormat`].

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod http;
pub mod logging;
pub mod managers;
pub mod params;

pub use config::ClientConfig;
pub use format::{Formatted, OutputFormat};
pub use github::{RepoName, RepositoryHandle};
pub use managers::{
	CommitsManager, DependabotAlertsManager, DeploymentBranchPoliciesManager,
	Github, ReleasesManager,
};
pub use params::{ParamValue, Params};

pub type Result<T, E = error::Error> = std::result::Result<T, E>;
