use std::fmt::Debug;

use clap::{Parser, Subcommand};

use gh_rest::{
	config::ClientConfig,
	github::{DependabotAlertState, RepoName},
	logging, Formatted, Github, OutputFormat, Params, Result,
};

#[derive(Parser)]
#[command(name = "gh-rest", version, about = "Query GitHub REST resources")]
struct Cli {
	/// Output shape: raw, json or typed
	#[arg(long, global = true, default_value = "typed")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Show one commit by SHA, branch or tag
	Commit { repo: String, reference: String },
	/// List commits
	Commits {
		repo: String,
		#[arg(long)]
		per_page: Option<u32>,
		#[arg(long)]
		page: Option<u32>,
	},
	/// List releases
	Releases {
		repo: String,
		#[arg(long)]
		per_page: Option<u32>,
		#[arg(long)]
		page: Option<u32>,
	},
	/// Show the latest release
	LatestRelease { repo: String },
	/// List dependabot alerts of a repository
	DependabotAlerts {
		repo: String,
		/// auto_dismissed, dismissed, fixed or open
		#[arg(long)]
		state: Option<String>,
	},
	/// List deployment branch policies of an environment
	BranchPolicies { repo: String, environment: String },
}

fn page_params(per_page: Option<u32>, page: Option<u32>) -> Option<Params> {
	let params = per_page
		.map(|v| ("per_page", v))
		.into_iter()
		.chain(page.map(|v| ("page", v)))
		.collect::<Params>();
	if params.is_empty() {
		None
	} else {
		Some(params)
	}
}

fn print<T: Debug>(formatted: Formatted<T>) {
	match formatted {
		Formatted::Raw(text) => println!("{}", text),
		Formatted::Json(value) => println!("{:#}", value),
		Formatted::Typed(value) => println!("{:#?}", value),
	}
}

/// Prints a successful response. Failed calls were already logged by the
/// client that made them.
fn finish<T: Debug>(result: Result<Formatted<T>>) -> bool {
	match result {
		Ok(formatted) => {
			print(formatted);
			true
		}
		Err(_) => false,
	}
}

/// Whether the request succeeded. Errors returned here happened before any
/// request was sent.
async fn run(cli: Cli) -> Result<bool> {
	let config = ClientConfig::from_env()?;
	let github = Github::new(&config)?;
	let format = cli.format;

	match cli.command {
		Command::Commit { repo, reference } => {
			let repo = repo.parse::<RepoName>()?;
			let result =
				github.commits.get_as(&repo, &reference, None, format).await;
			Ok(finish(result))
		}
		Command::Commits {
			repo,
			per_page,
			page,
		} => {
			let repo = repo.parse::<RepoName>()?;
			let result = github
				.commits
				.list_as(&repo, page_params(per_page, page), format)
				.await;
			Ok(finish(result))
		}
		Command::Releases {
			repo,
			per_page,
			page,
		} => {
			let repo = repo.parse::<RepoName>()?;
			let result = github
				.releases
				.list_as(&repo, page_params(per_page, page), format)
				.await;
			Ok(finish(result))
		}
		Command::LatestRelease { repo } => {
			let repo = repo.parse::<RepoName>()?;
			let result = github.releases.latest_as(&repo, format).await;
			Ok(finish(result))
		}
		Command::DependabotAlerts { repo, state } => {
			let repo = repo.parse::<RepoName>()?;
			let params = match state {
				Some(state) => Some(
					Params::new()
						.with("state", state.parse::<DependabotAlertState>()?),
				),
				None => None,
			};
			let result = github
				.dependabot_alerts
				.list_for_repo_as(&repo, params, format)
				.await;
			Ok(finish(result))
		}
		Command::BranchPolicies { repo, environment } => {
			let repo = repo.parse::<RepoName>()?;
			let result = github
				.branch_policies
				.list_as(&repo, &environment, None, format)
				.await;
			Ok(finish(result))
		}
	}
}

#[tokio::main]
async fn main() {
	dotenv::dotenv().ok();
	let cli = Cli::parse();
	logging::init(
		dotenv::var("LOG_FORMAT")
			.map(|f| f == "json")
			.unwrap_or(false),
	);

	match run(cli).await {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(e) => {
			log::error!("{}", e);
			std::process::exit(1);
		}
	}
}
