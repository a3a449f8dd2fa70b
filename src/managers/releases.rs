use crate::{
	format::{Formatted, OutputFormat},
	github::*,
	http::Request,
	params::Params,
	Result,
};

use super::repo_path;

resource_manager! {
	/// Releases and release assets of a repository.
	ReleasesManager
}

impl ReleasesManager {
	fn list_request(repo: &impl RepositoryHandle, params: Option<Params>) -> Request {
		Request::get(repo_path(repo, &["releases"])).query(params)
	}

	/// Lists releases, paginated with `per_page`/`page`.
	pub async fn list(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<Release>> {
		self.client.send_list(&Self::list_request(repo, params)).await
	}

	pub async fn list_as(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<Release>>> {
		self.client
			.send_list_as(&Self::list_request(repo, params), format)
			.await
	}

	/// Lists releases across every page.
	pub async fn list_all(
		&self,
		repo: &impl RepositoryHandle,
		params: Option<Params>,
	) -> Result<Vec<Release>> {
		self.client.send_all(&Self::list_request(repo, params)).await
	}

	fn get_request(repo: &impl RepositoryHandle, id: i64) -> Request {
		Request::get(repo_path(repo, &["releases", id.to_string().as_str()]))
	}

	pub async fn get(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
	) -> Result<Release> {
		self.client.send(&Self::get_request(repo, id)).await
	}

	pub async fn get_as(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
		format: OutputFormat,
	) -> Result<Formatted<Release>> {
		self.client.send_as(&Self::get_request(repo, id), format).await
	}

	fn latest_request(repo: &impl RepositoryHandle) -> Request {
		Request::get(repo_path(repo, &["releases", "latest"]))
	}

	/// Returns the latest published full release.
	pub async fn latest(&self, repo: &impl RepositoryHandle) -> Result<Release> {
		self.client.send(&Self::latest_request(repo)).await
	}

	pub async fn latest_as(
		&self,
		repo: &impl RepositoryHandle,
		format: OutputFormat,
	) -> Result<Formatted<Release>> {
		self.client.send_as(&Self::latest_request(repo), format).await
	}

	fn by_tag_request(repo: &impl RepositoryHandle, tag: &str) -> Request {
		Request::get(repo_path(repo, &["releases", "tags", tag]))
	}

	/// Returns the release for a tag name.
	pub async fn by_tag(
		&self,
		repo: &impl RepositoryHandle,
		tag: &str,
	) -> Result<Release> {
		self.client.send(&Self::by_tag_request(repo, tag)).await
	}

	pub async fn by_tag_as(
		&self,
		repo: &impl RepositoryHandle,
		tag: &str,
		format: OutputFormat,
	) -> Result<Formatted<Release>> {
		self.client.send_as(&Self::by_tag_request(repo, tag), format).await
	}

	fn create_request(
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
	) -> Request {
		Request::post(
			repo_path(repo, &["releases"]),
			Params::merged(params, "tag_name", tag_name),
		)
	}

	/// Creates a release for `tag_name`. `params` may set `name`, `body`,
	/// `target_commitish`, `draft`, `prerelease` and the like.
	pub async fn create(
		&self,
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
	) -> Result<Release> {
		self.client
			.send(&Self::create_request(repo, tag_name, params))
			.await
	}

	pub async fn create_as(
		&self,
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Release>> {
		self.client
			.send_as(&Self::create_request(repo, tag_name, params), format)
			.await
	}

	fn update_request(
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
	) -> Request {
		Request::patch(
			repo_path(repo, &["releases", id.to_string().as_str()]),
			params.unwrap_or_default(),
		)
	}

	pub async fn update(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
	) -> Result<Release> {
		self.client
			.send(&Self::update_request(repo, id, params))
			.await
	}

	pub async fn update_as(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Release>> {
		self.client
			.send_as(&Self::update_request(repo, id, params), format)
			.await
	}

	pub async fn delete(&self, repo: &impl RepositoryHandle, id: i64) -> Result<()> {
		self.client
			.delete(&Request::delete(repo_path(
				repo,
				&["releases", id.to_string().as_str()],
			)))
			.await
	}

	fn generate_notes_request(
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
	) -> Request {
		Request::post(
			repo_path(repo, &["releases", "generate-notes"]),
			Params::merged(params, "tag_name", tag_name),
		)
	}

	/// Generates release notes for `tag_name` without creating a release.
	pub async fn generate_notes(
		&self,
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
	) -> Result<ReleaseNotes> {
		self.client
			.send(&Self::generate_notes_request(repo, tag_name, params))
			.await
	}

	pub async fn generate_notes_as(
		&self,
		repo: &impl RepositoryHandle,
		tag_name: &str,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<ReleaseNotes>> {
		self.client
			.send_as(
				&Self::generate_notes_request(repo, tag_name, params),
				format,
			)
			.await
	}

	fn assets_request(
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
	) -> Request {
		Request::get(repo_path(repo, &["releases", id.to_string().as_str(), "assets"]))
			.query(params)
	}

	pub async fn assets(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
	) -> Result<Vec<ReleaseAsset>> {
		self.client
			.send_list(&Self::assets_request(repo, id, params))
			.await
	}

	pub async fn assets_as(
		&self,
		repo: &impl RepositoryHandle,
		id: i64,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<Vec<ReleaseAsset>>> {
		self.client
			.send_list_as(&Self::assets_request(repo, id, params), format)
			.await
	}

	fn asset_path(repo: &impl RepositoryHandle, asset_id: i64) -> String {
		repo_path(repo, &["releases", "assets", asset_id.to_string().as_str()])
	}

	pub async fn asset(
		&self,
		repo: &impl RepositoryHandle,
		asset_id: i64,
	) -> Result<ReleaseAsset> {
		self.client
			.send(&Request::get(Self::asset_path(repo, asset_id)))
			.await
	}

	pub async fn asset_as(
		&self,
		repo: &impl RepositoryHandle,
		asset_id: i64,
		format: OutputFormat,
	) -> Result<Formatted<ReleaseAsset>> {
		self.client
			.send_as(&Request::get(Self::asset_path(repo, asset_id)), format)
			.await
	}

	/// Updates an asset's `name`, `label` or `state`.
	pub async fn update_asset(
		&self,
		repo: &impl RepositoryHandle,
		asset_id: i64,
		params: Option<Params>,
	) -> Result<ReleaseAsset> {
		self.client
			.send(&Request::patch(
				Self::asset_path(repo, asset_id),
				params.unwrap_or_default(),
			))
			.await
	}

	pub async fn update_asset_as(
		&self,
		repo: &impl RepositoryHandle,
		asset_id: i64,
		params: Option<Params>,
		format: OutputFormat,
	) -> Result<Formatted<ReleaseAsset>> {
		self.client
			.send_as(
				&Request::patch(
					Self::asset_path(repo, asset_id),
					params.unwrap_or_default(),
				),
				format,
			)
			.await
	}

	pub async fn delete_asset(
		&self,
		repo: &impl RepositoryHandle,
		asset_id: i64,
	) -> Result<()> {
		self.client
			.delete(&Request::delete(Self::asset_path(repo, asset_id)))
			.await
	}
}
