use gh_rest::{error::Error, OutputFormat, Params};
use httptest::{matchers::*, responders::*, Expectation, Server};
use reqwest::StatusCode;
use serde_json::json;

mod helpers;

use helpers::{github, unreachable_github};

#[tokio::test]
async fn list_releases_paginated() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("GET", "/repos/o/r/releases"),
			request::query("per_page=10&page=2"),
		])
		.respond_with(json_encoded(json!([
			{ "id": 2, "tag_name": "v2.0.0" },
			{ "id": 1, "tag_name": "v1.0.0", "assets": [{ "id": 7, "name": "app.tar.gz" }] },
		]))),
	);

	let github = github(&github_api);
	let releases = github
		.releases
		.list(
			&("o", "r"),
			Some(Params::new().with("per_page", 10).with("page", 2)),
		)
		.await
		.unwrap();

	assert_eq!(releases.len(), 2);
	assert_eq!(releases[0].tag_name.as_deref(), Some("v2.0.0"));
	assert_eq!(releases[1].assets[0].id, 7);
}

#[tokio::test]
async fn latest_release_as_json() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"GET",
			"/repos/o/r/releases/latest",
		))
		.respond_with(json_encoded(json!({ "id": 3, "name": "Third" }))),
	);

	let github = github(&github_api);
	let latest = github
		.releases
		.latest_as(&("o", "r"), OutputFormat::Json)
		.await
		.unwrap();

	assert_eq!(latest.as_json(), Some(&json!({ "id": 3, "name": "Third" })));
}

#[tokio::test]
async fn create_release_injects_tag_name() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("POST", "/repos/o/r/releases"),
			request::body(json_decoded(eq(json!({ "tag_name": "v1.0.0" })))),
		])
		.respond_with(json_encoded(json!({ "id": 1, "tag_name": "v1.0.0" }))),
	);
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("POST", "/repos/o/r/releases"),
			request::body(json_decoded(eq(json!({
				"name": "First",
				"prerelease": true,
				"tag_name": "v1.1.0",
			})))),
		])
		.respond_with(json_encoded(json!({
			"id": 2,
			"tag_name": "v1.1.0",
			"prerelease": true,
		}))),
	);

	let github = github(&github_api);
	let release = github
		.releases
		.create(&("o", "r"), "v1.0.0", None)
		.await
		.unwrap();
	assert_eq!(release.id, 1);

	let release = github
		.releases
		.create(
			&("o", "r"),
			"v1.1.0",
			Some(Params::new().with("name", "First").with("prerelease", true)),
		)
		.await
		.unwrap();
	assert_eq!(release.prerelease, Some(true));
}

#[tokio::test]
async fn update_release_patches_given_fields() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("PATCH", "/repos/o/r/releases/5"),
			request::body(json_decoded(eq(json!({ "draft": false })))),
		])
		.respond_with(json_encoded(json!({ "id": 5, "draft": false }))),
	);

	let github = github(&github_api);
	let release = github
		.releases
		.update(&("o", "r"), 5, Some(Params::new().with("draft", false)))
		.await
		.unwrap();
	assert_eq!(release.draft, Some(false));
}

#[tokio::test]
async fn generate_notes() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("POST", "/repos/o/r/releases/generate-notes"),
			request::body(json_decoded(eq(json!({
				"previous_tag_name": "v1.0.0",
				"tag_name": "v1.1.0",
			})))),
		])
		.respond_with(json_encoded(json!({
			"name": "v1.1.0",
			"body": "## What's Changed",
		}))),
	);

	let github = github(&github_api);
	let notes = github
		.releases
		.generate_notes(
			&("o", "r"),
			"v1.1.0",
			Some(Params::new().with("previous_tag_name", "v1.0.0")),
		)
		.await
		.unwrap();
	assert_eq!(notes.body.as_deref(), Some("## What's Changed"));
}

#[tokio::test]
async fn delete_release_on_no_content() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"DELETE",
			"/repos/o/r/releases/5",
		))
		.respond_with(status_code(204)),
	);

	let github = github(&github_api);
	assert!(github.releases.delete(&("o", "r"), 5).await.is_ok());
	assert!(github.releases.client().last_error().is_none());
}

#[tokio::test]
async fn delete_missing_release_records_error() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"DELETE",
			"/repos/o/r/releases/404",
		))
		.respond_with(status_code(404).body(
			r#"{ "message": "Not Found", "documentation_url": "https://docs.github.com" }"#,
		)),
	);

	let github = github(&github_api);
	let err = github.releases.delete(&("o", "r"), 404).await.unwrap_err();
	assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

	let client = github.releases.client();
	let last = client.last_error().unwrap();
	assert_eq!(last.status, Some(StatusCode::NOT_FOUND));
	assert_eq!(
		client.last_error_json().unwrap()["message"],
		json!("Not Found")
	);
	assert!(client.last_error_text().unwrap().contains("Not Found"));
}

#[tokio::test]
async fn delete_with_content_is_not_a_success() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"DELETE",
			"/repos/o/r/releases/assets/8",
		))
		.respond_with(status_code(200).body(r#"{ "id": 8 }"#)),
	);

	let github = github(&github_api);
	let err = github
		.releases
		.delete_asset(&("o", "r"), 8)
		.await
		.unwrap_err();
	assert!(matches!(err, Error::UnexpectedBody { .. }));
	assert_eq!(
		github.releases.client().last_error_json(),
		Some(json!({ "id": 8 }))
	);
}

#[tokio::test]
async fn delete_without_server_fails_quietly() {
	let github = unreachable_github();
	let err = github.releases.delete(&("o", "r"), 5).await.unwrap_err();
	assert!(matches!(err, Error::Http { .. }));
	assert!(github.releases.client().last_error().is_some());
}

#[tokio::test]
async fn list_assets_of_a_release() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"GET",
			"/repos/o/r/releases/5/assets",
		))
		.respond_with(json_encoded(json!([
			{ "id": 7, "name": "app.tar.gz", "size": 1024 },
			{ "id": 8, "name": "app.zip" },
		]))),
	);

	let github = github(&github_api);
	let assets = github.releases.assets(&("o", "r"), 5, None).await.unwrap();

	assert_eq!(assets.len(), 2);
	assert_eq!(assets[0].size, Some(1024));
	assert_eq!(assets[1].name.as_deref(), Some("app.zip"));
}

#[tokio::test]
async fn get_and_rename_an_asset() {
	let github_api = Server::run();
	github_api.expect(
		Expectation::matching(request::method_path(
			"GET",
			"/repos/o/r/releases/assets/7",
		))
		.respond_with(json_encoded(json!({
			"id": 7,
			"name": "app.tar.gz",
			"state": "uploaded",
		}))),
	);
	github_api.expect(
		Expectation::matching(all_of![
			request::method_path("PATCH", "/repos/o/r/releases/assets/7"),
			request::body(json_decoded(eq(json!({
				"name": "app-linux.tar.gz",
				"label": "Linux build",
			})))),
		])
		.respond_with(json_encoded(json!({
			"id": 7,
			"name": "app-linux.tar.gz",
			"label": "Linux build",
		}))),
	);

	let github = github(&github_api);
	let asset = github.releases.asset(&("o", "r"), 7).await.unwrap();
	assert_eq!(asset.state.as_deref(), Some("uploaded"));

	let asset = github
		.releases
		.update_asset(
			&("o", "r"),
			asset.id,
			Some(
				Params::new()
					.with("name", "app-linux.tar.gz")
					.with("label", "Linux build"),
			),
		)
		.await
		.unwrap();
	assert_eq!(asset.label.as_deref(), Some("Linux build"));
}
