#![allow(dead_code)]

use std::net::TcpListener;

use gh_rest::{ClientConfig, Github};
use httptest::Server;

pub const TOKEN: &str = "does not matter";

pub fn config(github_api: &Server) -> ClientConfig {
	ClientConfig::new(TOKEN).with_api_url(github_api.url("").to_string())
}

pub fn github(github_api: &Server) -> Github {
	Github::new(&config(github_api)).unwrap()
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_github() -> Github {
	let port = {
		let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
		listener.local_addr().unwrap().port()
	};
	Github::new(
		&ClientConfig::new(TOKEN).with_api_url(format!("http://127.0.0.1:{}", port)),
	)
	.unwrap()
}
