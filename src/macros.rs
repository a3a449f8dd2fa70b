/// Declares a resource manager that owns its own HTTP client, so managers
/// never share credentials or the last-error slot.
macro_rules! resource_manager {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		pub struct $name {
			client: $crate::http::Client,
		}

		impl $name {
			pub fn new(config: &$crate::config::ClientConfig) -> $crate::Result<Self> {
				Ok(Self {
					client: $crate::http::Client::new(config)?,
				})
			}

			/// The underlying client, for error introspection.
			pub fn client(&self) -> &$crate::http::Client {
				&self.client
			}
		}
	};
}
