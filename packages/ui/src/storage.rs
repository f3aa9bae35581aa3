//! Shared constructors for the session store and API client.
//!
//! Returns the platform-appropriate backends:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStore`]
//! - **Native** (tests, tooling): an in-process [`store::MemoryStore`]

use api::{ApiClient, ReqwestTransport};
use store::{ClientConfig, Session, SessionStore};

/// The portal's configuration: compiled-in backend origin and key prefix,
/// overridden natively by `medsync.toml` in the working directory.
pub fn client_config() -> ClientConfig {
    #[cfg(target_arch = "wasm32")]
    {
        ClientConfig::default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::current_dir()
            .map(|dir| ClientConfig::load(&dir))
            .unwrap_or_default()
    }
}

/// Create a session store over the platform's persistent storage.
pub fn make_session_store() -> SessionStore<impl store::KeyValueStore> {
    let config = client_config();
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::with_config(store::LocalStore::new(), &config.storage)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        SessionStore::with_config(store::MemoryStore::new(), &config.storage)
    }
}

/// API client authenticated as `session` (anonymous when the token is empty).
pub fn make_api(session: &Session) -> ApiClient<ReqwestTransport> {
    api::make_client(&client_config(), session)
}
