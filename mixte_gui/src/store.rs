//! Session storage for the build target.
//!
//! Native builds keep the record in the configured session file; browser
//! builds use `window.localStorage`.

use mixte_core::Config;

#[cfg(not(target_arch = "wasm32"))]
pub type Store = mixte_core::access::FileStore;

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage as Store;

#[cfg(not(target_arch = "wasm32"))]
pub fn open(config: &Config) -> Store {
    Store::new(config.session_file())
}

#[cfg(target_arch = "wasm32")]
pub fn open(_config: &Config) -> Store {
    Store
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use mixte_core::access::SessionStore;
    use mixte_core::errors::{CalcError, CalcResult};
    use wasm_bindgen::JsValue;

    /// `window.localStorage`, looked up on each access
    #[derive(Debug, Default)]
    pub struct LocalStorage;

    fn storage() -> CalcResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| CalcError::Internal {
            message: "no browser window".to_string(),
        })?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| CalcError::Internal {
                message: "localStorage unavailable".to_string(),
            })
    }

    fn js_error(e: JsValue) -> CalcError {
        CalcError::Internal {
            message: format!("localStorage: {:?}", e),
        }
    }

    impl SessionStore for LocalStorage {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            storage()?.get_item(key).map_err(js_error)
        }

        fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
            storage()?.set_item(key, value).map_err(js_error)
        }

        fn remove(&mut self, key: &str) -> CalcResult<()> {
            storage()?.remove_item(key).map_err(js_error)
        }
    }
}
