use shared::ConfigError;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum DragError {
    #[error("no global `window` exists")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("document has no body")]
    MissingBody,
    #[error("DOM operation '{operation}' failed: {message}")]
    Dom {
        operation: &'static str,
        message: String,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DragError {
    /// Wraps a rejected DOM call, keeping whatever text the JS error carried
    pub fn dom(operation: &'static str, error: JsValue) -> Self {
        let message = error
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&error, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{error:?}"));
        Self::Dom { operation, message }
    }
}

/// `map_err` shorthand for DOM results
pub(crate) trait DomResultExt<T> {
    fn dom_context(self, operation: &'static str) -> Result<T, DragError>;
}

impl<T> DomResultExt<T> for Result<T, JsValue> {
    fn dom_context(self, operation: &'static str) -> Result<T, DragError> {
        self.map_err(|error| DragError::dom(operation, error))
    }
}
