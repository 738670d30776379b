use wasm_bindgen::JsValue;

/// Errors surfaced by the settings panel and its browser bindings.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("invalid settings schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("snapshot does not match target type: {0}")]
    Decode(serde_json::Error),
    #[error("settings container not found: #{0}")]
    MissingContainer(String),
    #[error("no browser window or document available")]
    NoDocument,
    #[error("dom error: {0}")]
    Dom(String),
    #[error("settings panel is busy delivering a change")]
    Busy,
}

impl PanelError {
    /// Wrap a raw JS exception thrown by a DOM call.
    #[must_use]
    pub fn dom(err: &JsValue) -> Self {
        Self::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<PanelError> for JsValue {
    fn from(err: PanelError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
