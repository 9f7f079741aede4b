use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The browser rejected an animation or style call.
    #[error("DOM call failed: {0}")]
    Dom(String),

    /// Reported by an effect callback.
    #[error("motion effect failed: {0}")]
    Callback(String),

    /// Activation requested after the call site was torn down.
    #[error("motion call site already torn down")]
    TornDown,
}

impl From<JsValue> for MotionError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        MotionError::Dom(message)
    }
}

pub type MotionResult<T> = Result<T, MotionError>;
