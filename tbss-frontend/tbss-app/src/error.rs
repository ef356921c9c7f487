use std::{error, fmt::Display, rc::Rc};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("Suggestion endpoint returned status {0}")]
    Status(u16),
    #[error("JSON {0}")]
    Json(String),
    #[error("System error {0}")]
    SystemError(#[from] SystemError),
    #[error("Element {0} is missing from the page")]
    MissingElement(String),
}

/// This error type implements From's for the non clonable error types and keeps them behind an Rc
#[derive(Clone, Debug)]
pub enum SystemError {
    Message(String),
    #[cfg(feature = "ssr")]
    ReqwestError(Rc<reqwest::Error>),
    #[cfg(feature = "hydrate")]
    GlooError(Rc<gloo_net::Error>),
    Anyhow(Rc<anyhow::Error>),
}

impl From<anyhow::Error> for SystemError {
    fn from(value: anyhow::Error) -> Self {
        Self::Anyhow(Rc::new(value))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::SystemError(value.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for SystemError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(Rc::new(value))
    }
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::SystemError(value.into())
    }
}

#[cfg(feature = "hydrate")]
impl From<gloo_net::Error> for SystemError {
    fn from(value: gloo_net::Error) -> Self {
        Self::GlooError(Rc::new(value))
    }
}

#[cfg(feature = "hydrate")]
impl From<gloo_net::Error> for AppError {
    fn from(value: gloo_net::Error) -> Self {
        Self::SystemError(value.into())
    }
}

/// JS exceptions only carry a debug representation we can keep around
#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::SystemError(SystemError::Message(format!("{value:?}")))
    }
}

impl Display for SystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemError::Message(message) => write!(f, "{}", message),
            #[cfg(feature = "ssr")]
            SystemError::ReqwestError(reqwest) => write!(f, "{}", reqwest),
            #[cfg(feature = "hydrate")]
            SystemError::GlooError(g) => write!(f, "{}", g),
            SystemError::Anyhow(anyhow) => write!(f, "{}", anyhow),
        }
    }
}

impl error::Error for SystemError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SystemError::Message(_) => None,
            #[cfg(feature = "ssr")]
            SystemError::ReqwestError(reqwest) => Some(reqwest.as_ref()),
            #[cfg(feature = "hydrate")]
            SystemError::GlooError(gloo) => Some(gloo.as_ref()),
            SystemError::Anyhow(anyhow) => Some(anyhow.root_cause()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
