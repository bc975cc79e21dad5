//! # Errors
//!
//! Structured errors for the edge layer.
//! - consistent status codes + class names
//! - can be carried through `anyhow::Error`
//! - transport-agnostic (the axum crate decides how to serialize)
//!
//! With feature `serde`, `data` is a `serde_json::Value` and `to_json()` is
//! available.

use std::fmt;

use anyhow::Error as AnyError;

pub type CampusResult<T> = std::result::Result<T, AnyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,     // 404
    GeneralError,     // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::GeneralError => "general-error",
        }
    }
}

#[cfg(feature = "serde")]
pub type ErrorValue = serde_json::Value;

#[cfg(not(feature = "serde"))]
pub type ErrorValue = std::sync::Arc<dyn std::any::Any + Send + Sync>;

/// A structured error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct CampusError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<ErrorValue>,
    pub source: Option<AnyError>,
}

impl CampusError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: ErrorValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Keep a `CampusError` as-is, wrap anything else as `GeneralError`.
    pub fn normalize(err: AnyError) -> CampusError {
        match err.downcast::<CampusError>() {
            Ok(e) => e,
            Err(other) => {
                CampusError::new(ErrorKind::GeneralError, other.to_string()).with_source(other)
            }
        }
    }

    /// Copy without the inner `source`, suitable for returning to clients.
    pub fn sanitize_for_client(&self) -> CampusError {
        CampusError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            source: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for CampusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(feature = "serde")]
impl CampusError {
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        base
    }
}

/// Return early with a `CampusError`.
#[macro_export]
macro_rules! bail_campus {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::CampusError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::CampusError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_campus_errors() {
        let err = CampusError::not_found("no such page").into_anyhow();
        let normalized = CampusError::normalize(err);
        assert_eq!(normalized.kind, ErrorKind::NotFound);
        assert_eq!(normalized.code(), 404);
    }

    #[test]
    fn normalize_wraps_foreign_errors() {
        let normalized = CampusError::normalize(anyhow::anyhow!("socket closed"));
        assert_eq!(normalized.kind, ErrorKind::GeneralError);
        assert!(normalized.message.contains("socket closed"));
        assert!(normalized.sanitize_for_client().source.is_none());
    }

    fn lookup(found: bool) -> CampusResult<u8> {
        if !found {
            bail_campus!(not_found, "tenant {} has no theme", "oakridge");
        }
        Ok(1)
    }

    #[test]
    fn bail_macro_formats_message() {
        let err = lookup(false).unwrap_err();
        let campus = err.downcast_ref::<CampusError>().unwrap();
        assert_eq!(campus.message, "tenant oakridge has no theme");
    }
}
