//! JSON reply envelopes used by handlers and the default deny responder.

use serde::{Deserialize, Serialize};

/// Uniform response envelope: business code, message, optional payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::status(200, message)
    }

    pub fn fail400(message: impl Into<String>) -> Self {
        Self::status(400, message)
    }

    pub fn fail401(message: impl Into<String>) -> Self {
        Self::status(401, message)
    }

    pub fn fail403(message: impl Into<String>) -> Self {
        Self::status(403, message)
    }

    pub fn fail404(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    pub fn fail500(message: impl Into<String>) -> Self {
        Self::status(500, message)
    }

    fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Paged list payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paged<T> {
    pub current: u64,
    pub size: u64,
    pub total: u64,
    pub pages: u64,
    pub records: Option<Vec<T>>,
}

impl<T> Paged<T> {
    pub fn new(current: u64, size: u64, total: u64, records: Vec<T>) -> Self {
        let pages = if size == 0 { 1 } else { total.div_ceil(size).max(1) };
        Self {
            current,
            size,
            total,
            pages,
            records: Some(records),
        }
    }

    pub fn no_data() -> Self {
        Self::default()
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            current: 1,
            size: 20,
            total: 0,
            pages: 1,
            records: None,
        }
    }
}
