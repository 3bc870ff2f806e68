//! Types shared by every provider module.
//!
//! These are the definitions the primary provider publishes and the
//! [`compat`](crate::compat) layer re-exposes under their legacy flat names.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a provider-defined failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unexpected,
    Unsupported,
    ConfigInvalid,
    NotFound,
    PermissionDenied,
    IsADirectory,
    NotADirectory,
    AlreadyExists,
    RateLimited,
    ConditionNotMatch,
}

impl ErrorKind {
    /// Every kind, in the order the legacy exception list declares them.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::Unexpected,
        ErrorKind::Unsupported,
        ErrorKind::ConfigInvalid,
        ErrorKind::NotFound,
        ErrorKind::PermissionDenied,
        ErrorKind::IsADirectory,
        ErrorKind::NotADirectory,
        ErrorKind::AlreadyExists,
        ErrorKind::RateLimited,
        ErrorKind::ConditionNotMatch,
    ];

    /// Name under which the kind was exported as an exception type.
    pub fn legacy_name(&self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IsADirectory => "IsADirectory",
            ErrorKind::NotADirectory => "NotADirectory",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::ConditionNotMatch => "ConditionNotMatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.legacy_name())
    }
}

/// Error raised by a provider while constructing or probing a handle.
///
/// The router never rewrites these; callers see the provider's own kind,
/// message and context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}{}", format_context(.context))]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: Vec<(String, String)>,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Attaches a key/value pair describing where the error happened.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn format_context(context: &[(String, String)]) -> String {
    if context.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = context.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!(" ({})", pairs.join(", "))
}

/// Operations a service supports once a handle is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub read: bool,
    pub write: bool,
    pub list: bool,
    pub stat: bool,
    pub delete: bool,
    pub presign: bool,
}

impl Capability {
    pub const FULL: Self = Self {
        read: true,
        write: true,
        list: true,
        stat: true,
        delete: true,
        presign: false,
    };
    pub const OBJECT_STORE: Self = Self {
        read: true,
        write: true,
        list: true,
        stat: true,
        delete: true,
        presign: true,
    };
    pub const KEY_VALUE: Self = Self {
        read: true,
        write: true,
        list: false,
        stat: true,
        delete: true,
        presign: false,
    };
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
        list: true,
        stat: true,
        delete: false,
        presign: false,
    };
}

/// Kind of entry a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryMode {
    File,
    Dir,
    Unknown,
}

impl EntryMode {
    pub fn is_file(&self) -> bool {
        matches!(self, EntryMode::File)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryMode::Dir)
    }
}

/// Metadata of a single path as reported by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub mode: EntryMode,
    pub content_length: u64,
    pub etag: Option<String>,
    pub last_modified: Option<SystemTime>,
}

impl Metadata {
    pub fn new(mode: EntryMode) -> Self {
        Self {
            mode,
            content_length: 0,
            etag: None,
            last_modified: None,
        }
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = content_length;
        self
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn is_file(&self) -> bool {
        self.mode.is_file()
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}

/// A path returned by listing, together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub metadata: Metadata,
}

impl Entry {
    pub fn new(path: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    /// Last path segment; directories keep their trailing `/`.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        let start = trimmed.rfind('/').map_or(0, |i| i + 1);
        &self.path[start..]
    }
}
