use std::fmt;

/// The blog service call being made, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    GetPost,
    UploadImage,
    SaveDraft,
    Publish,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ListPosts => "fetch blogs",
            Self::GetPost => "fetch blog",
            Self::UploadImage => "upload image",
            Self::SaveDraft => "save draft",
            Self::Publish => "publish blog",
            Self::Delete => "delete blog",
        };
        f.write_str(label)
    }
}

/// Errors from the blog service client.
///
/// Non-2xx responses are reported as [`ApiError::RequestFailed`] without
/// looking at the body. Values are `Clone + Eq` so they can ride inside UI
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to {operation}: request failed ({status})")]
    RequestFailed { operation: Operation, status: u16 },

    #[error("Failed to {operation}: {message}")]
    Transport {
        operation: Operation,
        message: String,
    },

    #[error("Failed to {operation}: unreadable response ({message})")]
    Decode {
        operation: Operation,
        message: String,
    },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(super) fn from_reqwest(operation: Operation, err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                operation,
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                operation,
                message: err.to_string(),
            }
        }
    }

    /// The operation that failed, when the error came from a service call.
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::RequestFailed { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::Io { .. } | Self::Config(_) => None,
        }
    }
}
