use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackofficeError {
    #[error("unknown entity '{0}', expected one of: clients, projects, partners, invoices, documents")]
    UnknownEntity(String),

    #[error("page size {size} is not allowed (allowed: {allowed:?})")]
    InvalidPageSize { size: u32, allowed: Vec<u32> },

    #[error("unknown status '{0}'")]
    UnknownStatus(String),

    #[error("column '{0}' cannot be sorted")]
    UnsortableColumn(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    #[error("action '{0}' is not available for this row")]
    ActionUnavailable(String),

    #[error("another row action is still in progress")]
    ActionBusy,

    #[error("could not load row details: {0}")]
    Target(String),

    #[error("{0} timed out after {1}s")]
    Timeout(String, u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl BackofficeError {
    /// Short category label used as the title of error toasts and modals
    pub fn category(&self) -> &'static str {
        match self {
            BackofficeError::UnknownEntity(_)
            | BackofficeError::InvalidPageSize { .. }
            | BackofficeError::UnknownStatus(_)
            | BackofficeError::UnsortableColumn(_) => "Invalid input",
            BackofficeError::NotFound { .. } => "Not found",
            BackofficeError::ActionUnavailable(_) | BackofficeError::ActionBusy => "Action",
            BackofficeError::Target(_) => "Load failed",
            BackofficeError::Timeout(..) => "Timeout",
            BackofficeError::Io(_)
            | BackofficeError::YamlParse(_)
            | BackofficeError::Json(_)
            | BackofficeError::Config(_)
            | BackofficeError::Url(_) => "Configuration",
            BackofficeError::Api { .. } | BackofficeError::Http(_) => "Remote",
            BackofficeError::Other(_) => "Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_size_message() {
        let err = BackofficeError::InvalidPageSize {
            size: 25,
            allowed: vec![10, 50, 100],
        };
        assert_eq!(
            err.to_string(),
            "page size 25 is not allowed (allowed: [10, 50, 100])"
        );
        assert_eq!(err.category(), "Invalid input");
    }

    #[test]
    fn test_api_error_message() {
        let err = BackofficeError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error (503): upstream unavailable");
        assert_eq!(err.category(), "Remote");
    }
}
