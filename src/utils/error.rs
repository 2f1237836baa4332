use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ToolError {
    /// 提供給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::IoError(_) => "Check that the path exists and is readable/writable",
            ToolError::ImageError(_) => "Make sure the input is a valid image (e.g. .ico)",
            ToolError::SerializationError(_) => "Report this as a bug",
            ToolError::ConfigValidationError { .. } => "Check the TOML syntax of the config file",
            ToolError::InvalidConfigValueError { .. } => {
                "Fix the offending value in the config file or command line"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ico");
        let err: ToolError = io.into();
        assert!(matches!(err, ToolError::IoError(_)));
        assert!(err.to_string().contains("missing.ico"));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ToolError::InvalidConfigValueError {
            field: "routes.route_marker".to_string(),
            value: "".to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '' for 'routes.route_marker': Value cannot be empty or whitespace-only"
        );
    }
}
