use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// 课程安排、周次文本格式错误，`text` 为原始文本
    #[error("Invalid format '{text}': {reason}")]
    Format { text: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date/time parsing failed: {0}")]
    DateTime(#[from] chrono::ParseError),
}

impl Error {
    pub(crate) fn format(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
