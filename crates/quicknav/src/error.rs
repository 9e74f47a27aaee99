use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory unreadable: {path}: {source}")]
    DirUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, NavError>;

impl NavError {
    /// Message suitable for the host's transient message surface.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
