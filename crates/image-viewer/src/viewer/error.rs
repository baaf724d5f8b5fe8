use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to load '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to save '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("can't save as '{0}'")]
    UnsupportedFormat(String),

    /// Save dialog dismissed, deliberately renders as an empty message
    #[error("")]
    SaveCancelled,

    #[error("no image loaded")]
    NotLoaded,

    #[error("print failed: {0:#}")]
    Print(#[from] anyhow::Error),
}

impl ViewerError {
    /// Whether the shell should tell the user about it
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::SaveCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_save_has_no_message() {
        assert!(ViewerError::SaveCancelled.to_string().is_empty());
        assert!(ViewerError::SaveCancelled.is_silent());
        assert!(!ViewerError::NotLoaded.is_silent());
    }

    #[test]
    fn decode_message_names_the_file() {
        let err = ViewerError::Decode {
            path: PathBuf::from("/tmp/broken.png"),
            source: image::ImageError::IoError(std::io::Error::other("truncated")),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/broken.png"), "{message}");
        assert!(message.contains("truncated"), "{message}");
    }
}
