use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vialivre_renderer::RenderError;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("Failed to write progress output: {0}")]
    Output(#[source] io::Error),
}

impl IconError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Io {
            path: path.into(),
            source,
        }
    }
}
