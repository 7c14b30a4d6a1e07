use std::path::PathBuf;

use thiserror::Error;

pub type Result<A> = std::result::Result<A, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to reset output directory `{path}`: `{source}`")]
    ResetError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read config file `{path}`: `{source}`")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse yaml in config file `{name}`: `{source}`")]
    SerdeError {
        name: String,
        source: serde_yml::Error,
    },
    #[error("Failed to read template `{path}`: `{source}`")]
    TemplateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create output directory `{path}` for config `{config}`: `{source}`")]
    PageDirError {
        config: String,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write `{path}`: `{source}`")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid site configuration: `{0}`")]
    SiteConfigError(Box<figment::Error>),
    #[error("Encountered io error: `{0}`")]
    IOError(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<figment::Error> for Error {
    fn from(value: figment::Error) -> Self {
        Self::SiteConfigError(Box::new(value))
    }
}
