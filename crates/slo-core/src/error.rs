use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("unknown question category: {0}")]
    UnknownCategory(String),

    #[error("unknown option '{option}' for category '{category}'")]
    UnknownOption { category: String, option: String },

    #[error("unknown export format: {0} (expected openslo, sloth, markdown or pdf)")]
    UnknownFormat(String),

    #[error("step '{0}' needs at least one selection before moving on")]
    StepIncomplete(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
