use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or serializing a [`FoldConfig`](crate::FoldConfig).
pub enum FoldConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing (or serialization) failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("no fold preset for language '{0}'")]
    /// [`FoldConfig::for_language`](crate::FoldConfig::for_language) was given an unknown name.
    UnknownLanguage(String),
}
