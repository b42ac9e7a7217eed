use camino::Utf8PathBuf;

/// User-facing failures of the tool.
///
/// These convert into [`ohno::AppError`] with `?` at the command layer.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The repository to analyze is malformed or could not be determined.
    #[error("invalid repository '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Pull requests could not be retrieved from the hosting API.
    #[error("could not retrieve pull requests for '{repo}': {reason}")]
    RetrievalFailure { repo: String, reason: String },

    /// A report file could not be written.
    #[error("could not write '{path}': {reason}")]
    PersistenceFailure { path: Utf8PathBuf, reason: String },
}

impl Failure {
    pub fn invalid_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn retrieval(repo: impl ToString, reason: impl Into<String>) -> Self {
        Self::RetrievalFailure {
            repo: repo.to_string(),
            reason: reason.into(),
        }
    }

    pub fn persistence(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
