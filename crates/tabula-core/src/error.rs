use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is not an object")]
    InvalidShape(String),

    #[error("{0} already exists in schema")]
    DuplicateTable(String),

    #[error("{0} does not exist in schema")]
    UnknownTable(String),

    #[error("missing required option '{0}'")]
    MissingOption(&'static str),

    #[error("filter expects predicate/expression pairs, got {0} argument(s)")]
    FilterArity(usize),

    #[error("operation would emit more than {limit} rows")]
    ResourceLimit { limit: usize },

    #[error("operator error: {0}")]
    Operator(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failure classes callers can match on without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Row data that is not object-shaped.
    InvalidInput,
    /// A table name that is already registered.
    NameCollision,
    /// A table name that is not registered.
    UnknownTable,
    /// Wrong arity or a missing required option.
    MalformedCall,
    /// A configured limit was hit.
    Limit,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidShape(_) => ErrorKind::InvalidInput,
            Error::DuplicateTable(_) => ErrorKind::NameCollision,
            Error::UnknownTable(_) => ErrorKind::UnknownTable,
            Error::MissingOption(_)
            | Error::FilterArity(_)
            | Error::Operator(_) => ErrorKind::MalformedCall,
            Error::ResourceLimit { .. } => ErrorKind::Limit,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::UnknownTable("X".into()).kind(),
            ErrorKind::UnknownTable
        );
        assert_eq!(Error::FilterArity(3).kind(), ErrorKind::MalformedCall);
        assert_eq!(
            Error::MissingOption("clause").kind(),
            ErrorKind::MalformedCall
        );
        assert_eq!(
            Error::DuplicateTable("T".into()).to_string(),
            "T already exists in schema"
        );
    }
}
