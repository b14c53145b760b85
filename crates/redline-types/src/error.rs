use thiserror::Error;

/// Errors produced when loading or validating a document tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("node is missing a `type`")]
    EmptyNodeType,

    #[error("text node is missing its `text` field")]
    MissingText,

    #[error("text node must not have `content`")]
    TextNodeWithContent,

    #[error("`{kind}` node must not carry `text`")]
    UnexpectedText { kind: String },

    #[error("text run found at document root; top-level nodes must be blocks")]
    RunAtRoot,

    #[error("root node must be of type `doc`, got `{kind}`")]
    NotADocument { kind: String },

    #[error("mark is missing a `type`")]
    EmptyMarkName,
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
