//! Error types for document generation

use thiserror::Error;

use crate::registry::ComponentKind;

/// Errors that abort a document build
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The schema converter broke its contract by returning a `$ref`
    /// where a concrete schema was required
    #[error("schema converter returned a reference where a concrete {kind} schema was required")]
    UnexpectedReference { kind: ComponentKind },

    /// A registration already exists for this identity
    #[error("{kind} component `{name}` is already registered for this definition")]
    AlreadyRegistered { kind: ComponentKind, name: String },

    /// Two different definitions claim the same component name
    #[error("{kind} component name `{name}` is claimed by two different definitions")]
    DuplicateComponentName { kind: ComponentKind, name: String },

    #[error("response key `{0}` is a specification extension but holds a response definition")]
    ExtensionNotLiteral(String),

    #[error("response key `{0}` holds a literal value but is not a specification extension")]
    UnexpectedLiteral(String),

    /// A reserved component name was never materialised
    #[error("{kind} component `{name}` was reserved but never built")]
    UnresolvedPending { kind: ComponentKind, name: String },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
