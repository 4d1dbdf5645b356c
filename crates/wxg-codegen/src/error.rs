//! Error types for code generation.

use std::path::PathBuf;

use thiserror::Error;
use wxg_dom::DocumentError;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort a conversion run.
///
/// Element context is carried as `base`/`class`/`name` where the failing
/// element has them; wrapper elements such as `sizeritem` carry a class only.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// No descriptor is registered for the element's `base`.
    #[error("Unknown widget type '{base}' (class '{class}', name '{name}'); add a descriptor for it to the registry")]
    UnknownWidgetType {
        base: String,
        class: String,
        name: String,
    },

    /// A converter rejected the raw value of a field.
    #[error("Cannot convert <{tag} class='{class}'> field '{field}' value {raw:?}: {message}")]
    ValueConversion {
        tag: String,
        class: String,
        field: String,
        raw: String,
        message: String,
    },

    /// A required value resolved to nothing.
    #[error("Field '{field}' of <{tag} class='{class}'> resolved to an empty value (raw value: {raw:?})")]
    EmptyRequiredValue {
        tag: String,
        class: String,
        field: String,
        raw: Option<String>,
    },

    /// Container children do not match the container's conventions.
    #[error("Malformed container '{name}' (class '{class}'): {reason}")]
    MalformedContainer {
        class: String,
        name: String,
        reason: String,
    },

    /// Two objects of one window share a name, or an object is named like
    /// the window's own field.
    #[error("Duplicate member '{name}' (class '{class}') in window '{window}'")]
    DuplicateMember {
        class: String,
        name: String,
        window: String,
    },

    /// The document lacks the structure every wxGlade file has.
    #[error("Invalid document structure: {0}")]
    InvalidDocument(String),

    /// The XML could not be read.
    #[error("Cannot read document: {0}")]
    Document(#[from] DocumentError),

    /// The output file appeared while overwriting was not allowed.
    #[error("Output file '{}' already exists", .0.display())]
    OutputExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
