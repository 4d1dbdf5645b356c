//! Rendering of emission units as source text.

mod go;

pub use go::{GoEmitter, WXGO_IMPORT};

use chrono::{DateTime, Utc};

use crate::model::EmissionUnit;

/// Where generated text came from, rendered as a comment header.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Name of the generating tool.
    pub tool: String,
    /// Source file name as given on the command line.
    pub source: String,
    pub generated_at: DateTime<Utc>,
}

impl Provenance {
    pub fn new(tool: impl Into<String>, source: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            tool: tool.into(),
            source: source.into(),
            generated_at,
        }
    }
}

/// Common trait for source emitters.
///
/// Emitters are pure: resolved units are already validated, so rendering
/// cannot fail and performs no I/O.
pub trait Emitter {
    /// Target language name.
    fn target_name(&self) -> &'static str;

    /// Render all units into one source file, in the given order.
    fn emit(&self, units: &[EmissionUnit], provenance: &Provenance) -> String;
}
