//! Document-to-source pipeline and output writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::emit::{Emitter, GoEmitter, Provenance, WXGO_IMPORT};
use crate::error::{CodegenError, Result};
use crate::model::EmissionUnit;
use crate::registry::WidgetRegistry;
use crate::resolve::Resolver;

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Go package of the generated file.
    pub package_name: String,
    /// Import path of the wxGo `wx` package.
    pub wx_import: String,
    /// Tool name written into the provenance header.
    pub tool_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            package_name: "main".to_string(),
            wx_import: WXGO_IMPORT.to_string(),
            tool_name: "wxg-to-go".to_string(),
        }
    }
}

impl ConvertOptions {
    fn emitter(&self) -> GoEmitter {
        GoEmitter::with_package(&self.package_name).wx_import(&self.wx_import)
    }
}

/// Parse and resolve a document against the wxGo catalogue.
pub fn resolve_source(source: &str) -> Result<Vec<EmissionUnit>> {
    let doc = wxg_dom::parse_document(source)?;
    let registry = WidgetRegistry::wxgo();
    Resolver::new(&registry).resolve_document(&doc)
}

/// Convert document text to Go source.
pub fn generate(
    source: &str,
    source_name: &str,
    options: &ConvertOptions,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let units = resolve_source(source)?;
    let provenance = Provenance::new(&options.tool_name, source_name, generated_at);
    Ok(options.emitter().emit(&units, &provenance))
}

/// Convert `input` into `output`.
///
/// The output is rendered fully in memory and written through a temporary
/// file in the output directory, so a failed run leaves no partial file.
/// Without `overwrite`, an existing output is never replaced.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions, overwrite: bool) -> Result<()> {
    let source = fs::read_to_string(input)?;
    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let code = generate(&source, &source_name, options, Utc::now())?;
    write_atomic(output, code.as_bytes(), overwrite)?;

    log::info!("wrote {} ({} bytes)", output.display(), code.len());
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8], overwrite: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;

    let persisted = if overwrite {
        file.persist(path)
    } else {
        file.persist_noclobber(path)
    };
    persisted.map_err(|err| {
        if err.error.kind() == io::ErrorKind::AlreadyExists {
            CodegenError::OutputExists(path.to_path_buf())
        } else {
            CodegenError::Io(err.error)
        }
    })?;
    Ok(())
}
