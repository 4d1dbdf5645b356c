//! Code generation from wxGlade documents to wxGo source.
//!
//! This crate resolves the windows of a `.wxg` document against a registry
//! of widget descriptors and renders them as Go code for the wxGo binding.
//!
//! # Pipeline
//!
//! - [`WidgetRegistry`] maps each object's `base` to a [`Descriptor`]
//! - [`Resolver`] walks every top-level window breadth-first and produces
//!   one [`EmissionUnit`] per window
//! - [`GoEmitter`] renders the units as a Go source file
//!
//! # Example
//!
//! ```
//! use wxg_codegen::{generate, ConvertOptions};
//!
//! let source = r#"<application>
//!     <object class="Hello" name="hello" base="EditFrame"><title>Hi</title></object>
//! </application>"#;
//! let code = generate(source, "hello.wxg", &ConvertOptions::default(), chrono::Utc::now())?;
//! assert!(code.contains("func initHello(handler HelloEvents) *Hello {"));
//! # Ok::<(), wxg_codegen::CodegenError>(())
//! ```

pub mod convert;
pub mod emit;
pub mod error;
pub mod literal;
pub mod model;
pub mod registry;
pub mod resolve;

pub use convert::{convert_file, generate, resolve_source, ConvertOptions};
pub use emit::{Emitter, GoEmitter, Provenance};
pub use error::{CodegenError, Result};
pub use model::{ConstructionEntry, EmissionUnit, EventBinding, LayoutChild, LayoutEntry, Member, PropertyEntry};
pub use registry::{Descriptor, WidgetRegistry};
pub use resolve::Resolver;
