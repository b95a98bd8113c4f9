//! # wordbook
//!
//! Compile a word curriculum against a packaged dictionary into one
//! navigable document.
//!
//! ## Features
//!
//! - Word lists from JSON, plain text, or xlsx spreadsheets
//! - Opaque dictionary access behind [`LexiconIndex`], with case-insensitive
//!   fallback and `@@@LINK=` redirect resolution
//! - One combined HTML document with a synchronized two-pane table of
//!   contents, merged stylesheet, and recovered media files
//! - PDF output through an external renderer
//! - Configurable handling of words missing from the dictionary
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use wordbook::{FileLexicon, MissPolicy, convert_to_html, load_lessons};
//!
//! let lexicon = FileLexicon::open("dict.json")?;
//! let lessons = load_lessons("curriculum.txt")?;
//! convert_to_html(
//!     &lexicon,
//!     &lessons,
//!     Path::new("."),
//!     Path::new("curriculum.html"),
//!     MissPolicy::Collect,
//! )?;
//! # Ok::<(), wordbook::Error>(())
//! ```

pub mod assemble;
pub mod assets;
pub mod convert;
pub mod doc;
pub mod emit;
pub mod error;
pub mod lesson;
pub mod lexicon;
pub(crate) mod util;

pub use assemble::{AssembleOptions, Assembly, MissPolicy, assemble};
pub use convert::{RunOutcome, convert_to_html, convert_to_pdf};
pub use doc::{AssembledDocument, MissReport};
pub use error::{Error, Result};
pub use lesson::{Lesson, load_lessons};
pub use lexicon::{FileLexicon, LexiconIndex, MemoryLexicon, lookup};
