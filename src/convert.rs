//! End-to-end conversion entry points used by the CLI.

use std::path::Path;

use crate::assemble::{AssembleOptions, Assembly, MissPolicy, assemble};
use crate::assets;
use crate::doc::AssembledDocument;
use crate::emit;
use crate::emit::pdf::{Renderer, render_document};
use crate::error::Result;
use crate::lesson::Lesson;
use crate::lexicon::LexiconIndex;

/// What a conversion run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The output document was written.
    Written {
        /// Whether a miss-report file was produced alongside it.
        misses_written: bool,
    },
    /// The exit policy hit a lookup miss; no file was touched.
    Aborted { lesson: String, word: String },
}

/// Build the wordbook and write it as a standalone HTML document.
pub fn convert_to_html(
    index: &dyn LexiconIndex,
    lessons: &[Lesson],
    dict_dir: &Path,
    out_path: &Path,
    policy: MissPolicy,
) -> Result<RunOutcome> {
    let opts = AssembleOptions {
        policy,
        with_toc: true,
    };
    run(index, lessons, dict_dir, out_path, opts, |doc| {
        emit::write_document(doc, out_path)
    })
}

/// Build the wordbook and render it through an external PDF renderer.
///
/// PDF output skips the two-pane navigation; anchors make no sense on paper.
pub fn convert_to_pdf(
    index: &dyn LexiconIndex,
    lessons: &[Lesson],
    dict_dir: &Path,
    out_path: &Path,
    policy: MissPolicy,
    renderer: &dyn Renderer,
) -> Result<RunOutcome> {
    let opts = AssembleOptions {
        policy,
        with_toc: false,
    };
    run(index, lessons, dict_dir, out_path, opts, |doc| {
        render_document(doc, renderer, out_path)
    })
}

fn run(
    index: &dyn LexiconIndex,
    lessons: &[Lesson],
    dict_dir: &Path,
    out_path: &Path,
    opts: AssembleOptions,
    write: impl FnOnce(&AssembledDocument) -> Result<()>,
) -> Result<RunOutcome> {
    match assemble(index, lessons, &opts)? {
        Assembly::Aborted { lesson, word } => Ok(RunOutcome::Aborted { lesson, word }),
        Assembly::Complete { mut doc, misses } => {
            doc.stylesheet =
                assets::resolve_stylesheet(&doc.head, dict_dir, index, opts.with_toc)?;
            let out_dir = out_path.parent().unwrap_or_else(|| Path::new("."));
            assets::extract_media(&mut doc, index, out_dir)?;
            write(&doc)?;
            let misses_written = emit::write_miss_report(&misses, out_path)?;
            Ok(RunOutcome::Written { misses_written })
        }
    }
}
