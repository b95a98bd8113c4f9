//! Alternate-format output through an external renderer.
//!
//! The document is serialized to a scratch HTML file which is removed on
//! every path, whether the renderer succeeds or not.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use log::info;

use crate::doc::AssembledDocument;
use crate::emit::serialize;
use crate::error::{Error, Result};

/// External document renderer.
pub trait Renderer {
    fn render(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Renderer that shells out to an HTML-to-PDF converter.
pub struct CommandRenderer {
    program: String,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, input: &Path, output: &Path) -> Result<()> {
        info!("rendering {} -> {}", input.display(), output.display());
        let status = Command::new(&self.program).arg(input).arg(output).status()?;
        if !status.success() {
            return Err(Error::Render(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

/// Serialize the document to a scratch file and hand it to the renderer.
///
/// The scratch file lives next to the output so relative media references
/// resolve while rendering.
pub fn render_document(
    doc: &AssembledDocument,
    renderer: &dyn Renderer,
    out_path: &Path,
) -> Result<()> {
    let scratch_dir = out_path.parent().unwrap_or_else(|| Path::new("."));
    let mut scratch = tempfile::Builder::new()
        .prefix("wordbook-")
        .suffix(".html")
        .tempfile_in(scratch_dir)?;
    scratch.write_all(&serialize(doc))?;
    scratch.flush()?;

    let outcome = renderer.render(scratch.path(), out_path);
    let cleanup = scratch.close();
    outcome.and(cleanup.map_err(Error::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::AssembledDocument;

    struct CopyRenderer;

    impl Renderer for CopyRenderer {
        fn render(&self, input: &Path, output: &Path) -> Result<()> {
            std::fs::copy(input, output)?;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _input: &Path, _output: &Path) -> Result<()> {
            Err(Error::Render("renderer unavailable".into()))
        }
    }

    fn scratch_files(dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("wordbook-"))
            })
            .collect()
    }

    #[test]
    fn test_render_writes_output_and_cleans_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.pdf");

        render_document(&AssembledDocument::default(), &CopyRenderer, &out).unwrap();

        let rendered = std::fs::read_to_string(&out).unwrap();
        assert!(rendered.contains("<html>"));
        assert!(scratch_files(dir.path()).is_empty());
    }

    #[test]
    fn test_render_failure_still_cleans_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.pdf");

        let err = render_document(&AssembledDocument::default(), &FailingRenderer, &out)
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(!out.exists());
        assert!(scratch_files(dir.path()).is_empty());
    }
}
