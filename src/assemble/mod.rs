//! The document assembler: one pass over the lessons, nested pass over the
//! words, building content and navigation in lockstep.

pub mod fragment;

use log::debug;

use crate::doc::{
    AssembledDocument, ContentSection, MissReport, NavKind, WordEntry, lesson_anchor, word_anchor,
};
use crate::error::Result;
use crate::lesson::Lesson;
use crate::lexicon::{LexiconIndex, lookup};
use crate::util::escape_html;

/// What to do when a word is not found in the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Abort the whole run; nothing gets written.
    Exit,
    /// Emit a visible warning fragment in place of the definition.
    Output,
    /// Record the word in the miss report and emit nothing for it.
    #[default]
    Collect,
}

impl MissPolicy {
    /// Numeric flag mapping used by the CLI (`--invalid 0|1|2`).
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Exit),
            1 => Some(Self::Output),
            2 => Some(Self::Collect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    pub policy: MissPolicy,
    /// Controls the two-pane wrapping and the supplemental layout CSS only;
    /// miss handling and asset merging are identical either way.
    pub with_toc: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            policy: MissPolicy::default(),
            with_toc: true,
        }
    }
}

/// Outcome of one assembly run.
#[derive(Debug)]
pub enum Assembly {
    /// The combined document plus any words that failed lookup.
    Complete {
        doc: AssembledDocument,
        misses: MissReport,
    },
    /// `MissPolicy::Exit` hit a lookup miss; the caller must write nothing.
    Aborted { lesson: String, word: String },
}

/// Assemble the content and navigation trees from the lesson sequence.
///
/// Progress (lesson and word names) goes to stdout; miss warnings go to
/// stderr. Lookup errors from the index abort the run.
pub fn assemble(
    index: &dyn LexiconIndex,
    lessons: &[Lesson],
    opts: &AssembleOptions,
) -> Result<Assembly> {
    let mut doc = AssembledDocument {
        with_toc: opts.with_toc,
        ..Default::default()
    };
    let mut misses = MissReport::new();

    for (i, lesson) in lessons.iter().enumerate() {
        println!("{}", lesson.name);
        let mut section = ContentSection {
            title: lesson.name.clone(),
            anchor: lesson_anchor(&lesson.name),
            words: Vec::new(),
        };
        doc.nav
            .push(NavKind::Lesson, &lesson.name, section.anchor.clone());

        for (j, word) in lesson.words.iter().enumerate() {
            println!("\t{word}");
            let mut result = lookup(index, word)?;
            if result.is_empty() {
                eprintln!("WARNING: \"{word}\" not found");
                match opts.policy {
                    MissPolicy::Exit => {
                        return Ok(Assembly::Aborted {
                            lesson: lesson.name.clone(),
                            word: word.clone(),
                        });
                    }
                    MissPolicy::Output => {
                        result = warning_fragment(word);
                    }
                    MissPolicy::Collect => {
                        // Skip content and navigation together to keep them
                        // in lockstep.
                        misses.record(&lesson.name, word);
                        continue;
                    }
                }
            }

            let parsed = fragment::parse(&result);
            if i == 0 && j == 0 {
                hoist_head(&mut doc, parsed.head.as_deref());
            }

            let anchor = word_anchor(word);
            doc.nav.push(NavKind::Word, word, anchor.clone());
            section.words.push(WordEntry {
                term: word.clone(),
                anchor,
                body: parsed.body,
            });
        }

        doc.sections.push(section);
    }

    Ok(Assembly::Complete { doc, misses })
}

/// Carry the first fragment's head into the document head, once per run.
fn hoist_head(doc: &mut AssembledDocument, head: Option<&str>) {
    let Some(head) = head else {
        debug!("first fragment has no head; document head stays empty");
        return;
    };
    doc.head.stylesheet_href = fragment::stylesheet_href(head);
    doc.head.hoisted = fragment::strip_stylesheet_links(head);
}

/// Synthesized in place of a definition under `MissPolicy::Output`.
fn warning_fragment(word: &str) -> String {
    format!(
        "<span><b>WARNING:</b> \"{}\" not found</span>",
        escape_html(word)
    )
}
