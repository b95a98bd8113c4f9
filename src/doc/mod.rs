//! In-memory representation of the assembled document.
//!
//! The assembler builds an explicit intermediate structure instead of
//! mutating a live markup tree: content sections, a navigation index kept in
//! lockstep with them, the hoisted document head, and the merged stylesheet.
//! Serialization is a separate deterministic pass in `emit`.

/// Anchor id for a lesson heading.
pub fn lesson_anchor(name: &str) -> String {
    format!("lesson_{name}")
}

/// Anchor id for a word heading.
pub fn word_anchor(term: &str) -> String {
    format!("word_{term}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Lesson,
    Word,
}

/// One anchor link in the navigation pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub anchor: String,
    pub kind: NavKind,
}

/// Ordered anchor links mirroring the content headings one-to-one.
#[derive(Debug, Clone, Default)]
pub struct NavigationIndex {
    pub entries: Vec<NavEntry>,
}

impl NavigationIndex {
    pub fn push(&mut self, kind: NavKind, label: impl Into<String>, anchor: impl Into<String>) {
        self.entries.push(NavEntry {
            label: label.into(),
            anchor: anchor.into(),
            kind,
        });
    }
}

/// A word's resolved definition within a section.
#[derive(Debug, Clone)]
pub struct WordEntry {
    pub term: String,
    pub anchor: String,
    /// Definition body markup, already unwrapped from its fragment shell.
    pub body: String,
}

/// One lesson's worth of content: a heading plus its word entries.
#[derive(Debug, Clone)]
pub struct ContentSection {
    pub title: String,
    pub anchor: String,
    pub words: Vec<WordEntry>,
}

/// Head material carried over from the first definition fragment.
#[derive(Debug, Clone, Default)]
pub struct DocumentHead {
    /// Inner head markup, minus the external stylesheet link.
    pub hoisted: String,
    /// Href of the stylesheet link the first fragment referenced.
    pub stylesheet_href: Option<String>,
}

/// The combined document tree for one run.
///
/// Owns the content sections and the navigation index exclusively; nothing
/// here survives past the run that produced it.
#[derive(Debug, Clone, Default)]
pub struct AssembledDocument {
    pub head: DocumentHead,
    pub sections: Vec<ContentSection>,
    pub nav: NavigationIndex,
    /// Merged stylesheet text, embedded as a single style node on output.
    pub stylesheet: String,
    /// Whether serialization wraps the content in the two-pane layout.
    pub with_toc: bool,
}

impl AssembledDocument {
    /// Anchors of every content heading, in emit order.
    ///
    /// For every element of this sequence the navigation index must hold
    /// exactly one entry with the same anchor, in the same relative order.
    pub fn heading_anchors(&self) -> Vec<&str> {
        let mut anchors = Vec::new();
        for section in &self.sections {
            anchors.push(section.anchor.as_str());
            for word in &section.words {
                anchors.push(word.anchor.as_str());
            }
        }
        anchors
    }
}

/// Words that failed lookup, grouped by lesson.
///
/// Groups keep the order in which their lesson first produced a miss, and
/// words keep input order within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissReport {
    groups: Vec<(String, Vec<String>)>,
}

impl MissReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, lesson: &str, word: &str) {
        match self.groups.iter_mut().find(|(name, _)| name == lesson) {
            Some((_, words)) => words.push(word.to_string()),
            None => self
                .groups
                .push((lesson.to_string(), vec![word.to_string()])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[(String, Vec<String>)] {
        &self.groups
    }

    /// Report file format: a `#<lesson>` line per group, then one word per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (lesson, words) in &self.groups {
            out.push('#');
            out.push_str(lesson);
            out.push('\n');
            for word in words {
                out.push_str(word);
                out.push('\n');
            }
        }
        out
    }
}
