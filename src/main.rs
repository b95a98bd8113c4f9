//! wordbook - build one navigable document from a dictionary and a word list

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use wordbook::emit::pdf::CommandRenderer;
use wordbook::{
    Error, FileLexicon, MissPolicy, RunOutcome, convert_to_html, convert_to_pdf, load_lessons,
};

#[derive(Parser)]
#[command(name = "wordbook")]
#[command(version, about = "Build one navigable document from a dictionary and a word list", long_about = None)]
#[command(after_help = "EXAMPLES:
    wordbook dict.json lessons.txt book.html     Compile to HTML
    wordbook dict.json lessons.xlsx --type pdf   Compile to lessons.pdf
    wordbook dict.json lessons.json --invalid 1  Inline warnings for missing words")]
struct Cli {
    /// Dictionary package: a JSON term store with an optional media archive
    #[arg(value_name = "DICTIONARY")]
    dictionary: PathBuf,

    /// Word list (.json, .txt, .xls or .xlsx)
    #[arg(value_name = "WORDLIST")]
    wordlist: PathBuf,

    /// Output file; derived from the word list name when omitted
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output kind; mandatory when no output path is given
    #[arg(long = "type", value_enum)]
    kind: Option<OutputKind>,

    /// Action for invalid words: 0 exit immediately, 1 output a warning
    /// into the document, 2 collect them to invalid_words.txt
    #[arg(long = "invalid", default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=2))]
    invalid: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    Pdf,
    Html,
}

impl OutputKind {
    fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let (out_path, kind) = resolve_output(&cli)?;
    let policy = MissPolicy::from_flag(cli.invalid).unwrap_or_default();

    let lexicon = FileLexicon::open(&cli.dictionary)?;
    let lessons = load_lessons(&cli.wordlist)?;
    let dict_dir = cli
        .dictionary
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let outcome = match kind {
        OutputKind::Html => convert_to_html(&lexicon, &lessons, dict_dir, &out_path, policy)?,
        OutputKind::Pdf => convert_to_pdf(
            &lexicon,
            &lessons,
            dict_dir,
            &out_path,
            policy,
            &CommandRenderer::default(),
        )?,
    };

    match outcome {
        RunOutcome::Written { misses_written } => {
            println!("wrote {}", out_path.display());
            if misses_written {
                println!("some words were not found; see invalid_words.txt");
            }
        }
        RunOutcome::Aborted { lesson, word } => {
            println!("*** \"{word}\" (lesson \"{lesson}\") not found; exiting, nothing written ***");
        }
    }
    Ok(())
}

/// Settle the output path and kind before any processing starts.
fn resolve_output(cli: &Cli) -> Result<(PathBuf, OutputKind), Error> {
    match &cli.output {
        Some(path) => {
            let kind = match cli.kind {
                Some(kind) => kind,
                None => OutputKind::from_path(path).ok_or_else(|| {
                    Error::UnsupportedFormat(format!(
                        "cannot infer output type from \"{}\"",
                        path.display()
                    ))
                })?,
            };
            Ok((path.clone(), kind))
        }
        None => {
            let kind = cli.kind.ok_or(Error::MissingConfiguration)?;
            let stem = cli
                .wordlist
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "wordbook".to_string());
            Ok((PathBuf::from(format!("{stem}.{}", kind.extension())), kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(output: Option<&str>, kind: Option<OutputKind>) -> Cli {
        Cli {
            dictionary: PathBuf::from("dict.json"),
            wordlist: PathBuf::from("lists/words.xlsx"),
            output: output.map(PathBuf::from),
            kind,
            invalid: 2,
        }
    }

    #[test]
    fn test_output_kind_inferred_from_path() {
        let (path, kind) = resolve_output(&cli(Some("book.pdf"), None)).unwrap();
        assert_eq!(path, PathBuf::from("book.pdf"));
        assert_eq!(kind, OutputKind::Pdf);
    }

    #[test]
    fn test_output_name_derived_from_wordlist() {
        let (path, kind) = resolve_output(&cli(None, Some(OutputKind::Html))).unwrap();
        assert_eq!(path, PathBuf::from("words.html"));
        assert_eq!(kind, OutputKind::Html);
    }

    #[test]
    fn test_missing_configuration() {
        assert!(matches!(
            resolve_output(&cli(None, None)),
            Err(Error::MissingConfiguration)
        ));
    }

    #[test]
    fn test_unknown_output_extension() {
        assert!(matches!(
            resolve_output(&cli(Some("book.docx"), None)),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
