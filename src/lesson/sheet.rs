//! Spreadsheet word lists, parsed straight out of the xlsx container.
//!
//! One lesson per sheet in workbook order; the sheet name is the lesson name
//! and the non-empty cells of column A are its words. Only the pieces of the
//! OOXML format needed for that are read: workbook.xml for the sheet order,
//! the workbook rels for worksheet paths, sharedStrings.xml for string cells.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use super::Lesson;
use crate::error::{Error, Result};

pub fn parse(path: &Path) -> Result<Vec<Lesson>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let sheets = parse_workbook(&read_archive_file(&mut archive, "xl/workbook.xml")?)?;
    let rels = parse_rels(&read_archive_file(&mut archive, "xl/_rels/workbook.xml.rels")?)?;
    let shared = match read_archive_file(&mut archive, "xl/sharedStrings.xml") {
        Ok(content) => parse_shared_strings(&content)?,
        Err(Error::Zip(zip::result::ZipError::FileNotFound)) => Vec::new(),
        Err(e) => return Err(e),
    };

    let mut lessons = Vec::with_capacity(sheets.len());
    for (name, rel_id) in sheets {
        let target = rels.get(&rel_id).ok_or_else(|| {
            Error::InvalidWordList(format!("workbook sheet \"{name}\" has no relationship"))
        })?;
        let content = read_archive_file(&mut archive, &worksheet_path(target))?;
        let words = parse_first_column(&content, &shared)?;
        lessons.push(Lesson::new(name).with_words(words));
    }
    Ok(lessons)
}

fn read_archive_file<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut entry = archive.by_name(path)?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Resolve a relationship target against the xl/ directory.
fn worksheet_path(target: &str) -> String {
    let target = target.trim_start_matches('/');
    if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{target}")
    }
}

/// Ordered (sheet name, relationship id) pairs from workbook.xml.
fn parse_workbook(content: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut rel_id = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = String::from_utf8(attr.value.to_vec())?,
                        b"r:id" => rel_id = String::from_utf8(attr.value.to_vec())?,
                        _ => {}
                    }
                }
                if !rel_id.is_empty() {
                    sheets.push((name, rel_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }
    Ok(sheets)
}

/// Relationship id -> target path from the workbook rels part.
fn parse_rels(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut rels = HashMap::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8(attr.value.to_vec())?,
                        b"Target" => target = String::from_utf8(attr.value.to_vec())?,
                        _ => {}
                    }
                }
                rels.insert(id, target);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }
    Ok(rels)
}

/// The shared string table, one concatenated string per `<si>` entry.
fn parse_shared_strings(content: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(content);

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                current.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if in_t => {
                current.push_str(resolve_entity(&String::from_utf8_lossy(e.as_ref())));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"t" => in_t = false,
                b"si" => {
                    in_si = false;
                    strings.push(current.clone());
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }
    Ok(strings)
}

/// Non-empty values of column A, in row order.
fn parse_first_column(content: &str, shared: &[String]) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(content);

    let mut words = Vec::new();
    let mut column = 0usize;
    let mut cell_type = CellType::Number;
    let mut in_value = false;
    let mut value = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"row" => column = 0,
                b"c" => {
                    cell_type = CellType::Number;
                    value.clear();
                    // Cells without an r attribute fall in document order
                    column += 1;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                let r = String::from_utf8(attr.value.to_vec())?;
                                column = column_index(&r);
                            }
                            b"t" => {
                                cell_type = match attr.value.as_ref() {
                                    b"s" => CellType::Shared,
                                    b"inlineStr" => CellType::Inline,
                                    _ => CellType::Number,
                                };
                            }
                            _ => {}
                        }
                    }
                }
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_value => {
                value.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if in_value => {
                value.push_str(resolve_entity(&String::from_utf8_lossy(e.as_ref())));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" if column == 1 => {
                    let resolved = match cell_type {
                        CellType::Shared => value
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|i| shared.get(i))
                            .cloned()
                            .unwrap_or_default(),
                        CellType::Inline | CellType::Number => value.clone(),
                    };
                    if !resolved.is_empty() {
                        words.push(resolved);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }
    Ok(words)
}

#[derive(Clone, Copy)]
enum CellType {
    Shared,
    Inline,
    Number,
}

/// 1-based column index from a cell reference like `B12`.
fn column_index(reference: &str) -> usize {
    reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .fold(0, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1))
}

fn resolve_entity(entity: &str) -> &'static str {
    match entity {
        "apos" => "'",
        "quot" => "\"",
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), 1);
        assert_eq!(column_index("B12"), 2);
        assert_eq!(column_index("AA3"), 27);
    }

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<sst><si><t>one</t></si><si><r><t>tw</t></r><r><t>o</t></r></si></sst>"#;
        assert_eq!(parse_shared_strings(xml).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_first_column_mixed_cells() {
        let shared = vec!["apple".to_string()];
        let xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>9</v></c></row>
            <row r="2"><c r="A2" t="inlineStr"><is><t>pear</t></is></c></row>
            <row r="3"><c r="A3"><v>42</v></c></row>
            <row r="4"><c r="A4" t="s"><v>99</v></c></row>
        </sheetData></worksheet>"#;
        let words = parse_first_column(xml, &shared).unwrap();
        // row 4 points at a missing shared string and is dropped as empty
        assert_eq!(words, vec!["apple", "pear", "42"]);
    }
}
