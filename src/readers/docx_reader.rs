use crate::error::{ProcessingError, Result};
use crate::models::{Document, Table, TableRow};
use crate::utils::constants::DOCX_BODY_ENTRY;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Reads the top-level tables of a WordprocessingML (.docx) document.
///
/// Cell text follows the usual word-processor conventions: paragraphs are
/// joined with `\n`, a horizontally merged cell is repeated once per grid
/// column it spans, and a vertically merged continuation cell repeats the
/// text of the cell above it. Tables nested inside cells are not visited.
pub struct DocxReader;

impl DocxReader {
    pub fn read(path: &Path) -> Result<Document> {
        let file = File::open(path).map_err(|e| {
            ProcessingError::DocumentAccess(format!("{}: {}", path.display(), e))
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| {
            ProcessingError::DocumentAccess(format!(
                "'{}' is not a .docx container: {}",
                path.display(),
                e
            ))
        })?;

        let mut entry = archive.by_name(DOCX_BODY_ENTRY).map_err(|_| {
            ProcessingError::DocumentAccess(format!(
                "'{}' not found in '{}'",
                DOCX_BODY_ENTRY,
                path.display()
            ))
        })?;

        let mut xml = String::with_capacity(entry.size() as usize);
        entry.read_to_string(&mut xml)?;
        drop(entry);

        let document = Self::parse_document_xml(&xml)?;
        debug!(
            "Read {} tables from {}",
            document.tables.len(),
            path.display()
        );
        Ok(document)
    }

    /// Parse the body XML (`word/document.xml`) into tables of text rows
    pub fn parse_document_xml(xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        let mut builder = TableBuilder::default();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => builder.open(e),
                Event::Empty(ref e) => {
                    builder.open(e);
                    builder.close(e.local_name().as_ref());
                }
                Event::End(ref e) => builder.close(e.local_name().as_ref()),
                Event::Text(ref e) => {
                    if builder.in_text {
                        let text = e.unescape()?;
                        builder.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Document::new(builder.tables))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalMerge {
    Restart,
    Continue,
}

#[derive(Debug)]
struct CellState {
    paragraphs: Vec<String>,
    span: usize,
    vertical_merge: Option<VerticalMerge>,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            span: 1,
            vertical_merge: None,
        }
    }
}

#[derive(Debug, Default)]
struct TableBuilder {
    tables: Vec<Table>,
    depth: usize,
    rows: Vec<TableRow>,
    row: Option<Vec<String>>,
    previous_row: Vec<String>,
    cell: Option<CellState>,
    in_run: bool,
    in_text: bool,
}

impl TableBuilder {
    fn open(&mut self, e: &BytesStart) {
        let name = e.local_name();
        let name = name.as_ref();

        if name == b"tbl" {
            self.depth += 1;
            if self.depth == 1 {
                self.rows.clear();
                self.previous_row.clear();
            }
            return;
        }

        // Only the outermost table level contributes rows and text
        if self.depth != 1 {
            return;
        }

        match name {
            b"tr" => self.row = Some(Vec::new()),
            b"tc" if self.row.is_some() => self.cell = Some(CellState::default()),
            b"gridSpan" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.span = val_attr(e)
                        .and_then(|v| v.parse::<usize>().ok())
                        .filter(|span| *span > 0)
                        .unwrap_or(1);
                }
            }
            b"vMerge" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.vertical_merge = match val_attr(e).as_deref() {
                        Some("restart") => Some(VerticalMerge::Restart),
                        _ => Some(VerticalMerge::Continue),
                    };
                }
            }
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.paragraphs.push(String::new());
                }
            }
            b"r" => self.in_run = self.cell.is_some(),
            b"t" => self.in_text = self.in_run,
            b"tab" if self.in_run => self.push_text("\t"),
            b"br" | b"cr" if self.in_run => self.push_text("\n"),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        if name == b"tbl" {
            if self.depth == 1 {
                let rows = std::mem::take(&mut self.rows);
                self.tables.push(Table::new(rows));
            }
            self.depth = self.depth.saturating_sub(1);
            return;
        }

        if self.depth != 1 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => {
                self.in_run = false;
                self.in_text = false;
            }
            b"tc" => self.finish_cell(),
            b"tr" => {
                if let Some(cells) = self.row.take() {
                    self.previous_row = cells.clone();
                    self.rows.push(TableRow::new(cells));
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            match cell.paragraphs.last_mut() {
                Some(paragraph) => paragraph.push_str(text),
                None => cell.paragraphs.push(text.to_string()),
            }
        }
    }

    fn finish_cell(&mut self) {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return;
        };

        let grid_column = row.len();
        let text = match cell.vertical_merge {
            Some(VerticalMerge::Continue) => self
                .previous_row
                .get(grid_column)
                .cloned()
                .unwrap_or_else(|| cell.paragraphs.join("\n")),
            _ => cell.paragraphs.join("\n"),
        };

        for _ in 0..cell.span {
            row.push(text.clone());
        }
    }
}

fn val_attr(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"val")
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}
