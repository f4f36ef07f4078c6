//! # Paginated PDF Layout
//!
//! Flows render blocks onto Letter pages. The cursor only ever moves down;
//! when it passes the bottom margin a new page is opened. Styled runs of
//! one visual line are written as consecutive text-show operations inside
//! a single text section, so the pen advances run to run and the line
//! break happens only after the final run.

use printpdf::{
    BuiltinFont, FontId, Layer, LayerInternalId, Mm, Op, ParsedFont, PdfDocument, PdfPage,
    PdfSaveOptions, Pt, TextItem, TextMatrix,
};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::blocks::{parse_section, BlockKind, RenderBlock, StyledRun};
use crate::RenderError;
use pifgen::run_output::RunOutput;
use pifgen::sections;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;

const HEADING_SIZE: f32 = 14.0;
const HEADING_LEADING: f32 = 18.0;
const TITLE_SIZE: f32 = 12.0;
const TITLE_LEADING: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const BODY_LEADING: f32 = 14.0;
const PARAGRAPH_GAP: f32 = 8.0;

const BULLET_INDENT_MM: f32 = 6.0;
const BULLET_GLYPH: &str = "•";

// Average glyph advance as a fraction of the font size. The built-in Times
// faces have no embedded metrics at this layer, so wrapping works on an
// estimated width; lines err on the short side.
const CHAR_WIDTH_EM: f32 = 0.5;

fn mm_to_pt(mm: f32) -> f32 {
    let pt: Pt = Mm(mm).into();
    pt.0
}

fn estimate_width_pt(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_EM
}

/// A paginated document under construction.
pub struct PdfRenderer {
    doc: PdfDocument,
    layer: LayerInternalId,
    regular: FontId,
    bold: FontId,
    ops: Vec<Op>,
    cursor_pt: f32,
    sections_written: usize,
}

impl PdfRenderer {
    pub fn new(title: &str) -> Result<Self, RenderError> {
        let mut doc = PdfDocument::new(title);
        let layer = doc.add_layer(&Layer::new("Layer 1"));
        let regular = add_builtin_font(&mut doc, BuiltinFont::TimesRoman, "Times-Roman")?;
        let bold = add_builtin_font(&mut doc, BuiltinFont::TimesBold, "Times-Bold")?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            ops: Vec::new(),
            cursor_pt: mm_to_pt(PAGE_HEIGHT_MM - MARGIN_MM),
            sections_written: 0,
        })
    }

    /// Renders a full run output: a document heading, then every section
    /// in stored order, separated by page breaks.
    pub fn render_run(&mut self, run: &RunOutput) {
        self.write_line(
            MARGIN_MM,
            &[StyledRun::bold(format!(
                "GEF-8 PROJECT IDENTIFICATION FORM (PIF) — {}",
                run.country
            ))],
            HEADING_SIZE,
            HEADING_LEADING,
        );
        self.advance(PARAGRAPH_GAP);

        for section in &run.sections {
            let policy_hints = sections::find(&section.key).is_some_and(|s| s.policy_style);
            let blocks = parse_section(&section.text, policy_hints);
            self.add_section(&section.title, &blocks);
        }
    }

    /// Writes one section: bold title line followed by its body blocks.
    /// Sections after the first begin on a fresh page.
    pub fn add_section(&mut self, title: &str, blocks: &[RenderBlock]) {
        if self.sections_written > 0 {
            self.page_break();
        }
        self.sections_written += 1;

        self.write_line(
            MARGIN_MM,
            &[StyledRun::bold(title)],
            TITLE_SIZE,
            TITLE_LEADING,
        );
        self.advance(4.0);

        for block in blocks {
            match block.kind {
                BlockKind::Paragraph if block.is_gap() => self.advance(PARAGRAPH_GAP),
                BlockKind::Paragraph | BlockKind::TableRow => self.add_paragraph(&block.runs),
                BlockKind::Bullet => self.add_bullet(&block.runs),
            }
        }
    }

    fn content_width_pt(&self) -> f32 {
        mm_to_pt(PAGE_WIDTH_MM - 2.0 * MARGIN_MM)
    }

    fn add_paragraph(&mut self, runs: &[StyledRun]) {
        let width = self.content_width_pt();
        for line in wrap_runs(runs, BODY_SIZE, width) {
            self.write_line(MARGIN_MM, &line, BODY_SIZE, BODY_LEADING);
        }
        self.advance(PARAGRAPH_GAP);
    }

    fn add_bullet(&mut self, runs: &[StyledRun]) {
        let width = self.content_width_pt() - mm_to_pt(BULLET_INDENT_MM);
        for (i, line) in wrap_runs(runs, BODY_SIZE, width).into_iter().enumerate() {
            self.ensure_room(BODY_LEADING);
            if i == 0 {
                self.emit_line(MARGIN_MM, &[StyledRun::plain(BULLET_GLYPH)], BODY_SIZE);
            }
            // Continuation lines share the first line's indent.
            self.emit_line(MARGIN_MM + BULLET_INDENT_MM, &line, BODY_SIZE);
            self.cursor_pt -= BODY_LEADING;
        }
        self.advance(2.0);
    }

    fn write_line(&mut self, x_mm: f32, runs: &[StyledRun], size: f32, leading: f32) {
        self.ensure_room(leading);
        self.emit_line(x_mm, runs, size);
        self.cursor_pt -= leading;
    }

    /// Emits one visual line at the given position without advancing the
    /// cursor. All runs live in one text section; each text-show operation
    /// continues where the previous one ended.
    fn emit_line(&mut self, x_mm: f32, runs: &[StyledRun], size: f32) {
        if runs.is_empty() {
            return;
        }
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(mm_to_pt(x_mm)), Pt(self.cursor_pt)),
        });
        for run in runs {
            let font = if run.bold {
                self.bold.clone()
            } else {
                self.regular.clone()
            };
            self.ops.push(Op::SetFontSize {
                size: Pt(size),
                font: font.clone(),
            });
            self.ops.push(Op::WriteText {
                items: vec![TextItem::Text(run.text.clone())],
                font,
            });
        }
        self.ops.push(Op::EndTextSection);
    }

    fn advance(&mut self, leading: f32) {
        self.cursor_pt -= leading;
    }

    fn ensure_room(&mut self, leading: f32) {
        if self.cursor_pt - leading < mm_to_pt(MARGIN_MM) {
            self.page_break();
        }
    }

    /// Closes the current page and opens a fresh one at the top margin.
    pub fn page_break(&mut self) {
        self.flush_page();
        self.cursor_pt = mm_to_pt(PAGE_HEIGHT_MM - MARGIN_MM);
    }

    fn flush_page(&mut self) {
        let mut ops = vec![Op::BeginLayer {
            layer_id: self.layer.clone(),
        }];
        ops.append(&mut self.ops);
        ops.push(Op::EndLayer {
            layer_id: self.layer.clone(),
        });

        let mut page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), vec![]);
        page.ops = ops;
        self.doc.pages.push(page);
    }

    /// Finishes the document and writes it to `path`.
    pub fn save(mut self, path: &Path) -> Result<(), RenderError> {
        if !self.ops.is_empty() {
            self.flush_page();
        }
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!("PDF generation produced {} warnings", warnings.len());
        }
        fs::write(path, bytes)?;
        info!("Wrote PDF to {}", path.display());
        Ok(())
    }
}

fn add_builtin_font(
    doc: &mut PdfDocument,
    font: BuiltinFont,
    name: &str,
) -> Result<FontId, RenderError> {
    let bytes = font.get_subset_font().bytes;
    let parsed = ParsedFont::from_bytes(&bytes, 0, &mut Vec::new())
        .ok_or_else(|| RenderError::Font(name.to_string()))?;
    Ok(doc.add_font(&parsed))
}

/// Greedy word-wrap over styled runs at an estimated glyph width.
///
/// Adjacent runs with no whitespace between them stay glued together on
/// the same line; a space is only inserted where the source text had one.
fn wrap_runs(runs: &[StyledRun], size: f32, max_width_pt: f32) -> Vec<Vec<StyledRun>> {
    let mut lines: Vec<Vec<StyledRun>> = Vec::new();
    let mut current: Vec<StyledRun> = Vec::new();
    let mut current_width = 0.0f32;
    let mut pending_space = false;

    for run in runs {
        let starts_ws = run.text.starts_with(char::is_whitespace);
        let ends_ws = run.text.ends_with(char::is_whitespace);
        let mut first_word = true;

        for word in run.text.split_whitespace() {
            let need_space = if first_word {
                pending_space || starts_ws
            } else {
                true
            };
            first_word = false;

            let word_width = estimate_width_pt(word, size);
            let space_width = if need_space && current_width > 0.0 {
                estimate_width_pt(" ", size)
            } else {
                0.0
            };

            if current_width > 0.0 && current_width + space_width + word_width > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                append_word(&mut current, word, run.bold, false);
                current_width += word_width;
            } else {
                append_word(&mut current, word, run.bold, space_width > 0.0);
                current_width += space_width + word_width;
            }
        }

        if !run.text.is_empty() {
            pending_space = ends_ws || (first_word && starts_ws);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn append_word(line: &mut Vec<StyledRun>, word: &str, bold: bool, leading_space: bool) {
    if let Some(last) = line.last_mut() {
        if last.bold == bold {
            if leading_space {
                last.text.push(' ');
            }
            last.text.push_str(word);
            return;
        }
        if leading_space {
            // Attach the separator to the run that precedes it so the new
            // run starts cleanly at the word.
            last.text.push(' ');
        }
    }
    line.push(StyledRun {
        text: word.to_string(),
        bold,
    });
}
