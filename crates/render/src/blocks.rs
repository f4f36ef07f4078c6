//! # Structural Parser
//!
//! Best-effort classification of model-written text into render blocks.
//! The model is asked for a constrained Markdown dialect (paragraphs,
//! `-` bullets, `**bold**` labels) but is not trusted to deliver it; the
//! pattern rules here absorb the variance instead of rejecting it. All
//! functions are pure: parsing the same text twice yields the same blocks.

use regex::Regex;
use std::sync::OnceLock;

/// One styled fragment of a visual line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Bullet,
    TableRow,
}

/// Renderer-internal representation of one laid-out unit. Derived on
/// demand from verified section text and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBlock {
    pub kind: BlockKind,
    pub runs: Vec<StyledRun>,
}

impl RenderBlock {
    fn new(kind: BlockKind, runs: Vec<StyledRun>) -> Self {
        Self { kind, runs }
    }

    /// A zero-content paragraph standing in for an extra blank line.
    pub fn gap() -> Self {
        Self::new(BlockKind::Paragraph, Vec::new())
    }

    pub fn is_gap(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Line-level classification, the first stage of parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A bullet line; carries the content after the glyph.
    Bullet(&'a str),
    TableRow,
    Plain,
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[-*•]\s+(\S.*)$").unwrap())
}

fn policy_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(law|act|decree|resolution|regulation|strateg(?:y|ies)|polic(?:y|ies)|plan|programme|program|framework|agreement)\b",
        )
        .unwrap()
    })
}

/// Classifies one line as bullet, pipe-table row, or plain text.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(caps) = bullet_re().captures(line) {
        if let Some(m) = caps.get(1) {
            return LineKind::Bullet(m.as_str());
        }
    }
    let trimmed = line.trim();
    if trimmed.starts_with('|') || trimmed.matches('|').count() >= 2 {
        return LineKind::TableRow;
    }
    LineKind::Plain
}

/// Splits `**bold**` spans into alternating styled runs.
///
/// Concatenating the run texts in order reproduces the line with balanced
/// markers stripped. An unterminated trailing `**` is literal text for the
/// remainder of the line; this never fails.
pub fn split_bold_runs(line: &str) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        match rest[open + 2..].find("**") {
            Some(close) => {
                push_run(&mut runs, &rest[..open], false);
                push_run(&mut runs, &rest[open + 2..open + 2 + close], true);
                rest = &rest[open + 4 + close..];
            }
            // Unmatched marker: the remainder, marker included, is literal.
            None => break,
        }
    }
    push_run(&mut runs, rest, false);
    runs
}

fn push_run(runs: &mut Vec<StyledRun>, text: &str, bold: bool) {
    if !text.is_empty() {
        runs.push(StyledRun {
            text: text.to_string(),
            bold,
        });
    }
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty() && cell.contains('-') && cell.chars().all(|ch| ch == '-' || ch == ':')
}

/// Flattens a pipe-table into bullet lines, one per data row:
/// `<first cell>: <remaining cells joined with ', '>`.
///
/// Separator rows are dropped wherever they appear. A header row is dropped
/// when the table carries a separator row (the usual shape) or has more
/// than one row; a lone pipe row with no separator is kept as data. Empty
/// trimmed cells are filtered, so stray or missing pipes are tolerated.
pub fn table_to_bullets(rows: &[&str]) -> Vec<String> {
    let cells_of = |row: &str| -> Vec<String> {
        row.split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    };

    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|row| cells_of(row))
        .filter(|cells| !cells.is_empty())
        .filter(|cells| !cells.iter().all(|c| is_separator_cell(c)))
        .collect();
    let had_separator = rows
        .iter()
        .map(|row| cells_of(row))
        .any(|cells| !cells.is_empty() && cells.iter().all(|c| is_separator_cell(c)));

    let skip_header = had_separator || data.len() > 1;
    data.into_iter()
        .skip(if skip_header { 1 } else { 0 })
        .map(|cells| {
            if cells.len() == 1 {
                cells[0].clone()
            } else {
                format!("{}: {}", cells[0], cells[1..].join(", "))
            }
        })
        .collect()
}

/// Splits text into sentences on `.`, `!`, `?` followed by whitespace or
/// end of input. Deliberately naive; abbreviations over-split and that is
/// acceptable for grouping purposes.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, ch)) = iter.next() {
        if matches!(ch, '.' | '!' | '?') {
            let boundary = match iter.peek() {
                Some((_, next)) => next.is_whitespace(),
                None => true,
            };
            if boundary {
                let end = i + ch.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = end;
            }
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn has_bold_span(sentence: &str) -> bool {
    split_bold_runs(sentence).iter().any(|r| r.bold)
}

fn is_anchor(sentence: &str) -> bool {
    has_bold_span(sentence) || policy_keyword_re().is_match(sentence)
}

const MAX_GROUP_SENTENCES: usize = 3;
const MAX_LABEL_CHARS: usize = 60;

fn leading_clause_len(text: &str) -> usize {
    let mut chars = 0;
    for (i, ch) in text.char_indices() {
        if ch == ':' {
            return i + ch.len_utf8();
        }
        if matches!(ch, ',' | ';' | '.' | '!' | '?') || chars >= MAX_LABEL_CHARS {
            return i;
        }
        chars += 1;
    }
    text.len()
}

fn bullet_from_group(group: &[&str]) -> RenderBlock {
    let joined = group.join(" ");
    let runs = split_bold_runs(&joined);
    if runs.iter().any(|r| r.bold) {
        return RenderBlock::new(BlockKind::Bullet, runs);
    }

    // No bold label: promote a truncated leading clause instead.
    let label_len = leading_clause_len(&joined);
    let (label, rest) = joined.split_at(label_len);
    let mut runs = vec![StyledRun::bold(label.trim_end())];
    if !rest.trim().is_empty() {
        runs.push(StyledRun::plain(rest));
    }
    RenderBlock::new(BlockKind::Bullet, runs)
}

/// Regroups bullet-less policy narrative into synthetic bullets.
///
/// Sentences are scanned left to right; a sentence containing a bold span
/// or a policy keyword anchors a group of up to three contiguous sentences
/// (stopping early at the next anchor). Consumed sentences are never
/// reused. Sentences outside any group stay as plain paragraphs in their
/// original position.
pub fn policy_bullets(text: &str) -> Vec<RenderBlock> {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let sentences = split_sentences(&flat);

    let mut blocks = Vec::new();
    let mut loose: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < sentences.len() {
        if is_anchor(sentences[i]) {
            flush_loose(&mut blocks, &mut loose);
            let mut end = i + 1;
            while end < sentences.len()
                && end - i < MAX_GROUP_SENTENCES
                && !is_anchor(sentences[end])
            {
                end += 1;
            }
            blocks.push(bullet_from_group(&sentences[i..end]));
            i = end;
        } else {
            loose.push(sentences[i]);
            i += 1;
        }
    }
    flush_loose(&mut blocks, &mut loose);
    blocks
}

fn flush_loose(blocks: &mut Vec<RenderBlock>, loose: &mut Vec<&str>) {
    if loose.is_empty() {
        return;
    }
    let joined = loose.join(" ");
    blocks.push(RenderBlock::new(
        BlockKind::Paragraph,
        split_bold_runs(&joined),
    ));
    loose.clear();
}

/// Converts every run of consecutive table-row blocks into bullets.
pub fn apply_table_fallback(blocks: Vec<RenderBlock>) -> Vec<RenderBlock> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut pending: Vec<String> = Vec::new();

    let flush = |out: &mut Vec<RenderBlock>, pending: &mut Vec<String>| {
        if pending.is_empty() {
            return;
        }
        let rows: Vec<&str> = pending.iter().map(String::as_str).collect();
        for bullet in table_to_bullets(&rows) {
            out.push(RenderBlock::new(
                BlockKind::Bullet,
                split_bold_runs(&bullet),
            ));
        }
        pending.clear();
    };

    for block in blocks {
        if block.kind == BlockKind::TableRow {
            let raw = block
                .runs
                .iter()
                .map(|r| r.text.as_str())
                .collect::<String>();
            pending.push(raw);
        } else {
            flush(&mut out, &mut pending);
            out.push(block);
        }
    }
    flush(&mut out, &mut pending);
    out
}

/// Parses one section's text into render blocks.
///
/// Paragraphs split on blank-line boundaries; every extra consecutive
/// blank line becomes a gap block so vertical density survives. Bullet
/// lines become bullet blocks, pipe rows are collected and flattened, and
/// for `policy_hints` sections with no explicit bullets the synthetic
/// policy grouping takes over.
pub fn parse_section(text: &str, policy_hints: bool) -> Vec<RenderBlock> {
    let mut blocks: Vec<RenderBlock> = Vec::new();
    let mut para_lines: Vec<&str> = Vec::new();
    let mut blank_streak = 0usize;

    let flush_para = |blocks: &mut Vec<RenderBlock>, para_lines: &mut Vec<&str>| {
        if para_lines.is_empty() {
            return;
        }
        let joined = para_lines.join(" ");
        blocks.push(RenderBlock::new(
            BlockKind::Paragraph,
            split_bold_runs(&joined),
        ));
        para_lines.clear();
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            flush_para(&mut blocks, &mut para_lines);
            blank_streak += 1;
            // The first blank line is the ordinary paragraph gap; each
            // additional one widens the gap visibly.
            if blank_streak > 1 && !blocks.is_empty() {
                blocks.push(RenderBlock::gap());
            }
            continue;
        }
        blank_streak = 0;

        match classify_line(line) {
            LineKind::Bullet(content) => {
                flush_para(&mut blocks, &mut para_lines);
                blocks.push(RenderBlock::new(
                    BlockKind::Bullet,
                    split_bold_runs(content),
                ));
            }
            LineKind::TableRow => {
                flush_para(&mut blocks, &mut para_lines);
                blocks.push(RenderBlock::new(
                    BlockKind::TableRow,
                    vec![StyledRun::plain(line.trim())],
                ));
            }
            LineKind::Plain => {
                para_lines.push(line.trim());
            }
        }
    }
    flush_para(&mut blocks, &mut para_lines);

    let blocks = apply_table_fallback(blocks);

    if policy_hints && !blocks.iter().any(|b| b.kind == BlockKind::Bullet) {
        let synthetic = policy_bullets(text);
        if synthetic.iter().any(|b| b.kind == BlockKind::Bullet) {
            return synthetic;
        }
    }
    blocks
}
