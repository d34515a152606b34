//! Output formatting for query results

use serde::Serialize;
use std::io::{self, Write};
use std::ops::Range;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Characters of context printed on each side of a match
pub const CONTEXT_CHARS: usize = 16;

/// Standard output with color enabled only when asked and on a terminal
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Result of a `find` query
#[derive(Debug, Serialize)]
pub struct FindReport<'a> {
    pub pattern: &'a str,
    pub count: usize,
    pub positions: Vec<usize>,
}

/// Result of a `repeat` query
#[derive(Debug, Serialize)]
pub struct RepeatReport {
    pub min_repetitions: usize,
    pub substring: Option<String>,
    pub positions: Vec<usize>,
}

/// Result of an `lcp` query
#[derive(Debug, Serialize)]
pub struct LcpReport {
    pub i: usize,
    pub j: usize,
    pub length: usize,
    pub prefix: String,
}

/// Result of an `rmq` query over raw values
#[derive(Debug, Serialize)]
pub struct RmqReport {
    pub tier: String,
    pub i: usize,
    pub j: usize,
    pub index: usize,
    pub value: i64,
}

/// Shape of a built index, for the `stats` command
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub strategy: String,
    /// Indexed symbols, terminal included
    pub text_len: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub internal_nodes: usize,
    pub longest_repeat: usize,
}

/// Write `value` as one line of JSON
pub fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

/// Print every occurrence with its surrounding text, match highlighted
pub fn print_occurrences<W: WriteColor>(
    out: &mut W,
    text: &[char],
    positions: &[usize],
    pattern_len: usize,
) -> io::Result<()> {
    for &start in positions {
        let end = (start + pattern_len).min(text.len());
        let before = start.saturating_sub(CONTEXT_CHARS);
        let after = (end + CONTEXT_CHARS).min(text.len());

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", start)?;
        out.reset()?;
        write!(out, ":")?;

        write_escaped(out, &text[before..start])?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write_escaped(out, &text[start..end])?;
        out.reset()?;
        write_escaped(out, &text[end..after])?;
        writeln!(out)?;
    }

    Ok(())
}

/// Print `pattern:count`
pub fn print_count<W: WriteColor>(out: &mut W, pattern: &str, count: usize) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(out, "{}", pattern)?;
    out.reset()?;
    write!(out, ":")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", count)?;
    out.reset()
}

/// Print the longest repeat and where it occurs
pub fn print_repeat<W: WriteColor>(
    out: &mut W,
    text: &[char],
    span: Option<Range<usize>>,
    positions: &[usize],
) -> io::Result<()> {
    let Some(span) = span else {
        writeln!(out, "No repeated substring")?;
        return Ok(());
    };

    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write_escaped(out, &text[span.clone()])?;
    out.reset()?;
    writeln!(out, " (length {}, {} occurrences)", span.len(), positions.len())?;
    print_occurrences(out, text, positions, span.len())
}

/// Print an LCP result as `i j: length "prefix"`
pub fn print_lcp<W: WriteColor>(out: &mut W, report: &LcpReport) -> io::Result<()> {
    write!(out, "{} {}: ", report.i, report.j)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", report.length)?;
    out.reset()?;
    writeln!(out, " {:?}", report.prefix)
}

/// Print an RMQ result as `rmq(i, j) = index (value)`
pub fn print_rmq<W: WriteColor>(out: &mut W, report: &RmqReport) -> io::Result<()> {
    write!(out, "rmq({}, {}) = ", report.i, report.j)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", report.index)?;
    out.reset()?;
    writeln!(out, " (value {})", report.value)
}

/// Print index statistics as an aligned table
pub fn print_stats<W: Write>(out: &mut W, stats: &StatsReport) -> io::Result<()> {
    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Strategy:         {}", stats.strategy)?;
    writeln!(out, "Text length:      {}", stats.text_len)?;
    writeln!(out, "Nodes:            {}", stats.nodes)?;
    writeln!(out, "  Leaves:         {}", stats.leaves)?;
    writeln!(out, "  Internal:       {}", stats.internal_nodes)?;
    writeln!(out, "Longest repeat:   {}", stats.longest_repeat)?;
    Ok(())
}

/// Newlines and tabs would break the one-line-per-match layout
fn write_escaped<W: Write>(out: &mut W, chars: &[char]) -> io::Result<()> {
    for &c in chars {
        match c {
            '\n' => write!(out, "\\n")?,
            '\t' => write!(out, "\\t")?,
            '\r' => write!(out, "\\r")?,
            c => write!(out, "{}", c)?,
        }
    }
    Ok(())
}
