//! Markdown report rendering
//!
//! Lines are written as soon as they are known; nothing is buffered here
//! beyond what the underlying writer does.

use std::io::{self, Write};

use crate::config::DateRange;

/// Report title line
pub const TITLE: &str = "# GitHub Commits Consolidated Report";

const TABLE_HEADER: &str = "| Repository | Branch | Commit Count |";
const TABLE_RULE: &str = "|------------|--------|--------------|";

/// Writes the consolidated report section by section.
pub struct MarkdownWriter<W: Write> {
    out: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Title and date range, followed by a blank line
    pub fn header(&mut self, range: &DateRange) -> io::Result<()> {
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "**Date Range:** {range}")?;
        writeln!(self.out)
    }

    /// Organization heading and the table header
    pub fn org_heading(&mut self, org: &str) -> io::Result<()> {
        writeln!(self.out, "## Organization: {org}")?;
        writeln!(self.out, "{TABLE_HEADER}")?;
        writeln!(self.out, "{TABLE_RULE}")
    }

    /// One (repository, branch, count) table row
    pub fn row(&mut self, repo: &str, branch: &str, count: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "| {} | {} | {} |",
            escape_cell(repo),
            escape_cell(branch),
            count
        )
    }

    /// Bold total line closing an organization section
    pub fn org_total(&mut self, org: &str, total: usize) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "**Total Commits for {org}: {total}**")?;
        writeln!(self.out)
    }

    /// Flush and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// A literal `|` would split the cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
