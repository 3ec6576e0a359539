//! Output formatting for the commit report

pub mod markdown;

pub use markdown::MarkdownWriter;
