//! Plain text and JSON rendering of a [`View`] for `--print` mode.

use crate::desk::View;
use crate::feeds::Article;
use anyhow::Result;
use std::fmt::{self, Write};

pub const LOADED_MESSAGE: &str = "News articles loaded successfully.";

fn write_article(out: &mut String, index: usize, article: &Article, width: usize) -> fmt::Result {
    writeln!(out, "{}. {}", index + 1, article.headline())?;
    let options = textwrap::Options::new(width)
        .initial_indent("   ")
        .subsequent_indent("   ");
    writeln!(out, "{}", textwrap::fill(&article.summary, options))?;
    writeln!(out, "   Read Full Article: {}", article.url)?;
    writeln!(out)
}

fn write_view(out: &mut String, view: &View, width: usize) -> fmt::Result {
    match view {
        View::Idle => Ok(()),
        View::Showing { heading, articles } => {
            writeln!(out, "{}", heading)?;
            writeln!(out)?;
            for (i, article) in articles.iter().enumerate() {
                write_article(out, i, article, width)?;
            }
            writeln!(out, "{}", LOADED_MESSAGE)
        }
        View::NoResults { message } => writeln!(out, "{}", message),
        View::Failed(error) => writeln!(out, "Error: {}", error),
    }
}

pub fn render_text(view: &View, width: usize) -> Result<String> {
    let mut out = String::new();
    write_view(&mut out, view, width)?;
    Ok(out)
}

pub fn render_json(view: &View) -> Result<String> {
    Ok(serde_json::to_string_pretty(view.articles())?)
}
