//! Template rewriting
//!
//! Replaces string-literal directive values in component markup with the
//! serialized predicate they compile to, so templates ship pre-lowered
//! predicates instead of expression source:
//!
//! ```text
//! <button v-permission="'Has(read)'">   =>   <button v-permission="{'type':'HAS','val':'read'}">
//! ```

use crate::predicate::{self, CodecError};
use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("invalid permission expression `{expression}` at offset {offset}: {source}")]
    Expression {
        expression: String,
        offset: usize,
        source: Box<crate::Error>,
    },

    #[error("template literals are not supported")]
    TemplateLiteral { offset: usize },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid directive pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type RewriteResult<T> = Result<T, RewriteError>;

/// What to do with a directive whose expression fails to compile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop and return the error
    #[default]
    Abort,
    /// Log a warning and leave the literal as written
    Skip,
}

/// Rewriter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Directive name without the `v-` prefix
    pub directive: String,
    pub on_error: OnError,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            directive: "permission".to_string(),
            on_error: OnError::Abort,
        }
    }
}

impl RewriteOptions {
    pub fn directive(mut self, name: impl Into<String>) -> Self {
        self.directive = name.into();
        self
    }

    pub fn on_error(mut self, policy: OnError) -> Self {
        self.on_error = policy;
        self
    }
}

/// Result of rewriting one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub code: String,
    /// Directives replaced with a serialized predicate
    pub rewritten: usize,
    /// Directives left in place under [`OnError::Skip`]
    pub skipped: usize,
}

impl Rewrite {
    fn unchanged(source: &str) -> Self {
        Self { code: source.to_string(), rewritten: 0, skipped: 0 }
    }
}

/// Rewrite every string-literal directive in a markup fragment
pub fn rewrite_template(source: &str, options: &RewriteOptions) -> RewriteResult<Rewrite> {
    rewrite_region(source, 0, options)
}

/// Rewrite the `<template>` block of a single-file component
///
/// Paths without a `.vue` extension, and components without a template, are
/// returned unchanged.
pub fn rewrite_file_contents(
    path: impl AsRef<Path>,
    source: &str,
    options: &RewriteOptions,
) -> RewriteResult<Rewrite> {
    let path = path.as_ref();
    if path.extension().and_then(|ext| ext.to_str()) != Some("vue") {
        return Ok(Rewrite::unchanged(source));
    }

    let Some((start, end)) = template_region(source) else {
        debug!(path = %path.display(), "no template block");
        return Ok(Rewrite::unchanged(source));
    };

    let region = rewrite_region(&source[start..end], start, options)?;
    debug!(
        path = %path.display(),
        rewritten = region.rewritten,
        skipped = region.skipped,
        "rewrote template"
    );

    let mut code = String::with_capacity(source.len() + region.code.len());
    code.push_str(&source[..start]);
    code.push_str(&region.code);
    code.push_str(&source[end..]);
    Ok(Rewrite { code, rewritten: region.rewritten, skipped: region.skipped })
}

/// Byte range from the first `<template` tag to the end of the last `</template>`
fn template_region(source: &str) -> Option<(usize, usize)> {
    const CLOSE: &str = "</template>";
    let start = source.find("<template")?;
    let end = source.rfind(CLOSE)? + CLOSE.len();
    (end > start).then_some((start, end))
}

/// A single-quoted string literal inside an attribute value
enum Literal<'a> {
    Plain { expression: &'a str, offset: usize, len: usize },
    Template { offset: usize },
    None,
}

fn classify(value: &str, value_offset: usize) -> Literal<'_> {
    let trimmed = value.trim_start();
    let offset = value_offset + (value.len() - trimmed.len());
    let trimmed = trimmed.trim_end();

    if trimmed.starts_with('`') {
        return Literal::Template { offset };
    }

    match trimmed.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(inner) if !inner.contains('\'') => Literal::Plain {
            expression: inner,
            offset,
            len: trimmed.len(),
        },
        _ => Literal::None,
    }
}

fn rewrite_region(source: &str, base: usize, options: &RewriteOptions) -> RewriteResult<Rewrite> {
    let pattern = Regex::new(&format!(
        r#"(?:^|\s)v-{}\s*=\s*"([^"]*)""#,
        regex::escape(&options.directive)
    ))?;

    let mut code = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut rewritten = 0;
    let mut skipped = 0;

    for captures in pattern.captures_iter(source) {
        let Some(value) = captures.get(1) else { continue };

        let (expression, offset, len) = match classify(value.as_str(), value.start()) {
            Literal::Plain { expression, offset, len } => (expression, offset, len),
            Literal::None => continue,
            Literal::Template { offset } => {
                let err = RewriteError::TemplateLiteral { offset: base + offset };
                skip_or_abort(options, err)?;
                skipped += 1;
                continue;
            }
        };

        let predicate = match crate::compile(expression) {
            Ok(predicate) => predicate,
            Err(error) => {
                let err = RewriteError::Expression {
                    expression: expression.to_string(),
                    offset: base + offset,
                    source: Box::new(error),
                };
                skip_or_abort(options, err)?;
                skipped += 1;
                continue;
            }
        };

        debug!(expression, offset = base + offset, "rewriting directive");
        code.push_str(&source[cursor..offset]);
        code.push_str(&predicate::serialize(&predicate)?);
        cursor = offset + len;
        rewritten += 1;
    }

    code.push_str(&source[cursor..]);
    Ok(Rewrite { code, rewritten, skipped })
}

fn skip_or_abort(options: &RewriteOptions, err: RewriteError) -> RewriteResult<()> {
    match options.on_error {
        OnError::Abort => Err(err),
        OnError::Skip => {
            warn!(directive = %options.directive, error = %err, "skipping directive");
            Ok(())
        }
    }
}
