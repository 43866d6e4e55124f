//! Javadoc comment grammar and the post-edit formatter.
//!
//! The grammar is deliberately small: it accepts what a Java tool would
//! accept as a leading `/** ... */` block and splits it into a description
//! and block tags. It is the well-formedness check behind template
//! validation and behind [`ClassDocument`](super::ClassDocument) edits.

use thiserror::Error;

/// Errors raised when text is not a well-formed documentation comment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentSyntaxError {
    /// The text does not start with `/**`.
    #[error("documentation comment must start with '/**'")]
    MissingOpening,

    /// The text does not end with `*/`.
    #[error("documentation comment must end with '*/'")]
    Unterminated,

    /// The comment closes before its final line.
    #[error("documentation comment contains '*/' before its end")]
    EarlyTerminator,

    /// A block tag has no name after `@`.
    #[error("block tag on line {line} has no name")]
    EmptyTagName {
        /// One-based line number inside the comment.
        line: usize,
    },

    /// An `@param` tag does not name a parameter.
    #[error("@param tag on line {line} does not name a parameter")]
    MissingParameterName {
        /// One-based line number inside the comment.
        line: usize,
    },

    /// An inline tag such as `{@link Foo` is never closed.
    #[error("inline tag is not closed with '}}'")]
    UnclosedInlineTag,
}

/// A block tag such as `@param name text` or `@return text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTag {
    /// Tag name without the leading `@`.
    pub name: String,
    /// Parameter name for `@param`, exception type for `@throws`.
    pub argument: Option<String>,
    /// Remaining tag text, continuation lines joined with `\n`.
    pub text: String,
}

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Free text before the first block tag.
    pub description: String,
    /// Block tags in source order.
    pub tags: Vec<BlockTag>,
}

impl DocComment {
    /// Returns the first tag with the given name.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&BlockTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}

/// Grammar used to decide whether text is a well-formed comment block.
pub trait CommentGrammar: Send + Sync {
    /// Parses `text` as a documentation comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyntaxError`] describing the first structural
    /// problem found.
    fn parse(&self, text: &str) -> Result<DocComment, CommentSyntaxError>;
}

/// Javadoc block comment grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavadocGrammar;

impl CommentGrammar for JavadocGrammar {
    fn parse(&self, text: &str) -> Result<DocComment, CommentSyntaxError> {
        let inner = comment_body(text)?;
        if inner.contains("*/") {
            return Err(CommentSyntaxError::EarlyTerminator);
        }
        check_inline_tags(inner)?;

        let mut comment = DocComment::default();
        let mut description = Vec::new();
        let mut current: Option<(BlockTag, Vec<String>)> = None;

        for (index, line) in content_lines(inner).enumerate() {
            let line_number = index.saturating_add(1);
            let trimmed = line.trim();
            if let Some(tag_source) = trimmed.strip_prefix('@') {
                if let Some((tag, text)) = current.take() {
                    comment.tags.push(finish_tag(tag, &text));
                }
                let (tag, first_line) = parse_block_tag(tag_source, line_number)?;
                current = Some((tag, vec![first_line]));
            } else if let Some((_, text)) = current.as_mut() {
                text.push(trimmed.to_owned());
            } else {
                description.push(trimmed.to_owned());
            }
        }

        if let Some((tag, text)) = current.take() {
            comment.tags.push(finish_tag(tag, &text));
        }
        comment.description = join_trimmed(&description);
        Ok(comment)
    }
}

/// Normalises a documentation comment the way an editor reformat would.
///
/// Single-line comments become `/** text */`; multi-line comments get an
/// opening `/**` line, ` * ` prefixed body lines and a closing ` */` line.
/// Leading and trailing blank lines are dropped and trailing whitespace is
/// trimmed. Text that is not a comment block is returned unchanged.
#[must_use]
pub fn format_doc_comment(text: &str) -> String {
    let Ok(inner) = comment_body(text) else {
        return text.to_owned();
    };

    let lines: Vec<&str> = content_lines(inner).map(str::trim_end).collect();
    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return "/** */".to_owned();
    };
    let body = lines.get(first..=last).unwrap_or_default();

    if !inner.contains('\n') {
        let single = body.first().map_or("", |line| line.trim());
        return format!("/** {single} */");
    }

    let mut formatted = String::from("/**\n");
    for line in body {
        if line.trim().is_empty() {
            formatted.push_str(" *\n");
        } else {
            formatted.push_str(" * ");
            formatted.push_str(line);
            formatted.push('\n');
        }
    }
    formatted.push_str(" */");
    formatted
}

fn comment_body(text: &str) -> Result<&str, CommentSyntaxError> {
    let trimmed = text.trim();
    let rest = trimmed
        .strip_prefix("/**")
        .ok_or(CommentSyntaxError::MissingOpening)?;
    rest.strip_suffix("*/")
        .ok_or(CommentSyntaxError::Unterminated)
}

/// Yields comment lines with indentation, one leading `*` decoration and
/// the single space after it removed.
fn content_lines(inner: &str) -> impl Iterator<Item = &str> {
    inner.lines().map(|line| {
        let undecorated = line.trim_start();
        let stripped = undecorated.strip_prefix('*').unwrap_or(undecorated);
        stripped.strip_prefix(' ').unwrap_or(stripped)
    })
}

fn check_inline_tags(inner: &str) -> Result<(), CommentSyntaxError> {
    let mut rest = inner;
    while let Some((_, after_open)) = rest.split_once("{@") {
        let Some((_, after_close)) = after_open.split_once('}') else {
            return Err(CommentSyntaxError::UnclosedInlineTag);
        };
        rest = after_close;
    }
    Ok(())
}

fn parse_block_tag(
    tag_source: &str,
    line: usize,
) -> Result<(BlockTag, String), CommentSyntaxError> {
    let (name, remainder) = tag_source
        .split_once(char::is_whitespace)
        .unwrap_or((tag_source, ""));
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return Err(CommentSyntaxError::EmptyTagName { line });
    }

    let takes_argument = matches!(name, "param" | "throws" | "exception");
    let remainder_trimmed = remainder.trim();
    let (argument, text) = if takes_argument {
        let (argument, text) = remainder_trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((remainder_trimmed, ""));
        if argument.is_empty() {
            if name == "param" {
                return Err(CommentSyntaxError::MissingParameterName { line });
            }
            (None, text)
        } else {
            (Some(argument.to_owned()), text)
        }
    } else {
        (None, remainder_trimmed)
    };

    Ok((
        BlockTag {
            name: name.to_owned(),
            argument,
            text: String::new(),
        },
        text.trim().to_owned(),
    ))
}

fn finish_tag(mut tag: BlockTag, text: &[String]) -> BlockTag {
    tag.text = join_trimmed(text);
    tag
}

fn join_trimmed(lines: &[String]) -> String {
    lines.join("\n").trim().to_owned()
}
