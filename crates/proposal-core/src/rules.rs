//! Matching rules for every markup shape the engine rewrites.
//!
//! Each rule lives here under its own name so the label, declaration and
//! attribute shapes can be exercised in isolation. The substitutors only
//! decide what to put back; where to look is decided here.
//!
//! Capture-group conventions:
//! - label rules: group 1 is the label markup, group 2 the value region
//! - [`IMG_SRC`]: group 1 is a double-quoted value, group 2 a single-quoted one

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `<strong>수신:</strong> value` — value runs up to the next `<`.
pub static RECIPIENT_LABEL: LazyLock<Regex> = LazyLock::new(|| label_rule("수신"));

/// `<strong>제안:</strong> value` — value runs up to the next `<`.
pub static PROPOSER_LABEL: LazyLock<Regex> = LazyLock::new(|| label_rule("제안"));

/// `Tel. 1833 - 9988` — value is the run of digits, spaces and hyphens.
pub static TEL_LABEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(\bTel\.\s*)([0-9][0-9 \-]*)"));

/// `src` attribute of an `<img>` tag. `data-src` and friends do not match.
pub static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
});

/// First `:root { ... }` block; group 1 is the block body.
pub static ROOT_BLOCK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s):root\s*\{([^}]*)\}"));

pub static STYLE_OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<style\b[^>]*>"));

pub static STYLE_CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</style\s*>"));

pub static DIV_OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<div\b"));

pub static DIV_CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</div\s*>"));

pub static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)</body\s*>"));

fn label_rule(label: &str) -> Regex {
    compile(&format!(
        r"(?i)(<strong>\s*{}\s*:\s*</strong>\s*)([^<\s][^<]*)",
        regex::escape(label)
    ))
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// A style-variable declaration `<name>: <value>;` located in some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Byte offset of the first character of the variable name.
    pub name_start: usize,
    /// Byte range of the existing value, excluding the terminating `;`.
    pub value: Range<usize>,
}

/// Literal match on a style-variable name.
///
/// The name is treated as fixed text. A hit only counts when the name
/// is not glued to a longer identifier on its left, so `--blue` does not
/// match inside `--accent-blue`.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationRule<'a> {
    name: &'a str,
}

impl<'a> DeclarationRule<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Every declaration of this variable, in document order.
    pub fn find_all(&self, text: &str) -> Vec<Declaration> {
        let mut found = Vec::new();
        if self.name.is_empty() {
            return found;
        }

        let mut from = 0;
        while let Some(offset) = text[from..].find(self.name) {
            let name_start = from + offset;
            from = name_start + self.name.len();

            if !starts_identifier(text, name_start) {
                continue;
            }

            let after_name = text[from..].trim_start();
            let Some(after_colon) = after_name.strip_prefix(':') else {
                continue;
            };
            let value_start = text.len() - after_colon.trim_start().len();
            let Some(len) = text[value_start..].find(';') else {
                continue;
            };

            found.push(Declaration {
                name_start,
                value: value_start..value_start + len,
            });
            from = value_start + len + 1;
        }

        found
    }
}

fn starts_identifier(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '-' || c == '_'))
}
