//! Theme variable substitution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{DeclarationRule, ROOT_BLOCK, STYLE_OPEN};
use crate::substitution::Substitution;

/// Style-variable name → replacement value, e.g. `--accent-gold` → `#D4AF37`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeBindings(BTreeMap<String, String>);

impl ThemeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in application order: longest name first, then lexical.
    ///
    /// Applying longer names first keeps a short name that happens to be a
    /// suffix of a longer one from claiming its declaration.
    pub fn ordered(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ThemeBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Replace the value of every declaration named in `bindings`.
///
/// Each binding is an independent pass over the text produced by the
/// previous one. Variables not declared in the document are skipped.
pub fn apply_theme_vars(html: &str, bindings: &ThemeBindings) -> Substitution {
    bindings
        .ordered()
        .into_iter()
        .fold(Substitution::unchanged(html), |acc, (name, value)| {
            acc.then(|current| replace_declarations(current, name, value))
        })
}

/// Replace the value of every `<name>: <value>;` declaration of one variable.
pub fn replace_declarations(text: &str, name: &str, value: &str) -> Substitution {
    let declarations = DeclarationRule::new(name).find_all(text);
    if declarations.is_empty() {
        tracing::debug!(name, "theme variable not declared, binding skipped");
        return Substitution::unchanged(text);
    }

    let mut out = String::with_capacity(text.len() + declarations.len() * value.len());
    let mut last = 0;
    for decl in &declarations {
        out.push_str(&text[last..decl.value.start]);
        out.push_str(value);
        last = decl.value.end;
    }
    out.push_str(&text[last..]);

    Substitution {
        html: out,
        count: declarations.len(),
    }
}

/// Make sure the `:root` block declares `name` with `value`.
///
/// - `:root` block present, variable declared: value replaced inside the block
/// - `:root` block present, variable missing: declaration appended to the block
/// - no `:root` block: a new one is inserted right after the first `<style>` tag
/// - no `<style>` tag either: the document is returned unchanged
pub fn ensure_root_var(html: &str, name: &str, value: &str) -> Substitution {
    if let Some(block) = ROOT_BLOCK.captures(html).and_then(|caps| caps.get(1)) {
        let body = block.as_str();
        let replaced = replace_declarations(body, name, value);
        let new_body = if replaced.changed() {
            replaced.html
        } else {
            format!("{body}\n  {name}: {value};")
        };

        let mut out = String::with_capacity(html.len() + new_body.len());
        out.push_str(&html[..block.start()]);
        out.push_str(&new_body);
        out.push_str(&html[block.end()..]);
        return Substitution {
            html: out,
            count: 1,
        };
    }

    let Some(style) = STYLE_OPEN.find(html) else {
        tracing::debug!(name, "no :root block or <style> tag, variable not added");
        return Substitution::unchanged(html);
    };

    let insert = format!("\n:root{{\n  {name}: {value};\n}}\n");
    let mut out = String::with_capacity(html.len() + insert.len());
    out.push_str(&html[..style.end()]);
    out.push_str(&insert);
    out.push_str(&html[style.end()..]);
    Substitution {
        html: out,
        count: 1,
    }
}
