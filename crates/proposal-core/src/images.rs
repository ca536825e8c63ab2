//! Image reference discovery and inline replacement.

use std::collections::{HashMap, HashSet};

use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::encode::{encode_data_url, is_embedded};
use crate::rules::IMG_SRC;
use crate::substitution::Substitution;

/// A resolved image ready to be inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReplacement {
    /// Reference exactly as written in the template.
    pub original: String,
    /// `data:` URL carrying the image bytes.
    pub embedded: String,
    pub mime: String,
}

impl ImageReplacement {
    pub fn new(original: impl Into<String>, bytes: &[u8], mime: impl Into<String>) -> Self {
        let mime = mime.into();
        Self {
            original: original.into(),
            embedded: encode_data_url(bytes, &mime),
            mime,
        }
    }
}

/// Distinct, not yet embedded `<img>` sources in first-occurrence order.
pub fn list_image_srcs(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut srcs = Vec::new();

    for caps in IMG_SRC.captures_iter(html) {
        let Some(src) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()) else {
            continue;
        };
        if src.is_empty() || is_embedded(src) {
            continue;
        }
        if seen.insert(src) {
            srcs.push(src.to_string());
        }
    }

    srcs
}

/// Rewrite the `src` of every `<img>` whose reference equals a
/// replacement's original, keeping the attribute's quote style.
///
/// Attributes are located with the same rule the scanner uses, then the
/// captured value is compared literally. References that do not occur
/// are skipped. Originals must be distinct.
pub fn replace_images(html: &str, replacements: &[ImageReplacement]) -> Substitution {
    let lookup: HashMap<&str, &str> = replacements
        .iter()
        .filter(|r| !r.original.is_empty() && !is_embedded(&r.original))
        .map(|r| (r.original.as_str(), r.embedded.as_str()))
        .collect();
    if lookup.is_empty() {
        return Substitution::unchanged(html);
    }

    let mut hit = HashSet::new();
    let mut count = 0;
    let rewritten = IMG_SRC.replace_all(html, |caps: &Captures<'_>| {
        let tag = caps.get(0).expect("group 0 always matches");
        let replacement = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|value| lookup.get_key_value(value.as_str()).map(|kv| (value, kv)));

        match replacement {
            Some((value, (original, embedded))) => {
                hit.insert(*original);
                count += 1;
                let text = tag.as_str();
                let offset = tag.start();
                format!(
                    "{}{embedded}{}",
                    &text[..value.start() - offset],
                    &text[value.end() - offset..]
                )
            }
            None => tag.as_str().to_string(),
        }
    });

    for original in lookup.keys().filter(|original| !hit.contains(*original)) {
        tracing::debug!(src = %original, "image reference not present, skipped");
    }

    Substitution {
        html: rewritten.into_owned(),
        count,
    }
}
