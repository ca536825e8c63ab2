//! Basic field substitution: recipient, proposer and telephone.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::rules::{PROPOSER_LABEL, RECIPIENT_LABEL, TEL_LABEL};
use crate::substitution::Substitution;

/// The labeled fields a template may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Recipient,
    Proposer,
    Tel,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Recipient, Field::Proposer, Field::Tel];

    pub fn name(self) -> &'static str {
        match self {
            Field::Recipient => "recipient",
            Field::Proposer => "proposer",
            Field::Tel => "tel",
        }
    }

    pub fn rule(self) -> &'static Regex {
        match self {
            Field::Recipient => &*RECIPIENT_LABEL,
            Field::Proposer => &*PROPOSER_LABEL,
            Field::Tel => &*TEL_LABEL,
        }
    }
}

/// Values for the three basic fields.
///
/// Values are inserted verbatim. Escaping markup-significant characters
/// is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFields {
    pub recipient: String,
    pub proposer: String,
    pub tel: String,
}

impl BasicFields {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Recipient => &self.recipient,
            Field::Proposer => &self.proposer,
            Field::Tel => &self.tel,
        }
    }
}

/// Replace the value region of every recipient, proposer and telephone
/// label. Labels missing from the document are left alone.
pub fn apply_basic_fields(html: &str, fields: &BasicFields) -> Substitution {
    Field::ALL
        .into_iter()
        .fold(Substitution::unchanged(html), |acc, field| {
            acc.then(|current| apply_field(current, field, fields.value(field)))
        })
}

/// Replace the value region of every occurrence of one field's label.
///
/// Only the value changes; the label markup and any whitespace trailing
/// the old value are kept byte-for-byte.
pub fn apply_field(html: &str, field: Field, value: &str) -> Substitution {
    let mut count = 0;
    let rewritten = field.rule().replace_all(html, |caps: &Captures<'_>| {
        count += 1;
        let current = &caps[2];
        let trailing = &current[current.trim_end().len()..];
        format!("{}{value}{trailing}", &caps[1])
    });

    if count == 0 {
        tracing::debug!(field = field.name(), "label not found, field left unchanged");
    }

    Substitution {
        html: rewritten.into_owned(),
        count,
    }
}
