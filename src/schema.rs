//! Canonical fields and header-to-field inference.
//!
//! Source files come with whatever headers the publisher chose, often in
//! French and with inconsistent casing. This module owns the five
//! [`CanonicalField`]s everything downstream relies on and the keyword rules
//! that resolve raw headers onto them.
//!
//! ## Resolution rules
//!
//! - Headers are normalized first: lower-cased, trimmed, spaces replaced
//!   with underscores ([`normalize_header`]).
//! - Rules are evaluated in [`FIELD_RULES`] order. For each field the first
//!   header (in file order) containing any of its keywords wins.
//! - A header claimed by an earlier field is skipped by later fields, so a
//!   header such as `nom_reseau` belongs to `Network`, never to `Station`.
//! - A field without a matching header is simply absent from the mapping.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CanonicalField {
    Network,
    Station,
    Traffic,
    City,
    District,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::Network,
        CanonicalField::Station,
        CanonicalField::Traffic,
        CanonicalField::City,
        CanonicalField::District,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Network => "Network",
            CanonicalField::Station => "Station",
            CanonicalField::Traffic => "Traffic",
            CanonicalField::City => "City",
            CanonicalField::District => "District",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A canonical field together with the header fragments that identify it.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: CanonicalField,
    pub keywords: &'static [&'static str],
}

impl FieldRule {
    pub fn matches(&self, header: &str) -> bool {
        self.keywords.iter().any(|keyword| header.contains(keyword))
    }
}

pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: CanonicalField::Network,
        keywords: &["reseau", "réseau"],
    },
    FieldRule {
        field: CanonicalField::Station,
        keywords: &["station", "nom"],
    },
    FieldRule {
        field: CanonicalField::Traffic,
        keywords: &["trafic", "validations"],
    },
    FieldRule {
        field: CanonicalField::City,
        keywords: &["ville", "commune"],
    },
    FieldRule {
        field: CanonicalField::District,
        keywords: &["arrondissement"],
    },
];

pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase().trim().replace(' ', "_")
}

/// Resolved header positions for each canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    entries: Vec<(CanonicalField, usize)>,
}

impl SchemaMapping {
    /// Resolves normalized headers against [`FIELD_RULES`].
    pub fn infer(headers: &[String]) -> Self {
        Self::infer_with_rules(headers, FIELD_RULES)
    }

    pub fn infer_with_rules(headers: &[String], rules: &[FieldRule]) -> Self {
        let mut claimed = vec![false; headers.len()];
        let mut entries = Vec::with_capacity(rules.len());
        for rule in rules {
            let position = headers
                .iter()
                .enumerate()
                .position(|(idx, header)| !claimed[idx] && rule.matches(header));
            if let Some(idx) = position {
                claimed[idx] = true;
                entries.push((rule.field, idx));
            }
        }
        Self { entries }
    }

    pub fn column_index(&self, field: CanonicalField) -> Option<usize> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, idx)| *idx)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.column_index(field).is_some()
    }

    /// Resolved fields in canonical order.
    pub fn fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| self.contains(*field))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable `field <- header` pairs for diagnostics.
    pub fn describe(&self, headers: &[String]) -> Vec<String> {
        self.entries
            .iter()
            .map(|(field, idx)| {
                let header = headers.get(*idx).map(String::as_str).unwrap_or("?");
                format!("{field} <- {header}")
            })
            .collect()
    }
}
