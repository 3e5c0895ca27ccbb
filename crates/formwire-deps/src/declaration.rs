//! Parsing of `data-depends` / `data-depends-value` declarations.

use std::collections::BTreeSet;

use serde::Serialize;

use formwire_model::EnhanceOptions;
use formwire_model::attrs::{DEPENDS_LIST_SEPARATOR, NEGATION_MARKER};

/// One visibility condition: the element shows when the source value is in
/// `allowed`, or when it is not and `negate` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub allowed: BTreeSet<String>,
    pub negate: bool,
}

impl Condition {
    pub fn new<I, S>(allowed: I, negate: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            negate,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        self.allowed.contains(value) != self.negate
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSpec {
    pub field: String,
    pub condition: Condition,
}

/// Field and value lists of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMismatch {
    pub names: usize,
    pub values: usize,
}

/// Pair up field names with value specs.
///
/// Names and value specs are trimmed. A value spec starting with `!` negates
/// its condition; the rest is split on `options.value_separator` into the
/// allowed values, kept verbatim. A missing value list counts as zero specs.
pub fn parse_declaration(
    names: &str,
    values: Option<&str>,
    options: &EnhanceOptions,
) -> Result<Vec<ConditionSpec>, ListMismatch> {
    let names: Vec<&str> = names.split(DEPENDS_LIST_SEPARATOR).map(str::trim).collect();
    let specs: Vec<&str> = match values {
        Some(values) => values.split(DEPENDS_LIST_SEPARATOR).map(str::trim).collect(),
        None => Vec::new(),
    };
    if names.len() != specs.len() {
        return Err(ListMismatch {
            names: names.len(),
            values: specs.len(),
        });
    }
    Ok(names
        .into_iter()
        .zip(specs)
        .map(|(field, spec)| ConditionSpec {
            field: field.to_string(),
            condition: parse_value_spec(spec, options.value_separator),
        })
        .collect())
}

fn parse_value_spec(spec: &str, separator: char) -> Condition {
    let (negate, rest) = match spec.strip_prefix(NEGATION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, spec),
    };
    Condition::new(rest.split(separator), negate)
}
