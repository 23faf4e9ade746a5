//! Product search query construction.
//!
//! Builds Stripe search-grammar query strings from the `list_products`
//! filters: one clause per present field, one clause per metadata key in
//! the mapping's iteration order, joined by the chosen operator. Embedded
//! quotes and backslashes in user-supplied values are escaped so a value
//! cannot terminate its clause early.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;

/// Combinator between search clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperator {
    /// All clauses must match.
    #[default]
    And,
    /// Any clause may match.
    Or,
}

impl QueryOperator {
    fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Escape `"` and `\` in a clause value with a backslash.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a Stripe product search query from the supplied filters.
///
/// Clause order is description, name, then metadata keys in map order.
/// An empty filter set yields an empty query; callers switch to the
/// unfiltered listing before that can happen, except when an empty
/// metadata map was explicitly supplied - that query is forwarded and
/// rejected by Stripe.
pub fn build_search_query(
    description: Option<&str>,
    name: Option<&str>,
    metadata: Option<&BTreeMap<String, String>>,
    operator: QueryOperator,
) -> String {
    let mut clauses = Vec::new();

    if let Some(description) = description {
        clauses.push(format!("description:\"{}\"", escape(description)));
    }
    if let Some(name) = name {
        clauses.push(format!("name:\"{}\"", escape(name)));
    }
    if let Some(metadata) = metadata {
        for (key, value) in metadata {
            clauses.push(format!("metadata[\"{}\"]:\"{}\"", escape(key), escape(value)));
        }
    }

    clauses.join(operator.separator())
}
