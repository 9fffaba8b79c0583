//! Filter compiler.
//!
//! Turns a sparse filter record into one SQL predicate plus the parameter
//! list in placeholder order. The same `Predicate` value is handed to both the
//! count query and the data query, so their conditions cannot drift apart;
//! only the data query appends its `LIMIT`/`OFFSET` parameters.

use serde::Deserialize;

use crate::model::SqlValue;

/// Column references used in predicates.
///
/// Branch columns are qualified with `b`, bank columns with `ba`, matching the
/// aliases of the relations the storage executor reads from.
pub mod columns {
    pub const BANK_ID: &str = "ba.id";
    pub const BANK_NAME: &str = "ba.name";
    pub const BRANCH_IFSC: &str = "b.ifsc";
    pub const BRANCH_NAME: &str = "b.branch";
    pub const BRANCH_CITY: &str = "b.city";
    pub const BRANCH_DISTRICT: &str = "b.district";
    pub const BRANCH_STATE: &str = "b.state";
}

const MATCH_ALL: &str = "1=1";

/// A compiled `WHERE` condition and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    clause: String,
    params: Vec<SqlValue>,
}

impl Predicate {
    /// The trivial predicate that matches every row.
    pub fn match_all() -> Self {
        Self {
            clause: MATCH_ALL.to_string(),
            params: Vec::new(),
        }
    }

    /// Exact equality on a single column.
    pub fn equals(column: &str, value: impl Into<SqlValue>) -> Self {
        Self {
            clause: format!("{} = ?", column),
            params: vec![value.into()],
        }
    }

    /// Conjunction of substring matches, one per present field.
    ///
    /// Fields whose value is absent or empty are skipped; if none remain the
    /// result is [`Predicate::match_all`].
    pub fn substring_conjunction<'c, 'v>(
        fields: impl IntoIterator<Item = (&'c str, Option<&'v str>)>,
    ) -> Self {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        for (column, value) in fields {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            conditions.push(format!("{} LIKE ? ESCAPE '\\'", column));
            params.push(SqlValue::Text(format!("%{}%", escape_like(value))));
        }
        if conditions.is_empty() {
            return Self::match_all();
        }
        Self {
            clause: conditions.join(" AND "),
            params,
        }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// True when this predicate filters nothing.
    pub fn is_match_all(&self) -> bool {
        self.params.is_empty() && self.clause == MATCH_ALL
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::match_all()
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Optional substring filters over branches. All present fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BranchFilter {
    pub ifsc: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
}

impl BranchFilter {
    /// True when no field carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.fields().into_iter().all(|(_, v)| v.map_or(true, str::is_empty))
    }

    /// Compile into a single predicate over the branch/bank join.
    pub fn compile(&self) -> Predicate {
        Predicate::substring_conjunction(self.fields())
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            (columns::BRANCH_IFSC, self.ifsc.as_deref()),
            (columns::BRANCH_CITY, self.city.as_deref()),
            (columns::BRANCH_DISTRICT, self.district.as_deref()),
            (columns::BRANCH_STATE, self.state.as_deref()),
            (columns::BANK_NAME, self.bank_name.as_deref()),
            (columns::BRANCH_NAME, self.branch_name.as_deref()),
        ]
    }
}

/// Optional substring filter over bank names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankFilter {
    pub name: Option<String>,
}

impl BankFilter {
    pub fn compile(&self) -> Predicate {
        Predicate::substring_conjunction([(columns::BANK_NAME, self.name.as_deref())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(s.to_string())
    }

    #[test]
    fn test_empty_filter_is_match_all() {
        let filter = BranchFilter::default();
        assert!(filter.is_empty());
        let predicate = filter.compile();
        assert!(predicate.is_match_all());
        assert_eq!(predicate.clause(), "1=1");
        assert!(predicate.params().is_empty());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let filter = BranchFilter {
            city: Some(String::new()),
            state: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.compile().is_match_all());
    }

    #[test]
    fn test_single_field() {
        let filter = BranchFilter {
            city: Some("MUMBAI".to_string()),
            ..Default::default()
        };
        let predicate = filter.compile();
        assert_eq!(predicate.clause(), "b.city LIKE ? ESCAPE '\\'");
        assert_eq!(predicate.params(), &[text("%MUMBAI%")]);
        assert!(!predicate.is_match_all());
    }

    #[test]
    fn test_fields_are_anded_in_fixed_order() {
        let filter = BranchFilter {
            branch_name: Some("RTGS".to_string()),
            state: Some("MAHARASHTRA".to_string()),
            bank_name: Some("ABHYUDAYA".to_string()),
            ifsc: Some("ABHY".to_string()),
            ..Default::default()
        };
        let predicate = filter.compile();
        assert_eq!(
            predicate.clause(),
            "b.ifsc LIKE ? ESCAPE '\\' AND b.state LIKE ? ESCAPE '\\' \
             AND ba.name LIKE ? ESCAPE '\\' AND b.branch LIKE ? ESCAPE '\\'"
        );
        assert_eq!(
            predicate.params(),
            &[
                text("%ABHY%"),
                text("%MAHARASHTRA%"),
                text("%ABHYUDAYA%"),
                text("%RTGS%"),
            ]
        );
    }

    #[test]
    fn test_like_metacharacters_are_escaped() {
        let filter = BranchFilter {
            branch_name: Some("100%_a\\b".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.compile().params(), &[text("%100\\%\\_a\\\\b%")]);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let filter = BranchFilter {
            city: Some("PUNE".to_string()),
            district: Some("PUNE".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.compile(), filter.compile());
    }

    #[test]
    fn test_equals_predicate() {
        let predicate = Predicate::equals(columns::BANK_ID, 60i64);
        assert_eq!(predicate.clause(), "ba.id = ?");
        assert_eq!(predicate.params(), &[SqlValue::Integer(60)]);
    }

    #[test]
    fn test_bank_filter() {
        assert!(BankFilter::default().compile().is_match_all());
        let predicate = BankFilter {
            name: Some("STATE".to_string()),
        }
        .compile();
        assert_eq!(predicate.clause(), "ba.name LIKE ? ESCAPE '\\'");
    }

    #[test]
    fn test_deserialize_sparse_filter() {
        let filter: BranchFilter = serde_json::from_str(r#"{"city": "DELHI"}"#).unwrap();
        assert_eq!(filter.city.as_deref(), Some("DELHI"));
        assert!(filter.state.is_none());
    }
}
