//! SQL dialect translation: rewriting a Postgres-wire query and its
//! positional parameters into the shape the Redshift Data API expects.
//!
//! Pure functions, no I/O — both take a fully-materialized SQL string
//! and parameter list and return a new owned value.

/// A single named parameter as the Data API wants it: `:1`, `:2`, ...
/// paired with its string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlParameter {
    pub name: String,
    pub value: String,
}

/// Rewrite Postgres-style positional placeholders (`$1`, `$2`, ...) to
/// the Data API's named-colon style (`:1`, `:2`, ...).
///
/// This is a textual substitution, not a SQL parse — it does not
/// distinguish a placeholder from the same text occurring inside a
/// string literal or identifier, matching the original implementation's
/// behavior exactly.
pub fn rewrite_sql(sql: &str) -> String {
    sql.replace('$', ":")
}

/// Pair up ordered parameter values with their one-based positional
/// names (`1`, `2`, ...), matching `rewrite_sql`'s `:1`, `:2`, ... output.
pub fn rewrite_params(values: &[String]) -> Vec<SqlParameter> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| SqlParameter {
            name: (i + 1).to_string(),
            value: value.clone(),
        })
        .collect()
}

/// The highest `$N` placeholder index referenced anywhere in `sql`, or
/// `0` if none appear. Used by the wire layer to tell the client how
/// many parameters a statement expects *before* it is ever sent to the
/// Data API — extended-query clients (tokio-postgres, libpq, JDBC)
/// check `param_types.len() == params.len()` client-side and refuse to
/// even send `Bind` on a mismatch, so this count has to be right without
/// a round trip.
///
/// A textual scan, not a SQL parse — same fidelity tradeoff as
/// `rewrite_sql`: a `$2` inside a string literal is indistinguishable
/// from a real placeholder and is counted anyway.
pub fn max_parameter_index(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut max_index = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = sql[start..end].parse::<usize>() {
                    max_index = max_index.max(n);
                }
                i = end;
                continue;
            }
        }
        i += 1;
    }
    max_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_dollar_placeholders_to_colon_names() {
        assert_eq!(
            rewrite_sql("SELECT * FROM t WHERE a = $1 AND b = $2"),
            "SELECT * FROM t WHERE a = :1 AND b = :2"
        );
    }

    #[test]
    fn rewrite_sql_is_a_no_op_without_placeholders() {
        assert_eq!(rewrite_sql("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn rewrite_params_produces_one_based_named_pairs() {
        let values = vec!["alice".to_string(), "42".to_string()];
        let params = rewrite_params(&values);
        assert_eq!(
            params,
            vec![
                SqlParameter {
                    name: "1".to_string(),
                    value: "alice".to_string(),
                },
                SqlParameter {
                    name: "2".to_string(),
                    value: "42".to_string(),
                },
            ]
        );
    }

    #[test]
    fn rewrite_params_of_empty_list_is_empty() {
        assert!(rewrite_params(&[]).is_empty());
    }

    #[test]
    fn max_parameter_index_of_a_statement_with_no_placeholders_is_zero() {
        assert_eq!(max_parameter_index("SELECT 1"), 0);
    }

    #[test]
    fn max_parameter_index_finds_the_highest_referenced_placeholder() {
        assert_eq!(
            max_parameter_index("SELECT * FROM t WHERE a = $1 AND b = $2"),
            2
        );
        assert_eq!(max_parameter_index("SELECT * FROM t WHERE a = $3"), 3);
    }

    #[test]
    fn max_parameter_index_ignores_out_of_order_repeats() {
        assert_eq!(max_parameter_index("SELECT $2, $1, $2"), 2);
    }
}
