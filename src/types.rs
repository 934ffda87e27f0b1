//! Type & value translation: Redshift column type names to Postgres
//! wire types, and tagged Data API field values to a native value enum
//! the wire writer can hand to `DataRowEncoder`.
//!
//! Grounded on `original_source/pkg/pg_redshift_translator.go`'s
//! `convertRedshiftResultTypeToPostgresType` and `TranslateRowToPgFormat`.

use pgwire::api::Type;

use crate::error::QueryError;
use crate::redshift::Field;

/// A cell value in its native Rust representation, ready for
/// `DataRowEncoder::encode_field`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Long(i64),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

/// Map a Redshift column type *name* (as `GetStatementResult` reports
/// it) to the Postgres wire type the column is described as.
///
/// Unknown names are a hard per-query error (`DialectUnsupported`) —
/// there is no silent fallback to `TEXT`, matching the original's
/// `"no convertor found redshiftTypeName=%v"`.
pub fn redshift_type_to_pg(type_name: &str) -> Result<Type, QueryError> {
    let ty = match type_name {
        "super" => Type::JSON,
        "bool" => Type::BOOL,
        "char" | "varchar" => Type::VARCHAR,
        "bpchar" => Type::BPCHAR,
        "_text" => Type::TEXT,
        "timestamp" => Type::TIMESTAMP,
        "timestamptz" => Type::TIMESTAMPTZ,
        "float4" => Type::FLOAT4,
        "float8" => Type::FLOAT8,
        "int2" => Type::INT2,
        "int4" => Type::INT4,
        "int8" => Type::INT8,
        "numeric" => Type::NUMERIC,
        "name" => Type::NAME,
        "oid" => Type::OID,
        "_aclitem" => Type::ACLITEM,
        other => {
            return Err(QueryError::DialectUnsupported(format!(
                "no convertor found redshiftTypeName={other}"
            )))
        }
    };
    Ok(ty)
}

/// Translate one tagged Data API field into its native value.
///
/// `Field` is our own closed enum covering every variant this crate
/// understands, so this match is exhaustive at compile time. The actual
/// "unknown tag" case lives one layer down, at the AWS SDK boundary
/// (`redshift::aws_client::from_aws_field`), where the SDK's own
/// non-exhaustive union is narrowed into this enum and a truly
/// unrecognized variant is rejected with `DialectUnsupported` before it
/// ever reaches here.
pub fn field_to_value(field: &Field) -> Value {
    match field {
        Field::Null => Value::Null,
        Field::Blob(b) => Value::Bytes(b.clone()),
        Field::Boolean(b) => Value::Bool(*b),
        Field::Double(d) => Value::Double(*d),
        Field::Long(l) => Value::Long(*l),
        Field::StringValue(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_redshift_type_name() {
        let known = [
            "super", "bool", "char", "varchar", "bpchar", "_text", "timestamp", "timestamptz",
            "float4", "float8", "int2", "int4", "int8", "numeric", "name", "oid", "_aclitem",
        ];
        for name in known {
            assert!(redshift_type_to_pg(name).is_ok(), "expected {name} to map");
        }
    }

    #[test]
    fn unknown_type_name_is_dialect_unsupported() {
        let err = redshift_type_to_pg("geometry").unwrap_err();
        match err {
            QueryError::DialectUnsupported(msg) => {
                assert!(msg.contains("geometry"));
            }
            other => panic!("expected DialectUnsupported, got {other:?}"),
        }
    }

    #[test]
    fn field_variants_translate_to_matching_value_variants() {
        assert_eq!(field_to_value(&Field::Null), Value::Null);
        assert_eq!(
            field_to_value(&Field::StringValue("hi".to_string())),
            Value::Text("hi".to_string())
        );
        assert_eq!(field_to_value(&Field::Long(7)), Value::Long(7));
        assert_eq!(field_to_value(&Field::Double(1.5)), Value::Double(1.5));
        assert_eq!(field_to_value(&Field::Boolean(true)), Value::Bool(true));
        assert_eq!(
            field_to_value(&Field::Blob(vec![1, 2, 3])),
            Value::Bytes(vec![1, 2, 3])
        );
    }
}
