use super::*;
use anyhow::Result;
use futures_util::TryStreamExt;

use crate::schema::{Column, Value, ValueType};

async fn collect(stream: RowStream) -> Result<Vec<Row>, ScanError> {
    stream.try_collect().await
}

#[test]
fn registry_resolves_known_identifiers_case_insensitively() {
    for identifier in ["raw", "RAW", "csv", "Tsv", "json"] {
        assert!(resolve(identifier).is_ok(), "should resolve {identifier}");
    }
}

#[test]
fn registry_fails_closed_on_unknown_identifier() {
    let err = resolve("nonexistent-format").err().unwrap();
    assert!(
        matches!(err, ScanError::UnsupportedFormat(id) if id == "nonexistent-format")
    );
}

#[tokio::test]
async fn raw_yields_exactly_one_line_joined_row() -> Result<()> {
    let plugin = RawFormat;
    let data = Bytes::from_static(b"alpha\nbeta\n");

    let schema = plugin.describe_schema(&data)?;
    assert_eq!(
        schema.columns(),
        &[Column::new("data", ValueType::Text)]
    );

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(rows, vec![vec![Value::Text("alpha\nbeta".to_string())]]);
    Ok(())
}

#[tokio::test]
async fn raw_yields_one_empty_row_for_empty_input() -> Result<()> {
    let plugin = RawFormat;
    let rows = collect(plugin.produce_rows(Bytes::new())?).await?;
    assert_eq!(rows, vec![vec![Value::Text(String::new())]]);
    Ok(())
}

#[tokio::test]
async fn raw_preserves_interior_blank_lines() -> Result<()> {
    let plugin = RawFormat;
    let rows = collect(plugin.produce_rows(Bytes::from_static(b"a\n\nb"))?).await?;
    assert_eq!(rows, vec![vec![Value::Text("a\n\nb".to_string())]]);
    Ok(())
}

#[tokio::test]
async fn csv_header_names_text_columns() -> Result<()> {
    let plugin = DelimitedFormat::new(&DelimitedConfig::default());
    let data = Bytes::from_static(b"id,Name\n1,ada\n2,grace\n");

    let schema = plugin.describe_schema(&data)?;
    assert_eq!(
        schema.columns(),
        &[
            Column::new("id", ValueType::Text),
            Column::new("Name", ValueType::Text),
        ]
    );

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(
        rows,
        vec![
            vec![Value::Text("1".to_string()), Value::Text("ada".to_string())],
            vec![Value::Text("2".to_string()), Value::Text("grace".to_string())],
        ]
    );
    Ok(())
}

#[tokio::test]
async fn csv_rows_are_normalized_to_header_arity() -> Result<()> {
    let plugin = DelimitedFormat::new(&DelimitedConfig::default());
    let data = Bytes::from_static(b"a,b,c\n1,2\n1,2,3,4\n");

    let schema = plugin.describe_schema(&data)?;
    let rows = collect(plugin.produce_rows(data)?).await?;
    for row in &rows {
        assert_eq!(row.len(), schema.len());
    }
    assert_eq!(rows[0][2], Value::Null);
    assert_eq!(rows[1][2], Value::Text("3".to_string()));
    Ok(())
}

#[tokio::test]
async fn csv_without_header_names_columns_positionally() -> Result<()> {
    let config = DelimitedConfig {
        has_header: false,
        ..DelimitedConfig::default()
    };
    let plugin = DelimitedFormat::new(&config);
    let data = Bytes::from_static(b"1,ada\n2,grace\n");

    let schema = plugin.describe_schema(&data)?;
    assert_eq!(schema.columns()[0].name, "field_0");
    assert_eq!(schema.columns()[1].name, "field_1");

    // the first line is data, not a header
    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Value::Text("1".to_string()));
    Ok(())
}

#[test]
fn csv_empty_source_is_malformed() {
    let plugin = DelimitedFormat::new(&DelimitedConfig::default());
    let err = plugin.describe_schema(&Bytes::new()).unwrap_err();
    assert!(matches!(err, ScanError::MalformedSource { .. }));
}

#[tokio::test]
async fn tsv_splits_on_tabs() -> Result<()> {
    let plugin = DelimitedFormat::new(&DelimitedConfig::tab());
    let data = Bytes::from_static(b"id\tname\n1\tada\n");

    let schema = plugin.describe_schema(&data)?;
    assert_eq!(schema.len(), 2);

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(
        rows,
        vec![vec![Value::Text("1".to_string()), Value::Text("ada".to_string())]]
    );
    Ok(())
}

#[tokio::test]
async fn json_infers_types_from_first_record() -> Result<()> {
    let plugin = JsonFormat;
    let data = Bytes::from_static(
        b"{\"id\": 1, \"name\": \"ada\", \"score\": 9.5, \"active\": true}\n\
          {\"id\": 2, \"name\": \"grace\", \"score\": 8.0, \"active\": false}\n",
    );

    let schema = plugin.describe_schema(&data)?;
    assert_eq!(
        schema.columns(),
        &[
            Column::new("id", ValueType::Integer),
            Column::new("name", ValueType::Text),
            Column::new("score", ValueType::Float),
            Column::new("active", ValueType::Boolean),
        ]
    );

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(
        rows,
        vec![
            vec![
                Value::Integer(1),
                Value::Text("ada".to_string()),
                Value::Float(9.5),
                Value::Boolean(true),
            ],
            vec![
                Value::Integer(2),
                Value::Text("grace".to_string()),
                Value::Float(8.0),
                Value::Boolean(false),
            ],
        ]
    );
    Ok(())
}

#[tokio::test]
async fn json_missing_keys_yield_nulls() -> Result<()> {
    let plugin = JsonFormat;
    let data = Bytes::from_static(b"{\"id\": 1, \"name\": \"ada\"}\n{\"id\": 2}\n");

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(rows[1], vec![Value::Integer(2), Value::Null]);
    Ok(())
}

#[tokio::test]
async fn json_skips_blank_lines() -> Result<()> {
    let plugin = JsonFormat;
    let data = Bytes::from_static(b"\n{\"id\": 1}\n\n{\"id\": 2}\n");

    let rows = collect(plugin.produce_rows(data)?).await?;
    assert_eq!(rows.len(), 2);
    Ok(())
}

#[test]
fn json_invalid_syntax_is_malformed() {
    let plugin = JsonFormat;
    let err = plugin
        .describe_schema(&Bytes::from_static(b"{not json"))
        .unwrap_err();
    assert!(matches!(err, ScanError::MalformedSource { .. }));
}

#[test]
fn json_non_object_record_is_malformed() {
    let plugin = JsonFormat;
    let err = plugin
        .describe_schema(&Bytes::from_static(b"[1, 2, 3]\n"))
        .unwrap_err();
    assert!(matches!(err, ScanError::MalformedSource { .. }));
}

#[tokio::test]
async fn json_type_mismatch_errors_mid_stream_without_retracting_rows() -> Result<()> {
    let plugin = JsonFormat;
    let data = Bytes::from_static(b"{\"id\": 1}\n{\"id\": \"oops\"}\n");

    let mut stream = plugin.produce_rows(data)?;
    let first = stream.try_next().await?;
    assert_eq!(first, Some(vec![Value::Integer(1)]));

    let err = stream.try_next().await.unwrap_err();
    assert!(matches!(err, ScanError::MalformedSource { .. }));
    Ok(())
}

#[tokio::test]
async fn every_plugin_keeps_schema_and_row_arity_consistent() -> Result<()> {
    let sources: Vec<(&str, Bytes)> = vec![
        ("raw", Bytes::from_static(b"one\ntwo\nthree")),
        ("csv", Bytes::from_static(b"a,b\n1,2\n3,4\n")),
        ("tsv", Bytes::from_static(b"a\tb\n1\t2\n")),
        ("json", Bytes::from_static(b"{\"a\": 1, \"b\": \"x\"}\n")),
    ];

    for (identifier, data) in sources {
        let plugin = resolve(identifier)?;
        let schema = plugin.describe_schema(&data)?;
        let rows = collect(plugin.produce_rows(data)?).await?;
        assert!(!rows.is_empty(), "{identifier} produced no rows");
        for row in rows {
            assert_eq!(row.len(), schema.len(), "{identifier} arity mismatch");
        }
    }
    Ok(())
}
