use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Number, Value};
use tiberius::numeric::Numeric;
use tiberius::{ColumnData, FromSql};

use jitaccess_application::Row;

/// Converts a driver row into a JSON object keyed by column name.
pub(super) fn row_to_json(row: tiberius::Row) -> tiberius::Result<Row> {
    let names = row
        .columns()
        .iter()
        .map(|column| column.name().to_owned())
        .collect::<Vec<_>>();

    let mut mapped = Row::new();
    for (name, data) in names.into_iter().zip(row) {
        mapped.insert(name, column_value(data)?);
    }

    Ok(mapped)
}

pub(super) fn column_value(data: ColumnData<'static>) -> tiberius::Result<Value> {
    let value = match data {
        ColumnData::U8(value) => value.map(Value::from),
        ColumnData::I16(value) => value.map(Value::from),
        ColumnData::I32(value) => value.map(Value::from),
        ColumnData::I64(value) => value.map(Value::from),
        ColumnData::F32(value) => value.map(|value| Value::from(f64::from(value))),
        ColumnData::F64(value) => value.map(Value::from),
        ColumnData::Bit(value) => value.map(Value::Bool),
        ColumnData::String(value) => value.map(|value| Value::String(value.into_owned())),
        ColumnData::Guid(value) => value.map(|value| Value::String(value.to_string())),
        ColumnData::Binary(value) => value.map(|value| Value::String(hex::encode(value))),
        ColumnData::Numeric(value) => value.map(numeric_value),
        ColumnData::Xml(value) => {
            value.map(|value| Value::String(value.into_owned().into_string()))
        }
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            NaiveDateTime::from_sql(&data)?
                .map(|value| Value::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        }
        ColumnData::Date(_) => {
            NaiveDate::from_sql(&data)?.map(|value| Value::String(value.to_string()))
        }
        ColumnData::Time(_) => {
            NaiveTime::from_sql(&data)?.map(|value| Value::String(value.to_string()))
        }
        ColumnData::DateTimeOffset(_) => DateTime::<FixedOffset>::from_sql(&data)?
            .map(|value| Value::String(value.to_rfc3339())),
    };

    Ok(value.unwrap_or(Value::Null))
}

/// Decimals become JSON numbers; values outside `f64` stay textual.
fn numeric_value(value: Numeric) -> Value {
    let rendered = value.to_string();
    rendered
        .parse::<Number>()
        .map(Value::Number)
        .unwrap_or(Value::String(rendered))
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use serde_json::{Value, json};
    use tiberius::ColumnData;
    use tiberius::numeric::Numeric;

    use super::column_value;

    fn convert(data: ColumnData<'static>) -> Value {
        match column_value(data) {
            Ok(value) => value,
            Err(error) => panic!("column should convert: {error}"),
        }
    }

    #[test]
    fn nulls_stay_null() {
        assert_eq!(convert(ColumnData::I32(None)), Value::Null);
        assert_eq!(convert(ColumnData::String(None)), Value::Null);
    }

    #[test]
    fn bits_become_booleans() {
        assert_eq!(convert(ColumnData::Bit(Some(true))), json!(true));
    }

    #[test]
    fn text_and_binary_columns() {
        assert_eq!(
            convert(ColumnData::String(Some(Cow::Borrowed("Finance Readers")))),
            json!("Finance Readers")
        );
        assert_eq!(
            convert(ColumnData::Binary(Some(Cow::Owned(vec![0xde, 0xad, 0x01])))),
            json!("dead01")
        );
    }

    #[test]
    fn decimals_become_numbers() {
        let value = convert(ColumnData::Numeric(Some(Numeric::new_with_scale(1250, 2))));
        assert_eq!(value, json!(12.5));
    }
}
