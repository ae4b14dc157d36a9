//! CSV record source for batch imports.
//!
//! The expected layout is one header row followed by rows of
//! `title,type,value,category`. Every field is trimmed before it is coerced.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{EngineError, MoneyCents, ResultEngine, TransactionKind};

const COLUMNS: usize = 4;

/// A parsed import row, ready to be persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    pub title: String,
    pub kind: TransactionKind,
    pub value: MoneyCents,
    pub category: String,
}

/// Reads every row from `reader` before returning.
///
/// The first failing row aborts the whole read, so callers never see a
/// partial source.
pub fn read_records<R: Read>(reader: R) -> ResultEngine<Vec<TransactionRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|err| EngineError::InvalidRecord(err.to_string()))?;
        records.push(parse_row(&row)?);
    }
    Ok(records)
}

/// Opens `path` and reads it with [`read_records`].
pub fn read_path(path: impl AsRef<Path>) -> ResultEngine<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        EngineError::InvalidRecord(format!("cannot open {}: {err}", path.display()))
    })?;
    read_records(file)
}

fn parse_row(row: &StringRecord) -> ResultEngine<TransactionRecord> {
    let line = row.position().map_or(0, csv::Position::line);
    let invalid = |reason: String| EngineError::InvalidRecord(format!("line {line}: {reason}"));

    if row.len() != COLUMNS {
        return Err(invalid(format!(
            "expected {COLUMNS} columns, found {}",
            row.len()
        )));
    }

    let title = &row[0];
    let kind = TransactionKind::try_from(&row[1]).map_err(|err| invalid(err.to_string()))?;
    let value: MoneyCents = row[2].parse().map_err(|err: EngineError| invalid(err.to_string()))?;
    let category = &row[3];

    if title.is_empty() {
        return Err(invalid("title must not be empty".to_string()));
    }
    if category.is_empty() {
        return Err(invalid("category must not be empty".to_string()));
    }
    if value.is_negative() {
        return Err(invalid("value must not be negative".to_string()));
    }

    Ok(TransactionRecord {
        title: title.to_string(),
        kind,
        value,
        category: category.to_string(),
    })
}
