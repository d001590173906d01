//! Spreadsheet and CSV reading into a uniform row/cell grid.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::{
    errors::{IngestError, Result},
    qna_text::DATA_HEADER,
};

/// One cell; `None` when empty.
pub type Cell = Option<String>;

/// Reads a header-less CSV. Rows may have different lengths.
pub fn read_csv_rows(bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(non_empty).collect());
    }
    Ok(rows)
}

/// Reads the first worksheet of an `.xlsx`/`.xls`/`.ods` workbook.
pub fn read_excel_rows(bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(r) => r.map_err(|e| IngestError::Spreadsheet(e.to_string()))?,
        None => return Ok(Vec::new()),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> Cell {
    match cell {
        Data::Empty => None,
        other => non_empty(&other.to_string()),
    }
}

fn non_empty(s: &str) -> Cell {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Renders a grid as session text.
///
/// With at least two columns the grid is a Q&A table: returns
/// (`Data:` block, `true`). Otherwise the cells are rendered line by line and
/// returned with `false`.
pub fn render_table(rows: &[Vec<Cell>]) -> (String, bool) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    if width >= 2 {
        let mut out = String::from(DATA_HEADER);
        for row in rows {
            let q = row.first().cloned().flatten();
            let a = row.get(1).cloned().flatten();
            if q.is_none() && a.is_none() {
                continue;
            }
            out.push_str(&format!(
                "Q: {}\nA: {}\n",
                q.unwrap_or_default(),
                a.unwrap_or_default()
            ));
        }
        return (out, true);
    }

    let text = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|c| c.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    (text, false)
}
