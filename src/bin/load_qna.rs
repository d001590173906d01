//! Bulk loader: `load-qna <file.xlsx|file.xls|file.csv>`.
//!
//! Column 1 is the question; columns 2 and 3 are joined into the answer.
//! Rows already present as an exact (question, answer) pair are skipped.

use std::path::PathBuf;

use anyhow::{Context, bail};
use doc_ingest::{Cell, FileKind, read_csv_rows, read_excel_rows};
use qna_store::{DbConfig, PgQnaStore, QnaPair};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: load-qna <file.xlsx|file.xls|file.csv>")?;

    let name = path.to_string_lossy().to_string();
    let kind = FileKind::from_filename(&name)
        .filter(|k| k.is_tabular())
        .with_context(|| format!("{name}: expected an .xlsx, .xls or .csv file"))?;

    let bytes = std::fs::read(&path).with_context(|| format!("reading {name}"))?;
    let rows = match kind {
        FileKind::Csv => read_csv_rows(&bytes)?,
        FileKind::Excel => read_excel_rows(&bytes)?,
        other => bail!("unsupported file kind {other:?}"),
    };
    info!(file = %name, rows = rows.len(), "load_qna: file read");

    let store = PgQnaStore::connect_lazy(&DbConfig::from_env());
    store.ensure_schema().await.context("creating table qna_pairs")?;

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for pair in rows.iter().filter_map(|r| row_to_pair(r)) {
        if store.insert_if_absent(&pair).await? {
            inserted += 1;
        } else {
            debug!(question = %pair.question, "load_qna: duplicate");
            skipped += 1;
        }
    }

    println!("Inserted: {inserted} new Q&A pairs");
    println!("Skipped: {skipped} duplicate Q&A pairs");
    Ok(())
}

/// Question from column 1, answer from columns 2 and 3.
///
/// `None` when the question cell is empty or the joined answer is blank.
fn row_to_pair(row: &[Cell]) -> Option<QnaPair> {
    let question = row.first().cloned().flatten()?;
    let col = |i: usize| row.get(i).cloned().flatten().unwrap_or_default();
    let answer = format!("{} {}", col(1), col(2)).trim().to_string();
    if answer.is_empty() {
        return None;
    }
    Some(QnaPair::new(question, answer))
}
