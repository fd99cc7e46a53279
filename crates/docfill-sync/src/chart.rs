use std::collections::BTreeMap;

use docfill_model::{
    col_to_name, Chart, Document, NumberRef, Record, Series, SeriesPoint, SheetRange, TextRef,
};
use thiserror::Error;

use crate::report::{Diagnostic, SyncReport};
use crate::sheet::sync_workbook;
use crate::table::expand_table;

/// Hard failure of a whole document pass.
///
/// Per-part failures are collected into the [`SyncReport`]; this error is
/// returned only when the document had charts or tables to process and none
/// of them could be.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentSyncError {
    #[error("no chart or table could be synchronized")]
    NothingProcessed { diagnostics: Vec<Diagnostic> },
}

/// The series-reference node kinds a chart pass visits.
enum SeriesRefMut<'a> {
    Number(&'a mut NumberRef),
    Text(&'a mut TextRef),
}

/// Outcome of one chart's cache pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartSyncOutcome {
    /// References whose cache and range formula were rebuilt.
    pub references_rewritten: usize,
    /// References that resolved to a column the header does not have, left
    /// untouched. The document driver reports these as warnings.
    pub skipped: Vec<String>,
}

/// Why a single series reference was not rewritten.
enum CacheOutcome {
    Rewritten,
    /// Not range-bound, or bound to the header row. Deliberate no-op.
    Static,
    ColumnOutOfRange { formula: String, column: u32 },
}

fn series_refs_mut(series: &mut Series) -> impl Iterator<Item = SeriesRefMut<'_>> {
    series
        .values
        .iter_mut()
        .map(SeriesRefMut::Number)
        .chain(series.name.iter_mut().map(SeriesRefMut::Text))
        .chain(series.categories.iter_mut().map(SeriesRefMut::Text))
}

/// Rebuild a chart's series caches from the dataset.
///
/// `columns` is the column-to-field mapping read from the embedded
/// workbook's header row; the workbook must already have been rewritten (see
/// [`sync_workbook`]) so ranges and caches agree. Caches are rebuilt from the
/// dataset directly rather than re-read from the workbook; both derive from
/// the same mapping.
///
/// Per reference:
/// - an unparsable range formula marks a static/decorative element and is
///   left untouched (no-op, not an error);
/// - a string reference anchored at the header row is a category/series
///   label, not row-varying data, and is left untouched;
/// - a reference resolving to a column beyond the header is left untouched
///   and recorded in [`ChartSyncOutcome::skipped`];
/// - otherwise the cache becomes one point per record from the resolved
///   column's field, and the formula's row span is rewritten to
///   `$2:$<len + 1>`.
pub fn sync_chart(chart: &mut Chart, dataset: &[Record], columns: &[String]) -> ChartSyncOutcome {
    let mut outcome = ChartSyncOutcome::default();
    for series in &mut chart.series {
        for reference in series_refs_mut(series) {
            let result = match reference {
                SeriesRefMut::Number(num) => {
                    rebuild_cache(&mut num.formula, &mut num.cache, dataset, columns, false)
                }
                SeriesRefMut::Text(text) => {
                    rebuild_cache(&mut text.formula, &mut text.cache, dataset, columns, true)
                }
            };
            match result {
                CacheOutcome::Rewritten => outcome.references_rewritten += 1,
                CacheOutcome::Static => {}
                CacheOutcome::ColumnOutOfRange { formula, column } => {
                    outcome.skipped.push(format!(
                        "series reference {formula:?} resolves to column {} but the header has {} columns",
                        col_to_name(column),
                        columns.len()
                    ));
                }
            }
        }
    }
    outcome
}

fn rebuild_cache(
    formula: &mut String,
    cache: &mut Vec<SeriesPoint>,
    dataset: &[Record],
    columns: &[String],
    skip_header_bound: bool,
) -> CacheOutcome {
    let Some(range) = SheetRange::parse_abs(formula) else {
        log::debug!("series reference {formula:?} is not range-bound; leaving it untouched");
        return CacheOutcome::Static;
    };
    let anchor = range.anchor();
    if skip_header_bound && anchor.row == 0 {
        log::debug!("series reference {formula:?} is bound to the header row; leaving it untouched");
        return CacheOutcome::Static;
    }
    let Some(field) = columns.get(anchor.col as usize) else {
        log::warn!(
            "series reference {formula:?} resolves to column {} but the header has {} columns",
            anchor.col,
            columns.len()
        );
        return CacheOutcome::ColumnOutOfRange {
            formula: formula.clone(),
            column: anchor.col,
        };
    };

    *cache = dataset
        .iter()
        .enumerate()
        .map(|(index, record)| SeriesPoint {
            idx: index as u32,
            value: record.cell_text(field),
        })
        .collect();
    *formula = range.with_data_rows(dataset.len()).to_string();
    CacheOutcome::Rewritten
}

/// Run the full document pass: for every chart, rewrite its embedded
/// workbook and then its series caches; for every entry of `table_rows`,
/// expand the bookmarked narrative table.
///
/// `table_rows` maps bookmark names to already-flattened row values (each a
/// fixed-arity sequence of strings matching the table's column count).
///
/// Failures on one chart or table are recorded in the report and do not
/// abort siblings. The returned graph is always left in a consistent state:
/// a failed chart is left unmodified.
pub fn fill_document(
    document: &mut Document,
    dataset: &[Record],
    table_rows: &BTreeMap<String, Vec<Vec<String>>>,
) -> Result<SyncReport, DocumentSyncError> {
    let mut report = SyncReport::default();
    let had_work = !document.charts.is_empty() || !table_rows.is_empty();

    let Document {
        charts,
        embedded_workbooks,
        tables,
    } = document;

    for chart in charts.iter_mut() {
        let Some(rel_id) = chart.workbook_rel_id.as_deref() else {
            log::debug!("chart {} has no embedded workbook; skipping", chart.part_name);
            continue;
        };
        let Some(workbook) = embedded_workbooks.get_mut(rel_id) else {
            report.diagnostics.push(Diagnostic::error(
                chart.part_name.clone(),
                format!("embedded workbook {rel_id:?} not found"),
            ));
            continue;
        };
        let columns = match sync_workbook(workbook, dataset) {
            Ok(columns) => columns,
            Err(err) => {
                report
                    .diagnostics
                    .push(Diagnostic::error(chart.part_name.clone(), err.to_string()));
                continue;
            }
        };
        let outcome = sync_chart(chart, dataset, &columns);
        log::debug!(
            "chart {}: rewrote {} series reference(s)",
            chart.part_name,
            outcome.references_rewritten
        );
        for message in outcome.skipped {
            report
                .diagnostics
                .push(Diagnostic::warning(chart.part_name.clone(), message));
        }
        report.charts_updated += 1;
    }

    for (bookmark, rows) in table_rows {
        match tables.get_mut(bookmark) {
            None => report.diagnostics.push(Diagnostic::error(
                bookmark.clone(),
                "narrative table bookmark not found",
            )),
            Some(table) => match expand_table(table, rows) {
                Ok(_) => report.tables_updated += 1,
                Err(err) => report
                    .diagnostics
                    .push(Diagnostic::error(bookmark.clone(), err.to_string())),
            },
        }
    }

    if had_work && report.charts_updated == 0 && report.tables_updated == 0 {
        return Err(DocumentSyncError::NothingProcessed {
            diagnostics: report.diagnostics,
        });
    }
    Ok(report)
}
