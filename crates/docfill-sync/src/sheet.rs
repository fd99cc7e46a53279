use docfill_model::{
    col_to_name, CellAssignment, CellKind, CellRef, EmbeddedWorkbook, Record, Scalar,
    SharedStringError, SharedStrings, SheetCell, SheetRow, Worksheet,
};
use thiserror::Error;

/// Errors that abort an embedded-workbook rewrite.
///
/// These are fatal for the chart owning the workbook; sibling charts keep
/// processing. Shared-string failures in particular abort immediately, since
/// a broken pool would corrupt the column mapping every later step relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetSyncError {
    #[error("embedded workbook {part:?} has no worksheet")]
    NoWorksheet { part: String },
    #[error("worksheet {sheet:?} has no header row")]
    MissingHeaderRow { sheet: String },
    #[error("worksheet {sheet:?} has no template data row")]
    MissingTemplateRow { sheet: String },
    #[error("template data row in {sheet:?} has no cell for column {column} ({name:?})")]
    TemplateColumnMissing {
        sheet: String,
        column: usize,
        name: String,
    },
    #[error("shared-string lookup failed in {sheet:?} at {cell}: {source}")]
    SharedString {
        sheet: String,
        cell: String,
        source: SharedStringError,
    },
}

/// Rewrite a worksheet's data rows from its header row plus `dataset`.
///
/// The worksheet must carry a header row at position 0 and a template data
/// row at position 1; the template row donates per-column style and type but
/// is not real data. The result is exactly `[header, one row per record]`,
/// with every cell explicitly addressed from column `A`. This is a full
/// rewrite, not an incremental diff: template data rows are sample content.
///
/// Returns the header's column names, which are the authoritative
/// column-to-field mapping for the rest of the run.
pub fn sync_worksheet(
    sheet: &mut Worksheet,
    strings: &SharedStrings,
    dataset: &[Record],
) -> Result<Vec<String>, SheetSyncError> {
    let header = sheet.rows.first().ok_or_else(|| SheetSyncError::MissingHeaderRow {
        sheet: sheet.name.clone(),
    })?;

    let mut columns = Vec::with_capacity(header.cells.len());
    for cell in &header.cells {
        let text = cell
            .display_value(strings)
            .map_err(|source| SheetSyncError::SharedString {
                sheet: sheet.name.clone(),
                cell: cell.reference.clone(),
                source,
            })?;
        columns.push(text.to_string());
    }

    let template = sheet
        .rows
        .get(1)
        .cloned()
        .ok_or_else(|| SheetSyncError::MissingTemplateRow {
            sheet: sheet.name.clone(),
        })?;

    // The donor row must cover every header column. Checked before any
    // mutation: a failed rewrite leaves the worksheet exactly as it was.
    if template.cells.len() < columns.len() {
        let column = template.cells.len();
        return Err(SheetSyncError::TemplateColumnMissing {
            sheet: sheet.name.clone(),
            column,
            name: columns[column].clone(),
        });
    }

    // Full rewrite: drop everything after the header.
    sheet.rows.truncate(1);

    for (row_index, record) in dataset.iter().enumerate() {
        let mut row = SheetRow::default();
        for (col_index, (column, donor)) in columns.iter().zip(&template.cells).enumerate() {
            // Data starts at column A, immediately below the header.
            let mut cell = SheetCell {
                reference: CellRef::new(row_index as u32 + 1, col_index as u32).to_a1(),
                style: donor.style,
                kind: donor.kind,
                value: None,
            };

            match record.get(column) {
                Scalar::Text(text) => match strings.intern_or_inline(text) {
                    CellAssignment::Shared(index) => {
                        cell.kind = CellKind::SharedString;
                        cell.value = Some(index.to_string());
                    }
                    CellAssignment::Inline(text) => {
                        cell.kind = CellKind::InlineString;
                        cell.value = Some(text);
                    }
                },
                // Null renders as an empty cell; the donor type is kept.
                other => cell.value = other.to_cell_text(),
            }

            row.cells.push(cell);
        }
        sheet.rows.push(row);
    }

    Ok(columns)
}

/// Rewrite every worksheet of an embedded workbook, then recompute each
/// declared structured-table extent to `A1:<lastCol><lastRow>` where the last
/// row is `dataset.len() + 1` (header plus data rows).
pub fn sync_workbook(
    workbook: &mut EmbeddedWorkbook,
    dataset: &[Record],
) -> Result<Vec<String>, SheetSyncError> {
    let EmbeddedWorkbook {
        part_name,
        sheets,
        shared_strings,
        tables,
    } = workbook;

    let mut columns: Vec<String> = Vec::new();
    if sheets.is_empty() {
        return Err(SheetSyncError::NoWorksheet {
            part: part_name.clone(),
        });
    }
    for sheet in sheets.iter_mut() {
        columns = sync_worksheet(sheet, shared_strings, dataset)?;
    }

    if let Some(last_col) = columns.len().checked_sub(1) {
        let reference = format!("A1:{}{}", col_to_name(last_col as u32), dataset.len() + 1);
        for table in tables.iter_mut() {
            table.reference = reference.clone();
        }
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfill_model::TableRegion;
    use pretty_assertions::assert_eq;

    fn header_cell(reference: &str, shared_index: usize) -> SheetCell {
        SheetCell {
            reference: reference.to_string(),
            style: None,
            kind: CellKind::SharedString,
            value: Some(shared_index.to_string()),
        }
    }

    fn template_cell(reference: &str, style: u32, kind: CellKind) -> SheetCell {
        SheetCell {
            reference: reference.to_string(),
            style: Some(style),
            kind,
            value: Some("sample".to_string()),
        }
    }

    fn fixture() -> (Worksheet, SharedStrings) {
        let strings: SharedStrings = ["Name", "Count", "A"].into_iter().collect();
        let sheet = Worksheet {
            name: "Sheet1".to_string(),
            rows: vec![
                SheetRow {
                    cells: vec![header_cell("A1", 0), header_cell("B1", 1)],
                },
                SheetRow {
                    cells: vec![
                        template_cell("A2", 1, CellKind::SharedString),
                        template_cell("B2", 2, CellKind::Number),
                    ],
                },
                // Stale extra sample row that must be discarded.
                SheetRow {
                    cells: vec![
                        template_cell("A3", 1, CellKind::SharedString),
                        template_cell("B3", 2, CellKind::Number),
                    ],
                },
            ],
        };
        (sheet, strings)
    }

    fn dataset() -> Vec<Record> {
        serde_json::from_str(r#"[{"Name":"A","Count":10},{"Name":"B","Count":20}]"#).unwrap()
    }

    #[test]
    fn rewrites_rows_from_header_and_dataset() {
        let (mut sheet, strings) = fixture();
        let columns = sync_worksheet(&mut sheet, &strings, &dataset()).unwrap();

        assert_eq!(columns, vec!["Name".to_string(), "Count".to_string()]);
        assert_eq!(sheet.rows.len(), 3);

        // Row 2: "A" is already pooled (index 2) -> shared-string cell.
        let row2 = &sheet.rows[1];
        assert_eq!(
            row2.cells[0],
            SheetCell {
                reference: "A2".into(),
                style: Some(1),
                kind: CellKind::SharedString,
                value: Some("2".into()),
            }
        );
        assert_eq!(
            row2.cells[1],
            SheetCell {
                reference: "B2".into(),
                style: Some(2),
                kind: CellKind::Number,
                value: Some("10".into()),
            }
        );

        // Row 3: "B" is not pooled -> inline-string cell; pool untouched.
        let row3 = &sheet.rows[2];
        assert_eq!(row3.cells[0].reference, "A3");
        assert_eq!(row3.cells[0].kind, CellKind::InlineString);
        assert_eq!(row3.cells[0].value.as_deref(), Some("B"));
        assert_eq!(row3.cells[1].value.as_deref(), Some("20"));
        assert_eq!(strings.len(), 3);
    }

    #[test]
    fn missing_field_renders_empty_not_error() {
        let (mut sheet, strings) = fixture();
        let dataset: Vec<Record> = serde_json::from_str(r#"[{"Name":"A"}]"#).unwrap();
        sync_worksheet(&mut sheet, &strings, &dataset).unwrap();

        let row2 = &sheet.rows[1];
        assert_eq!(row2.cells[1].value, None);
        assert_eq!(row2.cells[1].kind, CellKind::Number);
    }

    #[test]
    fn empty_dataset_leaves_header_only() {
        let (mut sheet, strings) = fixture();
        sync_worksheet(&mut sheet, &strings, &[]).unwrap();
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn shared_string_failure_aborts_with_context() {
        let (mut sheet, _) = fixture();
        // A pool too small for the header's indices.
        let strings: SharedStrings = ["Name"].into_iter().collect();
        let err = sync_worksheet(&mut sheet, &strings, &dataset()).unwrap_err();
        assert_eq!(
            err,
            SheetSyncError::SharedString {
                sheet: "Sheet1".into(),
                cell: "B1".into(),
                source: SharedStringError::IndexOutOfBounds { index: 1, len: 1 },
            }
        );
        // Aborted before the rewrite touched the rows.
        assert_eq!(sheet.rows.len(), 3);
    }

    #[test]
    fn short_template_row_fails_before_any_mutation() {
        let strings: SharedStrings = ["Name", "Count", "Flag"].into_iter().collect();
        let mut sheet = Worksheet {
            name: "Sheet1".to_string(),
            rows: vec![
                SheetRow {
                    cells: vec![header_cell("A1", 0), header_cell("B1", 1), header_cell("C1", 2)],
                },
                // Template data row covers only two of the three columns.
                SheetRow {
                    cells: vec![
                        template_cell("A2", 1, CellKind::SharedString),
                        template_cell("B2", 2, CellKind::Number),
                    ],
                },
            ],
        };
        let before = sheet.clone();

        let err = sync_worksheet(&mut sheet, &strings, &dataset()).unwrap_err();
        assert_eq!(
            err,
            SheetSyncError::TemplateColumnMissing {
                sheet: "Sheet1".into(),
                column: 2,
                name: "Flag".into(),
            }
        );
        // No rows were discarded or rewritten.
        assert_eq!(sheet, before);
    }

    #[test]
    fn workbook_sync_updates_table_regions() {
        let (sheet, strings) = fixture();
        let mut workbook = EmbeddedWorkbook {
            part_name: "xl/workbook.xml".to_string(),
            sheets: vec![sheet],
            shared_strings: strings,
            tables: vec![TableRegion {
                reference: "A1:B2".to_string(),
            }],
        };

        sync_workbook(&mut workbook, &dataset()).unwrap();
        assert_eq!(workbook.tables[0].reference, "A1:B3");

        sync_workbook(&mut workbook, &[]).unwrap();
        assert_eq!(workbook.tables[0].reference, "A1:B1");
    }

    #[test]
    fn workbook_without_sheets_is_an_error() {
        let mut workbook = EmbeddedWorkbook {
            part_name: "xl/workbook.xml".to_string(),
            ..EmbeddedWorkbook::default()
        };
        assert_eq!(
            sync_workbook(&mut workbook, &dataset()).unwrap_err(),
            SheetSyncError::NoWorksheet {
                part: "xl/workbook.xml".into()
            }
        );
    }
}
