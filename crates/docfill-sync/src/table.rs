use docfill_model::{NarrativeTable, Paragraph, RunText, TableCell, TableRow, TextRun};
use thiserror::Error;

/// Errors raised while expanding a narrative table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableExpandError {
    #[error("table has no template row to donate formatting")]
    EmptyTable,
    #[error("table's first row is missing the formatting donor cells")]
    MissingDonor,
    #[error("input row {row} has {found} values but the table declares {expected} columns")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Append one cloned row per input row to a template table.
///
/// The table's grid definition is the authoritative column count; every
/// input row must match it exactly. Formatting donors come from the table's
/// existing first row: the first cell's properties (applied to the first
/// generated cell of every row) and the second cell's first run properties
/// (applied to every generated run). Each generated cell's content is a
/// single run carrying the literal value, whitespace-preserving; an empty
/// value yields a run with no text content.
///
/// Donor lookup happens before any mutation, so a malformed template aborts
/// the whole expansion cleanly. An arity mismatch stops the pass at the
/// offending row; rows appended earlier in the same pass remain.
///
/// Returns the number of rows appended.
pub fn expand_table(
    table: &mut NarrativeTable,
    rows: &[Vec<String>],
) -> Result<usize, TableExpandError> {
    let expected = table.grid_cols;
    let first = table.rows.first().ok_or(TableExpandError::EmptyTable)?;
    let donor_cell_props = first
        .cells
        .first()
        .ok_or(TableExpandError::MissingDonor)?
        .props_xml
        .clone();
    let donor_run_props = first
        .cells
        .get(1)
        .and_then(|cell| cell.paragraphs.first())
        .and_then(|paragraph| paragraph.runs.first())
        .ok_or(TableExpandError::MissingDonor)?
        .props_xml
        .clone();

    let mut appended = 0;
    for (row_index, values) in rows.iter().enumerate() {
        if values.len() != expected {
            return Err(TableExpandError::ArityMismatch {
                row: row_index,
                expected,
                found: values.len(),
            });
        }

        let mut row = TableRow::default();
        for (col_index, value) in values.iter().enumerate() {
            let text = if value.is_empty() {
                None
            } else {
                Some(RunText {
                    text: value.clone(),
                    preserve_space: true,
                })
            };
            row.cells.push(TableCell {
                props_xml: if col_index == 0 {
                    donor_cell_props.clone()
                } else {
                    None
                },
                paragraphs: vec![Paragraph {
                    runs: vec![TextRun {
                        props_xml: donor_run_props.clone(),
                        text,
                    }],
                }],
            });
        }
        table.rows.push(row);
        appended += 1;
    }

    Ok(appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template_table(grid_cols: usize) -> NarrativeTable {
        let header_cell = |props: Option<&str>, run_props: Option<&str>| TableCell {
            props_xml: props.map(str::to_string),
            paragraphs: vec![Paragraph {
                runs: vec![TextRun {
                    props_xml: run_props.map(str::to_string),
                    text: Some(RunText {
                        text: "header".to_string(),
                        preserve_space: false,
                    }),
                }],
            }],
        };
        NarrativeTable {
            grid_cols,
            rows: vec![TableRow {
                cells: vec![
                    header_cell(Some("<w:tcPr/>"), None),
                    header_cell(None, Some("<w:rPr/>")),
                    header_cell(None, None),
                ],
            }],
        }
    }

    #[test]
    fn appends_one_styled_row_per_input() {
        let mut table = template_table(3);
        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "".to_string()],
            vec!["  x ".to_string(), "y".to_string(), "z".to_string()],
        ];
        assert_eq!(expand_table(&mut table, &rows), Ok(2));
        assert_eq!(table.rows.len(), 3);

        let row = &table.rows[1];
        assert_eq!(row.cells.len(), 3);
        // Donor cell properties only on the first column.
        assert_eq!(row.cells[0].props_xml.as_deref(), Some("<w:tcPr/>"));
        assert_eq!(row.cells[1].props_xml, None);
        // Donor run properties on every run.
        for cell in &row.cells {
            assert_eq!(
                cell.paragraphs[0].runs[0].props_xml.as_deref(),
                Some("<w:rPr/>")
            );
        }
        assert_eq!(
            row.cells[0].paragraphs[0].runs[0].text,
            Some(RunText {
                text: "a".to_string(),
                preserve_space: true,
            })
        );
        // Empty value: run present, no text content.
        assert_eq!(row.cells[2].paragraphs[0].runs[0].text, None);

        // Whitespace survives literally.
        assert_eq!(
            table.rows[2].cells[0].paragraphs[0].runs[0]
                .text
                .as_ref()
                .unwrap()
                .text,
            "  x "
        );
    }

    #[test]
    fn arity_mismatch_stops_at_the_offending_row() {
        let mut table = template_table(3);
        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["too".to_string(), "short".to_string()],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        ];
        assert_eq!(
            expand_table(&mut table, &rows),
            Err(TableExpandError::ArityMismatch {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
        // The first row was appended before the violation; the rest were not.
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn malformed_template_aborts_before_mutation() {
        let rows = vec![vec!["a".to_string()]];

        let mut empty = NarrativeTable {
            grid_cols: 1,
            rows: vec![],
        };
        assert_eq!(
            expand_table(&mut empty, &rows),
            Err(TableExpandError::EmptyTable)
        );

        // First row exists but has no second cell to donate run formatting.
        let mut narrow = NarrativeTable {
            grid_cols: 1,
            rows: vec![TableRow {
                cells: vec![TableCell::default()],
            }],
        };
        assert_eq!(
            expand_table(&mut narrow, &rows),
            Err(TableExpandError::MissingDonor)
        );
        assert_eq!(narrow.rows.len(), 1);
    }
}
