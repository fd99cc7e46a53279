use serde::{Deserialize, Serialize};

use crate::{SharedStringError, SharedStrings};

/// Cell value representation, mirroring the SpreadsheetML `t` attribute
/// (absent / `"s"` / `"str"`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// Numeric cell; `value` is the literal number text.
    #[default]
    Number,
    /// Shared-string cell; `value` is a stringified pool index, not the text.
    SharedString,
    /// Inline-string cell; `value` is the literal text.
    InlineString,
}

/// A worksheet cell (`c` element: `r`/`s`/`t` attributes plus `v` text).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetCell {
    /// Explicit A1 address, e.g. `B2`.
    pub reference: String,
    /// Style index into the workbook's style table, preserved verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u32>,
    pub kind: CellKind,
    /// Raw `v` content; `None` renders as an empty cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SheetCell {
    /// The cell's display text. Shared-string cells resolve through the
    /// pool; numeric and inline cells return their literal content.
    pub fn display_value<'a>(
        &'a self,
        strings: &'a SharedStrings,
    ) -> Result<&'a str, SharedStringError> {
        match self.kind {
            CellKind::Number | CellKind::InlineString => {
                Ok(self.value.as_deref().unwrap_or(""))
            }
            CellKind::SharedString => {
                let raw = self.value.as_deref().ok_or(SharedStringError::MissingIndex)?;
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| SharedStringError::InvalidIndex {
                        raw: raw.to_string(),
                    })?;
                strings.resolve(index)
            }
        }
    }
}

/// A worksheet row (`row` element). Row order is positional; row 0 is the
/// header, row 1 the template data row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetRow {
    pub cells: Vec<SheetCell>,
}

/// A single worksheet of an embedded workbook.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

/// A structured-table part of an embedded workbook, reduced to the one field
/// synchronization touches: its `ref` extent (e.g. `A1:B3`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRegion {
    pub reference: String,
}

/// The workbook embedded in a chart part, holding the data its series are
/// range-bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedWorkbook {
    /// Package part name supplied by the host, for diagnostics.
    pub part_name: String,
    pub sheets: Vec<Worksheet>,
    pub shared_strings: SharedStrings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableRegion>,
}
