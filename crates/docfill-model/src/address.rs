use core::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed**:
/// - `row = 0` is the header row (Excel row `1`)
/// - `col = 0` is Excel column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        format!("{}{}", col_to_name(self.col), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A sheet-qualified, absolutely anchored, single-column cell span, as chart
/// series formulas address their source data (`Sheet1!$B$2:$B$5`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRange {
    pub sheet: String,
    pub start: CellRef,
    pub end: CellRef,
}

impl SheetRange {
    /// Parse an absolute range reference of the exact shape
    /// `<sheet>!$<COL>$<ROW>:$<COL>$<ROW>` (uppercase columns, `$` anchors on
    /// every component, sheet name any non-`!` sequence).
    ///
    /// Returns `None` when `text` does not match. Callers treat that as "not
    /// a data-bound range" and leave the referencing element untouched; it is
    /// a deliberate no-op branch, not an error.
    ///
    /// Row `0` is letter-for-letter valid digit text but has no 1-based cell
    /// behind it, so a reference anchored there (`Sheet1!$A$0:$A$2`) is also
    /// treated as not data-bound rather than producing an out-of-range row.
    pub fn parse_abs(text: &str) -> Option<Self> {
        let (sheet, rest) = text.split_once('!')?;
        if sheet.is_empty() {
            return None;
        }
        let (start, end) = rest.split_once(':')?;
        let start = parse_abs_cell(start)?;
        let end = parse_abs_cell(end)?;
        Some(Self {
            sheet: sheet.to_string(),
            start,
            end,
        })
    }

    /// The start anchor of the range.
    ///
    /// For a series reference this answers "which column does this series
    /// read" (`col`) and "is this bound to the header row" (`row == 0`).
    #[inline]
    pub const fn anchor(&self) -> CellRef {
        self.start
    }

    /// Rewrite the row span for a dataset of `data_rows` records: same sheet
    /// and columns, rows `2..=data_rows + 1` in the 1-based external form.
    /// The header row always stays at row 1 and is never part of the span.
    pub fn with_data_rows(&self, data_rows: usize) -> Self {
        Self {
            sheet: self.sheet.clone(),
            start: CellRef::new(1, self.start.col),
            end: CellRef::new(data_rows as u32, self.end.col),
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!${}${}:${}${}",
            self.sheet,
            col_to_name(self.start.col),
            self.start.row + 1,
            col_to_name(self.end.col),
            self.end.row + 1
        )
    }
}

/// Parse one `$COL$ROW` anchor. Columns are uppercase-only here; the absolute
/// grammar is stricter than general A1 notation.
fn parse_abs_cell(s: &str) -> Option<CellRef> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'$') {
        return None;
    }

    let mut idx = 1usize;
    let col_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_uppercase() {
        idx += 1;
    }
    if idx == col_start {
        return None;
    }
    let col = name_to_col(&s[col_start..idx])?;

    if bytes.get(idx) != Some(&b'$') {
        return None;
    }
    idx += 1;

    let row_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == row_start || idx != bytes.len() {
        return None;
    }
    let row_1_based: u32 = s[row_start..].parse().ok()?;
    if row_1_based == 0 {
        return None;
    }

    Some(CellRef::new(row_1_based - 1, col))
}

/// Convert a 0-based column index to its letter name (`0` → `A`, `26` → `AA`).
pub fn col_to_name(col: u32) -> String {
    // Columns are 1-based in the letter encoding. We store 0-based internally.
    let mut n = col + 1;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).expect("column letters are always valid UTF-8")
}

/// Decode an uppercase column letter sequence to its 0-based index
/// (`A` → `0`, `AA` → `26`). Returns `None` for empty input, non-uppercase
/// characters, or overflow.
pub fn name_to_col(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        let v = (b - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(v)?;
    }
    Some(col - 1)
}
