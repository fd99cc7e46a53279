//! Properties of the range algebra the chart pass leans on: parsing and
//! formatting are inverses, and respanning for a new dataset length touches
//! only the row components.

use docfill_model::{col_to_name, name_to_col, SheetRange};
use proptest::prelude::*;

proptest! {
    #[test]
    fn column_letters_roundtrip(col in 0u32..=701) {
        let name = col_to_name(col);
        prop_assert_eq!(name_to_col(&name), Some(col));
    }

    #[test]
    fn parse_and_format_are_inverses(
        sheet in "[A-Za-z0-9 ]{1,12}",
        col in 0u32..=701,
        start_row in 1u32..=100,
        span in 0u32..=50,
    ) {
        let letters = col_to_name(col);
        let text = format!(
            "{sheet}!${letters}${start_row}:${letters}${}",
            start_row + span
        );
        let range = SheetRange::parse_abs(&text).expect("generated text matches the grammar");
        prop_assert_eq!(range.to_string(), text);
    }

    #[test]
    fn respanning_preserves_sheet_and_columns(
        sheet in "[A-Za-z0-9 ]{1,12}",
        col in 0u32..=701,
        template_rows in 1usize..=5,
        data_rows in 0usize..=50,
    ) {
        let letters = col_to_name(col);
        let text = format!(
            "{sheet}!${letters}$2:${letters}${}",
            1 + template_rows
        );
        let range = SheetRange::parse_abs(&text).unwrap();
        let respanned = range.with_data_rows(data_rows);

        prop_assert_eq!(&respanned.sheet, &range.sheet);
        prop_assert_eq!(respanned.start.col, range.start.col);
        prop_assert_eq!(respanned.end.col, range.end.col);
        // Rows 2..=data_rows + 1 in the external 1-based form.
        prop_assert_eq!(respanned.start.row, 1);
        prop_assert_eq!(respanned.end.row as usize, data_rows);
    }
}
