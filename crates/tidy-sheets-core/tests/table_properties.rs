//! Property tests for row cleanup and sorting

use proptest::prelude::*;
use tidy_sheets_core::{CellValue, Row, Table};

/// Small value domain so duplicates and blank rows show up often
fn value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        3 => Just(CellValue::Empty),
        1 => Just(CellValue::string("")),
        3 => (0i32..4).prop_map(|n| CellValue::Number(n as f64)),
        3 => prop::sample::select(vec!["A", "B", "Товар"]).prop_map(CellValue::string),
        1 => any::<bool>().prop_map(CellValue::Boolean),
    ]
}

fn table() -> impl Strategy<Value = Table> {
    (1usize..4).prop_flat_map(|width| {
        prop::collection::vec(prop::collection::vec(value(), width), 0..24).prop_map(
            move |rows: Vec<Row>| {
                let header = (0..width)
                    .map(|i| CellValue::string(format!("col{}", i)))
                    .collect();
                Table::new("Sheet1", header, rows)
            },
        )
    })
}

proptest! {
    #[test]
    fn remove_blank_rows_is_idempotent(t in table()) {
        let mut once = t.clone();
        once.remove_blank_rows();
        let mut twice = once.clone();
        prop_assert_eq!(twice.remove_blank_rows(), 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn remove_blank_rows_reports_dropped_count(t in table()) {
        let blanks = t
            .data_rows()
            .iter()
            .filter(|r| r.iter().all(CellValue::is_blank))
            .count();
        let mut cleaned = t.clone();
        prop_assert_eq!(cleaned.remove_blank_rows(), blanks);
        prop_assert_eq!(cleaned.len(), t.len() - blanks);
    }

    #[test]
    fn remove_duplicates_is_idempotent(t in table()) {
        let mut once = t.clone();
        once.remove_duplicate_rows();
        let mut twice = once.clone();
        prop_assert_eq!(twice.remove_duplicate_rows(), 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn remove_duplicates_keeps_a_subset(t in table()) {
        let mut deduped = t.clone();
        let removed = deduped.remove_duplicate_rows();

        prop_assert!(deduped.len() <= t.len());
        prop_assert_eq!(deduped.len() + removed, t.len());
        for row in deduped.data_rows() {
            prop_assert!(t.data_rows().contains(row));
        }
        prop_assert_eq!(deduped.header(), t.header());
    }

    #[test]
    fn sort_is_stable(t in table()) {
        // Tag each row with its original position in an extra column
        let rows: Vec<Row> = t
            .data_rows()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut r = r.clone();
                r.push(CellValue::Number(i as f64));
                r
            })
            .collect();
        let mut header = t.header().clone();
        header.push(CellValue::string("pos"));
        let mut tagged = Table::new("Sheet1", header, rows);
        let pos_col = tagged.width() - 1;

        tagged.sort_by_column(0);

        let sorted = tagged.data_rows();
        prop_assert_eq!(sorted.len(), t.len());
        for pair in sorted.windows(2) {
            let ord = tidy_sheets_core::table::compare_values(&pair[0][0], &pair[1][0]);
            prop_assert!(ord != std::cmp::Ordering::Greater);
            if ord == std::cmp::Ordering::Equal {
                prop_assert!(pair[0][pos_col].as_number() < pair[1][pos_col].as_number());
            }
        }
    }
}
