//! Tally core domain types, price mapping, and errors.

mod error;
mod merge;
mod types;

pub use error::TallyError;
pub use merge::merge_prices;
pub use types::{
    Candidate, CandidateWord, CursorState, FIRST_DATA_ROW, PRICE_COLUMNS, PriceColumn,
    PriceColumns, PriceVector, ReferenceItem, VENDOR_SLOTS, Vendor, is_present,
};

#[cfg(test)]
mod tests {
    use super::*;

    // --- Vendor ---

    #[test]
    fn vendor_slots_follow_declaration_order() {
        for (i, vendor) in Vendor::ALL.iter().enumerate() {
            assert_eq!(vendor.slot(), i);
        }
    }

    #[test]
    fn vendor_display() {
        assert_eq!(format!("{}", Vendor::Carrefour), "carrefour");
        assert_eq!(format!("{}", Vendor::WMart), "wmart");
    }

    // --- PriceColumn ---

    #[test]
    fn price_column_indices_follow_declaration_order() {
        for (i, column) in PriceColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
    }

    #[test]
    fn price_column_display() {
        assert_eq!(format!("{}", PriceColumn::WestZone), "westzone");
        assert_eq!(format!("{}", PriceColumn::Rayyan), "rayyan");
    }

    // --- is_present ---

    #[test]
    fn presence_rules() {
        assert!(is_present(Some(1.5)));
        assert!(!is_present(Some(0.0)));
        assert!(!is_present(None));
    }

    // --- PriceVector ---

    #[test]
    fn price_vector_get_by_vendor() {
        let v = PriceVector([Some(1.0), None, None, None, Some(2.0), None, None]);
        assert_eq!(v.get(Vendor::Carrefour), Some(1.0));
        assert_eq!(v.get(Vendor::WestZone), Some(2.0));
        assert_eq!(v.get(Vendor::WMart), None);
    }

    #[test]
    fn price_vector_empty_ignores_zeros() {
        assert!(PriceVector::default().is_empty());
        assert!(PriceVector([Some(0.0); VENDOR_SLOTS]).is_empty());
        assert!(!PriceVector([None, None, None, None, None, None, Some(0.5)]).is_empty());
    }

    // --- PriceColumns ---

    #[test]
    fn price_columns_set_and_iter() {
        let mut cols = PriceColumns::default();
        cols.set(PriceColumn::Grandios, Some(4.5));
        let set: Vec<_> = cols.iter().filter(|(_, p)| p.is_some()).collect();
        assert_eq!(set, vec![(PriceColumn::Grandios, Some(4.5))]);
    }

    // --- Candidate ---

    #[test]
    fn candidate_highlighted_indices() {
        let candidate = Candidate {
            name: "Fresh Milk 1L".to_string(),
            score: 90.0,
            words: vec![
                CandidateWord {
                    text: "Fresh".to_string(),
                    explained: true,
                },
                CandidateWord {
                    text: "Milk".to_string(),
                    explained: false,
                },
                CandidateWord {
                    text: "1L".to_string(),
                    explained: true,
                },
            ],
        };
        assert_eq!(candidate.highlighted_indices(), vec![0, 2]);
    }

    // --- CursorState ---

    #[test]
    fn cursor_defaults_to_first_data_row() {
        assert_eq!(CursorState::default().row, FIRST_DATA_ROW);
    }

    #[test]
    fn cursor_new_clamps_header_rows() {
        assert_eq!(CursorState::new(0).row, 2);
        assert_eq!(CursorState::new(1).row, 2);
        assert_eq!(CursorState::new(7).row, 7);
    }

    #[test]
    fn cursor_next_advances_one_row() {
        assert_eq!(CursorState::new(5).next().row, 6);
    }

    #[test]
    fn cursor_json_shape() {
        let json = serde_json::to_string(&CursorState::new(12)).unwrap();
        assert_eq!(json, r#"{"row":12}"#);
        let back: CursorState = serde_json::from_str(r#"{"row":3}"#).unwrap();
        assert_eq!(back.row, 3);
    }

    // --- TallyError ---

    #[test]
    fn tally_error_display() {
        let err = TallyError::Table("bad header".to_string());
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn tally_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: TallyError = io_err.into();
        assert!(err.to_string().contains("not found"));
    }
}
