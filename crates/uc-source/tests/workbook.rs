use std::path::PathBuf;

use uc_core::traits::RecordSource;
use uc_source::sheet::{COL_CATEGORY, COL_OBJECT, COL_OBJECT_FIELD, COL_SCOPE, COL_USE_CASE};
use uc_source::{LoadError, SheetSource, load_records};

const SHEET: &str = "Use case field mapping";

/// Writes an xlsx into a fresh temp dir; the dir guard must outlive the path.
fn build_workbook(
    f: impl FnOnce(&mut umya_spreadsheet::Spreadsheet),
) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mapping.xlsx");
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write xlsx");
    (dir, path)
}

fn mapping_sheet(book: &mut umya_spreadsheet::Spreadsheet, rows: &[[&str; 5]]) {
    let _ = book.new_sheet(SHEET);
    let sh = book.get_sheet_by_name_mut(SHEET).expect("mapping sheet");
    for (col, name) in [
        COL_USE_CASE,
        COL_CATEGORY,
        COL_OBJECT_FIELD,
        COL_OBJECT,
        COL_SCOPE,
    ]
    .iter()
    .enumerate()
    {
        sh.get_cell_mut((col as u32 + 1, 1)).set_value(*name);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sh.get_cell_mut((c as u32 + 1, r as u32 + 2)).set_value(*value);
            }
        }
    }
}

#[test]
fn loads_records_in_source_order() {
    let (_dir, path) = build_workbook(|book| {
        mapping_sheet(
            book,
            &[
                ["UC2", "Location", "coordinates", "EVSE", "N"],
                ["UC1", "Utilisation", "Energy", "EVSE", "Y"],
                ["UC1", "Pricing", "N/A", "", "Y"],
            ],
        );
    });

    let records = load_records(&path, SHEET).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].use_case_id, "UC2");
    assert_eq!(records[1].field_category, "Utilisation");
    assert_eq!(records[1].ocpi_object.as_deref(), Some("EVSE"));
    assert!(records[1].is_in_scope());
    assert_eq!(records[2].ocpi_field.as_deref(), Some("N/A"));
    assert_eq!(records[2].ocpi_object, None);
}

#[test]
fn numeric_cells_are_read_as_text() {
    let (_dir, path) = build_workbook(|book| {
        mapping_sheet(book, &[]);
        let sh = book.get_sheet_by_name_mut(SHEET).expect("mapping sheet");
        sh.get_cell_mut((1, 2)).set_value_number(42.0);
        sh.get_cell_mut((2, 2)).set_value("Uptime");
    });

    let records = load_records(&path, SHEET).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].use_case_id, "42");
}

#[test]
fn sheet_source_goes_through_the_trait() {
    let (_dir, path) = build_workbook(|book| {
        mapping_sheet(book, &[["UC9", "Reliability", "status", "EVSE", "Y"]]);
    });

    let mut source = SheetSource::new(&path, SHEET);
    assert!(source.describe().ends_with("[Use case field mapping]"));
    let records = source.load().unwrap();
    assert_eq!(records[0].use_case_id, "UC9");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_records(&dir.path().join("absent.xlsx"), SHEET).unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }), "{err:?}");
}

#[test]
fn missing_sheet_lists_available_sheets() {
    let (_dir, path) = build_workbook(|_| {});
    let err = load_records(&path, SHEET).unwrap_err();
    match err {
        LoadError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, SHEET);
            assert!(available.contains("Sheet1"), "{available}");
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn missing_column_is_reported() {
    let (_dir, path) = build_workbook(|book| {
        let _ = book.new_sheet(SHEET);
        let sh = book.get_sheet_by_name_mut(SHEET).expect("mapping sheet");
        sh.get_cell_mut((1, 1)).set_value(COL_USE_CASE);
        sh.get_cell_mut((2, 1)).set_value(COL_CATEGORY);
        sh.get_cell_mut((3, 1)).set_value(COL_OBJECT_FIELD);
        sh.get_cell_mut((4, 1)).set_value(COL_OBJECT);
    });

    let err = load_records(&path, SHEET).unwrap_err();
    match err {
        LoadError::MissingColumns { columns } => assert_eq!(columns, vec![COL_SCOPE]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn non_workbook_file_is_a_workbook_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"definitely not a zip archive").unwrap();
    let err = load_records(&path, SHEET).unwrap_err();
    assert!(matches!(err, LoadError::Workbook { .. }), "{err:?}");
}
