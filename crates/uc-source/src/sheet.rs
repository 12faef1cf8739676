use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use uc_core::record::MappingRecord;
use uc_core::traits::RecordSource;

use crate::error::LoadError;

pub const COL_USE_CASE: &str = "Use Case ID";
pub const COL_CATEGORY: &str = "Field Category";
pub const COL_OBJECT_FIELD: &str = "OCPI object field";
pub const COL_OBJECT: &str = "OCPI object";
pub const COL_SCOPE: &str = "In_Scope_For_MVP_Release_2";

/// Colonnes lues, dans l'ordre du schéma. Les autres sont ignorées.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_USE_CASE,
    COL_CATEGORY,
    COL_OBJECT_FIELD,
    COL_OBJECT,
    COL_SCOPE,
];

/// Source d'enregistrements adossée à une feuille de classeur (xlsx, xlsm, xls, ods).
///
/// # Example
/// ```no_run
/// use uc_core::traits::RecordSource;
/// use uc_source::sheet::SheetSource;
/// let mut source = SheetSource::new("Chargepoint data structure.xlsx", "Use case field mapping");
/// let records = source.load().unwrap();
/// ```
pub struct SheetSource {
    path: PathBuf,
    sheet: String,
}

impl SheetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }
}

impl RecordSource for SheetSource {
    type Error = LoadError;

    fn load(&mut self) -> Result<Vec<MappingRecord>, LoadError> {
        load_records(&self.path, &self.sheet)
    }

    fn describe(&self) -> String {
        format!("{} [{}]", self.path.display(), self.sheet)
    }
}

/// Lit la feuille `sheet` du classeur `path`.
///
/// # Errors
/// `FileNotFound`, `Workbook`, `SheetNotFound`, `EmptySheet` ou `MissingColumns`.
pub fn load_records(path: &Path, sheet: &str) -> Result<Vec<MappingRecord>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let workbook_error = |e: calamine::Error| LoadError::Workbook {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let names = workbook.sheet_names();
    if !names.iter().any(|name| name == sheet) {
        return Err(LoadError::SheetNotFound {
            sheet: sheet.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook.worksheet_range(sheet).map_err(workbook_error)?;
    let records = records_from_rows(sheet, range.rows())?;
    log::info!(
        "{} enregistrements chargés depuis {} [{sheet}]",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Convertit des lignes brutes (en-tête en première ligne) en enregistrements.
///
/// Les lignes entièrement vides sont ignorées ; une ligne sans identifiant
/// ou sans catégorie ne peut pas être pivotée et est ignorée avec un warning.
///
/// # Errors
/// `EmptySheet` sans ligne d'en-tête, `MissingColumns` si un en-tête requis manque.
pub fn records_from_rows<'a, I>(sheet: &str, rows: I) -> Result<Vec<MappingRecord>, LoadError>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header = rows.next().ok_or_else(|| LoadError::EmptySheet {
        sheet: sheet.to_string(),
    })?;
    let columns = ColumnMap::from_header(header)?;

    let mut records = Vec::new();
    for (line, row) in rows.enumerate() {
        let [id, category, field, object, scope] = columns.extract(row);

        if [&id, &category, &field, &object, &scope]
            .iter()
            .all(|v| v.is_none())
        {
            continue;
        }

        let (Some(use_case_id), Some(field_category)) = (id, category) else {
            // +2 : en-tête sur la ligne 1, numérotation 1-based.
            log::warn!(
                "Ligne {} ignorée : '{COL_USE_CASE}' ou '{COL_CATEGORY}' vide",
                line + 2
            );
            continue;
        };

        records.push(MappingRecord {
            use_case_id,
            field_category,
            ocpi_field: field,
            ocpi_object: object,
            scope_flag: scope,
        });
    }
    Ok(records)
}

/// Index de chaque colonne requise dans la ligne d'en-tête.
struct ColumnMap {
    indices: [usize; 5],
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Result<Self, LoadError> {
        let names: Vec<Option<String>> = header.iter().map(cell_text).collect();
        let mut indices = [0usize; 5];
        let mut missing = Vec::new();

        for (slot, wanted) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            match names.iter().position(|n| n.as_deref() == Some(wanted)) {
                Some(idx) => *slot = idx,
                None => missing.push(wanted.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { indices })
        } else {
            Err(LoadError::MissingColumns { columns: missing })
        }
    }

    fn extract(&self, row: &[Data]) -> [Option<String>; 5] {
        self.indices.map(|idx| row.get(idx).and_then(cell_text))
    }
}

/// Texte nettoyé d'une cellule. Vide, blanc ou erreur → `None`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// `3.0` → `"3"` : les identifiants numériques saisis dans Excel arrivent en flottant.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
