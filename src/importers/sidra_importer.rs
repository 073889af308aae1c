use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dataset::{CropTable, Dataset, MunicipalityRecord};
use crate::states::state_name;
use crate::utils::{normalize_municipality_code, split_municipality_label};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Header row starting with \"Cód\" not found")]
    MissingHeader,

    #[error("Header row has no crop columns")]
    NoCropColumns,

    #[error("Invalid data at row {row}, col {col}: {msg}")]
    InvalidData { row: usize, col: usize, msg: String },
}

/// Column layout of the census harvested-area table
#[derive(Debug, Clone, PartialEq)]
struct TableLayout {
    header_row: usize,
    /// (column index, crop name)
    crop_columns: Vec<(usize, String)>,
}

/// Reader for the census "harvested area by municipality" workbook
///
/// # Expected Sheet Structure:
/// ```text
/// Rows before header: titles and notes (ignored)
/// Header row:  Cód. | Município | <crop 1> | <crop 2> | ...
/// Data rows:   1100015 | Alta Floresta D'Oeste (RO) | 1200 | - | ...
/// Trailing rows: "Fonte: IBGE ..." (ignored)
/// ```
/// A `-`, `...`, `X` or empty cell means the municipality does not grow that
/// crop, as does a zero.
pub struct SidraImporter {
    workbook_path: PathBuf,
    sheet: Option<String>,
}

impl SidraImporter {
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            sheet: None,
        }
    }

    /// Read a named sheet instead of the first one
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Load the worksheet holding the table (synchronous, use spawn_blocking from async code)
    pub fn read_range(&self) -> Result<Range<Data>, ImportError> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(&self.workbook_path)
            .map_err(|e| ImportError::WorkbookOpen(format!("{e}")))?;

        let sheet = match &self.sheet {
            Some(sheet) => sheet.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(ImportError::NoSheets)?,
        };
        info!("Reading sheet {}", sheet);

        workbook
            .worksheet_range(&sheet)
            .map_err(|_| ImportError::SheetNotFound(sheet))
    }
}

/// Build a dataset from the table in `range`
///
/// `on_row` is called with the index of every row examined, for progress
/// reporting.
pub fn parse_range(
    range: &Range<Data>,
    mut on_row: impl FnMut(usize),
) -> Result<Dataset, ImportError> {
    let layout = find_layout(range)?;
    debug!(
        "Header at row {} with {} crop columns",
        layout.header_row,
        layout.crop_columns.len()
    );

    let mut crops: BTreeMap<String, CropTable> = layout
        .crop_columns
        .iter()
        .map(|(_, crop)| (crop.clone(), CropTable::new()))
        .collect();

    let mut municipalities = 0usize;
    for row in (layout.header_row + 1)..range.height() {
        on_row(row);

        let Some(code) = cell_text(range.get((row, 0))).and_then(|s| normalize_municipality_code(&s))
        else {
            debug!("Skipping non-data row {}", row);
            continue;
        };

        let label = cell_text(range.get((row, 1))).unwrap_or_default();
        let (name, state_code) = split_municipality_label(&label);
        if state_name(&state_code).is_none() {
            warn!("Municipality {} ({}) has unrecognised state code {}", code, name, state_code);
        }
        municipalities += 1;

        for (col, crop) in &layout.crop_columns {
            let Some(area) = parse_area(range, row, *col)? else {
                continue;
            };
            let table = crops.entry(crop.clone()).or_default();
            let record = MunicipalityRecord::new(name.clone(), state_code.clone(), area);
            if table.insert(code.clone(), record).is_some() {
                warn!("Duplicate municipality {} for crop {}, keeping last row", code, crop);
            }
        }
    }

    crops.retain(|crop, table| {
        if table.is_empty() {
            warn!("Crop {} has no harvested area in any municipality, dropping", crop);
        }
        !table.is_empty()
    });

    info!(
        "Parsed {} municipalities into {} crops",
        municipalities,
        crops.len()
    );
    Ok(Dataset::from_crops(crops))
}

fn find_layout(range: &Range<Data>) -> Result<TableLayout, ImportError> {
    let header_row = (0..range.height())
        .find(|&row| {
            cell_text(range.get((row, 0)))
                .map(|s| s.starts_with("Cód"))
                .unwrap_or(false)
        })
        .ok_or(ImportError::MissingHeader)?;

    let crop_columns: Vec<(usize, String)> = (2..range.width())
        .filter_map(|col| {
            cell_text(range.get((header_row, col)))
                .filter(|s| !s.is_empty())
                .map(|s| (col, s))
        })
        .collect();

    if crop_columns.is_empty() {
        return Err(ImportError::NoCropColumns);
    }

    Ok(TableLayout {
        header_row,
        crop_columns,
    })
}

/// Trimmed text of a cell; numbers are rendered without a fractional part when integral
fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell {
        Some(Data::String(s)) => Some(s.trim().to_string()),
        Some(Data::Int(i)) => Some(i.to_string()),
        Some(Data::Float(f)) if f.fract() == 0.0 => Some(format!("{f:.0}")),
        Some(Data::Float(f)) => Some(f.to_string()),
        _ => None,
    }
}

/// Harvested area in a crop cell, `None` when the crop is not grown
fn parse_area(range: &Range<Data>, row: usize, col: usize) -> Result<Option<f64>, ImportError> {
    let area = match range.get((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if matches!(trimmed, "" | "-" | "--" | "..." | ".." | "X" | "x") {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ImportError::InvalidData {
                    row,
                    col,
                    msg: format!("Cannot parse harvested area: {s}"),
                })?
        }
        Some(Data::Empty) | None => return Ok(None),
        other => {
            return Err(ImportError::InvalidData {
                row,
                col,
                msg: format!("Expected number, got: {other:?}"),
            })
        }
    };

    if !area.is_finite() || area < 0.0 {
        return Err(ImportError::InvalidData {
            row,
            col,
            msg: format!("Harvested area out of range: {area}"),
        });
    }

    Ok((area > 0.0).then_some(area))
}
