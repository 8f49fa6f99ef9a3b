use crate::models::{Cell, CellType, Notebook};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Notebook not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse notebook JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid notebook format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported notebook version: {major}.{minor}")]
    UnsupportedVersion { major: u32, minor: u32 },
}

pub type Result<T> = std::result::Result<T, NotebookError>;

// On-disk layout. Only the fields extraction reads are declared; serde
// ignores the rest (metadata, outputs, execution counts, ...).

/// nbformat "multiline string": a single string or a list of lines that are
/// concatenated as-is (each line keeps its own trailing newline).
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineString {
    Text(String),
    Lines(Vec<String>),
}

impl MultilineString {
    fn into_string(self) -> String {
        match self {
            MultilineString::Text(text) => text,
            MultilineString::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Deserialize)]
struct RawNotebook {
    nbformat: u32,
    #[serde(default)]
    nbformat_minor: u32,
    cells: Option<Vec<RawCell>>,
    #[serde(default)]
    worksheets: Vec<RawWorksheet>,
}

#[derive(Deserialize)]
struct RawWorksheet {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: Option<String>,
    #[serde(default)]
    source: Option<MultilineString>,
    /// v2/v3 code cells keep their text here instead of `source`
    #[serde(default)]
    input: Option<MultilineString>,
}

impl RawCell {
    fn into_cell(self, major: u32) -> Cell {
        let cell_type = self
            .cell_type
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or(CellType::Other);

        let text = if major < 4 && cell_type == CellType::Code {
            self.input
        } else {
            self.source
        };

        Cell::new(
            cell_type,
            text.map(MultilineString::into_string).unwrap_or_default(),
        )
    }
}

/// Reads and parses the notebook at `path`.
///
/// Version 4 documents are read directly; version 2 and 3 documents are
/// flattened from their worksheets the same way an upgrade to v4 would. Any
/// other major version is rejected. Cells with a missing or unrecognised type
/// are kept as `CellType::Other` rather than failing the whole document.
pub fn parse_notebook(path: &Path) -> Result<Notebook> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => NotebookError::NotFound {
            path: path.to_path_buf(),
        },
        _ => NotebookError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_notebook_from_str(&content)
}

pub fn parse_notebook_from_str(content: &str) -> Result<Notebook> {
    let raw: RawNotebook = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
    let RawNotebook {
        nbformat,
        nbformat_minor,
        cells,
        worksheets,
    } = raw;

    let raw_cells = match nbformat {
        4 => cells.ok_or_else(|| {
            NotebookError::InvalidFormat("missing 'cells' array".to_string())
        })?,
        2 | 3 => worksheets.into_iter().flat_map(|ws| ws.cells).collect(),
        major => {
            return Err(NotebookError::UnsupportedVersion {
                major,
                minor: nbformat_minor,
            });
        }
    };

    let cells = raw_cells
        .into_iter()
        .map(|cell| cell.into_cell(nbformat))
        .collect();

    Ok(Notebook {
        nbformat,
        nbformat_minor,
        cells,
    })
}

/// Joins the code cells of `notebook` with one blank line between blocks.
pub fn join_code_cells(notebook: &Notebook) -> String {
    notebook.code_blocks().collect::<Vec<_>>().join("\n\n")
}

pub fn try_extract_code(path: &Path) -> Result<String> {
    let notebook = parse_notebook(path)?;
    debug!(
        path = %path.display(),
        cells = notebook.cells.len(),
        "parsed notebook"
    );
    Ok(join_code_cells(&notebook))
}

/// Extracts the code of one notebook. Failures are reported on the
/// diagnostic channel and yield an empty string, so one bad file never
/// stops a batch.
pub fn extract_code(path: &Path) -> String {
    match try_extract_code(path) {
        Ok(code) => code,
        Err(NotebookError::NotFound { path }) => {
            error!(
                "Error: El archivo no se encontró en la ruta: {}",
                path.display()
            );
            String::new()
        }
        Err(e) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            error!("Error al leer o procesar {name}: {e}");
            String::new()
        }
    }
}
