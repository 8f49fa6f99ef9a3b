use crate::NOTEBOOK_EXTENSION;
use crate::parser::extract_code;
use crate::writer::SectionWriter;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Target folder does not exist or is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Failed to create output directory {path}: {source}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open output file {path}: {source}")]
    CreateOutputError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where to look for notebooks and where the combined code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub recursive: bool,
}

impl WalkConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            recursive: true,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkSummary {
    /// Notebook files encountered
    pub visited: usize,
    /// Notebooks that produced a section in the output
    pub extracted: usize,
    pub output: PathBuf,
}

/// Lazily enumerates the notebook files under `root`, sorted by name within
/// each directory. Without `recursive` only direct children are considered.
pub fn find_notebooks(root: &Path, recursive: bool) -> impl Iterator<Item = PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| is_notebook(entry.path()))
        .map(|entry| entry.into_path())
}

fn is_notebook(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext == NOTEBOOK_EXTENSION)
}

/// `path` relative to `base` when it lives underneath it, otherwise unchanged.
fn display_path<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

/// Extracts the code of every notebook under `config.root` into
/// `config.output`, replacing whatever the output held before.
///
/// Per-notebook failures are logged and skipped. Only a missing root or an
/// unwritable output ends the run with an error; a missing root is detected
/// before anything is created on disk.
pub fn process_folder(config: &WalkConfig) -> Result<WalkSummary, WalkError> {
    if !config.root.is_dir() {
        return Err(WalkError::RootNotDirectory(config.root.clone()));
    }

    let output_dir = config.output.parent().unwrap_or_else(|| Path::new(""));
    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir).map_err(|source| WalkError::CreateDirError {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(&config.output).map_err(|source| WalkError::CreateOutputError {
        path: config.output.clone(),
        source,
    })?;
    let mut writer = SectionWriter::new(BufWriter::new(file));
    let write_error = |source| WalkError::WriteError {
        path: config.output.clone(),
        source,
    };

    info!(
        root = %config.root.display(),
        recursive = config.recursive,
        "scanning for notebooks"
    );

    let mut visited = 0;
    for notebook in find_notebooks(&config.root, config.recursive) {
        visited += 1;
        println!("Procesando: {}", display_path(&notebook, output_dir).display());

        let code = extract_code(&notebook);
        if code.is_empty() {
            debug!(path = %notebook.display(), "no code extracted");
            continue;
        }

        let name = notebook
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writer.write_section(&name, &code).map_err(write_error)?;
    }

    let extracted = writer.sections();
    writer.finish().map_err(write_error)?;

    println!("\nProceso completado.");
    println!("Se procesaron {extracted} notebooks.");
    println!("El código fue guardado en: {}", config.output.display());

    Ok(WalkSummary {
        visited,
        extracted,
        output: config.output.clone(),
    })
}

/// Runs one batch. A missing root is reported once on the diagnostic channel
/// and yields `Ok(None)`; output I/O failures are returned.
pub fn run(config: &WalkConfig) -> Result<Option<WalkSummary>, WalkError> {
    match process_folder(config) {
        Ok(summary) => Ok(Some(summary)),
        Err(WalkError::RootNotDirectory(root)) => {
            error!(
                "Error: La carpeta objetivo no existe o no es un directorio: {}",
                root.display()
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
