/// A notebook document reduced to what extraction needs: its version and
/// the cells in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    pub nbformat: u32,
    pub nbformat_minor: u32,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub cell_type: CellType,
    /// Full cell text, multiline sources already concatenated
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Code,
    Markdown,
    Raw,
    /// Missing or unrecognised `cell_type`; never treated as code
    Other,
}

impl Notebook {
    /// Trimmed, non-empty sources of the code cells, in document order.
    pub fn code_blocks(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|cell| cell.cell_type == CellType::Code)
            .map(|cell| cell.source.trim())
            .filter(|code| !code.is_empty())
    }
}

impl Cell {
    pub fn new(cell_type: CellType, source: impl Into<String>) -> Self {
        Self {
            cell_type,
            source: source.into(),
        }
    }
}

impl std::str::FromStr for CellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            // nbformat 3 heading cells become markdown on upgrade
            "markdown" | "heading" => Ok(Self::Markdown),
            "raw" => Ok(Self::Raw),
            _ => Err(format!("unknown cell type '{s}'")),
        }
    }
}
