use std::collections::BTreeSet;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

pub const DEFAULT_GRID_SIZE: usize = 5;
const PREVIEW_CELL_WIDTH: usize = 14;

/// Shape of a card and the positions excluded from text sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec", into = "GridSpec")]
pub struct GridGeometry {
    rows: usize,
    columns: usize,
    reserved: BTreeSet<(usize, usize)>,
}

impl GridGeometry {
    /// Validate and build a geometry. Every reserved cell must lie inside the grid.
    pub fn new<I>(rows: usize, columns: usize, reserved: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        if rows == 0 || columns == 0 {
            return Err(CardError::InvalidGeometry(format!(
                "grid must have at least one row and column (got {}x{})",
                rows, columns
            )));
        }
        let reserved: BTreeSet<(usize, usize)> = reserved.into_iter().collect();
        if let Some((r, c)) = reserved.iter().find(|(r, c)| *r >= rows || *c >= columns) {
            return Err(CardError::InvalidGeometry(format!(
                "reserved cell ({}, {}) lies outside the {}x{} grid",
                r, c, rows, columns
            )));
        }
        Ok(Self {
            rows,
            columns,
            reserved,
        })
    }

    /// Grid with the single center cell reserved.
    pub fn centered(rows: usize, columns: usize) -> Result<Self, CardError> {
        Self::new(rows, columns, [(rows / 2, columns / 2)])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn reserved(&self) -> &BTreeSet<(usize, usize)> {
        &self.reserved
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved.contains(&(row, col))
    }

    /// Number of cells that receive corpus text.
    pub fn open_cells(&self) -> usize {
        self.rows * self.columns - self.reserved.len()
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        let center = DEFAULT_GRID_SIZE / 2;
        Self {
            rows: DEFAULT_GRID_SIZE,
            columns: DEFAULT_GRID_SIZE,
            reserved: BTreeSet::from([(center, center)]),
        }
    }
}

/// Serialized form of [`GridGeometry`]; `reserved` defaults to the center cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridSpec {
    rows: usize,
    columns: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reserved: Option<Vec<[usize; 2]>>,
}

impl TryFrom<GridSpec> for GridGeometry {
    type Error = CardError;

    fn try_from(spec: GridSpec) -> Result<Self, Self::Error> {
        match spec.reserved {
            Some(cells) => Self::new(spec.rows, spec.columns, cells.into_iter().map(|[r, c]| (r, c))),
            None => Self::centered(spec.rows, spec.columns),
        }
    }
}

impl From<GridGeometry> for GridSpec {
    fn from(grid: GridGeometry) -> Self {
        GridSpec {
            rows: grid.rows,
            columns: grid.columns,
            reserved: Some(grid.reserved.iter().map(|&(r, c)| [r, c]).collect()),
        }
    }
}

/// One populated grid, ready to render. Empty strings mark reserved or
/// unfilled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    cells: Vec<Vec<String>>,
}

impl Card {
    /// All-empty card with the shape of `grid`.
    pub fn blank(grid: &GridGeometry) -> Self {
        Self {
            cells: vec![vec![String::new(); grid.columns()]; grid.rows()],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Cell text, or `""` outside the card.
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value.into();
        }
    }

    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Non-empty cell values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Plain-text preview of the card with a title row.
    pub fn render_text(&self, titles: &[String], grid: &GridGeometry) -> String {
        let width = PREVIEW_CELL_WIDTH;
        let mut separator = String::from("+");
        for _ in 0..grid.columns() {
            separator.push_str(&"-".repeat(width + 2));
            separator.push('+');
        }

        let mut out = String::new();
        writeln!(&mut out, "{}", separator).ok();
        out.push('|');
        for col in 0..grid.columns() {
            let title = titles.get(col).map(String::as_str).unwrap_or("");
            write!(&mut out, " {:^width$} |", clip(title, width)).ok();
        }
        writeln!(&mut out).ok();
        writeln!(&mut out, "{}", separator).ok();

        for row in 0..grid.rows() {
            out.push('|');
            for col in 0..grid.columns() {
                let text = if grid.is_reserved(row, col) {
                    "*".to_string()
                } else {
                    clip(self.get(row, col), width)
                };
                write!(&mut out, " {:^width$} |", text).ok();
            }
            writeln!(&mut out).ok();
            writeln!(&mut out, "{}", separator).ok();
        }
        out
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

/// Parse a hand-authored grid: one row per non-empty line, comma-separated
/// cells, surrounding whitespace trimmed. Rows and columns beyond the grid
/// are ignored and reserved cells stay empty.
pub fn load_fixed_grid(text: &str, grid: &GridGeometry) -> Card {
    let mut card = Card::blank(grid);
    let rows = text.lines().filter(|line| !line.trim().is_empty());
    for (row, line) in rows.take(grid.rows()).enumerate() {
        for (col, cell) in line.split(',').take(grid.columns()).enumerate() {
            if !grid.is_reserved(row, col) {
                card.set(row, col, cell.trim());
            }
        }
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_grid_reserves_center() {
        let grid = GridGeometry::default();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.columns(), 5);
        assert!(grid.is_reserved(2, 2));
        assert_eq!(grid.open_cells(), 24);
        assert_eq!(grid, GridGeometry::centered(5, 5).unwrap());
    }

    #[test]
    fn reserved_cells_must_be_inside_grid() {
        let err = GridGeometry::new(3, 3, [(3, 0)]).unwrap_err();
        assert!(matches!(err, CardError::InvalidGeometry(_)));
        assert!(GridGeometry::new(0, 3, []).is_err());
    }

    #[test]
    fn geometry_json_defaults_to_center_reservation() {
        let grid: GridGeometry = serde_json::from_str(r#"{"rows":3,"columns":4}"#).unwrap();
        assert_eq!(grid.reserved(), &BTreeSet::from([(1, 2)]));
        let bad = serde_json::from_str::<GridGeometry>(r#"{"rows":2,"columns":2,"reserved":[[5,5]]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn fixed_grid_trims_and_ignores_overflow() {
        let grid = GridGeometry::default();
        let text = " a , b,c,d,e,f\n\nr1,r2\nx,y,CENTER,z\n4\n5\n6,7\n";
        let card = load_fixed_grid(text, &grid);
        assert_eq!(card.get(0, 0), "a");
        assert_eq!(card.get(0, 4), "e");
        assert_eq!(card.get(1, 1), "r2");
        assert_eq!(card.get(2, 2), "", "reserved cell stays empty");
        assert_eq!(card.get(2, 3), "z");
        assert_eq!(card.get(4, 0), "5");
        assert_eq!(card.get(3, 0), "4");
        assert_eq!(card.values().count(), 12);
    }

    #[test]
    fn preview_marks_reserved_cell() {
        let grid = GridGeometry::centered(3, 3).unwrap();
        let card = load_fixed_grid("a,b,c\nd,e,f\ng,h,i", &grid);
        let titles: Vec<String> = ["X", "Y", "Z"].iter().map(|s| s.to_string()).collect();
        let preview = card.render_text(&titles, &grid);
        assert!(preview.contains(" X "));
        assert!(preview.contains(" * "));
        assert!(!preview.contains(" e "));
        assert_eq!(preview.lines().count(), 9);
    }
}
