//! Sparse cell grid with an inclusive bounding window.

use std::collections::HashMap;

/// Inclusive bounds of the area scanned for headers and data.
///
/// Coordinates are zero-based and absolute (row 0 is spreadsheet row 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl GridBounds {
    /// Window used when the source declares no range: A1:Z100.
    pub const FALLBACK: Self = Self {
        first_row: 0,
        first_col: 0,
        last_row: 99,
        last_col: 25,
    };

    pub fn new(first: (u32, u32), last: (u32, u32)) -> Self {
        Self {
            first_row: first.0,
            first_col: first.1,
            last_row: last.0,
            last_col: last.1,
        }
    }

    /// Number of rows covered.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.last_row.saturating_sub(self.first_row) + 1
    }

    /// Number of columns covered.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.last_col.saturating_sub(self.first_col) + 1
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// A sparse 2-D mapping of `(row, col)` to raw cell text.
///
/// Absent cells read as the empty string. The grid never holds empty
/// strings itself; [`Grid::set`] drops them.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<(u32, u32), String>,
    bounds: GridBounds,
}

impl Grid {
    /// Create an empty grid scanning the given window.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            cells: HashMap::new(),
            bounds,
        }
    }

    /// Build a grid from dense rows starting at A1.
    ///
    /// Bounds cover every row given and the widest row. Empty input yields
    /// the fallback window.
    ///
    /// ```
    /// use hangtag::sheet::Grid;
    ///
    /// let grid = Grid::from_rows(&[&["产品名称", "", "", "数量"], &["Hat", "", "", "300"]]);
    /// assert_eq!(grid.text(1, 3), "300");
    /// assert_eq!(grid.text(1, 1), "");
    /// ```
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let bounds = if rows.is_empty() || width == 0 {
            GridBounds::FALLBACK
        } else {
            GridBounds::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1))
        };

        let mut grid = Self::new(bounds);
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                grid.set(r as u32, c as u32, *value);
            }
        }
        grid
    }

    /// Store a cell value. Empty strings clear the cell.
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    /// Raw text of a cell, or `""` when absent.
    pub fn text(&self, row: u32, col: u32) -> &str {
        self.cells.get(&(row, col)).map(String::as_str).unwrap_or("")
    }

    /// Trimmed text of a cell; whitespace-only cells read as empty.
    pub fn trimmed(&self, row: u32, col: u32) -> &str {
        self.text(row, col).trim()
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of non-empty cells stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
