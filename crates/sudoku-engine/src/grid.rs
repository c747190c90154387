//! Grid representation, geometry, parsing and rendering.
//!
//! Cells are stored row-major in a flat vector; `0` means empty. The grid
//! dimension `N` must be a perfect square of the sub-grid size so that box
//! partitioning is well defined (9 → 3×3 boxes for standard sudoku).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in puzzle used when the caller supplies none.
pub const DEFAULT_PUZZLE: &str =
    "2.....9..6..25..13.53..876........7452.417.8687........625..83.19..76..5..5.....7";

const EMPTY: u8 = 0;

/// A cell coordinate (0-indexed row and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Errors from grid construction (malformed input never reaches the solver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input length is not `N²` for an `N` with an integer sub-grid size.
    BadLength { len: usize },
    /// Character outside the puzzle alphabet.
    BadSymbol { index: usize, found: char },
    /// Row of a prebuilt grid has the wrong width.
    RaggedRow { row: usize, len: usize },
    /// Cell value outside `0..=N` in a prebuilt grid.
    BadValue { row: usize, col: usize, value: u8 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength { len } => {
                write!(f, "puzzle has {} cells, expected N\u{b2} with square N (81 for standard sudoku)", len)
            }
            Self::BadSymbol { index, found } => {
                write!(f, "invalid symbol {:?} at position {}", found, index)
            }
            Self::RaggedRow { row, len } => {
                write!(f, "row {} has {} cells, expected one per column", row, len)
            }
            Self::BadValue { row, col, value } => {
                write!(f, "value {} at ({}, {}) is outside the allowed range", value, row, col)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Check that a raw puzzle string is 81 characters over `1-9` and `.`.
///
/// Pure predicate for callers that want to vet input before constructing a
/// grid; [`Grid::from_string`] does not trust it and re-checks.
pub fn is_well_formed(puzzle: &str) -> bool {
    puzzle.len() == 81 && puzzle.chars().all(|c| c == '.' || ('1'..='9').contains(&c))
}

/// The puzzle state: an `N×N` board of values in `1..=N`, `0` for empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    box_size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parse a puzzle from an `N²`-character string, row-major.
    ///
    /// Alphabet: digits `1..=N` for givens, `.` or `0` for empty cells. The
    /// dimension is inferred from the length (81 chars → 9×9).
    pub fn from_string(puzzle: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = puzzle.chars().collect();
        let size = isqrt(chars.len());
        let box_size = isqrt(size);
        if chars.is_empty() || box_size * box_size != size || size * size != chars.len() {
            return Err(ParseError::BadLength { len: chars.len() });
        }

        let mut cells = Vec::with_capacity(chars.len());
        for (index, &c) in chars.iter().enumerate() {
            let value = match c {
                '.' | '0' => EMPTY,
                _ => match c.to_digit(10) {
                    Some(d) if d as usize <= size => d as u8,
                    _ => return Err(ParseError::BadSymbol { index, found: c }),
                },
            };
            cells.push(value);
        }

        Ok(Self { size, box_size, cells })
    }

    /// Build a grid from prebuilt numeric rows (`0` = empty).
    ///
    /// The row count must be a perfect square and every row must have one
    /// value per column.
    pub fn from_cells(rows: Vec<Vec<u8>>) -> Result<Self, ParseError> {
        let size = rows.len();
        let box_size = isqrt(size);
        if size == 0 || box_size * box_size != size {
            return Err(ParseError::BadLength { len: size * size });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ParseError::RaggedRow { row, len: values.len() });
            }
            for (col, &value) in values.iter().enumerate() {
                if value as usize > size {
                    return Err(ParseError::BadValue { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { size, box_size, cells })
    }

    /// Grid dimension `N` (9 for standard sudoku).
    pub fn dimension(&self) -> usize {
        self.size
    }

    /// Side length of one sub-grid box (3 for standard sudoku).
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    /// Legal cell values in ascending order.
    pub fn values(&self) -> std::ops::RangeInclusive<u8> {
        1..=self.size as u8
    }

    /// Value at a position, `None` if the cell is empty.
    pub fn get(&self, pos: Position) -> Option<u8> {
        match self.at(pos.row, pos.col) {
            EMPTY => None,
            v => Some(v),
        }
    }

    /// Place a value. The caller is responsible for constraint checking.
    pub fn set(&mut self, pos: Position, value: u8) {
        debug_assert!((1..=self.size as u8).contains(&value));
        let idx = self.idx(pos.row, pos.col);
        self.cells[idx] = value;
    }

    /// Empty a cell.
    pub fn clear(&mut self, pos: Position) {
        let idx = self.idx(pos.row, pos.col);
        self.cells[idx] = EMPTY;
    }

    /// Whether every cell holds a value.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != EMPTY)
    }

    /// Whether no row, column or box contains a duplicate value.
    /// Empty cells are ignored, so a partial fill can still be valid.
    pub fn is_valid(&self) -> bool {
        let n = self.size;
        for i in 0..n {
            let row: Vec<u8> = (0..n).map(|c| self.at(i, c)).collect();
            let col: Vec<u8> = (0..n).map(|r| self.at(r, i)).collect();
            let top = self.box_size * (i / self.box_size);
            let left = self.box_size * (i % self.box_size);
            let boxed: Vec<u8> = (0..n)
                .map(|k| self.at(top + k / self.box_size, left + k % self.box_size))
                .collect();
            for unit in [&row, &col, &boxed] {
                for value in self.values() {
                    if unit.iter().filter(|&&v| v == value).count() > 1 {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Number of filled cells.
    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.given_count()
    }

    /// Whether `value` may be placed at `pos` without violating row, column
    /// or box uniqueness. Pure; does not mutate the grid.
    pub fn can_place(&self, pos: Position, value: u8) -> bool {
        let n = self.size;
        for col in 0..n {
            if self.at(pos.row, col) == value {
                return false;
            }
        }
        for row in 0..n {
            if self.at(row, pos.col) == value {
                return false;
            }
        }
        // Box anchored at the top-left corner via floor division
        let top = self.box_size * (pos.row / self.box_size);
        let left = self.box_size * (pos.col / self.box_size);
        for row in top..top + self.box_size {
            for col in left..left + self.box_size {
                if self.at(row, col) == value {
                    return false;
                }
            }
        }
        true
    }

    /// Render as a single compact line, `.` for empty cells.
    pub fn to_string_compact(&self) -> String {
        self.cells
            .iter()
            .map(|&v| if v == EMPTY { '.' } else { (b'0' + v) as char })
            .collect()
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn at(&self, row: usize, col: usize) -> u8 {
        self.cells[self.idx(row, col)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let band = "-".repeat(self.box_size * 2 - 1);
        let separator = vec![band; self.box_size].join("-+-");
        for row in 0..self.size {
            if row > 0 && row % self.box_size == 0 {
                writeln!(f, "{}", separator)?;
            }
            for col in 0..self.size {
                if col > 0 {
                    if col % self.box_size == 0 {
                        write!(f, " | ")?;
                    } else {
                        write!(f, " ")?;
                    }
                }
                match self.at(row, col) {
                    EMPTY => write!(f, ".")?,
                    v => write!(f, "{}", v)?,
                }
            }
            if row + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn isqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    while r * r > n {
        r -= 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_parse_default_puzzle() {
        let grid = Grid::from_string(DEFAULT_PUZZLE).unwrap();
        assert_eq!(grid.dimension(), 9);
        assert_eq!(grid.box_size(), 3);
        assert_eq!(grid.given_count() + grid.empty_count(), 81);
        assert!(!grid.is_complete());
        assert!(grid.is_valid());
    }

    #[test]
    fn test_parse_accepts_zero_for_empty() {
        let dotted = Grid::from_string(CLASSIC).unwrap();
        let zeroed = Grid::from_string(&CLASSIC.replace('.', "0")).unwrap();
        assert_eq!(dotted, zeroed);
    }

    #[test]
    fn test_parse_bad_length() {
        assert_eq!(
            Grid::from_string("123"),
            Err(ParseError::BadLength { len: 3 })
        );
        // 36 = 6², but 6 is not a perfect square of a box size
        assert_eq!(
            Grid::from_string(&".".repeat(36)),
            Err(ParseError::BadLength { len: 36 })
        );
    }

    #[test]
    fn test_parse_bad_symbol() {
        let mut s: Vec<char> = CLASSIC.chars().collect();
        s[40] = 'x';
        let s: String = s.into_iter().collect();
        assert_eq!(
            Grid::from_string(&s),
            Err(ParseError::BadSymbol { index: 40, found: 'x' })
        );
    }

    #[test]
    fn test_parse_four_by_four() {
        let grid = Grid::from_string("1234341221434321").unwrap();
        assert_eq!(grid.dimension(), 4);
        assert_eq!(grid.box_size(), 2);
        assert!(grid.is_complete());
        assert!(grid.is_valid());
        // '5' is a digit but outside 1..=4
        assert_eq!(
            Grid::from_string("5234341221434321"),
            Err(ParseError::BadSymbol { index: 0, found: '5' })
        );
    }

    #[test]
    fn test_from_cells() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        let grid = Grid::from_cells(rows).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(0, 1)), None);
        assert_eq!(grid.given_count(), 1);
    }

    #[test]
    fn test_from_cells_rejects_bad_shapes() {
        assert!(matches!(
            Grid::from_cells(vec![vec![0u8; 9]; 8]),
            Err(ParseError::BadLength { .. })
        ));
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[4] = vec![0u8; 8];
        assert_eq!(
            Grid::from_cells(rows),
            Err(ParseError::RaggedRow { row: 4, len: 8 })
        );
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[2][7] = 10;
        assert_eq!(
            Grid::from_cells(rows),
            Err(ParseError::BadValue { row: 2, col: 7, value: 10 })
        );
    }

    #[test]
    fn test_can_place_conflicts() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        let grid = Grid::from_cells(rows).unwrap();

        // Row, column and box conflicts with the lone 5 at (0,0)
        assert!(!grid.can_place(Position::new(0, 8), 5), "row conflict");
        assert!(!grid.can_place(Position::new(8, 0), 5), "column conflict");
        assert!(!grid.can_place(Position::new(1, 1), 5), "box conflict");

        // Out of sight of (0,0): placement is legal
        assert!(grid.can_place(Position::new(4, 4), 5));
        // A different value next to the 5 is fine
        assert!(grid.can_place(Position::new(0, 8), 3));
    }

    #[test]
    fn test_can_place_on_real_puzzle() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let pos = Position::new(0, 2);
        assert!(grid.can_place(pos, 4), "4 is the solution value here");
        assert!(!grid.can_place(pos, 5), "5 is already in row 0");
        assert!(!grid.can_place(pos, 8), "8 is already in column 2");
        assert!(!grid.can_place(pos, 9), "9 is already in the top-left box");
    }

    #[test]
    fn test_set_and_clear() {
        let mut grid = Grid::from_string(CLASSIC).unwrap();
        let pos = Position::new(0, 2);
        assert_eq!(grid.get(pos), None);
        grid.set(pos, 4);
        assert_eq!(grid.get(pos), Some(4));
        grid.clear(pos);
        assert_eq!(grid.get(pos), None);
    }

    #[test]
    fn test_compact_round_trip() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        assert_eq!(grid.to_string_compact(), CLASSIC);
        let reparsed = Grid::from_string(&grid.to_string_compact()).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_display_shows_box_separators() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let text = format!("{}", grid);
        assert_eq!(text.lines().count(), 11, "9 rows plus 2 separators");
        assert!(text.starts_with("5 3 . | . 7 . | . . ."));
        assert!(text.contains("------+-------+------"));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(DEFAULT_PUZZLE));
        assert!(is_well_formed(CLASSIC));
        assert!(!is_well_formed(&CLASSIC[..80]), "too short");
        assert!(!is_well_formed(&CLASSIC.replace('.', "0")), "0 not in the strict alphabet");
        assert!(!is_well_formed(&CLASSIC.replace('.', "x")));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::from_string(DEFAULT_PUZZLE).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_validity_detects_duplicates() {
        let mut grid = Grid::from_string(CLASSIC).unwrap();
        assert!(grid.is_valid());
        // Duplicate the 5 from (0,0) into the same row
        grid.set(Position::new(0, 8), 5);
        assert!(!grid.is_valid());
    }
}
