//! Level layouts
//!
//! A layout is an ordered list of rows, each an ordered list of tokens. A
//! token is either a brick color or empty space. Layouts are validated when
//! they are built, so the grid builder never sees a ragged or unknown row.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Brick color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColor {
    Orange,
    Purple,
    LightBlue,
    Grey,
}

impl BrickColor {
    /// Layout token for this color
    pub fn token(&self) -> char {
        match self {
            BrickColor::Orange => 'o',
            BrickColor::Purple => 'p',
            BrickColor::LightBlue => 'l',
            BrickColor::Grey => 'g',
        }
    }

    /// CSS color used by the renderer and particle bursts
    pub fn css(&self) -> &'static str {
        match self {
            BrickColor::Orange => "#FFA500",
            BrickColor::Purple => "#800080",
            BrickColor::LightBlue => "#ADD8E6",
            BrickColor::Grey => "#808080",
        }
    }
}

/// Token meaning "no brick here"
pub const EMPTY_TOKEN: char = ' ';

/// Parse a single layout token. `Some(None)` is empty space, `None` is unknown.
pub fn parse_token(token: char) -> Option<Option<BrickColor>> {
    match token {
        EMPTY_TOKEN => Some(None),
        'o' => Some(Some(BrickColor::Orange)),
        'p' => Some(Some(BrickColor::Purple)),
        'l' => Some(Some(BrickColor::LightBlue)),
        'g' => Some(Some(BrickColor::Grey)),
        _ => None,
    }
}

/// The built-in level
pub const DEFAULT_LAYOUT: [&str; 3] = ["oplgoopplg", "  glgogpl ", "  g       "];

/// A validated level layout (rows of equal length)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Layout {
    rows: Vec<Vec<Option<BrickColor>>>,
}

impl Layout {
    /// Build a layout from already-decoded rows
    pub fn from_cells(rows: Vec<Vec<Option<BrickColor>>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, cells)) = rows
                .iter()
                .enumerate()
                .find(|(_, cells)| cells.len() != expected)
            {
                return Err(ConfigError::RaggedLayout {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Parse rows of tokens, one string per row
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut decoded = Vec::with_capacity(rows.len());
        for (row, text) in rows.iter().enumerate() {
            let mut cells = Vec::new();
            for (column, token) in text.as_ref().chars().enumerate() {
                let cell = parse_token(token).ok_or(ConfigError::UnknownToken {
                    row,
                    column,
                    token,
                })?;
                cells.push(cell);
            }
            decoded.push(cells);
        }
        Self::from_cells(decoded)
    }

    /// Parse a JSON array of row strings
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<String> = serde_json::from_str(json)?;
        Self::parse(&rows)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Token at (column, row); `None` when empty or out of range
    pub fn cell(&self, column: usize, row: usize) -> Option<BrickColor> {
        self.rows.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Number of non-empty tokens (bricks the layout produces)
    pub fn brick_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for Layout {
    fn default() -> Self {
        let rows = DEFAULT_LAYOUT
            .iter()
            .map(|row| row.chars().filter_map(parse_token).collect())
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<String>> for Layout {
    type Error = ConfigError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Self::parse(&rows)
    }
}

impl From<Layout> for Vec<String> {
    fn from(layout: Layout) -> Self {
        layout
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|c| c.token()).unwrap_or(EMPTY_TOKEN))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.columns(), 10);
        assert_eq!(layout.brick_count(), 18);
        assert_eq!(layout.cell(0, 0), Some(BrickColor::Orange));
        assert_eq!(layout.cell(0, 1), None);
        assert_eq!(layout.cell(2, 2), Some(BrickColor::Grey));
    }

    #[test]
    fn test_default_layout_rows_are_rectangular() {
        assert!(Layout::parse(&DEFAULT_LAYOUT).is_ok());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Layout::parse(&["ooo", "oo"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RaggedLayout {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = Layout::parse(&["ox"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownToken {
                row: 0,
                column: 1,
                token: 'x'
            }
        ));
    }

    #[test]
    fn test_empty_layout_is_valid() {
        let layout = Layout::parse::<&str>(&[]).unwrap();
        assert_eq!(layout.rows(), 0);
        assert_eq!(layout.columns(), 0);
        assert_eq!(layout.brick_count(), 0);
    }

    #[test]
    fn test_json_layout() {
        let layout = Layout::from_json(r#"["o p", " g "]"#).unwrap();
        assert_eq!(layout.brick_count(), 3);
        assert_eq!(layout.cell(1, 1), Some(BrickColor::Grey));

        let back: Vec<String> = layout.into();
        assert_eq!(back, vec!["o p".to_string(), " g ".to_string()]);
    }

    #[test]
    fn test_json_layout_ragged_rejected() {
        let err = serde_json::from_str::<Layout>(r#"["ooo", "o"]"#);
        assert!(err.is_err());
    }
}
