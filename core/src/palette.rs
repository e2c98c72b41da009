//! Directory → color assignment.
//!
//! The palette is a plain value handed to whoever needs it; assignment is a
//! pure function of directory order and palette size, so the same directory
//! list always renders with the same colors.
use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;

/// ANSI reset sequence appended after every colored fragment.
pub const RESET: &str = "\x1b[0m";

pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RED: &str = "\x1b[31m";

/// An opaque display color (an ANSI SGR escape sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorToken(&'static str);

impl ColorToken {
    pub const fn new(escape: &'static str) -> Self {
        Self(escape)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

const STANDARD: [ColorToken; 6] = [
    ColorToken::new("\x1b[31m"), // red
    ColorToken::new("\x1b[32m"), // green
    ColorToken::new("\x1b[33m"), // yellow
    ColorToken::new("\x1b[34m"), // blue
    ColorToken::new("\x1b[35m"), // magenta
    ColorToken::new("\x1b[36m"), // cyan
];

const BRIGHT: [ColorToken; 6] = [
    ColorToken::new("\x1b[91m"),
    ColorToken::new("\x1b[92m"),
    ColorToken::new("\x1b[93m"),
    ColorToken::new("\x1b[94m"),
    ColorToken::new("\x1b[95m"),
    ColorToken::new("\x1b[96m"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ColorToken>,
}

impl Palette {
    pub fn new(colors: Vec<ColorToken>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// The six basic foreground colors.
    pub fn standard() -> Self {
        Self {
            colors: STANDARD.to_vec(),
        }
    }

    /// Basic colors followed by their bright variants.
    pub fn extended() -> Self {
        Self {
            colors: STANDARD.iter().chain(BRIGHT.iter()).copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_for(&self, index: usize) -> ColorToken {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Map each directory to `palette[i mod len]` by its position.
///
/// A directory listed twice keeps the color of its last position.
pub fn assign_colors<S: AsRef<str>>(
    directories: &[S],
    palette: &Palette,
) -> HashMap<String, ColorToken> {
    directories
        .iter()
        .enumerate()
        .map(|(i, dir)| (dir.as_ref().to_string(), palette.color_for(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_round_robin_by_position() {
        let palette = Palette::standard();
        let dirs: Vec<String> = (0..8).map(|i| format!("/src/repo{i}")).collect();
        let map = assign_colors(&dirs, &palette);

        assert_eq!(map.len(), 8);
        assert_eq!(map["/src/repo0"], palette.color_for(0));
        assert_eq!(map["/src/repo5"], palette.color_for(5));
        // wraps once the palette is exhausted
        assert_eq!(map["/src/repo6"], map["/src/repo0"]);
        assert_eq!(map["/src/repo7"], map["/src/repo1"]);
    }

    #[test]
    fn same_input_same_assignment() {
        let dirs = ["a", "b", "c"];
        let palette = Palette::extended();
        assert_eq!(assign_colors(&dirs, &palette), assign_colors(&dirs, &palette));
    }

    #[test]
    fn extended_palette_has_bright_variants() {
        let palette = Palette::extended();
        assert_eq!(palette.len(), 12);
        assert_eq!(palette.color_for(6).as_str(), "\x1b[91m");
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            Palette::new(Vec::new()),
            Err(ConfigError::EmptyPalette)
        ));
    }

    #[test]
    fn empty_directory_list_yields_empty_map() {
        let dirs: [&str; 0] = [];
        assert!(assign_colors(&dirs, &Palette::standard()).is_empty());
    }
}
