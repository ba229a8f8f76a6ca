//! Per-sheet style deduplication

use super::Style;
use ahash::AHashMap;

/// Interns styles so each distinct style is stored once and cells refer to it by
/// index. Index 0 is always the default style.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    lookup: AHashMap<Style, u32>,
}

impl StylePool {
    pub fn new() -> Self {
        let default = Style::default();
        let mut lookup = AHashMap::with_capacity(16);
        lookup.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            lookup,
        }
    }

    /// Index of `style`, adding it if it is new
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.lookup.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.lookup.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    pub fn default_style(&self) -> &Style {
        &self.styles[0]
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True when only the default style is present
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderStyle, Color};

    #[test]
    fn test_default_at_zero() {
        let mut pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get_or_insert(Style::default()), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();

        let bold = pool.get_or_insert(Style::new().bold(true));
        let bold_again = pool.get_or_insert(Style::new().bold(true));
        let bordered = pool.get_or_insert(Style::new().border(BorderStyle::thin()));
        let filled = pool.get_or_insert(Style::new().fill_color(Color::rgb(0x44, 0x72, 0xC4)));

        assert_eq!(bold, bold_again);
        assert_ne!(bold, bordered);
        assert_ne!(bordered, filled);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.get(bordered).map(|s| s.border), Some(BorderStyle::thin()));
    }
}
