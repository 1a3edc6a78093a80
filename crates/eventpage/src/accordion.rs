//! Accordion with exclusive expansion

/// Glyph on an open item's toggle
pub const OPEN_GLYPH: &str = "−";
/// Glyph on a closed item's toggle
pub const CLOSED_GLYPH: &str = "+";

/// Display state of one accordion item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionItem {
    pub index: usize,
    pub open: bool,
}

impl AccordionItem {
    pub fn glyph(&self) -> &'static str {
        if self.open {
            OPEN_GLYPH
        } else {
            CLOSED_GLYPH
        }
    }
}

/// At most one of `len` items is open
#[derive(Debug, Clone, Default)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Toggle `index`, closing every other item
    ///
    /// Returns the item left open. Out-of-range indexes change nothing.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            tracing::warn!(index, len = self.len, "accordion item out of range");
            return self.open;
        }

        self.open = if self.is_open(index) { None } else { Some(index) };
        self.open
    }

    pub fn items(&self) -> impl Iterator<Item = AccordionItem> + '_ {
        (0..self.len).map(move |index| AccordionItem {
            index,
            open: self.is_open(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_b_closes_a() {
        let mut accordion = Accordion::new(3);
        accordion.toggle(0);
        assert!(accordion.is_open(0));

        assert_eq!(accordion.toggle(1), Some(1));
        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(1));
        assert_eq!(accordion.items().filter(|i| i.open).count(), 1);
    }

    #[test]
    fn test_toggle_same_item_closes() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(1);
        assert_eq!(accordion.toggle(1), None);
        assert!(accordion.items().all(|i| i.glyph() == CLOSED_GLYPH));
    }

    #[test]
    fn test_glyphs() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(0);
        let glyphs: Vec<_> = accordion.items().map(|i| i.glyph()).collect();
        assert_eq!(glyphs, vec![OPEN_GLYPH, CLOSED_GLYPH]);
    }

    #[test]
    fn test_out_of_range() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(0);
        assert_eq!(accordion.toggle(5), Some(0));
    }
}
