//! Highlight tags: named sets of ranges painted with a background color.
//!
//! Tags are visual only. They never change the document and are not
//! moved by edits; every operation that uses one clears it first.

use crate::position::{Position, Range};

/// The two tags a text area knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The one-char marker left by `gg` and `G`.
    Highlight,
    /// Matches of the last search.
    Search,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    highlight: Vec<Range>,
    search: Vec<Range>,
}

impl Tags {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            highlight: Vec::new(),
            search: Vec::new(),
        }
    }

    /// Tag `range`. Empty ranges are dropped.
    pub fn add(&mut self, tag: Tag, range: Range) {
        if !range.is_empty() {
            self.ranges_mut(tag).push(range);
        }
    }

    pub fn clear(&mut self, tag: Tag) {
        self.ranges_mut(tag).clear();
    }

    #[must_use]
    pub fn ranges(&self, tag: Tag) -> &[Range] {
        match tag {
            Tag::Highlight => &self.highlight,
            Tag::Search => &self.search,
        }
    }

    /// The tag covering the char that starts at `pos`. `Highlight` wins
    /// where both apply.
    #[must_use]
    pub fn tag_at(&self, pos: Position) -> Option<Tag> {
        [Tag::Highlight, Tag::Search]
            .into_iter()
            .find(|&tag| self.ranges(tag).iter().any(|r| r.contains(pos)))
    }

    const fn ranges_mut(&mut self, tag: Tag) -> &mut Vec<Range> {
        match tag {
            Tag::Highlight => &mut self.highlight,
            Tag::Search => &mut self.search,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn span(line: usize, from: usize, to: usize) -> Range {
        Range::new(Position::new(line, from), Position::new(line, to))
    }

    #[test]
    fn empty_ranges_are_ignored() {
        let mut tags = Tags::new();
        tags.add(Tag::Search, span(0, 3, 3));
        assert!(tags.ranges(Tag::Search).is_empty());
    }

    #[test]
    fn clear_only_touches_one_tag() {
        let mut tags = Tags::new();
        tags.add(Tag::Search, span(0, 0, 2));
        tags.add(Tag::Highlight, span(1, 0, 1));
        tags.clear(Tag::Search);
        assert!(tags.ranges(Tag::Search).is_empty());
        assert_eq!(tags.ranges(Tag::Highlight), &[span(1, 0, 1)]);
    }

    #[test]
    fn tag_at_prefers_highlight() {
        let mut tags = Tags::new();
        tags.add(Tag::Search, span(0, 0, 4));
        tags.add(Tag::Highlight, span(0, 0, 1));
        assert_eq!(tags.tag_at(Position::new(0, 0)), Some(Tag::Highlight));
        assert_eq!(tags.tag_at(Position::new(0, 3)), Some(Tag::Search));
        assert_eq!(tags.tag_at(Position::new(0, 4)), None);
    }
}
