//! Tag every match of a literal pattern.
//!
//! The scan starts at the document start. Each match is tagged and the
//! next scan begins where that match ends, so overlapping occurrences are
//! skipped: `aa` in `aaaa` matches twice, not three times.

use crate::error::EditorError;
use crate::position::Range;
use crate::surface::TextSurface;
use crate::tag::Tag;

/// Clear both tags, then tag each non-overlapping occurrence of `pattern`
/// with [`Tag::Search`]. Returns the number of matches.
///
/// # Errors
///
/// [`EditorError::PatternNotFound`] when nothing matched, which includes
/// an empty pattern.
pub fn tag_matches(surface: &mut impl TextSurface, pattern: &str) -> Result<usize, EditorError> {
    surface.tag_clear(Tag::Highlight);
    surface.tag_clear(Tag::Search);

    let len = isize::try_from(pattern.chars().count()).unwrap_or(isize::MAX);
    if len == 0 {
        return Err(EditorError::PatternNotFound);
    }

    let mut from = surface.start();
    let mut found = 0;
    while let Some(start) = surface.find(pattern, from) {
        let end = surface.offset(start, len);
        surface.tag_add(Tag::Search, Range::new(start, end));
        found += 1;
        if end <= start {
            break;
        }
        from = end;
    }

    tracing::debug!(pattern, found, "search");
    if found == 0 {
        Err(EditorError::PatternNotFound)
    } else {
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
