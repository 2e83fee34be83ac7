//! Tags and tag activation snapshots.
//!
//! A [`Tag`] names a boolean attribute a place can be filtered on. A
//! [`TagState`] records which tags the user has switched on for the current
//! query. TagState is copy-on-write: every mutation returns a new snapshot, so
//! a caller holding a reference to a prior snapshot mid-query never sees it
//! change underneath.

use catalogue::Place;
use std::collections::{BTreeMap, BTreeSet};

/// The closed set of filterable tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    LikedByYou,
    WheelchairAccessible,
    ChildFriendly,
    CheapEntry,
    FreeEntry,
}

impl Tag {
    /// The place flag backing this tag, if the place model carries one.
    ///
    /// `None` means the tag has no corresponding flag on [`Place`]; the
    /// predicate ignores such tags rather than rejecting every item
    /// (fails open).
    pub fn flag(&self, place: &Place) -> Option<bool> {
        match self {
            Tag::LikedByYou => Some(place.liked),
            Tag::WheelchairAccessible => Some(place.wheelchair_accessible),
            Tag::ChildFriendly => Some(place.child_friendly),
            Tag::CheapEntry => Some(place.cheap_entry),
            Tag::FreeEntry => Some(place.free_entry),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tag::LikedByYou => "Liked by you",
            Tag::WheelchairAccessible => "Wheelchair accessible",
            Tag::ChildFriendly => "Child friendly",
            Tag::CheapEntry => "Cheap entry",
            Tag::FreeEntry => "Free entry",
        }
    }
}

/// Immutable snapshot of tag activation.
///
/// A tag absent from the map is inactive and does not constrain the predicate;
/// a tag mapped to `true` requires the matching place flag. Active tags
/// combine by logical AND during filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagState {
    active: BTreeMap<Tag, bool>,
}

impl TagState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new snapshot with `tag` set to `active`. The receiver is unchanged.
    pub fn with_tag(&self, tag: Tag, active: bool) -> TagState {
        let mut next = self.clone();
        next.active.insert(tag, active);
        next
    }

    /// A new snapshot with the entry for `tag` removed entirely. Equivalent to
    /// inactive for filtering purposes.
    pub fn without_tag(&self, tag: Tag) -> TagState {
        let mut next = self.clone();
        next.active.remove(&tag);
        next
    }

    pub fn is_active(&self, tag: Tag) -> bool {
        self.active.get(&tag).copied().unwrap_or(false)
    }

    /// All tags currently active in this snapshot.
    pub fn active_tags(&self) -> BTreeSet<Tag> {
        self.active
            .iter()
            .filter(|(_, active)| **active)
            .map(|(tag, _)| *tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_tag_is_inactive() {
        let state = TagState::new();
        assert!(!state.is_active(Tag::LikedByYou));
        assert!(state.active_tags().is_empty());
    }

    #[test]
    fn test_with_tag_does_not_mutate_receiver() {
        let base = TagState::new();
        let toggled = base.with_tag(Tag::FreeEntry, true);

        assert!(!base.is_active(Tag::FreeEntry));
        assert!(toggled.is_active(Tag::FreeEntry));
    }

    #[test]
    fn test_tag_set_to_false_is_inactive() {
        let state = TagState::new().with_tag(Tag::ChildFriendly, false);
        assert!(!state.is_active(Tag::ChildFriendly));
        assert!(state.active_tags().is_empty());
    }

    #[test]
    fn test_without_tag_removes_entry() {
        let state = TagState::new()
            .with_tag(Tag::CheapEntry, true)
            .without_tag(Tag::CheapEntry);
        assert!(!state.is_active(Tag::CheapEntry));
    }

    #[test]
    fn test_active_tags_collects_only_active() {
        let state = TagState::new()
            .with_tag(Tag::LikedByYou, true)
            .with_tag(Tag::WheelchairAccessible, false)
            .with_tag(Tag::FreeEntry, true);

        let active = state.active_tags();
        assert_eq!(active.len(), 2);
        assert!(active.contains(&Tag::LikedByYou));
        assert!(active.contains(&Tag::FreeEntry));
    }

    #[test]
    fn test_remove_and_readd_round_trip() {
        // The tag-selector flow: lift a tag out of the snapshot, then re-add
        // it with its previous value.
        let original = TagState::new().with_tag(Tag::LikedByYou, true);
        let was_active = original.is_active(Tag::LikedByYou);

        let without = original.without_tag(Tag::LikedByYou);
        let restored = without.with_tag(Tag::LikedByYou, was_active);

        assert_eq!(original, restored);
    }
}
