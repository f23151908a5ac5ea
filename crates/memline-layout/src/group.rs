#![forbid(unsafe_code)]

//! Same-day grouping.
//!
//! At coarse zoom levels entries sharing a calendar day would land on the
//! same pixel. Consecutive same-day entries are collapsed into one stack so
//! the number of on-axis positions is bounded by the number of distinct days.
//!
//! # Invariants
//!
//! 1. Member order and overall order are preserved (concatenating the groups
//!    yields the input).
//! 2. Levels with `allows_grouping == false` produce only singles.
//! 3. Only strict `YYYY-MM-DD` keys ever group; undated or malformed dates
//!    stay single.

use memline_core::date::is_date_key;
use memline_core::entry::Entry;
use memline_core::zoom::ZoomLevel;

/// Whether a group is one entry or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Single,
    Stack,
}

/// A run of consecutive entries placed as one axis node.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryGroup<'a> {
    key: &'a str,
    members: Vec<&'a Entry>,
}

impl<'a> EntryGroup<'a> {
    fn new(first: &'a Entry) -> Self {
        Self {
            key: first.date_key(),
            members: vec![first],
        }
    }

    /// The shared date string.
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Members in input order.
    #[must_use]
    pub fn members(&self) -> &[&'a Entry] {
        &self.members
    }

    /// First member; its date positions the group.
    #[must_use]
    pub fn representative(&self) -> &'a Entry {
        self.members[0]
    }

    /// Number of members (at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true; groups are created with one member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn kind(&self) -> GroupKind {
        if self.members.len() > 1 {
            GroupKind::Stack
        } else {
            GroupKind::Single
        }
    }

    #[must_use]
    pub fn is_stack(&self) -> bool {
        self.kind() == GroupKind::Stack
    }

    pub(crate) fn into_members(self) -> Vec<&'a Entry> {
        self.members
    }
}

/// Group date-sorted entries for `level`.
#[must_use]
pub fn group_entries<'a>(sorted: &[&'a Entry], level: &ZoomLevel) -> Vec<EntryGroup<'a>> {
    let mut groups: Vec<EntryGroup<'a>> = Vec::with_capacity(sorted.len());
    for &entry in sorted {
        let key = entry.date_key();
        let joinable = level.allows_grouping && is_date_key(key);
        if let Some(last) = groups.last_mut().filter(|g| joinable && g.key == key) {
            last.members.push(entry);
            continue;
        }
        groups.push(EntryGroup::new(entry));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use memline_core::entry::sort_by_date;
    use memline_core::zoom::ZoomTable;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("a", "2020-01-01", "A"),
            Entry::new("b", "2020-01-01", "B"),
            Entry::new("c", "2020-06-15", "C"),
        ]
    }

    #[test]
    fn month_zoom_stacks_same_day() {
        let entries = sample();
        let sorted = sort_by_date(&entries);
        let table = ZoomTable::standard();
        let groups = group_entries(&sorted, table.level_at(2));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind(), GroupKind::Stack);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].representative().id.as_str(), "a");
        assert_eq!(groups[1].kind(), GroupKind::Single);
    }

    #[test]
    fn detail_zoom_never_groups() {
        let entries = sample();
        let sorted = sort_by_date(&entries);
        let table = ZoomTable::standard();
        let groups = group_entries(&sorted, table.level_at(table.finest_index()));
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| !g.is_stack()));
    }

    #[test]
    fn undated_and_malformed_stay_single() {
        let entries = vec![
            Entry::undated("u1", "x"),
            Entry::undated("u2", "y"),
            Entry::new("m1", "someday", "z"),
            Entry::new("m2", "someday", "w"),
            Entry::new("t1", "2020-01-01T10:00", "t"),
            Entry::new("t2", "2020-01-01T10:00", "t"),
        ];
        let sorted = sort_by_date(&entries);
        let groups = group_entries(&sorted, ZoomTable::standard().level_at(0));
        assert_eq!(groups.len(), 6);
    }

    #[test]
    fn only_consecutive_runs_group() {
        let entries = vec![
            Entry::new("a", "2020-01-01", "A"),
            Entry::new("b", "2020-01-02", "B"),
            Entry::new("c", "2020-01-01", "C"),
        ];
        // Deliberately unsorted input: grouping only looks at neighbours.
        let refs: Vec<&Entry> = entries.iter().collect();
        let groups = group_entries(&refs, ZoomTable::standard().level_at(0));
        assert_eq!(groups.len(), 3);
    }
}
