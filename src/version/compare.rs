//! Level-by-level version ordering
//!
//! `major` and `minor` are compared first. `revision` is only consulted
//! when at least one side has it, so `1.0` vs `1.0rc2` falls straight
//! through to the RC level.

use super::ParsedVersion;
use std::cmp::Ordering;

/// Outcome of comparing one level of two versions
enum Level {
    Newer,
    Older,
    Equal,
    /// Neither side carries this level
    Unspecified,
}

fn compare_level(ours: Option<u64>, theirs: Option<u64>) -> Level {
    match (ours, theirs) {
        (None, None) => Level::Unspecified,
        (Some(_), None) => Level::Newer,
        (None, Some(_)) => Level::Older,
        (Some(a), Some(b)) => match a.cmp(&b) {
            Ordering::Greater => Level::Newer,
            Ordering::Less => Level::Older,
            Ordering::Equal => Level::Equal,
        },
    }
}

impl ParsedVersion {
    /// Returns true if `self` is newer than `other`
    ///
    /// An invalid `self` is never newer; any valid `self` is newer than an
    /// invalid `other`. A level present on only one side counts in favor of
    /// that side. When both sides lack a level, or every level ties, the
    /// answer is `include_equal_on_tie`.
    pub fn is_newer(&self, other: &ParsedVersion, include_equal_on_tie: bool) -> bool {
        if !self.valid {
            return false;
        }
        if !other.valid {
            return true;
        }

        let revision = (self.revision.is_some() || other.revision.is_some())
            .then_some((self.revision, other.revision));

        let levels = [
            Some((self.major, other.major)),
            Some((self.minor, other.minor)),
            revision,
            Some((self.rc, other.rc)),
        ];

        for (ours, theirs) in levels.into_iter().flatten() {
            match compare_level(ours, theirs) {
                Level::Newer => return true,
                Level::Older => return false,
                Level::Unspecified => return include_equal_on_tie,
                Level::Equal => continue,
            }
        }

        include_equal_on_tie
    }
}
