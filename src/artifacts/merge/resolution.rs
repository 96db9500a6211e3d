//! Per-file three-way merge decisions
//!
//! Each file name in the union of the split, current and other snapshots is
//! classified by which snapshots hold it and how their contents compare. The
//! first matching rule decides the action:
//!
//! | split | current | other | action |
//! |---|---|---|---|
//! | absent | absent | present | take other |
//! | present | absent | present, == split | take other |
//! | present | present, == split | absent | remove |
//! | present | present, != split | absent | conflict |
//! | present | present, == split | present, != split | take other |
//! | present | present, != split | present, != split and != current | conflict |
//! | absent | present | present, != current | conflict |
//! | otherwise | | | keep current |

use crate::artifacts::merge::split_finder::debug_log;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use bitflags::bitflags;
use std::collections::BTreeSet;
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Presence: u8 {
        const NONE = 0b000;
        const IN_SPLIT = 0b001;
        const IN_CURRENT = 0b010;
        const IN_OTHER = 0b100;
    }
}

impl fmt::Debug for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(Presence::IN_SPLIT) {
            flags.push("SPLIT");
        }
        if self.contains(Presence::IN_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(Presence::IN_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// What the merge does to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the other side's blob and stage it for addition
    TakeOther(Blob),
    /// Delete the file and stage it for removal
    Remove(String),
    /// Write conflict markers around both sides, unstaged
    Conflict {
        name: String,
        current: Option<Blob>,
        other: Option<Blob>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: Vec<MergeAction>,
    conflicted: bool,
}

impl MergePlan {
    /// Decide the action for every file, in name order
    pub fn build(split: &Snapshot, current: &Snapshot, other: &Snapshot) -> Self {
        let names = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect::<BTreeSet<_>>();

        let mut plan = MergePlan::default();
        for name in names {
            if let Some(action) =
                decide(name, split.get(name), current.get(name), other.get(name))
            {
                debug_log!("{}: {:?}", name, action);
                plan.push(action);
            }
        }

        plan
    }

    fn push(&mut self, action: MergeAction) {
        self.conflicted |= matches!(action, MergeAction::Conflict { .. });
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[MergeAction] {
        &self.actions
    }

    pub fn is_conflicted(&self) -> bool {
        self.conflicted
    }
}

/// Action for a single file, or `None` to keep the current version
pub fn decide(
    name: &str,
    split: Option<&Blob>,
    current: Option<&Blob>,
    other: Option<&Blob>,
) -> Option<MergeAction> {
    let presence = presence_of(split, current, other);
    let same = |a: Option<&Blob>, b: Option<&Blob>| match (a, b) {
        (Some(a), Some(b)) => a.content() == b.content(),
        _ => false,
    };

    let conflict = || MergeAction::Conflict {
        name: name.to_string(),
        current: current.cloned(),
        other: other.cloned(),
    };

    let all = Presence::IN_SPLIT | Presence::IN_CURRENT | Presence::IN_OTHER;

    match presence {
        p if p == Presence::IN_OTHER => other.cloned().map(MergeAction::TakeOther),
        p if p == Presence::IN_SPLIT | Presence::IN_OTHER && same(other, split) => {
            other.cloned().map(MergeAction::TakeOther)
        }
        p if p == Presence::IN_SPLIT | Presence::IN_CURRENT => {
            if same(current, split) {
                Some(MergeAction::Remove(name.to_string()))
            } else {
                Some(conflict())
            }
        }
        p if p == all && same(current, split) && !same(other, split) => {
            other.cloned().map(MergeAction::TakeOther)
        }
        p if p == all
            && !same(current, split)
            && !same(other, split)
            && !same(other, current) =>
        {
            Some(conflict())
        }
        p if p == Presence::IN_CURRENT | Presence::IN_OTHER && !same(other, current) => {
            Some(conflict())
        }
        _ => None,
    }
}

fn presence_of(split: Option<&Blob>, current: Option<&Blob>, other: Option<&Blob>) -> Presence {
    let mut presence = Presence::NONE;
    presence.set(Presence::IN_SPLIT, split.is_some());
    presence.set(Presence::IN_CURRENT, current.is_some());
    presence.set(Presence::IN_OTHER, other.is_some());

    presence
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn blob(content: &str) -> Blob {
        Blob::new("f.txt".to_string(), content.to_string())
    }

    fn take_other(content: &str) -> Option<MergeAction> {
        Some(MergeAction::TakeOther(blob(content)))
    }

    fn conflict(current: Option<&str>, other: Option<&str>) -> Option<MergeAction> {
        Some(MergeAction::Conflict {
            name: "f.txt".to_string(),
            current: current.map(blob),
            other: other.map(blob),
        })
    }

    #[rstest]
    #[case::added_in_other(None, None, Some("o"), take_other("o"))]
    #[case::deleted_in_current_unchanged_in_other(Some("s"), None, Some("s"), take_other("s"))]
    #[case::unchanged_in_current_deleted_in_other(
        Some("s"),
        Some("s"),
        None,
        Some(MergeAction::Remove("f.txt".to_string()))
    )]
    #[case::modified_in_current_deleted_in_other(
        Some("s"),
        Some("c"),
        None,
        conflict(Some("c"), None)
    )]
    #[case::modified_in_other_only(Some("s"), Some("s"), Some("o"), take_other("o"))]
    #[case::modified_differently(Some("s"), Some("c"), Some("o"), conflict(Some("c"), Some("o")))]
    #[case::added_differently(None, Some("c"), Some("o"), conflict(Some("c"), Some("o")))]
    #[case::modified_in_current_only(Some("s"), Some("c"), Some("s"), None)]
    #[case::modified_identically(Some("s"), Some("x"), Some("x"), None)]
    #[case::added_identically(None, Some("x"), Some("x"), None)]
    #[case::added_in_current(None, Some("c"), None, None)]
    #[case::deleted_in_both(Some("s"), None, None, None)]
    #[case::deleted_in_current_modified_in_other(Some("s"), None, Some("o"), None)]
    fn decision_table(
        #[case] split: Option<&str>,
        #[case] current: Option<&str>,
        #[case] other: Option<&str>,
        #[case] expected: Option<MergeAction>,
    ) {
        let (split, current, other) = (split.map(blob), current.map(blob), other.map(blob));

        assert_eq!(
            decide("f.txt", split.as_ref(), current.as_ref(), other.as_ref()),
            expected
        );
    }

    #[test]
    fn plan_is_ordered_by_name_and_flags_conflicts() {
        let file = |name: &str, content: &str| {
            (
                name.to_string(),
                Blob::new(name.to_string(), content.to_string()),
            )
        };
        let split = Snapshot::from([file("a.txt", "a"), file("b.txt", "b"), file("f.txt", "a")]);
        let current = Snapshot::from([file("a.txt", "a"), file("b.txt", "b"), file("f.txt", "b")]);
        let other = Snapshot::from([file("b.txt", "b2"), file("f.txt", "c"), file("n.txt", "n")]);

        let plan = MergePlan::build(&split, &current, &other);

        assert!(plan.is_conflicted());
        assert_eq!(
            plan.actions(),
            &[
                MergeAction::Remove("a.txt".to_string()),
                MergeAction::TakeOther(Blob::new("b.txt".to_string(), "b2".to_string())),
                MergeAction::Conflict {
                    name: "f.txt".to_string(),
                    current: Some(Blob::new("f.txt".to_string(), "b".to_string())),
                    other: Some(Blob::new("f.txt".to_string(), "c".to_string())),
                },
                MergeAction::TakeOther(Blob::new("n.txt".to_string(), "n".to_string())),
            ]
        );
    }

    #[test]
    fn clean_plan_is_not_conflicted() {
        let snapshot = Snapshot::from([("a.txt".to_string(), blob("same"))]);

        let plan = MergePlan::build(&snapshot, &snapshot, &snapshot);

        assert!(!plan.is_conflicted());
        assert!(plan.actions().is_empty());
    }
}
