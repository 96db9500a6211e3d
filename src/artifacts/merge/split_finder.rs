//! Split point finder for merges
//!
//! Every commit has at most one parent, so the history is a tree and two tips
//! have exactly one lowest common ancestor: the split point. It is found in
//! two phases:
//!
//! ### Phase 1: Depth balancing
//!
//! The depth of each tip (edges to the root) is measured by following parent
//! links. The deeper pointer is advanced by the difference, so both pointers
//! sit at the same distance from the root.
//!
//! ### Phase 2: Lockstep walk
//!
//! If the balanced pointers already coincide, one tip is an ancestor of the
//! other and no three-way merge is needed. Otherwise both pointers step to
//! their parents together until they meet; the meeting point is the split.
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature prints every step of the walk to
//! stderr.

use crate::artifacts::objects::object_id::ObjectId;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use debug_log;

/// How the tips of a merge relate to each other
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeBase {
    /// The other tip is the current tip or one of its ancestors
    Ancestor,
    /// The current tip is a strict ancestor of the other tip
    FastForward,
    /// The histories diverged at this commit
    Split(ObjectId),
}

/// Finds the split point of two commits
///
/// # Type Parameters
///
/// * `ParentLoaderFn` - A function that takes an ObjectId and returns the id
///   of its parent, or `None` for the root commit.
pub struct SplitFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> SplitFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    pub fn find_merge_base(
        &self,
        current_tip: &ObjectId,
        other_tip: &ObjectId,
    ) -> anyhow::Result<MergeBase> {
        let current_depth = self.depth(current_tip)?;
        let other_depth = self.depth(other_tip)?;
        debug_log!(
            "current {} at depth {}, other {} at depth {}",
            current_tip.to_short_oid(),
            current_depth,
            other_tip.to_short_oid(),
            other_depth
        );

        let mut current = self.advance(current_tip, current_depth.saturating_sub(other_depth))?;
        let mut other = self.advance(other_tip, other_depth.saturating_sub(current_depth))?;

        if current == other {
            return Ok(if &other == other_tip {
                debug_log!("other tip is an ancestor of the current tip");
                MergeBase::Ancestor
            } else {
                debug_log!("current tip is an ancestor of the other tip");
                MergeBase::FastForward
            });
        }

        while current != other {
            debug_log!(
                "stepping {} and {}",
                current.to_short_oid(),
                other.to_short_oid()
            );
            current = self.parent_of(&current)?;
            other = self.parent_of(&other)?;
        }

        debug_log!("split point {}", current);
        Ok(MergeBase::Split(current))
    }

    /// Number of parent links between `oid` and the root
    pub fn depth(&self, oid: &ObjectId) -> anyhow::Result<usize> {
        let mut depth = 0;
        let mut current = (self.parent_loader)(oid)?;

        while let Some(parent) = current {
            depth += 1;
            current = (self.parent_loader)(&parent)?;
        }

        Ok(depth)
    }

    fn advance(&self, oid: &ObjectId, steps: usize) -> anyhow::Result<ObjectId> {
        let mut current = oid.clone();
        for _ in 0..steps {
            current = self.parent_of(&current)?;
        }

        Ok(current)
    }

    fn parent_of(&self, oid: &ObjectId) -> anyhow::Result<ObjectId> {
        (self.parent_loader)(oid)?
            .ok_or_else(|| anyhow::anyhow!("commit {} has no parent to step to", oid))
    }
}
