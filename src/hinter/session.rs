//! The live hinting session.

use tracing::trace;

use crate::labels::Alphabet;
use crate::page::PageMetrics;

use super::target::{Target, TargetId, TargetState, TargetStateChange, TargetStateChanges};

/// One complete hinting attempt, from magic-key press to resolution or
/// cancel. Owns the targets, the typed-character buffer, and (once
/// resolved) the hit target. Created and mutated only by the `Hinter`;
/// everything else sees it through event borrows.
#[derive(Debug)]
pub struct HintContext {
    /// Targets in scan order; `targets[i].id == TargetId(i)`.
    pub targets: Vec<Target>,
    /// Alphabet characters typed so far, lowercase.
    pub input: String,
    /// The uniquely resolved target, if any.
    pub hit_target: Option<TargetId>,
    /// Scroll/viewport metrics captured when the session opened.
    pub page: PageMetrics,
    pub(crate) alphabet: Alphabet,
}

impl HintContext {
    pub(crate) fn new(targets: Vec<Target>, alphabet: Alphabet, page: PageMetrics) -> Self {
        Self {
            targets,
            input: String::new(),
            hit_target: None,
            page,
            alphabet,
        }
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    /// The resolved target, when there is one.
    pub fn hit(&self) -> Option<&Target> {
        self.hit_target.and_then(|id| self.target(id))
    }

    /// Targets still in the running (candidate or hit).
    pub fn remaining_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.state, TargetState::Candidate | TargetState::Hit))
            .count()
    }

    /// Re-evaluate every target against the current input buffer and record
    /// each transition. Keeps the invariant that at most one target is
    /// `Hit`, with all others `Disabled` once one is.
    pub(crate) fn recompute(&mut self) -> TargetStateChanges {
        let matching: Vec<bool> = self
            .targets
            .iter()
            .map(|t| t.hint.starts_with(self.input.as_str()))
            .collect();
        let match_count = matching.iter().filter(|m| **m).count();
        let exact = self.targets.iter().position(|t| t.hint == self.input);
        // Prefix-freedom makes an exact match unique, but only a lone
        // remaining candidate resolves.
        let hit_idx = exact.filter(|_| match_count == 1);

        let mut changes = Vec::new();
        for (i, target) in self.targets.iter_mut().enumerate() {
            let new = if hit_idx == Some(i) {
                TargetState::Hit
            } else if hit_idx.is_none() && matching[i] {
                TargetState::Candidate
            } else {
                TargetState::Disabled
            };
            if new != target.state {
                trace!(target = %target.id, old = %target.state, new = %new, "state change");
                changes.push(TargetStateChange {
                    target: target.id,
                    old: target.state,
                    new,
                });
                target.state = new;
            }
        }
        self.hit_target = hit_idx.map(TargetId);
        changes
    }
}
