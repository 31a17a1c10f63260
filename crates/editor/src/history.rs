//! Linear undo/redo over section snapshots.
//!
//! Mutations are collected into a pending step until the selection moves to
//! another section (or the caller commits explicitly). Each committed step
//! holds, per touched section, the state before the first change and after
//! the last one.

use std::collections::BTreeMap;

use crate::section::Section;
use crate::types::{SectionSelection, SelectionTarget};

/// Net change of one section within a step.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionChange {
    pub from: Section,
    pub to: Section,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStep {
    /// Selection at commit time, i.e. where the user moved after editing.
    pub selection: Option<SectionSelection>,
    pub sections: BTreeMap<usize, SectionChange>,
}

/// Section states to write back, and where the selection goes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub sections: Vec<(usize, Section)>,
    pub selection: Option<SelectionTarget>,
}

#[derive(Debug, Default)]
pub struct History {
    steps: Vec<HistoryStep>,
    pending: BTreeMap<usize, SectionChange>,
    undo_count: usize,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` committed steps when set.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn record(&mut self, idx: usize, from: &Section, to: &Section) {
        if from.same_state(to) {
            return;
        }

        tracing::trace!(idx, text = %to.text, "history_recorded");

        self.pending
            .entry(idx)
            .and_modify(|change| change.to = to.clone())
            .or_insert_with(|| SectionChange {
                from: from.clone(),
                to: to.clone(),
            });
    }

    pub fn commit(&mut self, selection: Option<&SectionSelection>) {
        if self.pending.is_empty() {
            return;
        }

        self.steps.truncate(self.steps.len() - self.undo_count);
        self.steps.push(HistoryStep {
            selection: selection.copied(),
            sections: std::mem::take(&mut self.pending),
        });
        self.undo_count = 0;

        if let Some(limit) = self.limit {
            let overflow = self.steps.len().saturating_sub(limit);
            self.steps.drain(..overflow);
        }

        tracing::debug!(steps = self.steps.len(), "history_committed");
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.pending.clear();
        self.undo_count = 0;
        tracing::debug!("history_cleared");
    }

    /// Commits anything pending, then steps one entry back.
    ///
    /// Returns `None` when there is nothing left to undo.
    pub fn undo(&mut self, selection: Option<&SectionSelection>) -> Option<Replay> {
        self.commit(selection);

        let step = self.steps.len().checked_sub(self.undo_count + 1)?;
        self.undo_count += 1;

        let entry = &self.steps[step];
        let sections = entry
            .sections
            .iter()
            .map(|(idx, change)| (*idx, change.from.clone()))
            .collect();

        let selection = match step.checked_sub(1) {
            Some(previous) => Some(SelectionTarget::Exactly(self.steps[previous].selection)),
            None => entry
                .sections
                .keys()
                .next()
                .map(|idx| SelectionTarget::SectionStart(*idx)),
        };

        tracing::debug!(step, "history_undo");

        Some(Replay {
            sections,
            selection,
        })
    }

    /// Commits anything pending, then steps one entry forward.
    ///
    /// Returns `None` unless a previous undo left something to redo.
    pub fn redo(&mut self, selection: Option<&SectionSelection>) -> Option<Replay> {
        self.commit(selection);

        if self.undo_count == 0 {
            return None;
        }
        let step = self.steps.len() - self.undo_count;
        self.undo_count -= 1;

        let entry = &self.steps[step];
        let sections = entry
            .sections
            .iter()
            .map(|(idx, change)| (*idx, change.to.clone()))
            .collect();

        tracing::debug!(step, "history_redo");

        Some(Replay {
            sections,
            selection: Some(SelectionTarget::Exactly(entry.selection)),
        })
    }

    pub fn steps(&self) -> &[HistoryStep] {
        &self.steps
    }

    pub fn pending(&self) -> &BTreeMap<usize, SectionChange> {
        &self.pending
    }

    /// Number of sections touched since the last commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_count
    }

    pub fn can_undo(&self) -> bool {
        self.undo_count < self.steps.len() || !self.pending.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_count > 0 && self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
