use crate::document::Document;
use crate::history::History;
use crate::section::{DeleteRange, Section};
use crate::types::SectionPatch;

/// Which section a [`SectionMutator`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A section known to exist when the handle was created.
    Present(usize),
    /// Whatever section the selection points at, if any. Operations on an
    /// unresolved target are silently skipped.
    Current(Option<usize>),
}

impl Target {
    pub fn idx(&self) -> Option<usize> {
        match self {
            Self::Present(idx) => Some(*idx),
            Self::Current(idx) => *idx,
        }
    }
}

/// The only write path into the document.
///
/// Every operation builds the next snapshot, reports the `(from, to)` pair to
/// the history once, and publishes the snapshot to the section's listeners.
pub struct SectionMutator<'a> {
    document: &'a mut Document,
    history: &'a mut History,
    target: Target,
}

impl<'a> SectionMutator<'a> {
    pub(crate) fn new(document: &'a mut Document, history: &'a mut History, target: Target) -> Self {
        Self {
            document,
            history,
            target,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn get(&self) -> Option<&Section> {
        self.target.idx().and_then(|idx| self.document.section(idx))
    }

    pub fn update(&mut self, f: impl FnOnce(&Section) -> Section) -> &mut Self {
        let Some(idx) = self.target.idx() else {
            return self;
        };
        let Some(slot) = self.document.slot_mut(idx) else {
            return self;
        };

        let next = f(slot.get());
        if next == *slot.get() {
            return self;
        }

        self.history.record(idx, slot.get(), &next);
        slot.set(next);
        self
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.update(|s| s.with_text(text))
    }

    pub fn delete_text(&mut self, range: DeleteRange) -> &mut Self {
        self.update(|s| s.with_deleted(range))
    }

    pub fn toggle_paragraph(&mut self) -> &mut Self {
        self.update(|s| s.with_end_paragraph(!s.end_paragraph))
    }

    pub fn enable_end_paragraph(&mut self) -> &mut Self {
        self.update(|s| s.with_end_paragraph(true))
    }

    pub fn disable_end_paragraph(&mut self) -> &mut Self {
        self.update(|s| s.with_end_paragraph(false))
    }

    pub fn enable_start_paragraph(&mut self) -> &mut Self {
        self.update(|s| s.with_start_paragraph(true))
    }

    pub fn disable_start_paragraph(&mut self) -> &mut Self {
        self.update(|s| s.with_start_paragraph(false))
    }

    pub fn apply_patch(&mut self, patch: &SectionPatch) -> &mut Self {
        self.update(|s| s.with_patch(patch))
    }
}
