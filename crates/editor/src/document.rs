use crate::error::{Error, Result};
use crate::observable::{Observable, SubscriptionId};
use crate::section::Section;
use crate::types::{RawSection, Timing};

/// Ordered section indices that render as one paragraph.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub struct Paragraph {
    sections: Vec<usize>,
}

impl Paragraph {
    fn starting_at(idx: usize) -> Self {
        Self { sections: vec![idx] }
    }

    fn append(&mut self, idx: usize) {
        self.sections.push(idx);
    }

    pub fn sections(&self) -> &[usize] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Canonical store of every section plus their grouping into paragraphs.
///
/// Paragraph grouping is computed once per load. Flipping a section's
/// paragraph flags afterwards does not regroup; observers that care about
/// the new layout derive it from the flags themselves.
#[derive(Debug, Default)]
pub struct Document {
    sections: Vec<Observable<Section>>,
    paragraphs: Observable<Vec<Paragraph>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole document with `output`.
    ///
    /// Nothing is replaced if any entry is invalid. Listeners of the old
    /// sections are dropped with them; paragraph listeners are kept and
    /// notified.
    pub(crate) fn load(&mut self, output: Vec<RawSection>) -> Result<Vec<Timing>> {
        let sections = output
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| Section::from_raw(idx, raw))
            .collect::<Result<Vec<_>>>()?;

        let mut paragraphs: Vec<Paragraph> = Vec::new();
        for section in &sections {
            let current = paragraphs
                .last_mut()
                .filter(|_| !section.start_paragraph);
            if let Some(current) = current {
                current.append(section.idx);
            } else {
                paragraphs.push(Paragraph::starting_at(section.idx));
            }
        }

        let timings = sections.iter().map(Section::timing).collect();

        tracing::debug!(
            sections = sections.len(),
            paragraphs = paragraphs.len(),
            "document_loaded"
        );

        self.sections = sections.into_iter().map(Observable::new).collect();
        self.paragraphs.set(paragraphs);

        Ok(timings)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, idx: usize) -> Option<&Section> {
        self.sections.get(idx).map(Observable::get)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().map(Observable::get)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        self.paragraphs.get()
    }

    /// End time of the last section, or zero for an empty document.
    pub fn audio_length(&self) -> f64 {
        self.sections().last().map_or(0.0, |s| s.end_time)
    }

    pub(crate) fn slot_mut(&mut self, idx: usize) -> Option<&mut Observable<Section>> {
        self.sections.get_mut(idx)
    }

    pub fn subscribe_section(
        &mut self,
        idx: usize,
        listener: impl FnMut(&Section) + Send + 'static,
    ) -> Result<SubscriptionId> {
        let slot = self.slot_mut(idx).ok_or(Error::MissingSection(idx))?;
        Ok(slot.subscribe(listener))
    }

    pub fn unsubscribe_section(&mut self, idx: usize, id: SubscriptionId) -> bool {
        self.slot_mut(idx)
            .is_some_and(|slot| slot.unsubscribe(id))
    }

    pub fn subscribe_paragraphs(
        &mut self,
        listener: impl FnMut(&Vec<Paragraph>) + Send + 'static,
    ) -> SubscriptionId {
        self.paragraphs.subscribe(listener)
    }

    pub fn unsubscribe_paragraphs(&mut self, id: SubscriptionId) -> bool {
        self.paragraphs.unsubscribe(id)
    }
}
