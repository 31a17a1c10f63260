use std::collections::BTreeMap;

use crate::config::EditorConfig;
use crate::document::{Document, Paragraph};
use crate::error::{Error, Result};
use crate::history::{History, Replay};
use crate::mutator::{SectionMutator, Target};
use crate::observable::SubscriptionId;
use crate::section::Section;
use crate::types::{RawSection, SectionPatch, SectionSelection, SelectionTarget, Timing};
use crate::view::DocumentFrame;

/// Context object tying the document, its history and the current selection
/// together.
///
/// All writes go through [`SectionMutator`] handles obtained from here, so the
/// history sees every change exactly once.
///
/// Undo and redo are two-phase: they write the restored sections and return
/// a [`SelectionTarget`]. Once observers have rendered the restored state,
/// pass the target to [`Editor::restore_selection`].
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    document: Document,
    history: History,
    selection: Option<SectionSelection>,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            config,
            document: Document::new(),
            selection: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<&SectionSelection> {
        self.selection.as_ref()
    }

    /// Replaces the document, history and selection with a fresh load.
    pub fn initialise(&mut self, output: Vec<RawSection>) -> Result<Vec<Timing>> {
        let timings = self.document.load(output)?;
        self.history.clear();
        self.selection = None;
        Ok(timings)
    }

    pub fn initialise_json(&mut self, json: &str) -> Result<Vec<Timing>> {
        let output: Vec<RawSection> = serde_json::from_str(json)?;
        self.initialise(output)
    }

    /// Loads `output` and applies the remotely stored patches on top.
    ///
    /// Patched state is the starting point of the session, so it is not
    /// undoable.
    pub fn load_with_patches(
        &mut self,
        output: Vec<RawSection>,
        patches: &BTreeMap<usize, SectionPatch>,
    ) -> Result<Vec<Timing>> {
        let timings = self.initialise(output)?;

        for (idx, patch) in patches {
            match self.of_idx(*idx) {
                Some(mut mutator) => {
                    mutator.apply_patch(patch);
                }
                None => tracing::warn!(idx, "patch_for_unknown_section"),
            }
        }

        self.history.clear();
        Ok(timings)
    }

    /// Patches for every section that differs from its loaded state.
    pub fn patches(&self) -> BTreeMap<usize, SectionPatch> {
        self.document
            .sections()
            .filter_map(|s| s.patch().map(|patch| (s.idx, patch)))
            .collect()
    }

    /// Handle on a section that must exist.
    pub fn section(&mut self, idx: usize) -> Result<SectionMutator<'_>> {
        if self.document.section(idx).is_none() {
            return Err(Error::MissingSection(idx));
        }
        Ok(SectionMutator::new(
            &mut self.document,
            &mut self.history,
            Target::Present(idx),
        ))
    }

    pub fn of_idx(&mut self, idx: usize) -> Option<SectionMutator<'_>> {
        self.section(idx).ok()
    }

    /// Handle on the section under the selection focus.
    pub fn current(&mut self) -> SectionMutator<'_> {
        let target = Target::Current(self.selection.map(|s| s.focus.section));
        SectionMutator::new(&mut self.document, &mut self.history, target)
    }

    /// Feeds the latest selection. Moving the anchor or focus to another
    /// section closes the pending history step.
    pub fn set_selection(&mut self, selection: Option<SectionSelection>) {
        let sections = |s: Option<&SectionSelection>| s.map(|s| (s.anchor.section, s.focus.section));
        let moved = sections(self.selection.as_ref()) != sections(selection.as_ref());

        self.selection = selection;
        if moved {
            self.commit_history();
        }
    }

    pub fn commit_history(&mut self) {
        self.history.commit(self.selection.as_ref());
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn undo(&mut self) -> Option<SelectionTarget> {
        let replay = self.history.undo(self.selection.as_ref())?;
        self.apply(replay)
    }

    pub fn redo(&mut self) -> Option<SelectionTarget> {
        let replay = self.history.redo(self.selection.as_ref())?;
        self.apply(replay)
    }

    // Restored states bypass the mutator so they never reach the history.
    fn apply(&mut self, replay: Replay) -> Option<SelectionTarget> {
        for (idx, section) in replay.sections {
            if let Some(slot) = self.document.slot_mut(idx) {
                slot.set(section);
            }
        }
        replay.selection
    }

    pub fn resolve_target(&self, target: &SelectionTarget) -> Option<SectionSelection> {
        match target {
            SelectionTarget::SectionStart(idx) => self
                .document
                .section(*idx)
                .map(|_| SectionSelection::collapsed(*idx, 0)),
            SelectionTarget::SectionEnd(idx) => self
                .document
                .section(*idx)
                .map(|s| SectionSelection::collapsed(*idx, s.display_text().chars().count())),
            SelectionTarget::Exactly(selection) => *selection,
        }
    }

    /// Second phase of undo/redo and of the editing commands.
    pub fn restore_selection(&mut self, target: SelectionTarget) {
        let selection = self.resolve_target(&target);
        self.set_selection(selection);
    }

    pub fn frame(&self) -> DocumentFrame {
        DocumentFrame::from(&self.document)
    }

    pub fn subscribe_section(
        &mut self,
        idx: usize,
        listener: impl FnMut(&Section) + Send + 'static,
    ) -> Result<SubscriptionId> {
        self.document.subscribe_section(idx, listener)
    }

    pub fn unsubscribe_section(&mut self, idx: usize, id: SubscriptionId) -> bool {
        self.document.unsubscribe_section(idx, id)
    }

    pub fn subscribe_document(
        &mut self,
        listener: impl FnMut(&Vec<Paragraph>) + Send + 'static,
    ) -> SubscriptionId {
        self.document.subscribe_paragraphs(listener)
    }

    pub fn unsubscribe_document(&mut self, id: SubscriptionId) -> bool {
        self.document.unsubscribe_paragraphs(id)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::DeleteRange;
    use serde_json::json;
    use tracing_test::traced_test;

    fn editor(texts: &[&str]) -> Editor {
        let output: Vec<serde_json::Value> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                json!({
                    "startTime": i as f64,
                    "endTime": i as f64 + 0.5,
                    "options": [{"text": t, "confidence": 0.9}],
                    "startParagraph": false,
                })
            })
            .collect();

        let mut editor = Editor::new();
        editor
            .initialise_json(&serde_json::to_string(&output).unwrap())
            .unwrap();
        editor
    }

    fn at(section: usize) -> Option<SectionSelection> {
        Some(SectionSelection::collapsed(section, 0))
    }

    fn text(editor: &Editor, idx: usize) -> &str {
        editor.document().section(idx).unwrap().display_text()
    }

    #[test]
    fn section_handle_fails_fast_on_unknown_index() {
        let mut editor = editor(&["a"]);
        assert!(matches!(editor.section(3), Err(Error::MissingSection(3))));
        assert!(editor.of_idx(3).is_none());
        assert!(editor.of_idx(0).is_some());
    }

    #[test]
    fn current_follows_selection_focus() {
        let mut editor = editor(&["a", "b"]);
        editor.current().set_text("ignored");
        assert!(editor.history().pending().is_empty());

        editor.set_selection(Some(SectionSelection::range(
            crate::types::SelectionPoint {
                section: 0,
                offset: 0,
            },
            crate::types::SelectionPoint {
                section: 1,
                offset: 1,
            },
        )));
        editor.current().set_text("B");
        assert_eq!(text(&editor, 1), "B");
        assert_eq!(text(&editor, 0), "a");
    }

    #[test]
    fn offset_only_moves_do_not_commit() {
        let mut editor = editor(&["cat"]);
        editor.set_selection(at(0));
        editor.section(0).unwrap().set_text("bat");
        editor.set_selection(Some(SectionSelection::collapsed(0, 3)));

        assert!(editor.history().is_empty());
        assert_eq!(editor.history().pending().len(), 1);
    }

    #[test]
    fn clearing_the_selection_commits() {
        let mut editor = editor(&["cat"]);
        editor.set_selection(at(0));
        editor.section(0).unwrap().set_text("bat");
        editor.set_selection(None);

        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.history().steps()[0].selection, None);
    }

    #[test]
    fn undo_restores_and_targets_section_start() {
        let mut editor = editor(&["cat", "sat"]);
        editor.set_selection(at(1));
        editor
            .section(1)
            .unwrap()
            .delete_text(DeleteRange::new(0, 1));
        assert_eq!(text(&editor, 1), "at");

        let target = editor.undo().unwrap();
        assert_eq!(target, SelectionTarget::SectionStart(1));
        assert_eq!(text(&editor, 1), "sat");
        assert!(!editor.document().section(1).unwrap().edited);

        editor.restore_selection(target);
        assert_eq!(editor.selection(), at(1).as_ref());
        assert!(editor.history().pending().is_empty());
    }

    #[test]
    fn restores_are_not_recorded() {
        let mut editor = editor(&["cat"]);
        editor.set_selection(at(0));
        editor.section(0).unwrap().set_text("bat");
        editor.commit_history();

        editor.undo();
        assert!(editor.history().pending().is_empty());
        editor.redo();
        assert!(editor.history().pending().is_empty());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn section_end_resolves_to_display_length() {
        let editor = editor(&["héllo"]);
        assert_eq!(
            editor.resolve_target(&SelectionTarget::SectionEnd(0)),
            Some(SectionSelection::collapsed(0, 5))
        );
        assert_eq!(editor.resolve_target(&SelectionTarget::SectionStart(9)), None);
    }

    #[test]
    fn initialise_resets_history_and_selection() {
        let mut editor = editor(&["cat"]);
        editor.set_selection(at(0));
        editor.section(0).unwrap().set_text("bat");
        editor.commit_history();

        editor
            .initialise_json(
                r#"[{"startTime":0,"endTime":1,"options":[{"text":"new","confidence":1}]}]"#,
            )
            .unwrap();

        assert!(editor.history().is_empty());
        assert!(editor.selection().is_none());
        assert_eq!(text(&editor, 0), "new");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut editor = Editor::new();
        assert!(matches!(
            editor.initialise_json("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn patches_round_trip_through_load() {
        let mut editor = editor(&["cat", "sat", "mat"]);
        editor.section(0).unwrap().set_text("bat");
        editor.section(2).unwrap().enable_end_paragraph();
        let patches = editor.patches();
        assert_eq!(patches.keys().copied().collect::<Vec<_>>(), [0, 2]);

        let output: Vec<RawSection> = editor
            .document()
            .sections()
            .map(|s| RawSection {
                start_time: s.start_time,
                end_time: s.end_time,
                options: s.original_options.clone(),
                start_paragraph: s.loaded_start_paragraph,
            })
            .collect();

        let mut restored = Editor::new();
        restored.load_with_patches(output, &patches).unwrap();

        assert_eq!(text(&restored, 0), "bat");
        assert!(restored.document().section(2).unwrap().end_paragraph);
        assert!(!restored.history().can_undo());
        assert_eq!(restored.patches(), patches);
    }

    #[test]
    fn paragraph_breaks_survive_patch_round_trip() {
        let json = r#"[
            {"startTime": 0, "endTime": 1, "options": [{"text": "one", "confidence": 1}]},
            {"startTime": 1, "endTime": 2, "options": [{"text": "two", "confidence": 1}]},
            {"startTime": 2, "endTime": 3, "options": [{"text": "three", "confidence": 1}], "startParagraph": true}
        ]"#;
        let mut editor = Editor::new();
        editor.initialise_json(json).unwrap();

        crate::commands::new_line(&mut editor, 1, 0).unwrap();
        crate::commands::delete_previous_character(&mut editor, 2, 0).unwrap();

        let patches = editor.patches();
        assert_eq!(patches[&1].start_paragraph, Some(true));
        assert_eq!(patches[&2].start_paragraph, Some(false));
        assert_eq!(patches[&1].text, None);

        let output: Vec<RawSection> = serde_json::from_str(json).unwrap();
        let mut restored = Editor::new();
        restored.load_with_patches(output, &patches).unwrap();

        assert!(restored.document().section(1).unwrap().start_paragraph);
        assert!(!restored.document().section(2).unwrap().start_paragraph);
        assert_eq!(restored.patches(), patches);
    }

    #[traced_test]
    #[test]
    fn unknown_patch_index_is_logged_and_skipped() {
        let mut editor = Editor::new();
        let mut patches = BTreeMap::new();
        patches.insert(
            4,
            SectionPatch {
                text: Some("x".into()),
                ..Default::default()
            },
        );

        editor.load_with_patches(vec![], &patches).unwrap();
        assert!(logs_contain("patch_for_unknown_section"));
    }

    #[test]
    fn history_limit_comes_from_config() {
        let mut editor = Editor::with_config(EditorConfig {
            history_limit: Some(1),
            ..Default::default()
        });
        editor
            .initialise_json(
                r#"[{"startTime":0,"endTime":1,"options":[{"text":"a","confidence":1}]},
                    {"startTime":1,"endTime":2,"options":[{"text":"b","confidence":1}]}]"#,
            )
            .unwrap();

        editor.set_selection(at(0));
        editor.section(0).unwrap().set_text("x");
        editor.set_selection(at(1));
        editor.section(1).unwrap().set_text("y");
        editor.set_selection(at(0));

        assert_eq!(editor.history().len(), 1);
        editor.undo();
        assert!(editor.undo().is_none());
        assert_eq!(text(&editor, 0), "x");
    }
}
