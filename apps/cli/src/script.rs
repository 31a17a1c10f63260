use lexoral_editor::{
    DeleteRange, Editor, SectionMutator, SectionPatch, SectionSelection, commands,
};

/// One step of a scripted editing session.
///
/// Section-scoped actions fall back to the section under the selection
/// focus when `section` is omitted.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Collapsed caret at `offset`; no `section` clears the selection.
    Select {
        section: Option<usize>,
        #[serde(default)]
        offset: usize,
    },
    SetText {
        section: Option<usize>,
        text: String,
    },
    DeleteText {
        section: Option<usize>,
        #[serde(flatten)]
        range: DeleteRange,
    },
    ToggleParagraph {
        section: Option<usize>,
    },
    NewLine {
        section: usize,
        #[serde(default)]
        offset: usize,
    },
    ApplyPatch {
        section: Option<usize>,
        patch: SectionPatch,
    },
    Commit,
    Undo,
    Redo,
    Clear,
}

pub fn parse(json: &str) -> anyhow::Result<Vec<Action>> {
    Ok(serde_json::from_str(json)?)
}

fn handle(
    editor: &mut Editor,
    section: Option<usize>,
) -> lexoral_editor::Result<SectionMutator<'_>> {
    match section {
        Some(idx) => editor.section(idx),
        None => Ok(editor.current()),
    }
}

pub fn apply(editor: &mut Editor, action: &Action) -> anyhow::Result<()> {
    match action {
        Action::Select { section, offset } => {
            editor.set_selection(section.map(|idx| SectionSelection::collapsed(idx, *offset)));
        }
        Action::SetText { section, text } => {
            handle(editor, *section)?.set_text(text);
        }
        Action::DeleteText { section, range } => {
            handle(editor, *section)?.delete_text(*range);
        }
        Action::ToggleParagraph { section } => {
            handle(editor, *section)?.toggle_paragraph();
        }
        Action::NewLine { section, offset } => {
            commands::new_line(editor, *section, *offset)?;
        }
        Action::ApplyPatch { section, patch } => {
            handle(editor, *section)?.apply_patch(patch);
        }
        Action::Commit => editor.commit_history(),
        Action::Undo => {
            if let Some(target) = editor.undo() {
                editor.restore_selection(target);
            }
        }
        Action::Redo => {
            if let Some(target) = editor.redo() {
                editor.restore_selection(target);
            }
        }
        Action::Clear => editor.clear_history(),
    }
    Ok(())
}

pub fn run(editor: &mut Editor, actions: &[Action]) -> anyhow::Result<()> {
    for (i, action) in actions.iter().enumerate() {
        tracing::debug!(step = i, ?action, "script_action");
        apply(editor, action).map_err(|e| e.context(format!("script action {i} failed")))?;
    }
    editor.commit_history();

    tracing::info!(
        actions = actions.len(),
        steps = editor.history().len(),
        "script_applied"
    );
    Ok(())
}
