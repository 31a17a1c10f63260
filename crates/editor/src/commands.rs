//! Caret-driven editing commands.
//!
//! Input handlers translate key presses into these calls with the caret's
//! section and character offset. Each command applies its mutations through
//! the editor and returns where the caret should go next, or `None` when the
//! handler should let the default behaviour happen.

use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::section::DeleteRange;
use crate::types::SelectionTarget;

fn display_len(editor: &Editor, idx: usize) -> Result<usize> {
    editor
        .document()
        .section(idx)
        .map(|s| s.display_text().chars().count())
        .ok_or(Error::MissingSection(idx))
}

/// Backspace. At the start of a section the paragraph break before it is
/// removed and the caret joins the previous section.
pub fn delete_previous_character(
    editor: &mut Editor,
    idx: usize,
    offset: usize,
) -> Result<Option<SelectionTarget>> {
    if offset > 0 {
        return Ok(None);
    }

    editor.section(idx)?.disable_start_paragraph();
    Ok(idx.checked_sub(1).map(SelectionTarget::SectionEnd))
}

/// Word-wise backspace.
pub fn delete_previous_word(
    editor: &mut Editor,
    idx: usize,
    offset: usize,
) -> Result<Option<SelectionTarget>> {
    if offset > 0 {
        editor.section(idx)?.delete_text(DeleteRange::before(offset));
        return Ok(Some(SelectionTarget::SectionStart(idx)));
    }

    let Some(previous) = idx.checked_sub(1) else {
        return Ok(None);
    };

    editor.section(idx)?.disable_start_paragraph();
    editor.section(previous)?.set_text("");
    Ok(Some(SelectionTarget::SectionStart(previous)))
}

/// Forward delete. At the end of a section the paragraph break after it is
/// removed and the caret joins the next section.
pub fn delete_next_character(
    editor: &mut Editor,
    idx: usize,
    offset: usize,
) -> Result<Option<SelectionTarget>> {
    if offset < display_len(editor, idx)? {
        return Ok(None);
    }

    editor.section(idx)?.disable_end_paragraph();
    let next = idx + 1;
    Ok((next < editor.document().len()).then_some(SelectionTarget::SectionStart(next)))
}

/// Word-wise forward delete.
pub fn delete_next_word(
    editor: &mut Editor,
    idx: usize,
    offset: usize,
) -> Result<Option<SelectionTarget>> {
    if offset < display_len(editor, idx)? {
        editor.section(idx)?.delete_text(DeleteRange::after(offset));
        return Ok(Some(SelectionTarget::SectionEnd(idx)));
    }

    let next = idx + 1;
    if next >= editor.document().len() {
        return Ok(None);
    }

    editor.section(next)?.set_text("");
    editor.section(idx)?.disable_end_paragraph();
    Ok(Some(SelectionTarget::SectionEnd(next)))
}

/// Enter. Breaks the paragraph before the section when the caret is at its
/// start, after it otherwise.
pub fn new_line(editor: &mut Editor, idx: usize, offset: usize) -> Result<()> {
    let mut section = editor.section(idx)?;
    if offset == 0 {
        section.enable_start_paragraph();
    } else {
        section.enable_end_paragraph();
    }
    Ok(())
}
