use std::sync::{Arc, Mutex};

use editor::{DeleteRange, Editor, SectionSelection, SelectionTarget, commands};

const SHORT: &str = include_str!("data/short.json");

fn load() -> Editor {
    let mut editor = Editor::new();
    editor.initialise_json(SHORT).unwrap();
    editor
}

fn at(section: usize) -> Option<SectionSelection> {
    Some(SectionSelection::collapsed(section, 0))
}

fn text(editor: &Editor, idx: usize) -> String {
    editor
        .document()
        .section(idx)
        .unwrap()
        .display_text()
        .to_string()
}

fn undo(editor: &mut Editor) -> bool {
    match editor.undo() {
        Some(target) => {
            editor.restore_selection(target);
            true
        }
        None => false,
    }
}

fn redo(editor: &mut Editor) -> bool {
    match editor.redo() {
        Some(target) => {
            editor.restore_selection(target);
            true
        }
        None => false,
    }
}

#[test]
fn load_builds_paragraphs_and_timings() {
    let mut editor = Editor::new();
    let timings = editor.initialise_json(SHORT).unwrap();

    assert_eq!(timings.len(), 5);
    assert_eq!(timings[3].start_time, 2.1);
    assert_eq!(editor.document().paragraphs().len(), 2);
    assert_eq!(editor.document().paragraphs()[0].sections(), [0, 1, 2]);
    assert_eq!(editor.frame().plain_text(), "cat sat mat\n\nLater on");
    assert_eq!(editor.document().audio_length(), 3.0);
}

#[test]
fn untouched_sections_offer_options_in_source_order() {
    let editor = load();
    let section = editor.document().section(2).unwrap();
    assert_eq!(section.completion_options, ["mat", "matt", "map"]);
    assert_eq!(section.placeholder, "mat");
}

#[test]
fn typing_reranks_completions() {
    let mut editor = load();
    editor.section(2).unwrap().set_text("mat");
    let section = editor.document().section(2).unwrap();
    assert_eq!(section.completion_options[..2], ["mat", "matt"]);
}

#[test]
fn same_anchor_edits_coalesce_into_one_step() {
    let mut editor = load();
    editor.set_selection(at(0));
    editor.section(0).unwrap().set_text("bat");
    editor.set_selection(Some(SectionSelection::collapsed(0, 3)));
    editor.section(0).unwrap().set_text("bat ");
    editor.commit_history();

    assert_eq!(editor.history().len(), 1);
    let change = &editor.history().steps()[0].sections[&0];
    assert_eq!(change.from.display_text(), "cat");
    assert_eq!(change.to.text, "bat ");

    assert!(undo(&mut editor));
    assert_eq!(text(&editor, 0), "cat");
    assert!(!editor.document().section(0).unwrap().edited);
}

#[test]
fn moving_focus_starts_a_new_step() {
    let mut editor = load();
    editor.set_selection(at(0));
    editor.section(0).unwrap().set_text("bat");
    editor.set_selection(at(1));
    editor.section(1).unwrap().set_text("set");
    editor.commit_history();

    assert_eq!(editor.history().len(), 2);

    assert!(undo(&mut editor));
    assert_eq!(text(&editor, 1), "sat");
    assert_eq!(text(&editor, 0), "bat");
    // Back where the second step started.
    assert_eq!(editor.selection(), at(1).as_ref());

    assert!(undo(&mut editor));
    assert_eq!(text(&editor, 0), "cat");
    assert_eq!(editor.selection(), at(0).as_ref());

    assert!(!undo(&mut editor));
}

#[test]
fn round_trip_restores_exact_states() {
    let mut editor = load();
    editor.set_selection(at(2));
    editor
        .section(2)
        .unwrap()
        .delete_text(DeleteRange::new(1, 2))
        .enable_end_paragraph();
    editor.section(3).unwrap().set_text("later");
    let after: Vec<_> = editor.document().sections().cloned().collect();
    editor.commit_history();

    let before: Vec<_> = {
        let mut fresh = Editor::new();
        fresh.initialise_json(SHORT).unwrap();
        fresh.document().sections().cloned().collect()
    };

    assert!(undo(&mut editor));
    let undone: Vec<_> = editor.document().sections().cloned().collect();
    assert_eq!(undone, before);

    assert!(redo(&mut editor));
    let redone: Vec<_> = editor.document().sections().cloned().collect();
    assert_eq!(redone, after);
}

#[test]
fn repeated_equal_edit_adds_nothing() {
    let mut editor = load();
    editor.set_selection(at(1));
    editor.section(1).unwrap().set_text("set");
    editor.set_selection(at(2));
    assert_eq!(editor.history().len(), 1);

    editor.set_selection(at(1));
    let before = editor.document().section(1).unwrap().clone();
    editor.section(1).unwrap().set_text("set");
    editor.set_selection(at(2));

    assert_eq!(editor.document().section(1).unwrap(), &before);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn new_edit_after_undo_discards_redo() {
    let mut editor = load();
    editor.set_selection(at(0));
    editor.section(0).unwrap().set_text("bat");
    editor.commit_history();

    assert!(undo(&mut editor));
    editor.section(0).unwrap().set_text("hat");
    editor.commit_history();

    assert!(!redo(&mut editor));
    assert_eq!(text(&editor, 0), "hat");
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn redo_restores_selection_of_the_step() {
    let mut editor = load();
    editor.set_selection(at(0));
    editor.section(0).unwrap().set_text("bat");
    editor.set_selection(at(4));

    let target = editor.undo().unwrap();
    assert_eq!(target, SelectionTarget::SectionStart(0));
    editor.restore_selection(target);

    let target = editor.redo().unwrap();
    assert_eq!(target, SelectionTarget::Exactly(at(4)));
    assert_eq!(text(&editor, 0), "bat");
}

#[test]
fn listeners_see_edits_and_restores() {
    let mut editor = load();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor
        .subscribe_section(1, move |s| sink.lock().unwrap().push(s.display_text().to_string()))
        .unwrap();

    editor.set_selection(at(1));
    editor.section(1).unwrap().set_text("set");
    undo(&mut editor);

    assert_eq!(*seen.lock().unwrap(), ["sat", "set", "sat"]);
}

#[test]
fn commands_are_undoable_as_one_step() {
    let mut editor = load();
    editor.set_selection(Some(SectionSelection::collapsed(3, 0)));

    let target = commands::delete_previous_word(&mut editor, 3, 0)
        .unwrap()
        .unwrap();
    assert_eq!(text(&editor, 2), "");
    assert!(!editor.document().section(3).unwrap().start_paragraph);

    editor.restore_selection(target);
    assert_eq!(editor.history().len(), 1);

    assert!(undo(&mut editor));
    assert_eq!(text(&editor, 2), "mat");
    assert!(editor.document().section(3).unwrap().start_paragraph);
}
