use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lexoral_editor::{DocumentFrame, Editor, EditorConfig, RawSection, SectionPatch};

use crate::script;

pub struct Args {
    pub transcript: PathBuf,
    pub patches: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

#[derive(serde::Serialize)]
struct Output {
    frame: DocumentFrame,
    patches: BTreeMap<usize, SectionPatch>,
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let output: Vec<RawSection> = serde_json::from_str(&read(&args.transcript)?)
        .with_context(|| format!("invalid transcript {}", args.transcript.display()))?;
    let patches: BTreeMap<usize, SectionPatch> = match &args.patches {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("invalid patches {}", path.display()))?,
        None => BTreeMap::new(),
    };

    let mut editor = Editor::with_config(config);
    let timings = editor.load_with_patches(output, &patches)?;
    tracing::info!(
        sections = timings.len(),
        patches = patches.len(),
        audio_length = editor.document().audio_length(),
        "transcript_loaded"
    );

    if let Some(path) = &args.script {
        let actions = script::parse(&read(path)?)
            .with_context(|| format!("invalid script {}", path.display()))?;
        script::run(&mut editor, &actions)?;
    }

    println!("{}", render(&editor, args.json)?);
    Ok(())
}

fn render(editor: &Editor, json: bool) -> anyhow::Result<String> {
    if json {
        let output = Output {
            frame: editor.frame(),
            patches: editor.patches(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let width = editor.config().display.page_width as usize;
    Ok(editor.frame().wrapped(width))
}
