use crate::document::Document;
use crate::section::Section;

/// One section as a renderer sees it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct SectionFrame {
    pub idx: usize,
    /// Display text: the edited text, or the placeholder.
    pub text: String,
    pub edited: bool,
    pub completion_options: Vec<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub start_paragraph: bool,
    pub end_paragraph: bool,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct ParagraphFrame {
    pub sections: Vec<SectionFrame>,
}

/// Complete snapshot of the document at a point in time.
///
/// This is the rendering contract: everything a UI layer needs to draw the
/// transcript, whether that is the CLI, the web frontend or a test
/// assertion. Produced by [`crate::Editor::frame`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct DocumentFrame {
    pub paragraphs: Vec<ParagraphFrame>,
}

impl From<&Section> for SectionFrame {
    fn from(section: &Section) -> Self {
        Self {
            idx: section.idx,
            text: section.display_text().to_string(),
            edited: section.edited,
            completion_options: section.completion_options.clone(),
            start_time: section.start_time,
            end_time: section.end_time,
            start_paragraph: section.start_paragraph,
            end_paragraph: section.end_paragraph,
        }
    }
}

impl From<&Document> for DocumentFrame {
    fn from(document: &Document) -> Self {
        let paragraphs = document
            .paragraphs()
            .iter()
            .map(|paragraph| ParagraphFrame {
                sections: paragraph
                    .sections()
                    .iter()
                    .filter_map(|idx| document.section(*idx))
                    .map(SectionFrame::from)
                    .collect(),
            })
            .collect();

        Self { paragraphs }
    }
}

impl DocumentFrame {
    pub fn sections(&self) -> impl Iterator<Item = &SectionFrame> {
        self.paragraphs.iter().flat_map(|p| p.sections.iter())
    }

    /// Section texts joined by spaces, paragraphs separated by a blank line.
    /// Emptied sections leave no gap.
    pub fn plain_text(&self) -> String {
        self.paragraph_texts().join("\n\n")
    }

    /// Like [`DocumentFrame::plain_text`], with each paragraph greedily
    /// wrapped at `width` columns. Words longer than `width` get a line of
    /// their own.
    pub fn wrapped(&self, width: usize) -> String {
        self.paragraph_texts()
            .iter()
            .map(|text| wrap(text, width))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(|p| {
                p.sections
                    .iter()
                    .map(|s| s.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
