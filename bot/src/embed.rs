//! Rich-message rendering. The upstream chat platform has no native embed
//! object, so an embed is a title, a color cue and named fields rendered to
//! one HTML message.

/// Color cue for an embed, shown as a leading emoji marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
    Neutral,
    Info,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Gain => "🟢",
            Tone::Loss => "🔴",
            Tone::Neutral => "⚪",
            Tone::Info => "🔵",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Embed {
    title: String,
    tone: Tone,
    fields: Vec<(String, String)>,
}

impl Embed {
    pub fn new(title: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            tone,
            fields: Vec::new(),
        }
    }

    /// Adds a named text field. Both parts are HTML-escaped at render time.
    pub fn field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn to_html(&self) -> String {
        let mut text = format!(
            "{} <b>{}</b>\n",
            self.tone.marker(),
            escape_html(&self.title)
        );
        for (name, value) in &self.fields {
            text.push_str(&format!(
                "\n<b>{}</b>\n{}\n",
                escape_html(name),
                escape_html(value)
            ));
        }
        text
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
