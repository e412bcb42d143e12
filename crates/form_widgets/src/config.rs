//! Uploader configuration and the accept-pattern mini-language.

use std::fmt;

use serde::{Deserialize, Serialize};

const DEFAULT_ACCEPT: &str = "image/*,video/*,audio/*,.pdf,.doc,.docx,.txt";
const DOCUMENT_EXTENSIONS: &str = ".pdf,.doc,.docx,.odt,.rtf,.txt,.csv,.xls,.xlsx,.ppt,.pptx";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Host-supplied uploader configuration. Every field has a default so partial JSON is accepted.
pub struct UploaderConfig {
    /// Maximum number of selectable files (remote plus local).
    pub max_files: usize,
    /// Per-file size limit in megabytes. `0` disables the check.
    pub max_size_mb: u64,
    /// Accepted MIME types and extensions.
    pub accept: AcceptPattern,
    /// Restricts the widget to one file and makes each add replace the previous selection.
    pub single_file: bool,
    /// Starts the progress simulator as soon as valid files are added.
    pub auto_upload: bool,
    /// Renders per-file progress bars.
    pub show_progress: bool,
    /// Renders image thumbnails.
    pub show_preview: bool,
    /// Renders remove buttons.
    pub allow_remove: bool,
    /// Form field name used for confirmed-removal markers.
    pub removed_field_name: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            max_files: 10,
            max_size_mb: 10,
            accept: AcceptPattern::parse(DEFAULT_ACCEPT),
            single_file: false,
            auto_upload: true,
            show_progress: true,
            show_preview: true,
            allow_remove: true,
            removed_field_name: "removed_files".to_string(),
        }
    }
}

impl UploaderConfig {
    /// File cap after applying single-file mode.
    pub fn effective_max_files(&self) -> usize {
        if self.single_file {
            self.max_files.min(1)
        } else {
            self.max_files
        }
    }

    /// Size limit in bytes, or `None` when unlimited.
    pub fn max_size_bytes(&self) -> Option<u64> {
        (self.max_size_mb > 0).then(|| self.max_size_mb.saturating_mul(1024 * 1024))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Coarse file categories hosts can accept without writing a pattern.
pub enum AcceptCategory {
    /// `image/*`
    Image,
    /// `video/*`
    Video,
    /// `audio/*`
    Audio,
    /// Office and text documents by extension.
    Document,
}

impl AcceptCategory {
    fn pattern(self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Video => "video/*",
            Self::Audio => "audio/*",
            Self::Document => DOCUMENT_EXTENSIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One comma-separated entry of an accept pattern.
pub enum AcceptRule {
    /// `*` or `*/*`.
    Any,
    /// `type/*`, stored as the lowercase `type/` prefix.
    MimePrefix(String),
    /// `type/subtype`, stored lowercase.
    Mime(String),
    /// `.ext`, stored lowercase with the leading dot.
    Extension(String),
}

impl AcceptRule {
    fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim().to_ascii_lowercase();
        if entry.is_empty() {
            return None;
        }
        if entry == "*" || entry == "*/*" {
            return Some(Self::Any);
        }
        if entry.starts_with('.') {
            return Some(Self::Extension(entry));
        }
        if let Some(prefix) = entry.strip_suffix('*') {
            return Some(Self::MimePrefix(prefix.to_string()));
        }
        if entry.contains('/') {
            return Some(Self::Mime(entry));
        }
        // Bare words like `pdf` are treated as extensions.
        Some(Self::Extension(format!(".{entry}")))
    }

    fn matches(&self, lower_name: &str, lower_mime: &str) -> bool {
        match self {
            Self::Any => true,
            Self::MimePrefix(prefix) => lower_mime.starts_with(prefix.as_str()),
            Self::Mime(mime) => lower_mime == mime,
            Self::Extension(ext) => lower_name.ends_with(ext.as_str()),
        }
    }

    fn source(&self) -> String {
        match self {
            Self::Any => "*/*".to_string(),
            Self::MimePrefix(prefix) => format!("{prefix}*"),
            Self::Mime(mime) | Self::Extension(mime) => mime.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Parsed accept pattern, e.g. `image/*,application/pdf,.docx`.
///
/// An empty pattern accepts every file.
pub struct AcceptPattern {
    rules: Vec<AcceptRule>,
}

impl AcceptPattern {
    /// Parses a comma-separated pattern. Blank entries are skipped.
    pub fn parse(raw: &str) -> Self {
        Self {
            rules: raw.split(',').filter_map(AcceptRule::parse).collect(),
        }
    }

    /// Builds a pattern accepting the union of `categories`.
    pub fn from_categories(categories: &[AcceptCategory]) -> Self {
        let joined = categories
            .iter()
            .map(|category| category.pattern())
            .collect::<Vec<_>>()
            .join(",");
        Self::parse(&joined)
    }

    /// Parsed rules in source order.
    pub fn rules(&self) -> &[AcceptRule] {
        &self.rules
    }

    /// Whether a file with this name and MIME type is accepted.
    pub fn accepts(&self, file_name: &str, mime_type: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let lower_name = file_name.to_ascii_lowercase();
        let lower_mime = mime_type.trim().to_ascii_lowercase();
        self.rules
            .iter()
            .any(|rule| rule.matches(&lower_name, &lower_mime))
    }

    /// Value for an `<input type="file" accept=...>` attribute.
    pub fn as_attribute(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AcceptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .rules
            .iter()
            .map(AcceptRule::source)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&rendered)
    }
}

impl From<String> for AcceptPattern {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for AcceptPattern {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<AcceptPattern> for String {
    fn from(pattern: AcceptPattern) -> Self {
        pattern.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wildcard_mime_matches_by_prefix() {
        let pattern = AcceptPattern::parse("image/*");
        assert!(pattern.accepts("photo.png", "image/png"));
        assert!(pattern.accepts("photo", "IMAGE/WEBP"));
        assert!(!pattern.accepts("clip.mp4", "video/mp4"));
        assert!(!pattern.accepts("photo.png", ""));
    }

    #[test]
    fn extensions_match_case_insensitively_without_mime() {
        let pattern = AcceptPattern::parse(" .PDF , .docx");
        assert!(pattern.accepts("Report.pdf", ""));
        assert!(pattern.accepts("NOTES.DOCX", "application/octet-stream"));
        assert!(!pattern.accepts("notes.doc", "application/msword"));
    }

    #[test]
    fn exact_mime_and_bare_words() {
        let pattern = AcceptPattern::parse("application/json,csv");
        assert!(pattern.accepts("data.bin", "application/json"));
        assert!(!pattern.accepts("data.bin", "application/jsonl"));
        assert!(pattern.accepts("table.CSV", "text/plain"));
    }

    #[test]
    fn empty_and_any_patterns_accept_everything() {
        assert!(AcceptPattern::parse("").accepts("x.exe", "application/x-msdownload"));
        assert!(AcceptPattern::parse(" , ").accepts("x", ""));
        assert!(AcceptPattern::parse("*/*").accepts("x", ""));
    }

    #[test]
    fn categories_expand_to_patterns() {
        let pattern = AcceptPattern::from_categories(&[AcceptCategory::Image, AcceptCategory::Document]);
        assert!(pattern.accepts("a.jpg", "image/jpeg"));
        assert!(pattern.accepts("a.xlsx", ""));
        assert!(!pattern.accepts("a.mp3", "audio/mpeg"));
    }

    #[test]
    fn pattern_renders_back_to_attribute_form() {
        let pattern = AcceptPattern::parse("Image/*, .PDF,text/plain");
        assert_eq!(pattern.as_attribute(), "image/*,.pdf,text/plain");
    }

    #[test]
    fn config_deserializes_partial_json_with_defaults() {
        let config: UploaderConfig =
            serde_json::from_str(r#"{"max_files": 2, "accept": "image/*,.pdf", "single_file": true}"#)
                .expect("config json");
        assert_eq!(config.max_files, 2);
        assert!(config.single_file);
        assert_eq!(config.effective_max_files(), 1);
        assert_eq!(config.max_size_mb, 10);
        assert!(config.auto_upload);
        assert_eq!(config.accept.as_attribute(), "image/*,.pdf");
        assert_eq!(config.removed_field_name, "removed_files");
    }

    #[test]
    fn zero_size_limit_means_unlimited() {
        let config = UploaderConfig {
            max_size_mb: 0,
            ..UploaderConfig::default()
        };
        assert_eq!(config.max_size_bytes(), None);
        assert_eq!(UploaderConfig::default().max_size_bytes(), Some(10 * 1024 * 1024));
    }
}
