//! Display-layer helpers shared by the explorer and analysis surfaces:
//! entity display variants, label/description hygiene, and deterministic
//! group coloring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How an analysis entity renders. A closed set of variants replaces the
/// old duck-typed "string or object with `facet`" items: each variant
/// carries only the fields relevant to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDisplay {
    /// A bare label (e.g. a data source or concept).
    Plain { label: String },
    /// A named individual, optionally with a role, rendered with initials.
    Person {
        name: String,
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        mentions: usize,
    },
    /// A facet tag (topic/entity category) with its mention count.
    Facet {
        facet: String,
        #[serde(default)]
        mentions: usize,
    },
}

impl EntityDisplay {
    pub fn display_name(&self) -> &str {
        match self {
            EntityDisplay::Plain { label } => label,
            EntityDisplay::Person { name, .. } => name,
            EntityDisplay::Facet { facet, .. } => facet,
        }
    }

    /// Initials for the avatar badge. Only named persons get initials;
    /// plain labels and facet tags render an icon instead.
    pub fn initials(&self) -> Option<String> {
        match self {
            EntityDisplay::Person { name, .. } => {
                let initials: String = name
                    .split_whitespace()
                    .filter_map(|word| word.chars().next())
                    .collect();
                if initials.is_empty() {
                    None
                } else {
                    Some(initials.to_uppercase())
                }
            }
            _ => None,
        }
    }

    pub fn mentions(&self) -> usize {
        match self {
            EntityDisplay::Plain { .. } => 0,
            EntityDisplay::Person { mentions, .. } | EntityDisplay::Facet { mentions, .. } => {
                *mentions
            }
        }
    }

    pub fn set_mentions(&mut self, count: usize) {
        match self {
            EntityDisplay::Plain { .. } => {}
            EntityDisplay::Person { mentions, .. } | EntityDisplay::Facet { mentions, .. } => {
                *mentions = count;
            }
        }
    }
}

/// Word-initial upper-casing for node labels (`"CYBER THREATS"` ->
/// `"Cyber Threats"`).
pub fn to_title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Relationship labels arrive in loader form (`DEVELOPED_BY`); render them
/// as words (`Developed By`).
pub fn humanize_label(label: &str) -> String {
    to_title_case(&label.replace('_', " ").replace('"', ""))
}

fn illegal_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s.,-]").expect("static regex"))
}

/// Clean an extraction description for display: `<SEP>` separators become
/// sentence breaks, stray characters are stripped, and the result always
/// ends with a period.
pub fn sanitize_description(desc: &str) -> String {
    if desc.is_empty() {
        return String::new();
    }
    let replaced = desc.replace("<SEP>", ". ");
    let mut sanitized = illegal_chars().replace_all(&replaced, "").trim().to_string();
    if !sanitized.is_empty() && !sanitized.ends_with('.') {
        sanitized.push('.');
    }
    sanitized
}

/// Color set for one entity group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupColor {
    pub background: String,
    pub border: String,
    pub text: String,
    pub highlight_background: String,
    pub highlight_border: String,
}

/// Deterministic group color: char-sum hash -> HSL hue. The same group
/// always renders the same color across sessions.
pub fn group_color(group: &str) -> GroupColor {
    let hash: u32 = group.chars().map(|c| c as u32).sum();
    let hue = hash % 360;
    GroupColor {
        background: format!("hsl({hue}, 70%, 92%)"),
        border: format!("hsl({hue}, 70%, 50%)"),
        text: format!("hsl({hue}, 70%, 30%)"),
        highlight_background: format!("hsl({hue}, 70%, 85%)"),
        highlight_border: format!("hsl({hue}, 70%, 45%)"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
