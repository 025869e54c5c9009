//! Function inspector view model
//!
//! Read-only display of a discovered stored function. Source text is shown
//! on explicit toggle, with cosmetic keyword capitalization applied to the
//! display string only. Copy-to-clipboard always hands out the raw source:
//! the capitalizer is a blind case-insensitive replace that can touch those
//! tokens inside identifiers or string literals, so nothing that is
//! persisted, executed, or copied may pass through it.

use std::sync::OnceLock;

use plaza_core::{FunctionDescriptor, FunctionKind};
use regex::Regex;

fn keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Deliberately no word boundaries: the capitalizer is a blind
        // substring replace, which is why its output is display-only.
        Regex::new(
            r"(?i)(select|insert|update|delete|returning|return|from|where|into|values|set|begin|end|declare|language|limit|exists|join)",
        )
        .expect("keyword pattern is valid")
    })
}

/// Uppercase SQL keywords for display. Blind substring replacement; never
/// feed the output back into anything semantically significant.
pub fn capitalize_keywords(source: &str) -> String {
    keyword_pattern()
        .replace_all(source, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// View model for one discovered function
pub struct FunctionInspector {
    descriptor: FunctionDescriptor,
    source_visible: bool,
}

impl FunctionInspector {
    pub fn new(descriptor: FunctionDescriptor) -> Self {
        Self {
            descriptor,
            source_visible: false,
        }
    }

    /// One-line signature: name, arguments, return type
    pub fn signature(&self) -> String {
        format!(
            "{}({}) -> {}",
            self.descriptor.name, self.descriptor.arguments, self.descriptor.return_type
        )
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn language(&self) -> &str {
        &self.descriptor.language
    }

    pub fn kind(&self) -> FunctionKind {
        self.descriptor.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.description.as_deref()
    }

    /// Toggle source visibility; returns the new state
    pub fn toggle_source(&mut self) -> bool {
        self.source_visible = !self.source_visible;
        self.source_visible
    }

    pub fn source_visible(&self) -> bool {
        self.source_visible
    }

    /// Source text for display, prettified. None while hidden.
    pub fn display_source(&self) -> Option<String> {
        self.source_visible
            .then(|| capitalize_keywords(&self.descriptor.source))
    }

    /// Raw source for the clipboard. Never the prettified text.
    pub fn copy_source(&self) -> &str {
        &self.descriptor.source
    }
}
