//! Render configuration and the mutable per-pass context.
//!
//! One [`RenderContext`] accompanies one render pass. Combinators thread it
//! through their children; wrappers snapshot the scoped portion before
//! mutating and restore it afterwards, so attribute edits never leak to
//! siblings while registered styles accumulate for the whole pass.

use std::borrow::Cow;

use bytes::BytesMut;

use crate::style::{default_class_name, ClassNamer, StyleSheet};

/// Capacity reserved for output buffers unless overridden.
const DEFAULT_RESERVE_CAPACITY: usize = 1024;
/// Indentation unit of the pretty preset.
const PRETTY_INDENTATION: &str = "  ";
/// Line break of the pretty preset.
const PRETTY_NEWLINE: &str = "\n";

// ============================================================================
// Configuration
// ============================================================================

/// Immutable settings shared by every node in a render pass.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    indentation: Cow<'static, str>,
    newline: Cow<'static, str>,
    force_important: bool,
    reserve_capacity: usize,
    class_namer: ClassNamer,
}

impl RenderConfig {
    /// Canonical output: no indentation, no line breaks.
    pub fn compact() -> Self {
        Self {
            indentation: Cow::Borrowed(""),
            newline: Cow::Borrowed(""),
            force_important: false,
            reserve_capacity: DEFAULT_RESERVE_CAPACITY,
            class_namer: default_class_name,
        }
    }

    /// Two-space indentation and single-newline breaks.
    pub fn pretty() -> Self {
        Self {
            indentation: Cow::Borrowed(PRETTY_INDENTATION),
            newline: Cow::Borrowed(PRETTY_NEWLINE),
            ..Self::compact()
        }
    }

    pub fn with_indentation(mut self, indentation: impl Into<Cow<'static, str>>) -> Self {
        self.indentation = indentation.into();
        self
    }

    pub fn with_newline(mut self, newline: impl Into<Cow<'static, str>>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Appends ` !important` to every serialized style declaration.
    pub fn with_force_important(mut self, force_important: bool) -> Self {
        self.force_important = force_important;
        self
    }

    pub fn with_reserve_capacity(mut self, reserve_capacity: usize) -> Self {
        self.reserve_capacity = reserve_capacity;
        self
    }

    /// Replaces the deduplicating class-name generator.
    pub fn with_class_namer(mut self, class_namer: ClassNamer) -> Self {
        self.class_namer = class_namer;
        self
    }

    pub fn indentation(&self) -> &str {
        &self.indentation
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }

    pub fn force_important(&self) -> bool {
        self.force_important
    }

    pub fn reserve_capacity(&self) -> usize {
        self.reserve_capacity
    }

    pub fn class_namer(&self) -> ClassNamer {
        self.class_namer
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::compact()
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// One named attribute scoped to the element currently being opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Insertion-ordered attribute map.
///
/// Attribute counts are small, so this is a plain vector: `set` replaces the
/// value of an existing name in place (the original position is kept) and
/// `merge` joins values with a separator, skipping exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; first write fixes the output position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(Attribute { name, value }),
        }
    }

    /// Joins `value` onto an existing entry with `separator`, or inserts it.
    /// A token already present verbatim is not appended again.
    pub fn merge(&mut self, name: impl Into<String>, value: &str, separator: &str) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                if entry.value.is_empty() {
                    entry.value.push_str(value);
                } else if !entry.value.split(separator).any(|token| token == value) {
                    entry.value.push_str(separator);
                    entry.value.push_str(value);
                }
            }
            None => self.entries.push(Attribute {
                name,
                value: value.to_owned(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Context
// ============================================================================

/// Saved scoped state, returned by [`RenderContext::scope`].
#[derive(Debug, Clone)]
pub struct ScopeSnapshot {
    attributes: AttributeList,
    depth: usize,
}

/// Mutable state threaded through one render pass.
pub struct RenderContext {
    config: RenderConfig,
    depth: usize,
    attributes: AttributeList,
    styles: StyleSheet,
}

impl RenderContext {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            depth: 0,
            attributes: AttributeList::new(),
            styles: StyleSheet::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes a line break followed by the indentation for the current
    /// depth. With the compact configuration both are empty and nothing is
    /// written.
    pub fn write_break(&self, out: &mut BytesMut) {
        out.extend_from_slice(self.config.newline.as_bytes());
        for _ in 0..self.depth {
            out.extend_from_slice(self.config.indentation.as_bytes());
        }
    }

    // ------------------------------------------------------------------
    // Scoped attributes
    // ------------------------------------------------------------------

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Drains the scoped attributes, leaving the scope empty. Elements call
    /// this once while emitting their open tag.
    pub fn take_attributes(&mut self) -> AttributeList {
        std::mem::take(&mut self.attributes)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.set(name, value);
    }

    pub fn merge_attribute(&mut self, name: impl Into<String>, value: &str, separator: &str) {
        self.attributes.merge(name, value, separator);
    }

    /// Captures the scoped state. Wrappers take a snapshot before mutating
    /// and [`restore`](Self::restore) it afterwards, on success and on
    /// error paths alike.
    pub fn scope(&self) -> ScopeSnapshot {
        ScopeSnapshot {
            attributes: self.attributes.clone(),
            depth: self.depth,
        }
    }

    pub fn restore(&mut self, snapshot: ScopeSnapshot) {
        self.attributes = snapshot.attributes;
        self.depth = snapshot.depth;
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    /// Registers a style and scopes its generated class onto the `class`
    /// attribute. Identical registrations reuse the existing class name.
    pub fn register_style(
        &mut self,
        property: &str,
        value: &str,
        media: Option<&str>,
        pseudo: Option<&str>,
    ) -> String {
        let namer = self.config.class_namer;
        let class = self.styles.insert(property, value, media, pseudo, namer);
        self.attributes.merge("class", &class, " ");
        class
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// A fresh context with the same configuration and empty state, used to
    /// render a document body in isolation.
    pub fn isolated(&self) -> Self {
        Self::new(self.config.clone())
    }

    /// Folds styles collected elsewhere into this context, preserving their
    /// registration order and skipping keys already present.
    pub fn absorb_styles(&mut self, styles: StyleSheet) {
        self.styles.absorb(styles);
    }

    pub fn into_styles(self) -> StyleSheet {
        self.styles
    }
}
