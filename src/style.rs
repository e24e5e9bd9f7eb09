//! Deduplicating style table.
//!
//! Styles registered during a render pass land here keyed by their full
//! identity (property, value, media query, pseudo selector). The first
//! registration of a key mints a class name; every identical registration
//! reuses it, so a style repeated across ten thousand nodes serializes to
//! one rule.

use std::collections::HashMap;

use bytes::BytesMut;

use crate::context::RenderConfig;

/// Produces a class name from the style property and the current table
/// size. Must be deterministic within a pass.
pub type ClassNamer = fn(&str, usize) -> String;

/// Default namer: the property with non-identifier bytes replaced by `-`,
/// plus the registration index. `font-size` registered third becomes
/// `font-size-2`.
pub(crate) fn default_class_name(property: &str, index: usize) -> String {
    let mut name = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            name.push(ch);
        } else {
            name.push('-');
        }
    }
    format!("{name}-{index}")
}

/// Full identity of one registered style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    property: String,
    value: String,
    media: Option<String>,
    pseudo: Option<String>,
}

impl StyleKey {
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    pub fn pseudo(&self) -> Option<&str> {
        self.pseudo.as_deref()
    }
}

#[derive(Debug, Clone)]
struct StyleEntry {
    key: StyleKey,
    class: String,
}

/// Rules sharing one media query, in registration order.
#[derive(Debug, Clone)]
struct MediaBucket {
    query: Option<String>,
    entries: Vec<StyleEntry>,
}

/// The per-pass style table: a hash index for O(1) deduplication plus
/// insertion-ordered buckets grouped by media query for serialization.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    index: HashMap<StyleKey, String>,
    buckets: Vec<MediaBucket>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a style and returns its class name, minting one via
    /// `namer` on first sight.
    ///
    /// `pseudo` is appended to the selector verbatim, so callers include
    /// the leading colon(s): `":hover"`, `"::after"`.
    pub fn insert(
        &mut self,
        property: &str,
        value: &str,
        media: Option<&str>,
        pseudo: Option<&str>,
        namer: ClassNamer,
    ) -> String {
        let key = StyleKey {
            property: property.to_owned(),
            value: value.to_owned(),
            media: media.map(str::to_owned),
            pseudo: pseudo.map(str::to_owned),
        };
        if let Some(class) = self.index.get(&key) {
            return class.clone();
        }

        let class = namer(property, self.index.len());
        self.index.insert(key.clone(), class.clone());
        let bucket = self.bucket_index(&key.media);
        self.buckets[bucket].entries.push(StyleEntry {
            key,
            class: class.clone(),
        });
        class
    }

    /// Folds another table into this one, keeping the other's registration
    /// order and skipping keys already present here. Entries arrive with
    /// the class names they were minted under; if both tables minted the
    /// same name for different keys, the first registration keeps it.
    pub fn absorb(&mut self, other: StyleSheet) {
        for bucket in other.buckets {
            for entry in bucket.entries {
                if self.index.contains_key(&entry.key) {
                    continue;
                }
                self.index.insert(entry.key.clone(), entry.class.clone());
                let target = self.bucket_index(&entry.key.media);
                self.buckets[target].entries.push(entry);
            }
        }
    }

    /// Serializes every rule, plain rules as registered and media-scoped
    /// rules grouped under their `@media` block, one indentation level in.
    pub fn write_css(&self, config: &RenderConfig, out: &mut BytesMut) {
        for bucket in &self.buckets {
            match &bucket.query {
                None => {
                    for entry in &bucket.entries {
                        write_rule(entry, config, out, false);
                    }
                }
                Some(query) => {
                    out.extend_from_slice(b"@media ");
                    out.extend_from_slice(query.as_bytes());
                    out.extend_from_slice(b"{");
                    out.extend_from_slice(config.newline().as_bytes());
                    for entry in &bucket.entries {
                        write_rule(entry, config, out, true);
                    }
                    out.extend_from_slice(b"}");
                    out.extend_from_slice(config.newline().as_bytes());
                }
            }
        }
    }

    /// Registered entries in serialization order.
    pub fn entries(&self) -> impl Iterator<Item = (&StyleKey, &str)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.entries.iter().map(|e| (&e.key, e.class.as_str())))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn bucket_index(&mut self, query: &Option<String>) -> usize {
        match self.buckets.iter().position(|b| &b.query == query) {
            Some(index) => index,
            None => {
                self.buckets.push(MediaBucket {
                    query: query.clone(),
                    entries: Vec::new(),
                });
                self.buckets.len() - 1
            }
        }
    }
}

fn write_rule(entry: &StyleEntry, config: &RenderConfig, out: &mut BytesMut, indented: bool) {
    if indented {
        out.extend_from_slice(config.indentation().as_bytes());
    }
    out.extend_from_slice(b".");
    out.extend_from_slice(entry.class.as_bytes());
    if let Some(pseudo) = entry.key.pseudo() {
        out.extend_from_slice(pseudo.as_bytes());
    }
    out.extend_from_slice(b"{");
    out.extend_from_slice(entry.key.property().as_bytes());
    out.extend_from_slice(b":");
    out.extend_from_slice(entry.key.value().as_bytes());
    if config.force_important() {
        out.extend_from_slice(b" !important");
    }
    out.extend_from_slice(b"}");
    out.extend_from_slice(config.newline().as_bytes());
}
