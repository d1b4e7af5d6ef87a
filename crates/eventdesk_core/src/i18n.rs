//! Lazy translation hooks for user-facing labels.
//!
//! Strings are declared with [`tr`] at definition time and resolved against a
//! [`Translator`] only when a menu or catalog is rendered.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Message id that is translated on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Translatable(&'static str);

/// Marks a message id for translation.
pub const fn tr(msgid: &'static str) -> Translatable {
    Translatable(msgid)
}

impl Translatable {
    pub fn msgid(self) -> &'static str {
        self.0
    }

    pub fn resolve(self, translator: &dyn Translator) -> Cow<'static, str> {
        translator.translate(self.0)
    }
}

impl Display for Translatable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Translatable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

pub trait Translator: Send + Sync {
    fn translate(&self, msgid: &'static str) -> Cow<'static, str>;
}

/// Returns message ids unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, msgid: &'static str) -> Cow<'static, str> {
        Cow::Borrowed(msgid)
    }
}

/// In-memory message catalog for one locale; unknown ids fall back to the msgid.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages: BTreeMap<&'static str, String>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, msgid: &'static str, translated: impl Into<String>) -> Self {
        self.messages.insert(msgid, translated.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, msgid: &'static str) -> Cow<'static, str> {
        match self.messages.get(msgid) {
            Some(translated) => Cow::Owned(translated.clone()),
            None => Cow::Borrowed(msgid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{tr, CatalogTranslator, IdentityTranslator};

    #[test]
    fn identity_returns_msgid() {
        assert_eq!(tr("Surveys").resolve(&IdentityTranslator), "Surveys");
    }

    #[test]
    fn catalog_translates_known_and_falls_back_for_unknown() {
        let french = CatalogTranslator::new().with_message("Surveys", "Sondages");
        assert_eq!(tr("Surveys").resolve(&french), "Sondages");
        assert_eq!(tr("Timetable").resolve(&french), "Timetable");
    }

    #[test]
    fn serializes_as_msgid() {
        let json = serde_json::to_string(&tr("Surveys")).expect("serialize translatable");
        assert_eq!(json, "\"Surveys\"");
    }
}
