use std::{borrow::Borrow, collections::HashSet, fmt, ops::Deref};

use serde::Serialize;

/// Name used when a header cell sanitizes down to nothing.
const FALLBACK: &str = "field";

const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

const TRANSLITERATIONS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('ß', "ss"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
];

/// A header cell turned into a valid identifier.
///
/// The only ways to get one are [`FieldName::new`], which rejects anything
/// that is not already an identifier, and [`FieldName::sanitize_all`], which
/// rewrites a whole header into distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_identifier(&name).then_some(Self(name))
    }

    /// Sanitize every cell of a header, in column order.
    ///
    /// A name already taken by an earlier column gets the first free `_2`,
    /// `_3`, ... suffix, so the output never contains duplicates.
    pub fn sanitize_all<I>(cells: I) -> Vec<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut taken = HashSet::new();

        cells
            .into_iter()
            .map(|cell| {
                let base = sanitize(cell.as_ref());
                let mut name = base.clone();
                let mut suffix = 2;
                while taken.contains(&name) {
                    name = format!("{base}_{suffix}");
                    suffix += 1;
                }
                taken.insert(name.clone());
                Self(name)
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for FieldName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn one raw header cell into an identifier.
///
/// Total and deterministic: trims, transliterates German umlauts, replaces
/// anything outside `[A-Za-z0-9_]` with `_`, collapses `_` runs, falls back
/// to `field` when nothing is left, prefixes `F` before a leading digit and
/// appends `_` to keywords. Uniqueness across a header is handled by
/// [`FieldName::sanitize_all`].
pub fn sanitize(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());

    for c in raw.trim().chars() {
        let replacement = TRANSLITERATIONS
            .iter()
            .find(|(umlaut, _)| *umlaut == c)
            .map(|(_, ascii)| *ascii);

        match replacement {
            Some(ascii) => name.push_str(ascii),
            None if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
            None => name.push('_'),
        }
    }

    let mut name = collapse_underscores(&name);

    if name.is_empty() || name == "_" {
        name = FALLBACK.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'F');
    }
    if KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    }

    name
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
        && !KEYWORDS.contains(&name)
}

fn collapse_underscores(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}
