//! Case-insensitive (package id, version) identity

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A package id and version as written in a manifest or cache directory name.
///
/// Equality and hashing ignore case ordinally, the way NuGet does: each
/// character is mapped through its single-character uppercase form and the
/// results are compared code point by code point, never through
/// locale-aware collation. The original spelling is kept for display.
#[derive(Debug, Clone, Serialize)]
pub struct PackageIdentity {
    id: String,
    version: String,
}

impl PackageIdentity {
    /// Build an identity, rejecting empty ids or versions
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let version = version.into();
        if id.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self { id, version })
    }

    /// Build an identity from optional extracted fields
    pub fn from_parts(id: Option<&str>, version: Option<&str>) -> Option<Self> {
        Self::new(id?, version?)
    }

    /// Package id with its original casing
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version string with its original casing
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Lowercased (id, version) pair, used for stable display ordering
    pub fn sort_key(&self) -> (String, String) {
        (self.id.to_lowercase(), self.version.to_lowercase())
    }
}

/// Simple uppercase mapping: characters whose uppercase form is more than
/// one character (`ß`) stay as they are, so lengths never change.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().map(fold_char)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    fold(a).eq(fold(b))
}

fn hash_folded<H: Hasher>(s: &str, state: &mut H) {
    for c in fold(s) {
        state.write_u32(c as u32);
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.id, &other.id) && eq_ignore_case(&self.version, &other.version)
    }
}

impl Eq for PackageIdentity {}

impl Hash for PackageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_folded(&self.id, state);
        // Field separator: keeps ("ab", "c") and ("a", "bc") apart.
        state.write_u32(u32::MAX);
        hash_folded(&self.version, state);
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn ident(id: &str, version: &str) -> PackageIdentity {
        PackageIdentity::new(id, version).unwrap()
    }

    fn hash_of(p: &PackageIdentity) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_ignoring_case() {
        let a = ident("Newtonsoft.Json", "13.0.1");
        let b = ident("newtonsoft.json", "13.0.1");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn version_compared_ignoring_case() {
        let a = ident("Foo", "1.0.0-Beta");
        let b = ident("FOO", "1.0.0-beta");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn different_fields_not_equal() {
        assert_ne!(ident("Foo", "1.0.0"), ident("Foo", "1.0.1"));
        assert_ne!(ident("Foo", "1.0.0"), ident("Bar", "1.0.0"));
    }

    #[test]
    fn field_boundary_matters() {
        let a = ident("ab", "c");
        let b = ident("a", "bc");
        assert_ne!(a, b);
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn folding_is_single_char_uppercase() {
        // Long s uppercases to S
        assert_eq!(ident("\u{17F}erilog", "1.0.0"), ident("Serilog", "1.0.0"));
        assert_eq!(
            hash_of(&ident("\u{17F}erilog", "1.0.0")),
            hash_of(&ident("serilog", "1.0.0"))
        );
        // Kelvin sign is already uppercase and distinct from K
        assert_ne!(ident("\u{212A}it", "1.0.0"), ident("kit", "1.0.0"));
        // Multi-char uppercase forms are left alone
        assert_ne!(ident("Stra\u{DF}e", "1.0.0"), ident("STRASSE", "1.0.0"));
        assert_ne!(ident("\u{130}o", "1.0.0"), ident("io", "1.0.0"));
    }

    #[test]
    fn non_ascii_case_folding() {
        let a = ident("Ünïcode.Pkg", "1.0.0");
        let b = ident("ünïcode.pkg", "1.0.0");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn many_case_variants_hash_alike() {
        let base = ident("System.Text.Json", "8.0.0-RC.1");
        for (id, version) in [
            ("SYSTEM.TEXT.JSON", "8.0.0-rc.1"),
            ("system.text.json", "8.0.0-Rc.1"),
            ("System.text.JSON", "8.0.0-rC.1"),
        ] {
            let other = ident(id, version);
            assert_eq!(base, other);
            assert_eq!(hash_of(&base), hash_of(&other));
        }
    }

    #[test]
    fn empty_fields_rejected() {
        assert!(PackageIdentity::new("", "1.0.0").is_none());
        assert!(PackageIdentity::new("Foo", "").is_none());
        assert!(PackageIdentity::from_parts(None, Some("1.0.0")).is_none());
        assert!(PackageIdentity::from_parts(Some("Foo"), None).is_none());
        assert!(PackageIdentity::from_parts(Some("Foo"), Some("1.0.0")).is_some());
    }

    #[test]
    fn set_deduplicates_by_case() {
        let mut set = HashSet::new();
        assert!(set.insert(ident("Newtonsoft.Json", "1.0.0")));
        assert!(!set.insert(ident("newtonsoft.json", "1.0.0")));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&ident("NEWTONSOFT.JSON", "1.0.0")));
    }

    #[test]
    fn display_keeps_original_casing() {
        assert_eq!(ident("Foo.Bar", "2.0.0").to_string(), "Foo.Bar/2.0.0");
    }
}
