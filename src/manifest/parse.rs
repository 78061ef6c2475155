//! Manifest parsing into package identities

use super::ManifestKind;
use crate::error::ManifestError;
use crate::package::PackageIdentity;
use roxmltree::{Document, Node, ParsingOptions};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse one manifest file.
///
/// Pairs with a missing or empty id/version are dropped. Any read or XML
/// error is returned as a `ManifestError` naming the file.
pub fn parse_manifest(
    path: &Path,
    kind: ManifestKind,
) -> Result<Vec<PackageIdentity>, ManifestError> {
    let fail = |reason: String| ManifestError {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = fs::read(path).map_err(|e| fail(e.to_string()))?;
    let text = decode_manifest(&bytes).map_err(fail)?;

    let packages = parse_manifest_str(&text, kind).map_err(fail)?;

    debug!(
        "Parsed {} ({}): {} reference(s)",
        path.display(),
        kind,
        packages.len()
    );
    Ok(packages)
}

/// Decode manifest bytes by their byte order mark.
///
/// UTF-16 files (either byte order) must carry a BOM; anything without one
/// is read as UTF-8. A UTF-8 BOM is left for `parse_manifest_str` to strip.
pub fn decode_manifest(bytes: &[u8]) -> Result<String, String> {
    let (units, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => {
            return String::from_utf8(bytes.to_vec())
                .map_err(|_| "stream did not contain valid UTF-8".to_string())
        }
    };

    if units.len() % 2 != 0 {
        return Err("truncated UTF-16 stream".to_string());
    }
    let units: Vec<u16> = units
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|e| e.to_string())
}

/// Parse manifest text, returning the XML error message on failure
pub fn parse_manifest_str(
    text: &str,
    kind: ManifestKind,
) -> Result<Vec<PackageIdentity>, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|e| e.to_string())?;

    let packages = match kind {
        ManifestKind::Project => doc
            .descendants()
            .filter(|n| n.has_tag_name("PackageReference"))
            .filter_map(|n| {
                PackageIdentity::from_parts(
                    n.attribute("Include"),
                    reference_version(n).as_deref(),
                )
            })
            .collect(),
        ManifestKind::PackagesConfig => doc
            .descendants()
            .filter(|n| n.has_tag_name("package"))
            .filter_map(|n| {
                PackageIdentity::from_parts(n.attribute("id"), n.attribute("version"))
            })
            .collect(),
    };

    Ok(packages)
}

/// `Version` attribute, or the `<Version>` child only when the attribute is absent.
///
/// The child's value is all of its text content (comments and nested
/// markup skipped, CDATA included), trimmed.
fn reference_version<'a>(node: Node<'a, '_>) -> Option<Cow<'a, str>> {
    if let Some(version) = node.attribute("Version") {
        return Some(Cow::Borrowed(version));
    }

    let child = node.children().find(|c| c.has_tag_name("Version"))?;
    let text: String = child
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    Some(Cow::Owned(text.trim().to_string()))
}
