//! Lightroom preset import.
//!
//! This module turns preset files exported by Adobe Lightroom into
//! [`NamedPreset`]s ready for the filter pipeline. Two formats are
//! supported:
//!
//! - **`.xmp`** sidecar documents: XML whose develop settings are stored
//!   as `crs:`-prefixed attributes.
//! - **`.lrtemplate`** files: the older Lua-like `key = value` text.
//!
//! # Architecture
//!
//! Both formats funnel into the same two-step flow: a format-specific
//! parser flattens the document into a raw `key -> number` map, then a
//! single mapping table aliases the external keys onto [`FilterSettings`]
//! fields and remaps each value into this library's ranges. Import is
//! all-or-nothing: on any error the caller's state, including the
//! existing-names set, is left untouched.

use std::collections::HashSet;

use thiserror::Error;

use crate::preset::NamedPreset;

mod lrtemplate;
mod mapping;
mod xmp;

const DEFAULT_ICON: &str = "📥";
const DEFAULT_DESCRIPTION: &str = "Imported from Lightroom";

/// Errors surfaced while importing an external preset file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document could not be parsed.
    #[error("Invalid preset document: {0}")]
    InvalidDocument(String),
    /// The file extension does not match a supported preset format.
    #[error("Unsupported preset file type: {0:?}")]
    UnsupportedFormat(String),
    /// The document parsed but contained no recognized develop settings.
    #[error("No supported Lightroom settings found")]
    NoRecognizedFields,
    /// A value fell outside the representable domain.
    ///
    /// Defensive taxonomy entry: the built-in mappings clamp values into
    /// range instead of rejecting them, so they never produce this.
    #[error("Value {value} for {key} is out of range")]
    RangeOutOfDomain { key: String, value: f32 },
}

/// The external preset formats this module understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    /// Adobe XMP sidecar (XML attributes).
    Xmp,
    /// Legacy Lightroom template (`key = value` text).
    Lrtemplate,
}

impl PresetFormat {
    /// Detect the format from a file name's extension, case-insensitive.
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "xmp" => Ok(Self::Xmp),
            "lrtemplate" => Ok(Self::Lrtemplate),
            _ => Err(ImportError::UnsupportedFormat(extension)),
        }
    }
}

/// Optional knobs for an import.
#[derive(Debug, Default)]
pub struct ImportOptions<'a> {
    /// Icon for the new preset. Defaults to a tray emoji.
    pub icon: Option<&'a str>,
    /// Description for the new preset.
    pub description: Option<&'a str>,
    /// Names already taken in the caller's collection. Consulted to pick
    /// a unique name, and updated with the chosen name on success only.
    pub existing_names: Option<&'a mut HashSet<String>>,
}

/// Import a preset file, detecting the format from the file extension.
pub fn import_preset(
    file_name: &str,
    text: &str,
    options: ImportOptions<'_>,
) -> Result<NamedPreset, ImportError> {
    let format = PresetFormat::from_file_name(file_name)?;
    import_preset_with_format(file_name, text, format, options)
}

/// Import a preset file whose format the caller already knows.
///
/// The preset is named after the file (extension stripped), made unique
/// against `options.existing_names` by appending " (2)", " (3)", and so
/// on, and given a stable id derived from that name.
pub fn import_preset_with_format(
    file_name: &str,
    text: &str,
    format: PresetFormat,
    options: ImportOptions<'_>,
) -> Result<NamedPreset, ImportError> {
    let raw = match format {
        PresetFormat::Xmp => xmp::parse_xmp(text)?,
        PresetFormat::Lrtemplate => lrtemplate::parse_lrtemplate(text),
    };
    let filters = mapping::map_raw_values(&raw)?;

    let name = unique_name(base_name(file_name), options.existing_names.as_deref());
    if let Some(existing) = options.existing_names {
        existing.insert(name.clone());
    }

    Ok(NamedPreset {
        id: format!("custom-{}", slug_id(&name)),
        name,
        icon: options.icon.unwrap_or(DEFAULT_ICON).to_string(),
        description: options.description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        filters,
    })
}

/// File name without its final extension. Names with no dot, or with only
/// a leading dot, pass through unchanged.
fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name,
    }
}

/// Pick a name not present in `existing`, counting up from " (2)".
fn unique_name(base: &str, existing: Option<&HashSet<String>>) -> String {
    let Some(existing) = existing else {
        return base.to_string();
    };
    if !existing.contains(base) {
        return base.to_string();
    }
    let mut counter = 2u32;
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Lowercase alphanumeric slug of a display name, hyphen-separated.
fn slug_id(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "imported".to_string()
    } else {
        slug.to_string()
    }
}
