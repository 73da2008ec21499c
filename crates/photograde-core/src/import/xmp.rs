//! XMP sidecar parsing.
//!
//! XMP develop settings live entirely in element attributes, so this is a
//! tag-level scanner rather than a full DOM: it walks the document, checks
//! that tags pair up, and flattens every numeric attribute into one map.
//! Attribute keys are reduced to their local name, which strips the `crs:`
//! namespace prefix Lightroom uses.

use std::collections::HashMap;

use super::ImportError;

/// Flatten all numeric attributes of an XMP document into a raw map.
///
/// Later occurrences of a key overwrite earlier ones. Attribute values
/// that do not parse as finite numbers are skipped, not errors.
pub(crate) fn parse_xmp(xml: &str) -> Result<HashMap<String, f32>, ImportError> {
    let mut raw = HashMap::new();
    let mut open_elements: Vec<&str> = Vec::new();
    let mut saw_element = false;
    let mut pos = 0;

    while pos < xml.len() {
        if xml.as_bytes()[pos] != b'<' {
            // Text content.
            pos += 1;
            continue;
        }

        let rest = &xml[pos..];
        if let Some(after) = rest.strip_prefix("<?") {
            pos += skip_section(after, "?>", "processing instruction")? + 2;
        } else if let Some(after) = rest.strip_prefix("<!--") {
            pos += skip_section(after, "-->", "comment")? + 4;
        } else if let Some(after) = rest.strip_prefix("<![CDATA[") {
            pos += skip_section(after, "]]>", "CDATA section")? + 9;
        } else if let Some(after) = rest.strip_prefix("<!") {
            pos += skip_section(after, ">", "declaration")? + 2;
        } else if let Some(after) = rest.strip_prefix("</") {
            let end = after.find('>').ok_or_else(|| {
                ImportError::InvalidDocument("Unterminated closing tag".to_string())
            })?;
            let name = after[..end].trim();
            match open_elements.pop() {
                Some(open) if open == name => {}
                Some(open) => {
                    return Err(ImportError::InvalidDocument(format!(
                        "Expected </{}>, found </{}>",
                        open, name
                    )));
                }
                None => {
                    return Err(ImportError::InvalidDocument(format!(
                        "Closing tag </{}> has no opening tag",
                        name
                    )));
                }
            }
            pos += end + 3;
        } else {
            pos += parse_start_tag(rest, &mut open_elements, &mut raw)?;
            saw_element = true;
        }
    }

    if let Some(open) = open_elements.last() {
        return Err(ImportError::InvalidDocument(format!(
            "Unclosed element <{}>",
            open
        )));
    }
    if !saw_element {
        return Err(ImportError::InvalidDocument(
            "No XML elements found".to_string(),
        ));
    }
    Ok(raw)
}

/// Find `terminator` and return the offset just past it, relative to the
/// start of `text`.
fn skip_section(text: &str, terminator: &str, what: &str) -> Result<usize, ImportError> {
    text.find(terminator)
        .map(|index| index + terminator.len())
        .ok_or_else(|| ImportError::InvalidDocument(format!("Unterminated {}", what)))
}

/// Parse one start tag at the beginning of `tag`, collecting its numeric
/// attributes. Returns the number of bytes consumed. Self-closing tags are
/// not pushed onto the open-element stack.
fn parse_start_tag<'a>(
    tag: &'a str,
    open_elements: &mut Vec<&'a str>,
    raw: &mut HashMap<String, f32>,
) -> Result<usize, ImportError> {
    let bytes = tag.as_bytes();
    let mut pos = 1; // past '<'

    let name_start = pos;
    while pos < bytes.len() && !is_name_end(bytes[pos]) {
        pos += 1;
    }
    let name = &tag[name_start..pos];
    if name.is_empty() {
        return Err(ImportError::InvalidDocument(
            "Element has no name".to_string(),
        ));
    }

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(b'>') => {
                open_elements.push(name);
                return Ok(pos + 1);
            }
            Some(b'/') if bytes.get(pos + 1) == Some(&b'>') => return Ok(pos + 2),
            Some(b'/') | None => {
                return Err(ImportError::InvalidDocument(format!(
                    "Unterminated tag <{}>",
                    name
                )));
            }
            Some(_) => pos = parse_attribute(tag, pos, raw)?,
        }
    }
}

/// Parse one `name="value"` attribute starting at `pos`, recording it if
/// the value is a finite number. Returns the position just past the value.
fn parse_attribute(
    tag: &str,
    mut pos: usize,
    raw: &mut HashMap<String, f32>,
) -> Result<usize, ImportError> {
    let bytes = tag.as_bytes();

    let name_start = pos;
    while pos < bytes.len() && !is_name_end(bytes[pos]) && bytes[pos] != b'=' {
        pos += 1;
    }
    let name = &tag[name_start..pos];
    if name.is_empty() {
        return Err(ImportError::InvalidDocument(
            "Attribute has no name".to_string(),
        ));
    }

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'=') {
        return Err(ImportError::InvalidDocument(format!(
            "Attribute {} has no value",
            name
        )));
    }
    pos += 1;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let quote = match bytes.get(pos) {
        Some(&q @ (b'"' | b'\'')) => q,
        _ => {
            return Err(ImportError::InvalidDocument(format!(
                "Value of attribute {} is not quoted",
                name
            )));
        }
    };
    pos += 1;
    let value_start = pos;
    while pos < bytes.len() && bytes[pos] != quote {
        pos += 1;
    }
    if pos >= bytes.len() {
        return Err(ImportError::InvalidDocument(format!(
            "Unterminated value for attribute {}",
            name
        )));
    }
    let value = &tag[value_start..pos];
    pos += 1;

    if let Ok(parsed) = value.trim().parse::<f32>() {
        if parsed.is_finite() {
            raw.insert(local_name(name).to_string(), parsed);
        }
    }
    Ok(pos)
}

#[inline]
fn is_name_end(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'>' || byte == b'/'
}

/// Part of a qualified name after the last colon, so `crs:Exposure2012`
/// becomes `Exposure2012`.
#[inline]
fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(index) => &name[index + 1..],
        None => name,
    }
}
