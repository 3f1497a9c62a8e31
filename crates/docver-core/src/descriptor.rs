use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use std::path::Path;

use crate::error::VersionExtractionError;
use crate::version::VersionInfo;

const VERSION_TAG: &[u8] = b"version";

/// Reads a build descriptor and resolves its first version declaration.
///
/// # Errors
/// Returns an error when the file cannot be read or contains no usable
/// `<version>` element.
pub fn resolve_from_path(
    path: &Path,
    marker: &str,
) -> Result<VersionInfo, VersionExtractionError> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| VersionExtractionError::unreadable(path, &err))?;
    let info = resolve_from_str(&text, marker)?;
    log::debug!("Resolved version {info} from {}", path.display());
    Ok(info)
}

/// Resolves the first `<version>` element of a descriptor in document order.
///
/// # Errors
/// Returns an error when the descriptor is malformed before the first
/// declaration, has no declaration, or the declaration is empty.
pub fn resolve_from_str(text: &str, marker: &str) -> Result<VersionInfo, VersionExtractionError> {
    let full = first_version_value(text)?;
    Ok(VersionInfo::from_full(full, marker))
}

fn first_version_value(text: &str) -> Result<String, VersionExtractionError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut in_version = false;
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(event)) if event.local_name().as_ref() == VERSION_TAG => {
                in_version = true;
            }
            Ok(Event::Empty(event)) if event.local_name().as_ref() == VERSION_TAG => {
                return Err(VersionExtractionError::EmptyValue);
            }
            Ok(Event::Text(chunk)) if in_version => {
                let decoded = chunk.decode().map_err(VersionExtractionError::malformed)?;
                value.push_str(&decoded);
            }
            Ok(Event::GeneralRef(reference)) if in_version => {
                value.push_str(&resolve_reference(&reference)?);
            }
            Ok(Event::CData(data)) if in_version => {
                let decoded =
                    std::str::from_utf8(&data).map_err(VersionExtractionError::malformed)?;
                value.push_str(decoded);
            }
            Ok(Event::End(event)) if in_version && event.local_name().as_ref() == VERSION_TAG => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(VersionExtractionError::EmptyValue);
                }
                return Ok(value.to_string());
            }
            Ok(Event::Eof) => return Err(VersionExtractionError::MissingTag),
            Err(err) => return Err(VersionExtractionError::malformed(err)),
            _ => {}
        }
    }
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, VersionExtractionError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(VersionExtractionError::malformed)?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(VersionExtractionError::malformed)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| VersionExtractionError::Malformed {
            details: format!("unknown entity &{name};"),
        })
}

/// Human-readable line describing the outcome of a resolution.
#[must_use]
pub fn version_report(
    descriptor: &Path,
    result: &Result<VersionInfo, VersionExtractionError>,
) -> String {
    match result {
        Ok(info) => info.summary(),
        Err(err) => format!(
            "Could not get version from {}: {err}",
            descriptor.display()
        ),
    }
}
