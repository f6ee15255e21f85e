// Multipart form assembly for image and resume uploads.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;

/// Best-effort media type from a file extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Flatten `fields` into text parts and attach `file` under `field_name`.
///
/// Lists become comma separated values; `null`s are skipped.
pub(crate) async fn build_form<T: Serialize>(
    fields: &T,
    field_name: &str,
    file: &Path,
) -> Result<Form, Error> {
    let mut form = Form::new();

    let value = serde_json::to_value(fields).map_err(|e| Error::Deserialization {
        message: format!("failed to encode form fields: {e}"),
        body: String::new(),
    })?;
    if let Value::Object(map) = value {
        for (key, value) in map {
            if let Some(text) = text_part(value) {
                form = form.text(key, text);
            }
        }
    }

    let bytes = tokio::fs::read(file)
        .await
        .map_err(|source| Error::Attachment {
            path: file.to_path_buf(),
            source,
        })?;
    let file_name = file
        .file_name()
        .map_or_else(|| field_name.to_owned(), |n| n.to_string_lossy().into_owned());
    debug!(
        field = field_name,
        file = %file.display(),
        size = bytes.len(),
        "attaching file"
    );
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(media_type_for(file))?;

    Ok(form.part(field_name.to_owned(), part))
}

fn text_part(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(text_part)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::*;

    #[test]
    fn media_types_by_extension() {
        assert_eq!(media_type_for(Path::new("cover.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("cv.pdf")), "application/pdf");
        assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn text_parts_flatten_lists() {
        assert_eq!(
            text_part(json!(["react", "rust"])).as_deref(),
            Some("react,rust")
        );
        assert_eq!(text_part(json!(5)).as_deref(), Some("5"));
        assert_eq!(text_part(json!(null)), None);
    }
}
