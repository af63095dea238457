use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::NamedTempFile;

use crate::error::{RenderdeskError, Result};
use crate::gateway::{ApiRequest, ResponseKind};
use crate::notify::Notification;
use crate::ops::{templates, Services};

/// File name used when the destination is a directory.
pub fn default_file_name(template_id: &str) -> String {
    format!("rendered-{}.pdf", template_id)
}

/// Parse the user-supplied render data. Blank input means `{}`.
pub fn parse_payload(raw: &str) -> Result<Value> {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RenderdeskError::Validation(format!("Invalid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(RenderdeskError::Validation(
            "Invalid JSON: render data must be an object".into(),
        ));
    }
    Ok(value)
}

/// Resolve where the document lands: inside `destination` when it is a
/// directory, otherwise at `destination` itself.
pub fn resolve_destination(destination: &Path, template_id: &str) -> PathBuf {
    if destination.is_dir() {
        destination.join(default_file_name(template_id))
    } else {
        destination.to_path_buf()
    }
}

/// Render a template with `payload` and save the document.
///
/// The payload is validated before any request. The document is staged in a
/// temporary file next to its destination and moved into place at the end;
/// the staged file is removed on every failure path.
pub async fn render(
    services: &Services,
    template_id: &str,
    payload: &str,
    destination: &Path,
) -> Result<Option<PathBuf>> {
    let template_id = templates::parse_id(template_id)?.to_string();
    let data = parse_payload(payload)?;

    let request = ApiRequest::post(format!("/render/{}", template_id), json!({ "data": data }))
        .expecting(ResponseKind::Binary);
    let Some(response) = services.gateway.dispatch(request).await? else {
        return Ok(None);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to generate PDF"));
    }

    let bytes = response
        .into_bytes()
        .ok_or_else(|| RenderdeskError::Other("Server returned an empty document".into()))?;

    let target = resolve_destination(destination, &template_id);
    let staged = StagedDocument::new(&target, &bytes)?;
    let saved = staged.persist(&target)?;

    tracing::info!(path = %saved.display(), bytes = bytes.len(), "document saved");
    services.notifier.notify(Notification::success(format!(
        "PDF generated: {}",
        saved.display()
    )));
    Ok(Some(saved))
}

/// Downloaded bytes held in a temporary file until they are moved into place.
struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    fn new(target: &Path, bytes: &[u8]) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = tempfile::Builder::new()
            .prefix(".renderdesk-")
            .suffix(".part")
            .tempfile_in(&dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    fn persist(self, target: &Path) -> Result<PathBuf> {
        self.file.persist(target).map_err(|e| RenderdeskError::Io(e.error))?;
        Ok(target.to_path_buf())
    }
}
