use callout_shared::session::ExportArtifact;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const EXPORT_MIME: &str = "application/json";

fn js_error(context: &str, err: JsValue) -> String {
    match err.as_string() {
        Some(msg) => format!("{}: {}", context, msg),
        None => context.to_string(),
    }
}

/// Save the artifact through a temporary `<a download>` link.
pub fn download(artifact: &ExportArtifact) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let body = document.body().ok_or("No document body")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.contents));
    let options = BlobPropertyBag::new();
    options.set_type(EXPORT_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("Failed to build export", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| js_error("Failed to build export", e))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("Failed to start download", e))?
        .dyn_into()
        .map_err(|_| "Failed to start download".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    let _ = anchor.set_attribute("style", "display:none;");

    body.append_child(&anchor)
        .map_err(|e| js_error("Failed to start download", e))?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();
    Ok(())
}

/// Put the artifact's JSON on the clipboard.
pub async fn copy_to_clipboard(artifact: &ExportArtifact) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&artifact.contents))
        .await
        .map(|_| ())
        .map_err(|e| js_error("Failed to copy to clipboard", e))
}
