use common::{SAMPLE_CSV, SAMPLE_CSV_FILE_NAME};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers the bundled sample history as a file download.
pub fn download_sample() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(SAMPLE_CSV));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(SAMPLE_CSV_FILE_NAME);
    anchor.click();

    Url::revoke_object_url(&url)?;
    log::debug!("Sample CSV offered as {}", SAMPLE_CSV_FILE_NAME);
    Ok(())
}
