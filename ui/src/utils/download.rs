//! Hand exported bytes to the browser as a file download.

use anyhow::{Context, anyhow};
use wasm_bindgen::JsCast;

/// Offer `bytes` as a download named `file_name`.
pub fn save_bytes(
    bytes: &[u8],
    file_name: &str,
    mime_type: &str,
) -> anyhow::Result<()> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob =
        web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| anyhow!("could not create blob: {e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| anyhow!("could not create object url: {e:?}"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .context("no document")?;
    let anchor = document
        .create_element("a")
        .map_err(|e| anyhow!("could not create link: {e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| anyhow!("created element is not a link"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
        .map_err(|e| anyhow!("could not revoke object url: {e:?}"))
}

/// File name for an export of `path`, e.g. `students-2024-05-01.csv`.
pub fn export_file_name(path: &str, date: jiff::civil::Date) -> String {
    format!("{path}-{date}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_carry_the_date() {
        let date = jiff::civil::date(2024, 5, 1);
        assert_eq!(
            export_file_name("students", date),
            "students-2024-05-01.csv"
        );
    }
}
