use crate::models::FileUpload;
use wasm_bindgen_futures::JsFuture;

/// Read a browser `File` into memory for a multipart upload.
pub(crate) async fn read_file(file: web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read {}: {e:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(FileUpload {
        file_name: file.name(),
        mime: file.type_(),
        bytes,
    })
}

/// First file selected in an `<input type="file">`, if any.
pub(crate) fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = ev
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0);
    // Clear so picking the same file again still fires `change`.
    input.set_value("");
    file
}
