//! Clipboard utilities (Web Clipboard API)

use wasm_bindgen_futures::spawn_local;

/// Copies `text` and reports the outcome to `on_done`.
///
/// # Example
/// ```ignore
/// copy_to_clipboard("1250", |result| log::info!("{:?}", result));
/// ```
pub fn copy_to_clipboard<F>(text: &str, on_done: F)
where
    F: FnOnce(Result<(), String>) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(Err("No window object".to_string()));
            return;
        };
        let clipboard = window.navigator().clipboard();
        let result = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text))
            .await
            .map(|_| ())
            .map_err(|e| format!("Clipboard write failed: {:?}", e));
        if let Err(e) = &result {
            log::warn!("{}", e);
        }
        on_done(result);
    });
}
