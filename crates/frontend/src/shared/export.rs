/// Универсальный модуль для экспорта данных в CSV / JSON
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Download failed: {0}")]
    Browser(String),
}

/// Trait для типов, которые могут быть экспортированы в CSV
pub trait CsvExportable {
    /// Заголовки колонок
    fn headers() -> Vec<&'static str>;

    /// Значения строки в порядке заголовков
    fn to_csv_row(&self) -> Vec<String>;
}

/// RFC 4180 CSV with a UTF-8 BOM so spreadsheet apps pick the right encoding.
pub fn to_csv<T: CsvExportable>(data: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(T::headers())?;
    for item in data {
        writer.write_record(item.to_csv_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))?;

    let mut content = String::with_capacity(body.len() + 3);
    content.push('\u{FEFF}');
    content.push_str(&body);
    Ok(content)
}

/// Экспортирует список в CSV файл и инициирует скачивание
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), ExportError> {
    if data.is_empty() {
        return Err(ExportError::Empty);
    }
    let content = to_csv(data)?;
    download_text(&content, filename, "text/csv;charset=utf-8;")?;
    log::info!("Exported {} rows to {}", data.len(), filename);
    Ok(())
}

/// Pretty-printed JSON download
pub fn export_json<T: Serialize + ?Sized>(value: &T, filename: &str) -> Result<(), ExportError> {
    let content = serde_json::to_string_pretty(value)?;
    download_text(&content, filename, "application/json")
}

/// Инициирует скачивание текста через Blob + object URL
pub fn download_text(content: &str, filename: &str, mime: &str) -> Result<(), ExportError> {
    let blob = create_blob(content, mime)?;
    download_blob(&blob, filename)
}

fn browser_err(context: &str, e: impl std::fmt::Debug) -> ExportError {
    ExportError::Browser(format!("{}: {:?}", context, e))
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, ExportError> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| browser_err("Failed to create blob", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), ExportError> {
    let window = web_sys::window().ok_or_else(|| ExportError::Browser("No window object".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Browser("No document object".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Browser("No body element".into()))?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| browser_err("Failed to create object URL", e))?;

    // Временная ссылка: добавить в DOM, кликнуть, удалить
    let anchor = document
        .create_element("a")
        .map_err(|e| browser_err("Failed to create anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| browser_err("Failed to cast to anchor", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| browser_err("Failed to set style", e))?;

    body.append_child(&anchor)
        .map_err(|e| browser_err("Failed to append anchor", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| browser_err("Failed to remove anchor", e))?;

    Url::revoke_object_url(&url).map_err(|e| browser_err("Failed to revoke URL", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["ID", "Note"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_csv_escapes_delimiters_quotes_newlines() {
        let csv = to_csv(&[
            Row("1", "plain"),
            Row("2", "a, b"),
            Row("3", "say \"hi\""),
            Row("4", "line1\nline2"),
        ])
        .unwrap();

        assert!(csv.starts_with('\u{FEFF}'));
        let body = csv.trim_start_matches('\u{FEFF}');
        assert_eq!(
            body,
            "ID,Note\r\n1,plain\r\n2,\"a, b\"\r\n3,\"say \"\"hi\"\"\"\r\n4,\"line1\nline2\"\r\n"
        );
    }

    #[test]
    fn test_csv_headers_only_for_empty_set() {
        let csv = to_csv::<Row>(&[]).unwrap();
        assert_eq!(csv.trim_start_matches('\u{FEFF}'), "ID,Note\r\n");
    }

    #[test]
    fn test_export_empty_is_error() {
        assert!(matches!(export_to_csv::<Row>(&[], "x.csv"), Err(ExportError::Empty)));
    }
}
