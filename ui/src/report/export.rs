use base64::{engine::general_purpose::STANDARD, Engine as _};
use dioxus::prelude::*;

use super::Report;
use crate::core::platform;
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

#[component]
pub fn ReportExportPanel(report: Report) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);
    let has_chart = report.chart.is_some();

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("report-card__meta".to_string(), t!("export-working"))),
        ExportStatus::Done(message) => Some((
            "report-card__meta report-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "report-card__meta report-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let json_handler = {
        let report = report.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working);
            let report = report.clone();
            platform::spawn_future(async move {
                match perform_json_export(&report).await {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            });
        }
    };

    let png_handler = {
        let report = report.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working);
            let report = report.clone();
            platform::spawn_future(async move {
                match perform_png_export(&report).await {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        div { class: "report-card report-export",
            h3 { {t!("export-title")} }
            div { class: "report-export__actions",
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: json_handler,
                    {t!("export-copy-json")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy() || !has_chart,
                    onclick: png_handler,
                    {t!("export-save-chart")}
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

async fn perform_json_export(report: &Report) -> Result<String, String> {
    let json = serde_json::to_string_pretty(report).map_err(|err| err.to_string())?;
    copy_to_clipboard(json).await?;
    Ok(t!("export-json-copied"))
}

async fn perform_png_export(report: &Report) -> Result<String, String> {
    let bytes = chart_bytes(report)?;
    let filename = format!("yabasa-chart-{}.png", crate::core::format::file_stamp());
    let delivery = download_bytes(&filename, "image/png", bytes).await?;
    Ok(match delivery {
        Some(path) => t!("export-chart-saved", path = path),
        None => t!("export-chart-downloaded"),
    })
}

fn chart_bytes(report: &Report) -> Result<Vec<u8>, String> {
    let chart = report.chart.as_ref().ok_or_else(|| t!("export-no-chart"))?;
    STANDARD
        .decode(chart.png_base64.as_bytes())
        .map_err(|err| err.to_string())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .map(|html| html.exec_command("copy").unwrap_or(false))
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err("Clipboard copy blocked".into())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        fs::write(&path, &bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Yabasa", "Yabasa")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChartImage, Headline, ReportMeta};

    fn report(chart: Option<&str>) -> Report {
        Report {
            headline: Headline {
                total: "1".into(),
                label: "低".into(),
                meta: ReportMeta::default(),
            },
            chart: chart.map(|png| ChartImage {
                png_base64: png.into(),
            }),
            legend: vec![],
            table: vec![],
            evidence: vec![],
            recommendations: vec![],
            reasons: vec![],
        }
    }

    #[test]
    fn chart_bytes_are_the_decoded_png() {
        let bytes = chart_bytes(&report(Some("iVBORw0KGgo="))).unwrap();
        assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn report_serializes_for_json_export() {
        let json = serde_json::to_value(report(None)).unwrap();
        assert_eq!(json["headline"]["label"], "低");
        assert!(json["chart"].is_null());
    }
}
