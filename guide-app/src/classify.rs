//! Bridge to the external image-classification capability.
//!
//! The model runs outside this crate; the page exposes it as
//! `window.artRecognition.classify(canvas)`, returning a promise of
//! `{ label, confidence }`. Everything about the inference pipeline is
//! opaque here.

use guide_core::{Classification, GuideError, GuideResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "artRecognition"], js_name = classify, catch)]
    fn classify_js(frame: &HtmlCanvasElement) -> Result<js_sys::Promise, JsValue>;
}

/// Classify one captured frame.
///
/// # Errors
///
/// Returns [`GuideError::CapabilityUnavailable`] when the capability is
/// missing or the inference rejects.
pub async fn classify_frame(frame: &HtmlCanvasElement) -> GuideResult<Classification> {
    let promise = classify_js(frame)
        .map_err(|_| GuideError::CapabilityUnavailable("recognition model".to_string()))?;
    let result = JsFuture::from(promise)
        .await
        .map_err(|_| GuideError::CapabilityUnavailable("inference failed".to_string()))?;
    parse_classification(&result)
}

fn parse_classification(value: &JsValue) -> GuideResult<Classification> {
    let label = js_sys::Reflect::get(value, &JsValue::from_str("label"))
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| {
            GuideError::CapabilityUnavailable("classification missing label".to_string())
        })?;
    let confidence = js_sys::Reflect::get(value, &JsValue::from_str("confidence"))
        .ok()
        .and_then(|v| v.as_f64())
        .ok_or_else(|| {
            GuideError::CapabilityUnavailable("classification missing confidence".to_string())
        })?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(Classification {
        label,
        confidence: confidence as f32,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn js_result(label: Option<&str>, confidence: Option<f64>) -> JsValue {
        let obj = js_sys::Object::new();
        if let Some(label) = label {
            let _ = js_sys::Reflect::set(
                &obj,
                &JsValue::from_str("label"),
                &JsValue::from_str(label),
            );
        }
        if let Some(confidence) = confidence {
            let _ = js_sys::Reflect::set(
                &obj,
                &JsValue::from_str("confidence"),
                &JsValue::from_f64(confidence),
            );
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn parses_well_formed_result() {
        let value = js_result(Some("artwork-7"), Some(0.82));
        let classification = parse_classification(&value).expect("parses");
        assert_eq!(classification.label, "artwork-7");
        assert!((classification.confidence - 0.82).abs() < 1e-6);
    }

    #[wasm_bindgen_test]
    fn missing_fields_are_capability_errors() {
        assert!(parse_classification(&js_result(None, Some(0.5))).is_err());
        assert!(parse_classification(&js_result(Some("x"), None)).is_err());
    }
}
