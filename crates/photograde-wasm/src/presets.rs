//! Preset catalogue and Lightroom import for JavaScript.
//!
//! Presets cross the boundary as plain objects in the same shape the web
//! UI stores them: `{id, name, icon, description, filters}` with camelCase
//! filter keys.

use std::collections::HashSet;

use photograde_core::{import_preset, ImportOptions};
use wasm_bindgen::prelude::*;

/// Get the built-in preset catalogue.
///
/// Returns an array of preset objects, starting with the neutral
/// "Original" look.
///
/// # Example (TypeScript)
/// ```typescript
/// for (const preset of builtin_presets()) {
///   console.log(`${preset.icon} ${preset.name}`);
/// }
/// ```
#[wasm_bindgen]
pub fn builtin_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&photograde_core::builtin_presets())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Look up a built-in preset by its id.
///
/// Returns the preset object, or `null` for an unknown id.
#[wasm_bindgen]
pub fn preset_by_id(id: &str) -> Result<JsValue, JsValue> {
    match photograde_core::preset_by_id(id) {
        Some(preset) => {
            serde_wasm_bindgen::to_value(&preset).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(JsValue::NULL),
    }
}

/// Import a Lightroom preset file (.xmp or .lrtemplate) as a preset object.
///
/// The preset's name comes from the file name. Pass the names already in
/// use to get a free name; "Sunset" becomes "Sunset (2)" and so on. The
/// caller owns its name list and should add the returned preset's name to
/// it.
///
/// # Arguments
/// * `file_name` - The uploaded file's name, used for format detection and naming
/// * `text` - The file's text content
/// * `existing_names` - Preset names already in use, or undefined
/// * `icon` - Icon for the new preset, or undefined for the import default
/// * `description` - Description for the new preset, or undefined for the default
///
/// # Errors
///
/// Returns an error for unsupported file types, malformed XMP, or files
/// with no recognized Lightroom settings.
///
/// # Example (TypeScript)
/// ```typescript
/// const text = await file.text();
/// const names = presets.map((p) => p.name);
/// const preset = import_lightroom_preset(file.name, text, names);
/// presets.push(preset);
/// ```
#[wasm_bindgen]
pub fn import_lightroom_preset(
    file_name: &str,
    text: &str,
    existing_names: Option<Vec<String>>,
    icon: Option<String>,
    description: Option<String>,
) -> Result<JsValue, JsValue> {
    let mut names: HashSet<String> = existing_names.unwrap_or_default().into_iter().collect();
    let options = ImportOptions {
        icon: icon.as_deref(),
        description: description.as_deref(),
        existing_names: Some(&mut names),
    };
    let preset =
        import_preset(file_name, text, options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&preset).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue and serde_wasm_bindgen.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MINIMAL_XMP: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description crs:Exposure2012="0.5" crs:Contrast2012="25"/>
 </rdf:RDF>
</x:xmpmeta>"#;

    fn get(value: &JsValue, key: &str) -> JsValue {
        js_sys::Reflect::get(value, &key.into()).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_builtin_presets_serialize_in_order() {
        let value = builtin_presets().unwrap();
        assert!(js_sys::Array::is_array(&value));

        let array = js_sys::Array::from(&value);
        assert_eq!(array.length(), 12);

        let first = array.get(0);
        assert_eq!(get(&first, "id").as_string().unwrap(), "original");
        assert_eq!(get(&first, "name").as_string().unwrap(), "Original");
    }

    #[wasm_bindgen_test]
    fn test_preset_by_id_returns_the_preset() {
        let value = preset_by_id("vivid").unwrap();
        assert_eq!(get(&value, "name").as_string().unwrap(), "Vivid");

        let filters = get(&value, "filters");
        assert_eq!(get(&filters, "vibrance").as_f64().unwrap(), 35.0);
    }

    #[wasm_bindgen_test]
    fn test_preset_by_id_unknown_is_null() {
        assert!(preset_by_id("no-such-look").unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_import_builds_a_preset_object() {
        let value =
            import_lightroom_preset("Golden Hour.xmp", MINIMAL_XMP, None, None, None).unwrap();

        assert_eq!(get(&value, "name").as_string().unwrap(), "Golden Hour");
        assert_eq!(get(&value, "id").as_string().unwrap(), "custom-golden-hour");

        let filters = get(&value, "filters");
        assert_eq!(get(&filters, "exposure").as_f64().unwrap(), 10.0);
        assert_eq!(get(&filters, "contrast").as_f64().unwrap(), 25.0);
    }

    #[wasm_bindgen_test]
    fn test_import_steps_past_taken_names() {
        let taken = vec!["Golden Hour".to_string()];
        let value =
            import_lightroom_preset("Golden Hour.xmp", MINIMAL_XMP, Some(taken), None, None)
                .unwrap();

        assert_eq!(get(&value, "name").as_string().unwrap(), "Golden Hour (2)");
    }

    #[wasm_bindgen_test]
    fn test_import_honors_caller_icon_and_description() {
        let value = import_lightroom_preset(
            "Look.xmp",
            MINIMAL_XMP,
            None,
            Some("🌇".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(get(&value, "icon").as_string().unwrap(), "🌇");
        assert_eq!(
            get(&value, "description").as_string().unwrap(),
            "Imported from Lightroom"
        );
    }

    #[wasm_bindgen_test]
    fn test_import_rejects_unknown_extension() {
        let result = import_lightroom_preset("look.png", MINIMAL_XMP, None, None, None);
        assert!(result.is_err());
        let message = result.err().unwrap().as_string().unwrap_or_default();
        assert!(
            message.contains("Unsupported preset file type"),
            "got: {}",
            message
        );
    }
}
