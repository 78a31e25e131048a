use serde::Deserialize;
use svguri::dump::ViewDump;
use svguri::{RenderOptions, render_document};
use wasm_bindgen::prelude::*;

/// Output flags read from the same options object as [`RenderOptions`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DumpOptions {
    pretty: bool,
}

fn parse_options(raw: &str) -> Result<(RenderOptions, DumpOptions), String> {
    let render_options = RenderOptions::from_json(raw).map_err(|error| error.to_string())?;
    let dump_options = match serde_json::from_str::<DumpOptions>(raw) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str::<DumpOptions>(raw).map_err(|error| error.to_string())?,
    };
    Ok((render_options, dump_options))
}

/// Maps SVG text into its primitive tree, returned as JSON.
#[wasm_bindgen]
pub fn render_svg_json(svg: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let (render_options, dump_options) = match options_json {
        Some(raw_options) => {
            parse_options(&raw_options).map_err(|error| JsValue::from_str(&error))?
        }
        None => (RenderOptions::default(), DumpOptions::default()),
    };

    let view = render_document(svg, &render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    ViewDump::from_view(&view)
        .to_json(dump_options.pretty)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
