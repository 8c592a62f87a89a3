#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `CoilGen` WASM module: parametric PCB coil footprints and their previews.

pub mod coil;
pub mod error;
pub mod geometry;

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::coil::{
    layout_flux_neutral, layout_single_turn, layout_spiral, CoilConfig, CoilLayout,
    FluxNeutralConfig, Layer, SingleTurnConfig,
};
use crate::geometry::{LayerGeometry, LayerMeta};

thread_local! {
    static LAST_LAYOUT: RefCell<Option<CoilLayout>> = const { RefCell::new(None) };
    static LAST_GEOMETRY: RefCell<Option<LayerGeometry>> = const { RefCell::new(None) };
}

fn store_layout(layout: &CoilLayout) {
    LAST_LAYOUT.with(|l| {
        *l.borrow_mut() = Some(layout.clone());
    });
    // A new layout invalidates the previous preview.
    LAST_GEOMETRY.with(|g| {
        *g.borrow_mut() = None;
    });
}

fn store_geometry(geom: LayerGeometry) {
    LAST_GEOMETRY.with(|g| {
        *g.borrow_mut() = Some(geom);
    });
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("invalid configuration: {e}")))
}

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Default spiral parameters, for pre-filling a host form.
///
/// # Errors
///
/// Returns an error string if serialisation fails.
#[wasm_bindgen]
pub fn default_coil_config() -> Result<JsValue, JsValue> {
    to_js(&CoilConfig::default())
}

/// Default single-turn parameters.
///
/// # Errors
///
/// Returns an error string if serialisation fails.
#[wasm_bindgen]
pub fn default_single_turn_config() -> Result<JsValue, JsValue> {
    to_js(&SingleTurnConfig::default())
}

/// Default flux-neutral parameters.
///
/// # Errors
///
/// Returns an error string if serialisation fails.
#[wasm_bindgen]
pub fn default_flux_neutral_config() -> Result<JsValue, JsValue> {
    to_js(&FluxNeutralConfig::default())
}

/// Generate a two-layer spiral from a (possibly partial) camelCase config.
///
/// Returns the serialised `CoilLayout`. The layout is also kept internally
/// for [`render_layer`].
///
/// # Errors
///
/// Returns a descriptive error string for an invalid configuration or a
/// degenerate layout.
#[wasm_bindgen]
pub fn generate_coil(config: JsValue) -> Result<JsValue, JsValue> {
    let config: CoilConfig = from_js(config)?;
    let layout = generate_coil_internal(&config).map_err(|e| JsValue::from_str(&e))?;
    to_js(&layout)
}

/// Internal spiral generation shared between the wasm export and native tests.
#[doc(hidden)]
pub fn generate_coil_internal(config: &CoilConfig) -> Result<CoilLayout, String> {
    let layout = layout_spiral(config).map_err(|e| e.to_string())?;
    store_layout(&layout);
    Ok(layout)
}

/// Generate a single-layer, single-turn loop.
///
/// # Errors
///
/// Returns a descriptive error string for an invalid configuration or an
/// unsolvable gap.
#[wasm_bindgen]
pub fn generate_single_turn(config: JsValue) -> Result<JsValue, JsValue> {
    let config: SingleTurnConfig = from_js(config)?;
    let layout = generate_single_turn_internal(&config).map_err(|e| JsValue::from_str(&e))?;
    to_js(&layout)
}

/// Internal single-turn generation shared with native tests.
#[doc(hidden)]
pub fn generate_single_turn_internal(config: &SingleTurnConfig) -> Result<CoilLayout, String> {
    let layout = layout_single_turn(config).map_err(|e| e.to_string())?;
    store_layout(&layout);
    Ok(layout)
}

/// Generate a flux-neutral coil.
///
/// # Errors
///
/// Returns a descriptive error string for an invalid configuration or a coil
/// that does not fit its aperture.
#[wasm_bindgen]
pub fn generate_flux_neutral(config: JsValue) -> Result<JsValue, JsValue> {
    let config: FluxNeutralConfig = from_js(config)?;
    let layout = generate_flux_neutral_internal(&config).map_err(|e| JsValue::from_str(&e))?;
    to_js(&layout)
}

/// Internal flux-neutral generation shared with native tests.
#[doc(hidden)]
pub fn generate_flux_neutral_internal(config: &FluxNeutralConfig) -> Result<CoilLayout, String> {
    let layout = layout_flux_neutral(config).map_err(|e| e.to_string())?;
    store_layout(&layout);
    Ok(layout)
}

/// Tessellate one layer of the last generated layout.
///
/// `layer` is a board layer name such as `F.Cu` or `User_1`. Returns
/// `LayerMeta`; retrieve the buffers with [`get_positions`] and
/// [`get_indices`].
///
/// # Errors
///
/// Returns a descriptive error string for an unknown layer, when nothing has
/// been generated yet, or when tessellation fails.
#[wasm_bindgen]
pub fn render_layer(layer: &str) -> Result<JsValue, JsValue> {
    let meta = render_layer_internal(layer).map_err(|e| JsValue::from_str(&e))?;
    to_js(&meta)
}

/// Internal preview logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn render_layer_internal(layer: &str) -> Result<LayerMeta, String> {
    let layer: Layer = layer.parse().map_err(|e: error::CoilError| e.to_string())?;
    let geom = LAST_LAYOUT.with(|l| match l.borrow().as_ref() {
        Some(layout) => {
            geometry::render_layer(&layout.instructions, layer).map_err(|e| e.to_string())
        }
        None => Err("no layout generated yet".to_string()),
    })?;
    let meta = geom.meta();
    store_geometry(geom);
    Ok(meta)
}

/// Retrieve the position buffer for the last rendered layer.
///
/// Returns a copy of the interleaved `[x0, y0, x1, y1, ...]` positions.
/// Returns an empty array if no layer has been rendered yet.
#[wasm_bindgen]
pub fn get_positions() -> Vec<f32> {
    LAST_GEOMETRY.with(|g| {
        g.borrow()
            .as_ref()
            .map_or_else(Vec::new, |geom| geom.positions.clone())
    })
}

/// Retrieve the index buffer for the last rendered layer.
///
/// Returns a copy of the triangle-list indices.
/// Returns an empty array if no layer has been rendered yet.
#[wasm_bindgen]
pub fn get_indices() -> Vec<u32> {
    LAST_GEOMETRY.with(|g| {
        g.borrow()
            .as_ref()
            .map_or_else(Vec::new, |geom| geom.indices.clone())
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn clear_state() {
        LAST_LAYOUT.with(|l| *l.borrow_mut() = None);
        LAST_GEOMETRY.with(|g| *g.borrow_mut() = None);
    }

    #[test]
    fn render_before_generate_is_an_error() {
        clear_state();
        let result = render_layer_internal("F.Cu");
        assert!(result.is_err(), "nothing generated => Err");
        assert!(get_positions().is_empty());
        assert!(get_indices().is_empty());
    }

    #[test]
    fn generate_then_render_fills_buffers() {
        clear_state();
        let layout = generate_coil_internal(&CoilConfig::default()).expect("layout");
        assert_eq!(layout.net_tie_pad_group(), "1,2,3");

        let meta = render_layer_internal("B.Cu").expect("render");
        assert!(meta.vertex_count > 0);
        assert_eq!(get_positions().len(), meta.vertex_count as usize * 2);
        assert_eq!(get_indices().len(), meta.index_count as usize);
    }

    #[test]
    fn unknown_layer_is_rejected() {
        clear_state();
        generate_coil_internal(&CoilConfig::default()).expect("layout");
        assert!(render_layer_internal("Q.Cu").is_err());
    }

    #[test]
    fn failed_generation_keeps_the_previous_layout() {
        clear_state();
        generate_single_turn_internal(&SingleTurnConfig::default()).expect("layout");
        let bad = SingleTurnConfig {
            radius: -1.0,
            ..SingleTurnConfig::default()
        };
        let err = generate_single_turn_internal(&bad).err().unwrap_or_default();
        assert!(err.starts_with("invalid configuration"), "got {err}");
        assert!(render_layer_internal("F.Cu").is_ok());
    }

    #[test]
    fn new_layout_drops_the_stale_preview() {
        clear_state();
        generate_flux_neutral_internal(&FluxNeutralConfig::default()).expect("layout");
        render_layer_internal("In1.Cu").expect("render");
        assert!(!get_indices().is_empty());
        generate_coil_internal(&CoilConfig::default()).expect("layout");
        assert!(get_indices().is_empty());
    }
}
