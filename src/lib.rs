use wasm_bindgen::prelude::*;

pub mod agents;
pub mod error;
pub mod flow;
pub mod interaction;
pub mod logging;
pub mod math;
pub mod scene;

pub use error::{Result, SceneError};

use flow::Viewpoint;
use math::Vec3;
use scene::{ArrowVisual, SceneComposer, SceneConfig};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(log::LevelFilter::Info);
}

/// Scene engine exposed to JavaScript.
///
/// The host owns drawing, model loading and the orbit camera. Each frame it
/// reports the camera with `set_viewpoint`, calls `tick`, then reads
/// `agent_data` and `render_set_json` to update its meshes.
#[wasm_bindgen]
pub struct CarbonCycleScene {
    composer: SceneComposer,
}

#[wasm_bindgen]
impl CarbonCycleScene {
    /// Build the shipped carbon cycle scene with a random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<CarbonCycleScene, JsValue> {
        let config = SceneConfig::default_scene().map_err(to_js)?;
        Self::build(&config, None)
    }

    /// Build a scene from a YAML description. An explicit `seed` wins over
    /// the one in the YAML; with neither, the seed is random.
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str, seed: Option<u64>) -> std::result::Result<CarbonCycleScene, JsValue> {
        let config = SceneConfig::from_yaml(yaml).map_err(to_js)?;
        Self::build(&config, seed)
    }

    /// Advance agents and hovered labels. `time` is in seconds.
    #[wasm_bindgen]
    pub fn tick(&mut self, time: f32) {
        self.composer.tick(time);
    }

    /// Report the camera. `fov` is the vertical field of view in degrees.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn set_viewpoint(
        &mut self,
        px: f32,
        py: f32,
        pz: f32,
        tx: f32,
        ty: f32,
        tz: f32,
        fov: f32,
        aspect: f32,
    ) {
        self.composer.set_viewpoint(Viewpoint {
            position: Vec3::new(px, py, pz),
            target: Vec3::new(tx, ty, tz),
            fov: fov.to_radians(),
            aspect,
        });
    }

    /// Hover whatever arrow is under the pointer (normalized device
    /// coordinates, -1..1). Returns its index.
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, ndc_x: f32, ndc_y: f32) -> Option<u32> {
        self.composer.pointer_move(ndc_x, ndc_y).map(|i| i as u32)
    }

    /// Enter event from the host's own hit testing
    #[wasm_bindgen]
    pub fn pointer_enter(&mut self, index: u32) -> bool {
        self.composer.pointer_enter(index as usize)
    }

    #[wasm_bindgen]
    pub fn pointer_leave(&mut self, index: u32) -> bool {
        self.composer.pointer_leave(index as usize)
    }

    #[wasm_bindgen]
    pub fn set_show_arrows(&mut self, visible: bool) {
        self.composer.set_show_arrows(visible);
    }

    #[wasm_bindgen]
    pub fn set_show_overlay(&mut self, visible: bool) {
        self.composer.set_show_overlay(visible);
    }

    #[wasm_bindgen]
    pub fn show_arrows(&self) -> bool {
        self.composer.show_arrows()
    }

    #[wasm_bindgen]
    pub fn show_overlay(&self) -> bool {
        self.composer.show_overlay()
    }

    /// Tell the engine a model finished loading. Returns the number of
    /// items it unblocked.
    #[wasm_bindgen]
    pub fn mark_asset_loaded(&mut self, path: &str) -> u32 {
        self.composer.mark_asset_loaded(path) as u32
    }

    /// Model paths the host still has to load, as a JSON array
    #[wasm_bindgen]
    pub fn pending_assets_json(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.composer.pending_assets()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn agent_count(&self) -> u32 {
        self.composer.agent_count() as u32
    }

    #[wasm_bindgen]
    pub fn arrow_count(&self) -> u32 {
        self.composer.arrows().len() as u32
    }

    /// Flat `[x, y, z, heading]` per agent
    #[wasm_bindgen]
    pub fn agent_data(&self) -> Vec<f32> {
        agent_data(&self.composer)
    }

    /// Static path and arrowhead of every arrow, regardless of toggles
    #[wasm_bindgen]
    pub fn arrow_geometry_json(&self) -> std::result::Result<String, JsValue> {
        let arrows: Vec<ArrowVisual<'_>> = self
            .composer
            .arrows()
            .iter()
            .enumerate()
            .map(|(index, arrow)| ArrowVisual::new(index, arrow))
            .collect();
        serde_json::to_string(&arrows).map_err(to_js)
    }

    /// Everything to draw this frame
    #[wasm_bindgen]
    pub fn render_set_json(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.composer.render_set()).map_err(to_js)
    }

    /// Unmount; later ticks do nothing
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.composer.teardown();
    }

    #[wasm_bindgen]
    pub fn is_mounted(&self) -> bool {
        self.composer.is_mounted()
    }
}

impl CarbonCycleScene {
    fn build(config: &SceneConfig, seed: Option<u64>) -> std::result::Result<CarbonCycleScene, JsValue> {
        let seed = seed.or(config.seed).unwrap_or_else(host_seed);
        let composer = SceneComposer::from_config(config, seed).map_err(to_js)?;
        Ok(Self { composer })
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }
}

fn host_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn agent_data(composer: &SceneComposer) -> Vec<f32> {
    let mut data = Vec::with_capacity(composer.agent_count() * 4);
    for agent in composer.agents() {
        data.extend_from_slice(&agent.position.to_array());
        data.push(agent.heading);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_data_layout() {
        let composer = SceneComposer::default_scene(3).unwrap();
        let data = agent_data(&composer);
        assert_eq!(data.len(), composer.agent_count() * 4);

        let first = composer.agents().next().unwrap();
        assert_eq!(data[0], first.position.x);
        assert_eq!(data[2], first.position.z);
        assert_eq!(data[3], first.heading);
    }

    #[test]
    fn test_agent_data_empty_after_teardown() {
        let mut composer = SceneComposer::default_scene(3).unwrap();
        composer.teardown();
        assert!(agent_data(&composer).is_empty());
    }
}
