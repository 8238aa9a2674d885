//! Facade tests, run in a browser or node with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use carbon_cycle_scene::CarbonCycleScene;
use wasm_bindgen_test::*;

const TWO_RESERVOIRS: &str = r#"
reservoirs:
  - name: atmosphere
    position: [0.0, 2.5, 0.0]
  - name: ocean
    position: [-4.0, -1.0, 0.0]
edges:
  - from: ocean
    to: atmosphere
    label: "Outgassing"
enclosures:
  - name: pen
    bounds: { x_min: 0.0, x_max: 2.0, z_min: 0.0, z_max: 2.0 }
    agents:
      - [1.0, 0.0, 1.0]
"#;

#[wasm_bindgen_test]
fn default_scene_builds() {
    let scene = CarbonCycleScene::new().unwrap();
    assert_eq!(scene.arrow_count(), 9);
    assert_eq!(scene.agent_data().len(), scene.agent_count() as usize * 4);
    assert!(scene.pending_assets_json().unwrap().contains("minecraft_cow.glb"));
}

#[wasm_bindgen_test]
fn bad_yaml_is_reported() {
    let yaml = "reservoirs: []\nedges:\n  - from: a\n    to: b\n";
    assert!(CarbonCycleScene::from_yaml(yaml, Some(1)).is_err());
}

#[wasm_bindgen_test]
fn seeded_scenes_match() {
    let mut a = CarbonCycleScene::from_yaml(TWO_RESERVOIRS, Some(9)).unwrap();
    let mut b = CarbonCycleScene::from_yaml(TWO_RESERVOIRS, Some(9)).unwrap();
    for frame in 0..120 {
        a.tick(frame as f32 / 60.0);
        b.tick(frame as f32 / 60.0);
    }
    assert_eq!(a.agent_data(), b.agent_data());
}

#[wasm_bindgen_test]
fn hover_label_appears_in_render_set() {
    let mut scene = CarbonCycleScene::from_yaml(TWO_RESERVOIRS, Some(1)).unwrap();
    assert!(!scene.render_set_json().unwrap().contains("Outgassing"));

    assert!(scene.pointer_enter(0));
    scene.tick(0.016);
    assert!(scene.render_set_json().unwrap().contains("Outgassing"));

    scene.set_show_arrows(false);
    assert!(!scene.render_set_json().unwrap().contains("Outgassing"));
    assert!(scene.arrow_geometry_json().unwrap().contains("\"hovered\":true"));
}

#[wasm_bindgen_test]
fn dispose_freezes_agents() {
    let mut scene = CarbonCycleScene::from_yaml(TWO_RESERVOIRS, Some(1)).unwrap();
    scene.dispose();
    scene.tick(1.0);
    assert!(!scene.is_mounted());
    assert!(scene.agent_data().is_empty());
}
