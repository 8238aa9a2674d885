use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::agents::{Bounds, WanderParams};
use crate::error::{Result, SceneError};
use crate::flow::ArrowParams;

/// The scene shipped with the crate
pub const DEFAULT_SCENE_YAML: &str = include_str!("default_scene.yaml");

/// YAML description of a whole carbon cycle scene
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneConfig {
    /// Seed for agent motion; the host picks one when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub arrow: ArrowParams,
    /// How close (world units) the pointer ray must pass to hover an arrow
    #[serde(default = "default_pick_radius")]
    pub pick_radius: f32,
    pub reservoirs: Vec<ReservoirConfig>,
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
    #[serde(default)]
    pub enclosures: Vec<EnclosureConfig>,
    #[serde(default)]
    pub scenery: Vec<SceneryConfig>,
}

fn default_pick_radius() -> f32 {
    0.15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservoirConfig {
    pub name: String,
    pub position: [f32; 3],
    /// Display name; defaults to `name`
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_label_color")]
    pub color: String,
    /// Where the name label sits relative to `position`
    #[serde(default)]
    pub label_offset: [f32; 3],
}

fn default_label_color() -> String {
    "white".to_string()
}

/// One row of the flow table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeConfig {
    pub from: String,
    pub to: String,
    #[serde(default = "default_edge_color")]
    pub color: String,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_edge_color() -> String {
    "cyan".to_string()
}

/// A pen of wandering agents sharing one bounding box
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnclosureConfig {
    pub name: String,
    pub bounds: Bounds,
    /// Initial position of each agent
    #[serde(default)]
    pub agents: Vec<[f32; 3]>,
    #[serde(default)]
    pub wander: WanderParams,
    /// Ground height for a fence around the bounds; no fence when absent
    #[serde(default)]
    pub fence_y: Option<f32>,
    /// Host-loaded model drawn for each agent
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_scale")]
    pub model_scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneryKind {
    /// Loaded by the host from `path`
    Model,
    Sphere,
    Disc,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneryConfig {
    pub name: String,
    pub kind: SceneryKind,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_scale")]
    pub radius: f32,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_scale() -> f32 {
    1.0
}

impl SceneConfig {
    /// Parse and validate a scene from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in carbon cycle scene
    pub fn default_scene() -> Result<Self> {
        Self::from_yaml(DEFAULT_SCENE_YAML)
    }

    pub fn validate(&self) -> Result<()> {
        if self.arrow.resolution == 0 {
            return Err(SceneError::InvalidResolution);
        }

        let mut names = HashSet::new();
        for reservoir in &self.reservoirs {
            if !names.insert(reservoir.name.as_str()) {
                return Err(SceneError::DuplicateReservoir(reservoir.name.clone()));
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for name in [&edge.from, &edge.to] {
                if !names.contains(name.as_str()) {
                    return Err(SceneError::UnknownReservoir {
                        index,
                        name: name.clone(),
                    });
                }
            }
        }

        for enclosure in &self.enclosures {
            if !enclosure.bounds.is_valid() {
                return Err(SceneError::InvalidBounds(enclosure.name.clone()));
            }
        }

        for item in &self.scenery {
            if item.kind == SceneryKind::Model && item.path.is_none() {
                return Err(SceneError::MissingModelPath(item.name.clone()));
            }
        }

        Ok(())
    }

    pub fn reservoir(&self, name: &str) -> Option<&ReservoirConfig> {
        self.reservoirs.iter().find(|r| r.name == name)
    }
}
