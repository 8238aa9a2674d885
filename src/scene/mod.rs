//! Scene assembly
//!
//! Loads the reservoir and edge tables from YAML, builds the arrows, agents,
//! fences and scenery, and answers "what should be drawn now".

mod composer;
mod config;
mod fence;
mod render_set;

pub use composer::{AssetState, ReservoirPoint, SceneComposer, SceneryItem};
pub use config::{
    EdgeConfig, EnclosureConfig, ReservoirConfig, SceneConfig, SceneryConfig, SceneryKind,
    DEFAULT_SCENE_YAML,
};
pub use fence::{Fence, Rail, POST_SPACING};
pub use render_set::{AgentPose, ArrowVisual, LabelVisual, RenderSet};
