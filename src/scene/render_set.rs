use serde::Serialize;
use crate::flow::{FlowArrow, LabelLine};
use crate::math::{Quat, Vec3};
use super::fence::{Fence, Rail};
use super::composer::{ReservoirPoint, SceneryItem};

/// Everything the host should draw this frame.
///
/// Borrows from the composer; nothing here is copied out of the arrows or
/// agents, so a visibility toggle cannot change what they hold.
#[derive(Debug, Serialize)]
pub struct RenderSet<'a> {
    pub time: f32,
    /// Shared emissive pulse for every arrow
    pub glow: f32,
    pub arrows: Vec<ArrowVisual<'a>>,
    pub labels: Vec<LabelVisual<'a>>,
    pub reservoir_labels: Vec<ReservoirLabel<'a>>,
    pub agents: Vec<AgentPose<'a>>,
    pub scenery: Vec<&'a SceneryItem>,
    pub fences: Vec<FenceVisual>,
}

#[derive(Debug, Serialize)]
pub struct ArrowVisual<'a> {
    #[serde(skip)]
    pub arrow: &'a FlowArrow,
    pub index: usize,
    pub color: &'a str,
    pub points: &'a [Vec3],
    pub tube_radius: f32,
    pub head_position: Vec3,
    pub head_orientation: Quat,
    pub head_visible: bool,
    pub hovered: bool,
}

impl<'a> ArrowVisual<'a> {
    pub fn new(index: usize, arrow: &'a FlowArrow) -> Self {
        Self {
            arrow,
            index,
            color: arrow.color(),
            points: arrow.curve_points(),
            tube_radius: arrow.tube_radius(),
            head_position: arrow.midpoint(),
            head_orientation: arrow.arrow_orientation(),
            head_visible: arrow.arrowhead_visible(),
            hovered: arrow.is_hovered(),
        }
    }
}

/// A hover label placed and turned toward the camera
#[derive(Debug, Serialize)]
pub struct LabelVisual<'a> {
    pub arrow_index: usize,
    pub color: &'a str,
    pub lines: &'a [LabelLine],
    pub anchor: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Serialize)]
pub struct AgentPose<'a> {
    pub position: Vec3,
    pub heading: f32,
    /// Host model drawn for the agent, if its enclosure names one
    pub model: Option<&'a str>,
    pub model_scale: f32,
}

/// Reservoir name placed at its label offset
#[derive(Debug, Serialize)]
pub struct ReservoirLabel<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub color: &'a str,
    pub position: Vec3,
}

impl<'a> From<&'a ReservoirPoint> for ReservoirLabel<'a> {
    fn from(r: &'a ReservoirPoint) -> Self {
        Self {
            name: &r.name,
            text: &r.label,
            color: &r.color,
            position: r.label_position(),
        }
    }
}

/// Fence run with its posts and rails laid out in world space
#[derive(Debug, Serialize)]
pub struct FenceVisual {
    pub rotation_y: f32,
    pub posts: Vec<Vec3>,
    pub rails: [Rail; 2],
}

impl From<&Fence> for FenceVisual {
    fn from(fence: &Fence) -> Self {
        Self {
            rotation_y: fence.rotation_y,
            posts: fence.posts(),
            rails: fence.rails(),
        }
    }
}
