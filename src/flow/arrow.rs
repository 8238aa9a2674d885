use serde::{Deserialize, Serialize};
use crate::math::{Quat, Vec3, bezier_point, sample_path, orientation_from_direction};
use super::label::{LabelLayout, LabelPose, Viewpoint};

/// Geometry and label tunables shared by every arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowParams {
    /// Height of the bezier control point above the higher endpoint
    pub arc_height: f32,
    /// Number of path segments; the path holds one more point than this
    pub resolution: usize,
    /// Curve parameter sampled to aim the arrowhead
    pub look_ahead: f32,
    /// How far below the midpoint the hover label hangs
    pub label_drop: f32,
    /// Vertical distance between label lines
    pub line_spacing: f32,
    /// Tube radius for the rendered path
    pub tube_radius: f32,
}

impl Default for ArrowParams {
    fn default() -> Self {
        Self {
            arc_height: 2.0,
            resolution: 50,
            look_ahead: 0.6,
            label_drop: 0.6,
            line_spacing: 0.5,
            tube_radius: 0.03,
        }
    }
}

/// One curved carbon-transfer arrow between two reservoirs.
///
/// The path, midpoint and arrowhead are computed once in [`FlowArrow::new`]
/// and never touched again; only the hover flag and the label's billboard
/// rotation change afterwards.
#[derive(Debug, Clone)]
pub struct FlowArrow {
    source: Vec3,
    target: Vec3,
    color: String,
    label: Option<LabelLayout>,
    curve_points: Vec<Vec3>,
    control: Vec3,
    midpoint: Vec3,
    arrow_orientation: Quat,
    arrowhead_visible: bool,
    label_anchor: Vec3,
    tube_radius: f32,
    hovered: bool,
    label_orientation: Quat,
}

impl FlowArrow {
    pub fn new(source: Vec3, target: Vec3, color: &str, label: Option<&str>, params: &ArrowParams) -> Self {
        let control = Vec3::new(
            (source.x + target.x) / 2.0,
            source.y.max(target.y) + params.arc_height,
            (source.z + target.z) / 2.0,
        );

        let curve_points = sample_path(source, control, target, params.resolution);
        let midpoint = bezier_point(source, control, target, 0.5);
        let ahead = bezier_point(source, control, target, params.look_ahead);

        let (arrow_orientation, arrowhead_visible) = match orientation_from_direction(ahead - midpoint) {
            Some(q) => (q, true),
            None => {
                log::warn!(
                    "degenerate arrow direction from {:?} to {:?}, hiding arrowhead",
                    source,
                    target
                );
                (Quat::IDENTITY, false)
            }
        };

        let label = label
            .map(|text| LabelLayout::new(text, params.line_spacing))
            .filter(|layout| !layout.is_empty());

        Self {
            source,
            target,
            color: color.to_string(),
            label,
            curve_points,
            control,
            midpoint,
            arrow_orientation,
            arrowhead_visible,
            label_anchor: midpoint - Vec3::new(0.0, params.label_drop, 0.0),
            tube_radius: params.tube_radius,
            hovered: false,
            label_orientation: Quat::IDENTITY,
        }
    }

    pub fn source(&self) -> Vec3 {
        self.source
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn label(&self) -> Option<&LabelLayout> {
        self.label.as_ref()
    }

    pub fn curve_points(&self) -> &[Vec3] {
        &self.curve_points
    }

    pub fn control_point(&self) -> Vec3 {
        self.control
    }

    pub fn midpoint(&self) -> Vec3 {
        self.midpoint
    }

    pub fn arrow_orientation(&self) -> Quat {
        self.arrow_orientation
    }

    pub fn tube_radius(&self) -> f32 {
        self.tube_radius
    }

    /// False when the tangent at the midpoint was degenerate
    pub fn arrowhead_visible(&self) -> bool {
        self.arrowhead_visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Turn the label toward the camera. Does nothing unless hovered.
    pub fn update(&mut self, viewpoint: &Viewpoint) {
        if !self.hovered {
            return;
        }
        self.label_orientation = viewpoint.billboard();
    }

    /// Label placement for this frame, present only while hovered
    pub fn label_pose(&self) -> Option<LabelPose> {
        if !self.hovered || self.label.is_none() {
            return None;
        }
        Some(LabelPose {
            anchor: self.label_anchor,
            orientation: self.label_orientation,
        })
    }

    /// Emissive glow at render time `time` (seconds)
    pub fn glow_intensity(time: f32) -> f32 {
        0.5 + (time * 3.0).sin() * 0.3
    }
}
