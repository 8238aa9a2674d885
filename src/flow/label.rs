use serde::Serialize;
use crate::math::{Quat, Vec3, billboard_orientation};

/// One rendered line of a hover label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLine {
    pub text: String,
    /// Vertical offset from the anchor
    pub offset: f32,
}

/// Multi-line text block centered on an anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLayout {
    pub lines: Vec<LabelLine>,
}

impl LabelLayout {
    /// Split on line breaks and stack the lines `spacing` apart, centered on
    /// the anchor. Accepts both real newlines and the two-character `\n`
    /// marker that shows up in hand-written config. Blank lines are dropped.
    pub fn new(text: &str, spacing: f32) -> Self {
        let normalized = text.replace("\\n", "\n");
        let parts: Vec<&str> = normalized
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let center = (parts.len() as f32 - 1.0) / 2.0;

        let lines = parts
            .iter()
            .enumerate()
            .map(|(i, line)| LabelLine {
                text: line.to_string(),
                offset: (center - i as f32) * spacing,
            })
            .collect();

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Active camera view, as reported by the host's orbit controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewpoint {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 4.0, 10.0),
            target: Vec3::ZERO,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
        }
    }
}

impl Viewpoint {
    pub fn billboard(&self) -> Quat {
        billboard_orientation(self.position, self.target)
    }
}

/// Where and how a hover label is drawn this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPose {
    pub anchor: Vec3,
    pub orientation: Quat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_lines_symmetric() {
        let layout = LabelLayout::new("A\nB\nC", 0.5);
        let offsets: Vec<f32> = layout.lines.iter().map(|l| l.offset).collect();
        assert_eq!(layout.len(), 3);
        assert!((offsets[0] - 0.5).abs() < 0.0001);
        assert!(offsets[1].abs() < 0.0001);
        assert!((offsets[2] + 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_single_line_on_anchor() {
        let layout = LabelLayout::new("Photosynthesis", 0.5);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.lines[0].offset, 0.0);
    }

    #[test]
    fn test_two_lines_centered() {
        let layout = LabelLayout::new("Ocean\nabsorption", 0.5);
        assert!((layout.lines[0].offset - 0.25).abs() < 0.0001);
        assert!((layout.lines[1].offset + 0.25).abs() < 0.0001);
        assert_eq!(layout.lines[1].text, "absorption");
    }

    #[test]
    fn test_escaped_line_marker() {
        let layout = LabelLayout::new(r"Burning\nfossil fuels", 0.5);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.lines[0].text, "Burning");
    }

    #[test]
    fn test_empty_label() {
        assert!(LabelLayout::new("", 0.5).is_empty());
        assert!(LabelLayout::new("\n", 0.5).is_empty());
        assert!(LabelLayout::new(" \\n  ", 0.5).is_empty());
    }

    #[test]
    fn test_blank_lines_dropped() {
        let layout = LabelLayout::new("Ocean\n\nuptake\n", 0.5);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.lines[1].text, "uptake");
        assert!((layout.lines[0].offset - 0.25).abs() < 0.0001);
    }
}
