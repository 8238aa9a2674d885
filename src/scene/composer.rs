use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use crate::agents::{Agent, Bounds};
use crate::error::{Result, SceneError};
use crate::flow::{FlowArrow, Viewpoint};
use crate::interaction::{ArrowPicker, HoverEvent, HoverTracker};
use crate::math::Vec3;
use super::config::{SceneConfig, SceneryKind};
use super::fence::Fence;
use super::render_set::{AgentPose, ArrowVisual, FenceVisual, LabelVisual, RenderSet, ReservoirLabel};

/// Named anchor the arrows run between
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservoirPoint {
    pub name: String,
    pub position: Vec3,
    pub label: String,
    pub color: String,
    pub label_offset: Vec3,
}

impl ReservoirPoint {
    pub fn label_position(&self) -> Vec3 {
        self.position + self.label_offset
    }
}

/// Load state of something the host fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    Pending,
    Ready,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneryItem {
    pub name: String,
    pub kind: SceneryKind,
    pub path: Option<String>,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub radius: f32,
    pub color: Option<String>,
    pub state: AssetState,
}

/// Agents of one enclosure and the model they are drawn with
#[derive(Debug)]
struct Herd {
    name: String,
    agents: Vec<Agent>,
    model: Option<String>,
    model_scale: f32,
    state: AssetState,
}

impl Herd {
    fn visible(&self) -> bool {
        self.state == AssetState::Ready
    }
}

/// Owns every component of a mounted scene and drives them per frame.
///
/// Arrows are built once from the edge table. Hovered arrows are kept in a
/// work list so only they get their label turned toward the camera on
/// [`tick`](Self::tick). The two display toggles filter [`render_set`]
/// output and never touch the components themselves.
///
/// [`render_set`]: Self::render_set
pub struct SceneComposer {
    reservoirs: Vec<ReservoirPoint>,
    arrows: Vec<FlowArrow>,
    herds: Vec<Herd>,
    scenery: Vec<SceneryItem>,
    fences: Vec<Fence>,
    show_arrows: bool,
    show_overlay: bool,
    billboards: Vec<usize>,
    viewpoint: Viewpoint,
    rng: SmallRng,
    mounted: bool,
    time: f32,
    hover: HoverTracker,
    picker: ArrowPicker,
}

impl SceneComposer {
    pub fn from_config(config: &SceneConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);

        let reservoirs: Vec<ReservoirPoint> = config
            .reservoirs
            .iter()
            .map(|r| ReservoirPoint {
                name: r.name.clone(),
                position: Vec3::from(r.position),
                label: r.label.clone().unwrap_or_else(|| r.name.clone()),
                color: r.color.clone(),
                label_offset: Vec3::from(r.label_offset),
            })
            .collect();

        let position_of = |index: usize, name: &str| -> Result<Vec3> {
            reservoirs
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.position)
                .ok_or_else(|| SceneError::UnknownReservoir {
                    index,
                    name: name.to_string(),
                })
        };

        let mut arrows = Vec::with_capacity(config.edges.len());
        for (index, edge) in config.edges.iter().enumerate() {
            let source = position_of(index, &edge.from)?;
            let target = position_of(index, &edge.to)?;
            arrows.push(FlowArrow::new(
                source,
                target,
                &edge.color,
                edge.label.as_deref(),
                &config.arrow,
            ));
        }

        let mut herds = Vec::with_capacity(config.enclosures.len());
        let mut fences = Vec::new();
        for enclosure in &config.enclosures {
            let agents = enclosure
                .agents
                .iter()
                .map(|&p| Agent::spawn(Vec3::from(p), enclosure.bounds, enclosure.wander, &mut rng))
                .collect();
            herds.push(Herd {
                name: enclosure.name.clone(),
                agents,
                model: enclosure.model.clone(),
                model_scale: enclosure.model_scale,
                state: initial_state(enclosure.model.as_deref()),
            });
            if let Some(y) = enclosure.fence_y {
                fences.extend(Fence::around(&enclosure.bounds, y));
            }
        }

        let scenery = config
            .scenery
            .iter()
            .map(|item| SceneryItem {
                name: item.name.clone(),
                kind: item.kind,
                path: item.path.clone(),
                position: Vec3::from(item.position),
                rotation: Vec3::from(item.rotation),
                scale: item.scale,
                radius: item.radius,
                color: item.color.clone(),
                state: match item.kind {
                    SceneryKind::Model => AssetState::Pending,
                    SceneryKind::Sphere | SceneryKind::Disc => AssetState::Ready,
                },
            })
            .collect();

        let composer = Self {
            reservoirs,
            arrows,
            herds,
            scenery,
            fences,
            show_arrows: true,
            show_overlay: true,
            billboards: Vec::new(),
            viewpoint: Viewpoint::default(),
            rng,
            mounted: true,
            time: 0.0,
            hover: HoverTracker::new(),
            picker: ArrowPicker::new(config.pick_radius),
        };

        log::info!(
            "scene built: {} reservoirs, {} arrows, {} agents, {} scenery items",
            composer.reservoirs.len(),
            composer.arrows.len(),
            composer.agent_count(),
            composer.scenery.len()
        );

        Ok(composer)
    }

    /// Build the shipped carbon cycle scene
    pub fn default_scene(seed: u64) -> Result<Self> {
        Self::from_config(&SceneConfig::default_scene()?, seed)
    }

    pub fn reservoirs(&self) -> &[ReservoirPoint] {
        &self.reservoirs
    }

    pub fn reservoir(&self, name: &str) -> Option<&ReservoirPoint> {
        self.reservoirs.iter().find(|r| r.name == name)
    }

    pub fn arrows(&self) -> &[FlowArrow] {
        &self.arrows
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.herds.iter().flat_map(|h| h.agents.iter())
    }

    pub fn agent_count(&self) -> usize {
        self.herds.iter().map(|h| h.agents.len()).sum()
    }

    /// Bounds shared by the agents of the named enclosure
    pub fn enclosure_bounds(&self, name: &str) -> Option<Bounds> {
        self.herds
            .iter()
            .find(|h| h.name == name)
            .and_then(|h| h.agents.first())
            .map(|a| a.bounds())
    }

    pub fn scenery(&self) -> &[SceneryItem] {
        &self.scenery
    }

    pub fn fences(&self) -> &[Fence] {
        &self.fences
    }

    pub fn show_arrows(&self) -> bool {
        self.show_arrows
    }

    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    /// Arrows currently receiving billboard updates
    pub fn hovered_arrows(&self) -> &[usize] {
        &self.billboards
    }

    pub fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance one frame. `time` is the host clock in seconds.
    pub fn tick(&mut self, time: f32) {
        if !self.mounted {
            return;
        }
        self.time = time;

        for herd in &mut self.herds {
            for agent in &mut herd.agents {
                agent.update(&mut self.rng);
            }
        }

        if self.show_arrows {
            let viewpoint = self.viewpoint;
            for &index in &self.billboards {
                if let Some(arrow) = self.arrows.get_mut(index) {
                    arrow.update(&viewpoint);
                }
            }
        }
    }

    pub fn set_viewpoint(&mut self, viewpoint: Viewpoint) {
        self.viewpoint = viewpoint;
    }

    pub fn set_show_arrows(&mut self, visible: bool) {
        self.show_arrows = visible;
    }

    pub fn set_show_overlay(&mut self, visible: bool) {
        self.show_overlay = visible;
    }

    /// Mark an arrow hovered from the host's own hit testing. Returns false
    /// for an unknown index.
    pub fn pointer_enter(&mut self, index: usize) -> bool {
        if !self.hover_on(index) {
            return false;
        }
        for event in self.hover.update(Some(index)) {
            if let HoverEvent::Leave(old) = event {
                self.hover_off(old);
            }
        }
        true
    }

    pub fn pointer_leave(&mut self, index: usize) -> bool {
        if !self.hover_off(index) {
            return false;
        }
        if self.hover.current() == Some(index) {
            self.hover.clear();
        }
        true
    }

    fn hover_on(&mut self, index: usize) -> bool {
        let Some(arrow) = self.arrows.get_mut(index) else {
            return false;
        };
        arrow.pointer_enter();
        arrow.update(&self.viewpoint);
        if !self.billboards.contains(&index) {
            self.billboards.push(index);
        }
        log::debug!("pointer entered arrow {}", index);
        true
    }

    fn hover_off(&mut self, index: usize) -> bool {
        let Some(arrow) = self.arrows.get_mut(index) else {
            return false;
        };
        arrow.pointer_leave();
        self.billboards.retain(|&i| i != index);
        log::debug!("pointer left arrow {}", index);
        true
    }

    /// Pick the arrow under the pointer and fire enter/leave transitions.
    /// Hidden arrows are never picked.
    pub fn pointer_move(&mut self, ndc_x: f32, ndc_y: f32) -> Option<usize> {
        if !self.mounted {
            return None;
        }

        let picked = if self.show_arrows {
            self.picker
                .pick(ndc_x, ndc_y, &self.viewpoint, &self.arrows)
                .map(|hit| hit.arrow_index)
        } else {
            None
        };

        for event in self.hover.update(picked) {
            match event {
                HoverEvent::Enter(index) => self.hover_on(index),
                HoverEvent::Leave(index) => self.hover_off(index),
            };
        }

        picked
    }

    /// Record that the host finished loading `path`. Returns how many scene
    /// items became visible.
    pub fn mark_asset_loaded(&mut self, path: &str) -> usize {
        let mut count = 0;

        for item in &mut self.scenery {
            if item.state == AssetState::Pending && item.path.as_deref() == Some(path) {
                item.state = AssetState::Ready;
                count += 1;
            }
        }
        for herd in &mut self.herds {
            if herd.state == AssetState::Pending && herd.model.as_deref() == Some(path) {
                herd.state = AssetState::Ready;
                count += 1;
            }
        }

        if count == 0 {
            log::debug!("asset {} loaded but nothing was waiting for it", path);
        } else {
            log::debug!("asset {} ready for {} item(s)", path, count);
        }
        count
    }

    /// Models the host has not reported as loaded yet
    pub fn pending_assets(&self) -> Vec<&str> {
        let scenery = self
            .scenery
            .iter()
            .filter(|s| s.state == AssetState::Pending)
            .filter_map(|s| s.path.as_deref());
        let herds = self
            .herds
            .iter()
            .filter(|h| h.state == AssetState::Pending)
            .filter_map(|h| h.model.as_deref());

        let mut paths: Vec<&str> = scenery.chain(herds).collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }

    /// Collect what should be drawn this frame
    pub fn render_set(&self) -> RenderSet<'_> {
        let arrows = if self.show_arrows {
            self.arrows
                .iter()
                .enumerate()
                .map(|(index, arrow)| ArrowVisual::new(index, arrow))
                .collect()
        } else {
            Vec::new()
        };

        let labels = if self.show_arrows && self.show_overlay {
            self.billboards
                .iter()
                .filter_map(|&index| {
                    let arrow = self.arrows.get(index)?;
                    let pose = arrow.label_pose()?;
                    let layout = arrow.label()?;
                    Some(LabelVisual {
                        arrow_index: index,
                        color: arrow.color(),
                        lines: &layout.lines,
                        anchor: pose.anchor,
                        orientation: pose.orientation,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let reservoir_labels = if self.show_overlay {
            self.reservoirs.iter().map(ReservoirLabel::from).collect()
        } else {
            Vec::new()
        };

        let agents = self
            .herds
            .iter()
            .filter(|h| h.visible())
            .flat_map(|h| {
                h.agents.iter().map(move |a| AgentPose {
                    position: a.position,
                    heading: a.heading,
                    model: h.model.as_deref(),
                    model_scale: h.model_scale,
                })
            })
            .collect();

        RenderSet {
            time: self.time,
            glow: FlowArrow::glow_intensity(self.time),
            arrows,
            labels,
            reservoir_labels,
            agents,
            scenery: self.scenery.iter().filter(|s| s.state == AssetState::Ready).collect(),
            fences: self.fences.iter().map(FenceVisual::from).collect(),
        }
    }

    /// Unmount: drop every component and stop reacting to ticks
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.hover.clear();
        self.billboards.clear();
        self.arrows.clear();
        self.herds.clear();
        self.reservoirs.clear();
        self.scenery.clear();
        self.fences.clear();
        log::info!("scene torn down");
    }
}

fn initial_state(model: Option<&str>) -> AssetState {
    if model.is_some() {
        AssetState::Pending
    } else {
        AssetState::Ready
    }
}
