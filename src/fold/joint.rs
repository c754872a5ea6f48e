use std::time::Duration;

use image::RgbaImage;

use crate::{
    animation::keyframes::{AnimatedProperty, BasicAnimation},
    config::FoldConfig,
    fold::{
        direction::FoldAxis,
        plan::{FoldPlan, PanelSpec},
    },
    foundation::core::{Point, Rect, Rgba8Premul, Size, frame_origin},
    foundation::error::{FoldError, FoldResult},
    foundation::transform::Transform3d,
};

/// Placement of a node inside its parent: bounds size, fractional anchor, and the anchor's
/// position in the parent's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerGeometry {
    pub bounds: Size,
    pub anchor: Point,
    pub position: Point,
}

impl LayerGeometry {
    /// Un-rotated frame in the parent's coordinate space.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(
            frame_origin(self.position, self.anchor, self.bounds),
            self.bounds,
        )
    }

    /// Maps the node's own coordinates into its parent's, applying `rotation` about the anchor.
    pub fn local_transform(&self, rotation: Transform3d) -> Transform3d {
        let ax = self.anchor.x * self.bounds.width;
        let ay = self.anchor.y * self.bounds.height;
        Transform3d::from_translation(self.position.x, self.position.y, 0.0)
            * rotation
            * Transform3d::from_translation(-ax, -ay, 0.0)
    }
}

/// Image-textured leaf showing one panel's slice of the snapshot.
#[derive(Clone, Debug)]
pub struct ImageLeaf {
    pub geometry: LayerGeometry,
    /// Region of the snapshot the texture was cropped from.
    pub source_rect: Rect,
    pub texture: RgbaImage,
}

/// Gradient overlay darkening a panel as it turns away from the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowLeaf {
    pub geometry: LayerGeometry,
    /// Opaque stop first, transparent stop second.
    pub colors: [Rgba8Premul; 2],
    pub backdrop: Rgba8Premul,
    pub start: Point,
    pub end: Point,
    /// Model opacity; only the animation ever makes the shadow visible.
    pub opacity: f64,
    pub fade: BasicAnimation,
}

/// One hinge of the accordion. Rotating it carries every joint nested inside.
#[derive(Clone, Debug)]
pub struct JointNode {
    /// Position of the panel in fold order.
    pub index: usize,
    pub panel: PanelSpec,
    pub geometry: LayerGeometry,
    pub rotation: BasicAnimation,
    pub image: ImageLeaf,
    pub shadow: ShadowLeaf,
    pub child: Option<Box<JointNode>>,
}

/// Root of a fold chain: applies perspective to everything beneath it.
#[derive(Clone, Debug)]
pub struct FoldContainer {
    pub bounds: Size,
    pub background: Rgba8Premul,
    pub sublayer_transform: Transform3d,
    pub axis: FoldAxis,
    pub duration: Duration,
    pub root: Box<JointNode>,
}

impl FoldContainer {
    /// Joints in fold order, outermost first.
    pub fn joints(&self) -> impl Iterator<Item = &JointNode> {
        std::iter::successors(Some(self.root.as_ref()), |j| j.child.as_deref())
    }

    /// Number of nested joints, one per panel.
    pub fn depth(&self) -> usize {
        self.joints().count()
    }

    /// Sublayer transform applied about the container's centre, as compositors apply it.
    pub fn sublayer_matrix(&self) -> Transform3d {
        let cx = self.bounds.width / 2.0;
        let cy = self.bounds.height / 2.0;
        Transform3d::from_translation(cx, cy, 0.0)
            * self.sublayer_transform
            * Transform3d::from_translation(-cx, -cy, 0.0)
    }
}

/// Builds the nested joint chain for `plan`, textured from `snapshot`.
///
/// The chain is assembled innermost-first so each joint takes ownership of the one after it.
#[tracing::instrument(skip(plan, snapshot, config), fields(panels = plan.len(), direction = ?plan.direction))]
pub fn build_fold_container(
    plan: &FoldPlan,
    snapshot: &RgbaImage,
    duration: Duration,
    config: &FoldConfig,
) -> FoldResult<FoldContainer> {
    let axis = plan.axis();
    let root = plan
        .panels
        .iter()
        .enumerate()
        .rev()
        .fold(None, |child, (index, panel)| {
            Some(Box::new(build_joint(
                index, panel, plan.bounds, axis, snapshot, duration, config, child,
            )))
        })
        .ok_or_else(|| FoldError::validation("fold plan has no panels"))?;

    tracing::debug!(depth = plan.len(), "built fold chain");
    Ok(FoldContainer {
        bounds: plan.bounds,
        background: config.container_background,
        sublayer_transform: Transform3d::perspective(config.perspective_depth),
        axis,
        duration,
        root,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_joint(
    index: usize,
    panel: &PanelSpec,
    image_size: Size,
    axis: FoldAxis,
    snapshot: &RgbaImage,
    duration: Duration,
    config: &FoldConfig,
    child: Option<Box<JointNode>>,
) -> JointNode {
    let (geometry, leaf) = joint_geometry(panel, image_size, axis);

    let image = ImageLeaf {
        geometry: leaf,
        source_rect: panel.rect,
        texture: crop_texture(snapshot, panel.rect),
    };

    let peak = panel.shadow.peak_opacity;
    let (fade_from, fade_to) = if panel.start_angle != 0.0 {
        (peak, 0.0)
    } else {
        (0.0, peak)
    };
    let shadow = ShadowLeaf {
        geometry: leaf,
        colors: [config.shadow_color, Rgba8Premul::transparent()],
        backdrop: config.shadow_backdrop,
        start: panel.shadow.start,
        end: panel.shadow.end,
        opacity: 0.0,
        fade: BasicAnimation::new(AnimatedProperty::Opacity, fade_from, fade_to, duration),
    };

    JointNode {
        index,
        panel: *panel,
        geometry,
        rotation: BasicAnimation::new(
            axis.rotation_property(),
            panel.start_angle,
            panel.end_angle,
            duration,
        ),
        image,
        shadow,
        child,
    }
}

/// Joint and leaf placement for one panel.
///
/// The joint spans from its hinge to the far edge of the image so that rotating it swings every
/// later panel too; the leaf sits at the hinge end of the joint.
fn joint_geometry(
    panel: &PanelSpec,
    image_size: Size,
    axis: FoldAxis,
) -> (LayerGeometry, LayerGeometry) {
    let anchor = panel.anchor;
    let rect = panel.rect;
    let (joint_bounds, joint_position, leaf_position) = match axis {
        FoldAxis::Horizontal => {
            let (width, x) = if anchor.x == 0.0 {
                let width = image_size.width - rect.x0;
                let x = if rect.x0 != 0.0 { rect.width() } else { 0.0 };
                (width, x)
            } else {
                let width = rect.x0 + rect.width();
                (width, width)
            };
            let half_h = rect.height() / 2.0;
            (
                Size::new(width, rect.height()),
                Point::new(x, half_h),
                Point::new(width * anchor.x, half_h),
            )
        }
        FoldAxis::Vertical => {
            let (height, y) = if anchor.y == 0.0 {
                let height = image_size.height - rect.y0;
                let y = if rect.y0 != 0.0 { rect.height() } else { 0.0 };
                (height, y)
            } else {
                let height = rect.y0 + rect.height();
                (height, height)
            };
            let half_w = rect.width() / 2.0;
            (
                Size::new(rect.width(), height),
                Point::new(half_w, y),
                Point::new(half_w, height * anchor.y),
            )
        }
    };

    (
        LayerGeometry {
            bounds: joint_bounds,
            anchor,
            position: joint_position,
        },
        LayerGeometry {
            bounds: rect.size(),
            anchor,
            position: leaf_position,
        },
    )
}

/// Crops `rect` out of the snapshot, clamped to the snapshot's pixels.
pub fn crop_texture(snapshot: &RgbaImage, rect: Rect) -> RgbaImage {
    let (w, h) = snapshot.dimensions();
    let clamp_x = |v: f64| (v.round().max(0.0) as u32).min(w);
    let clamp_y = |v: f64| (v.round().max(0.0) as u32).min(h);
    let (x0, x1) = (clamp_x(rect.x0), clamp_x(rect.x1));
    let (y0, y1) = (clamp_y(rect.y0), clamp_y(rect.y1));
    image::imageops::crop_imm(
        snapshot,
        x0,
        y0,
        x1.saturating_sub(x0),
        y1.saturating_sub(y0),
    )
    .to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/fold/joint.rs"]
mod tests;
