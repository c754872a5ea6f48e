//! Evaluates a built fold chain at a point in time.
//!
//! Each joint's world transform is `parent_world * local`, starting from the container's
//! perspective, exactly as a compositor would resolve the nested layers. Hosts without a native
//! 3D layer tree can draw the resulting quads directly.

use std::time::Duration;

use crate::{
    fold::{
        direction::FoldAxis,
        joint::{FoldContainer, JointNode},
    },
    foundation::transform::Transform3d,
};

/// Projected placement of one panel, in the fold container's coordinate space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PanelPose {
    pub index: usize,
    /// Joint rotation in radians at the sampled time.
    pub angle: f64,
    pub shadow_opacity: f64,
    /// Top-left, top-right, bottom-right, bottom-left of the panel's image, after perspective.
    pub corners: [[f64; 3]; 4],
}

/// Poses every panel of `container` after `elapsed` of its animations.
pub fn pose_at(container: &FoldContainer, elapsed: Duration) -> Vec<PanelPose> {
    pose_with(container, |joint| {
        (
            joint.rotation.value_at(elapsed),
            joint.shadow.fade.value_at(elapsed),
        )
    })
}

/// Poses every panel with caller-chosen `(angle, shadow_opacity)` per joint.
pub fn pose_with(
    container: &FoldContainer,
    mut sample: impl FnMut(&JointNode) -> (f64, f64),
) -> Vec<PanelPose> {
    let mut world = container.sublayer_matrix();
    container
        .joints()
        .map(|joint| {
            let (angle, shadow_opacity) = sample(joint);
            let rotation = match container.axis {
                FoldAxis::Horizontal => Transform3d::from_rotation_y(angle),
                FoldAxis::Vertical => Transform3d::from_rotation_x(angle),
            };
            world = world * joint.geometry.local_transform(rotation);
            let leaf = world
                * joint
                    .image
                    .geometry
                    .local_transform(Transform3d::IDENTITY);

            let size = joint.image.geometry.bounds;
            let corners = [
                (0.0, 0.0),
                (size.width, 0.0),
                (size.width, size.height),
                (0.0, size.height),
            ]
            .map(|(x, y)| leaf.project_point(x, y, 0.0));

            PanelPose {
                index: joint.index,
                angle,
                shadow_opacity,
                corners,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/fold/pose.rs"]
mod tests;
