use crate::math::{cross, degrees_to_radians, dot, normalize, sub};
use crate::vertex::Vertex;
use druid::kurbo::Size;

/// Perspective camera looking from `position` toward `view_center`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: [f64; 3],
    pub view_center: [f64; 3],
    pub up: [f64; 3],
    /// Vertical field of view, in degrees
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: [0.0, 0.0, 40.0],
            view_center: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_y: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// World to view space: x right, y up, z the distance in front of the camera
    pub fn to_view(&self, world: &[f64; 3]) -> [f64; 3] {
        let forward = normalize(&sub(&self.view_center, &self.position));
        let right = normalize(&cross(&forward, &self.up));
        let up = cross(&right, &forward);
        let relative = sub(world, &self.position);
        [
            dot(&relative, &right),
            dot(&relative, &up),
            dot(&relative, &forward),
        ]
    }

    /// Projects a world point onto a viewport of `size`, or `None` if it is
    /// outside the near/far range.
    pub fn project(&self, world: &[f64; 3], size: Size) -> Option<Vertex> {
        let view = self.to_view(world);
        if view[2] < self.near || view[2] > self.far {
            return None;
        }
        let focal = 1.0 / (degrees_to_radians(self.fov_y) / 2.0).tan();
        let aspect = if size.height > 0.0 {
            size.width / size.height
        } else {
            1.0
        };
        let ndc_x = focal / aspect * view[0] / view[2];
        let ndc_y = focal * view[1] / view[2];
        Some(Vertex {
            position: view,
            screen_position: [
                (ndc_x + 1.0) / 2.0 * size.width,
                (1.0 - ndc_y) / 2.0 * size.height,
            ],
        })
    }
}
