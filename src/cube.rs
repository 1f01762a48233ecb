use crate::math::{
    multiply_matrices, pitch_matrix, roll_matrix, transform_direction, transform_point,
    translation_matrix, yaw_matrix, Mat4,
};
use druid::Color;
use rand::Rng;

/// Edge length of the cube
pub const SIDE: f64 = 15.0;

/// Orientation the cube starts with, in degrees
pub const INITIAL_YAW: f64 = -15.0;
pub const INITIAL_PITCH: f64 = 15.0;

/// Anything the interaction controller can spin.
pub trait Rotate {
    /// Adds the deltas (degrees) to the yaw and pitch accumulators.
    fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64);
}

/// Two unbounded Euler accumulators, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation {
            yaw: INITIAL_YAW,
            pitch: INITIAL_PITCH,
        }
    }
}

impl Orientation {
    pub fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
    }

    /// Yaw first, then pitch: `pitch × yaw`
    pub fn matrix(&self) -> Mat4 {
        multiply_matrices(&pitch_matrix(self.pitch), &yaw_matrix(self.yaw))
    }
}

/// One side of the cube: a flat square in the local XZ plane, normal +Y.
#[derive(Clone, Debug)]
pub struct Face {
    pub color: Color,
    pub transform: Mat4,
}

/// Translation and (x, y, z) Euler rotation, in degrees, for each face.
const FACE_PLACEMENTS: [([f64; 3], [f64; 3]); 6] = [
    ([0.0, -SIDE / 2.0, 0.0], [0.0, 0.0, 180.0]),
    ([0.0, SIDE / 2.0, 0.0], [0.0, 0.0, 0.0]),
    ([-SIDE / 2.0, 0.0, 0.0], [0.0, 0.0, 90.0]),
    ([SIDE / 2.0, 0.0, 0.0], [0.0, 0.0, 270.0]),
    ([0.0, 0.0, -SIDE / 2.0], [270.0, 0.0, 0.0]),
    ([0.0, 0.0, SIDE / 2.0], [90.0, 0.0, 0.0]),
];

const LOCAL_CORNERS: [[f64; 3]; 4] = [
    [-SIDE / 2.0, 0.0, -SIDE / 2.0],
    [SIDE / 2.0, 0.0, -SIDE / 2.0],
    [SIDE / 2.0, 0.0, SIDE / 2.0],
    [-SIDE / 2.0, 0.0, SIDE / 2.0],
];

const LOCAL_NORMAL: [f64; 3] = [0.0, 1.0, 0.0];

impl Face {
    fn new(translation: [f64; 3], rotation: [f64; 3], color: Color) -> Self {
        // Z, then X, then Y, then move into place
        let rotation = multiply_matrices(
            &yaw_matrix(rotation[1]),
            &multiply_matrices(&pitch_matrix(rotation[0]), &roll_matrix(rotation[2])),
        );
        Face {
            color,
            transform: multiply_matrices(&translation_matrix(translation), &rotation),
        }
    }
}

/// The scene object: six coloured faces and one orientation transform.
#[derive(Clone, Debug)]
pub struct Cube {
    faces: [Face; 6],
    orientation: Orientation,
    transform: Mat4,
}

impl Cube {
    /// Builds the cube with one random colour per face.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let faces = FACE_PLACEMENTS.map(|(translation, rotation)| {
            let color = Color::rgb8(rng.gen(), rng.gen(), rng.gen());
            Face::new(translation, rotation, color)
        });
        let orientation = Orientation::default();
        Cube {
            faces,
            orientation,
            transform: orientation.matrix(),
        }
    }

    pub fn faces(&self) -> &[Face; 6] {
        &self.faces
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// World-space corners of a face, in winding order
    pub fn corners(&self, face: &Face) -> [[f64; 3]; 4] {
        let model = multiply_matrices(self.transform(), &face.transform);
        LOCAL_CORNERS.map(|corner| transform_point(&model, &corner))
    }

    /// World-space outward normal of a face
    pub fn face_normal(&self, face: &Face) -> [f64; 3] {
        let model = multiply_matrices(self.transform(), &face.transform);
        transform_direction(&model, &LOCAL_NORMAL)
    }
}

impl Rotate for Cube {
    fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.orientation.rotate(delta_yaw, delta_pitch);
        self.transform = self.orientation.matrix();
    }
}
