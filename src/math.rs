use druid::Color;
use std::f64::consts::PI;

/// Row-major 4x4 homogeneous matrix, applied to column vectors
pub type Mat4 = [[f64; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Rotation about the vertical (Y) axis
pub fn yaw_matrix(degrees: f64) -> Mat4 {
    let (sin_a, cos_a) = degrees_to_radians(degrees).sin_cos();
    [
        [cos_a, 0.0, sin_a, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin_a, 0.0, cos_a, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the horizontal (X) axis
pub fn pitch_matrix(degrees: f64) -> Mat4 {
    let (sin_a, cos_a) = degrees_to_radians(degrees).sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos_a, -sin_a, 0.0],
        [0.0, sin_a, cos_a, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the depth (Z) axis
pub fn roll_matrix(degrees: f64) -> Mat4 {
    let (sin_a, cos_a) = degrees_to_radians(degrees).sin_cos();
    [
        [cos_a, -sin_a, 0.0, 0.0],
        [sin_a, cos_a, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn translation_matrix(offset: [f64; 3]) -> Mat4 {
    let mut m = IDENTITY;
    m[0][3] = offset[0];
    m[1][3] = offset[1];
    m[2][3] = offset[2];
    m
}

/// Multiplies two 4x4 matrices. `multiply_matrices(a, b)` applies `b` first.
pub fn multiply_matrices(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transforms a point (w = 1)
pub fn transform_point(m: &Mat4, p: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for (i, out) in result.iter_mut().enumerate() {
        *out = m[i][0] * p[0] + m[i][1] * p[1] + m[i][2] * p[2] + m[i][3];
    }
    result
}

/// Transforms a direction (w = 0), ignoring translation
pub fn transform_direction(m: &Mat4, d: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for (i, out) in result.iter_mut().enumerate() {
        *out = m[i][0] * d[0] + m[i][1] * d[1] + m[i][2] * d[2];
    }
    result
}

pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(u: &[f64; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

pub fn normalize(v: &[f64; 3]) -> [f64; 3] {
    let length = dot(v, v).sqrt();
    if length == 0.0 {
        return *v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Calculates the light intensity based on the normal vector and light position
pub fn calculate_light_intensity(
    normal: &[f64; 3],
    position: &[f64; 3],
    light_pos: &[f64; 3],
) -> f64 {
    let light_dir = normalize(&sub(light_pos, position));
    dot(normal, &light_dir).max(0.1) // Ensure a minimum ambient light
}

/// Applies lighting to a color
pub fn apply_lighting(color: &Color, intensity: f64) -> Color {
    let (r, g, b, a) = color.as_rgba8();
    let scale = |c: u8| (c as f64 * intensity).clamp(0.0, 255.0) as u8;
    Color::rgba8(scale(r), scale(g), scale(b), a)
}
