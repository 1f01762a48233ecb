/// A projected point: view-space position plus where it lands on screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// x, y and distance along the view direction
    pub position: [f64; 3],
    pub screen_position: [f64; 2],
}

impl Vertex {
    pub fn depth(&self) -> f64 {
        self.position[2]
    }
}
