use druid::{Data, Selector};

/// Sent by the "Add Cube" button; the viewport builds the cube on receipt
pub const ADD_CUBE: Selector = Selector::new("flick-cube.add-cube");

/// Application state shared between the button and the viewport
#[derive(Clone, Data)]
pub struct AppState {
    /// A cube has been added to the scene
    pub has_cube: bool,
    /// Show the debug overlay
    pub debug: bool,
}
