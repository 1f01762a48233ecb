use crate::camera::Camera;
use crate::controller::{InteractionController, TimerRequest};
use crate::cube::Cube;
use crate::graphics::Framebuffer;
use crate::math::{apply_lighting, calculate_light_intensity};
use crate::state::{AppState, ADD_CUBE};
use crate::timer::CoastTimer;
use druid::text::FontFamily;
use druid::widget::prelude::*;
use druid::{
    commands,
    piet::{ImageFormat, InterpolationMode, Text, TextLayout, TextLayoutBuilder},
    Color, MouseButton, RenderContext, Widget,
};
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{info, warn};

pub const BACKGROUND: Color = Color::rgb8(0x30, 0x30, 0x38);

/// The 3D viewport: owns the cube (once added) and the drag/coast controller
pub struct CubeViewport {
    cube: Option<Cube>,
    controller: InteractionController,
    camera: Camera,
    rng: StdRng,
    coast_timer: CoastTimer,
    /// Paints are event driven, so this is not a frame rate
    paints_since_last_update: usize,
    last_rate_calculation: Instant,
    paints_per_second: f64,
}

impl CubeViewport {
    pub fn new(rng: StdRng) -> Self {
        CubeViewport {
            cube: None,
            controller: InteractionController::new(),
            camera: Camera::default(),
            rng,
            coast_timer: CoastTimer::new(),
            paints_since_last_update: 0,
            last_rate_calculation: Instant::now(),
            paints_per_second: 0.0,
        }
    }

    fn add_cube(&mut self) {
        if self.cube.is_some() {
            return;
        }
        let cube = Cube::new(&mut self.rng);
        let colors: Vec<_> = cube.faces().iter().map(|f| f.color.as_rgba8()).collect();
        info!(?colors, "cube added");
        self.cube = Some(cube);
    }

    fn schedule(&mut self, ctx: &mut EventCtx, request: TimerRequest) {
        self.coast_timer
            .apply(request, |interval| ctx.request_timer(interval));
    }

    fn update_paint_rate(&mut self) {
        self.paints_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_rate_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.paints_per_second = self.paints_since_last_update as f64 / duration.as_secs_f64();
            self.paints_since_last_update = 0;
            self.last_rate_calculation = now;
        }
    }

    fn draw_text(ctx: &mut PaintCtx, text: String, size: f64, pos: (f64, f64)) {
        let text_layout = ctx
            .text()
            .new_text_layout(text)
            .font(FontFamily::SYSTEM_UI, size)
            .text_color(Color::WHITE)
            .build();
        match text_layout {
            Ok(layout) => ctx.draw_text(&layout, pos),
            Err(err) => warn!(%err, "text layout failed"),
        }
    }

    fn debug_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )];
        if let Some(cube) = &self.cube {
            let orientation = cube.orientation();
            let (yaw_speed, pitch_speed) = self.controller.speed();
            lines.push(format!(
                "Yaw: {:.2}, Pitch: {:.2}",
                orientation.yaw, orientation.pitch
            ));
            lines.push(format!("Speed: {yaw_speed:.2}, {pitch_speed:.2}"));
            if let Some(delta) = self.controller.last_delta() {
                lines.push(format!("Last drag: {:.0}, {:.0}", delta.x, delta.y));
            }
            lines.push(format!("Phase: {:?}", self.controller.phase()));
            let timer = if self.coast_timer.is_running() { "running" } else { "stopped" };
            lines.push(format!("Coast timer: {timer}"));
        }
        lines.push(format!("Paints/s: {:.2}", self.paints_per_second));
        lines
    }
}

/// Draws the scene into a fresh framebuffer of the given size
pub fn rasterize(cube: Option<&Cube>, camera: &Camera, size: Size) -> Framebuffer {
    let mut fb = Framebuffer::new(size.width.max(0.0) as usize, size.height.max(0.0) as usize);
    fb.clear(&BACKGROUND);
    let Some(cube) = cube else {
        return fb;
    };

    for face in cube.faces() {
        let corners = cube.corners(face);
        let projected: Option<Vec<_>> = corners
            .iter()
            .map(|corner| camera.project(corner, size))
            .collect();
        let Some(projected) = projected else {
            continue;
        };

        let centre = corners.iter().fold([0.0; 3], |acc, c| {
            [acc[0] + c[0] / 4.0, acc[1] + c[1] / 4.0, acc[2] + c[2] / 4.0]
        });
        let intensity =
            calculate_light_intensity(&cube.face_normal(face), &centre, &camera.position);
        let color = apply_lighting(&face.color, intensity);

        fb.fill_triangle(&projected[0], &projected[1], &projected[2], &color);
        fb.fill_triangle(&projected[0], &projected[2], &projected[3], &color);
    }
    fb
}

impl Widget<AppState> for CubeViewport {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                // Request focus to receive keyboard events
                ctx.request_focus();
            }
            Event::Command(cmd) if cmd.is(ADD_CUBE) => {
                self.add_cube();
                data.has_cube = true;
                ctx.request_paint();
            }
            Event::Timer(token) => {
                if self.coast_timer.fire(*token) {
                    let request = self.controller.tick(self.cube.as_mut());
                    self.coast_timer
                        .after_tick(request, |interval| ctx.request_timer(interval));
                    ctx.request_paint();
                }
            }
            Event::KeyDown(key_event) => {
                if let druid::keyboard_types::Key::Character(s) = &key_event.key {
                    match s.as_str() {
                        "d" | "D" => {
                            data.debug = !data.debug;
                            ctx.request_paint();
                        }
                        "q" | "Q" => {
                            ctx.submit_command(commands::QUIT_APP);
                        }
                        _ => {}
                    }
                }
            }
            Event::MouseDown(mouse_event) if mouse_event.button == MouseButton::Left => {
                ctx.request_focus();
                let request = self.controller.press(self.cube.as_mut(), mouse_event.pos);
                self.schedule(ctx, request);
                if self.controller.mouse_down() {
                    ctx.set_active(true); // Capture mouse events
                }
            }
            Event::MouseMove(mouse_event) => {
                if self.controller.mouse_down() {
                    let request = self.controller.drag(self.cube.as_mut(), mouse_event.pos);
                    self.schedule(ctx, request);
                    ctx.request_paint();
                }
            }
            Event::MouseUp(mouse_event) if mouse_event.button == MouseButton::Left => {
                let request = self.controller.release(self.cube.as_mut());
                self.schedule(ctx, request);
                ctx.set_active(false);
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        _event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &AppState, data: &AppState, _env: &Env) {
        if old_data.debug != data.debug {
            ctx.request_paint();
        }
    }

    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        self.update_paint_rate();

        let size = ctx.size();
        let fb = rasterize(self.cube.as_ref(), &self.camera, size);
        if fb.width() > 0 && fb.height() > 0 {
            match ctx.make_image(fb.width(), fb.height(), fb.pixels(), ImageFormat::RgbaSeparate) {
                Ok(image) => {
                    ctx.draw_image(&image, size.to_rect(), InterpolationMode::NearestNeighbor)
                }
                Err(err) => warn!(%err, "failed to upload frame"),
            }
        }

        if self.cube.is_none() {
            let text_layout = ctx
                .text()
                .new_text_layout("Press \"Add Cube\" to begin")
                .font(FontFamily::SYSTEM_UI, 18.0)
                .text_color(Color::WHITE)
                .build();
            if let Ok(layout) = text_layout {
                let text_size = layout.size();
                let pos = (
                    (size.width - text_size.width) / 2.0,
                    (size.height - text_size.height) / 2.0,
                );
                ctx.draw_text(&layout, pos);
            }
        }

        if data.debug {
            for (i, line) in self.debug_lines().into_iter().enumerate() {
                Self::draw_text(ctx, line, 12.0, (10.0, 10.0 + 20.0 * i as f64));
            }
        }
    }
}
