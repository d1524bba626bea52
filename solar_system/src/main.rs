//! Solar System - interactive viewer
//!
//! The sun, planets and their moons turning on their real relative periods,
//! with true-scale or compressed orbits.
//!
//! Controls:
//! - Up/Down: Focus next/previous body
//! - Space: Free camera
//! - P: Profile view
//! - Right/Left: Speed up/slow down
//! - T: Time leap
//! - D: Toggle distance compression (not while focused)
//! - Right mouse drag: Rotate camera
//! - Scroll: Zoom
//! - Esc: Quit

mod hud;
mod renderer;
mod texture_gen;

use common::graphics::{is_drawable, GraphicsContext};
use renderer::Renderer;
use solar_system::{Scene, SceneSettings, SolarSystem};
use texture_gen::ProceduralTextures;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    scene: Scene,
    rotating: bool,
    last_mouse_pos: Option<(f64, f64)>,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, settings: SceneSettings) -> Self {
        let mut textures = ProceduralTextures::new(&ctx.device, &ctx.queue);
        let system = SolarSystem::from_catalog(&mut textures);
        let texture_views = textures.into_views();

        let scene = Scene::new(system, settings, ctx.aspect_ratio());
        let renderer = Renderer::new(&ctx, &scene, &texture_views);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            scene,
            rotating: false,
            last_mouse_pos: None,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if !is_drawable(new_size) {
            return;
        }
        self.ctx.resize(new_size);
        self.scene.resize(self.ctx.aspect_ratio());
        self.renderer
            .resize(&self.ctx.device, new_size.width, new_size.height);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update(&self.ctx.queue, &self.scene);

        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            hud::draw_status_bar(ctx, &self.scene);
            hud::draw_body_panel(ctx, &self.scene);
        });

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, self.scene.satellites_visible());

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Returns `true` when the app should exit
    fn handle_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }

        let settings = *self.scene.settings();
        match key {
            KeyCode::ArrowUp => self.scene.select_next(),
            KeyCode::ArrowDown => self.scene.select_previous(),
            KeyCode::Space => self.scene.reset_to_free(),
            KeyCode::KeyP => self.scene.switch_to_profile(),
            KeyCode::ArrowRight => self.scene.increase_speed(settings.speed_step),
            KeyCode::ArrowLeft => self.scene.decrease_speed(settings.speed_step),
            KeyCode::KeyT => self.scene.trigger_time_leap(settings.time_leap),
            KeyCode::KeyD => {
                self.scene.toggle_distance_compression();
            }
            KeyCode::Escape => return true,
            _ => {}
        }
        false
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if self.rotating {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                let degrees_per_pixel = self.scene.settings().rotate_degrees_per_pixel;
                let dx = (x - last_x) as f32 * degrees_per_pixel;
                let dy = (y - last_y) as f32 * degrees_per_pixel;
                self.scene.rotate_camera(dx, dy);
            }
            self.last_mouse_pos = Some((x, y));
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        let step = self.scene.settings().zoom_step * self.scene.camera().distance();
        self.scene.zoom_camera(-delta * step);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn main() {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                      SOLAR SYSTEM                         ║");
    println!("╠═══════════════════════════════════════════════════════════╣");
    println!("║ Controls:                                                 ║");
    println!("║   Up/Down     - Focus next/previous body                  ║");
    println!("║   Space       - Free camera                               ║");
    println!("║   P           - Profile view                              ║");
    println!("║   Right/Left  - Speed up/slow down                        ║");
    println!("║   T           - Time leap                                 ║");
    println!("║   D           - Toggle distance compression               ║");
    println!("║   Right drag  - Rotate camera                             ║");
    println!("║   Scroll      - Zoom                                      ║");
    println!("║   Esc         - Quit                                      ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    let settings = SceneSettings::default();
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Solar System",
        settings.window_width,
        settings.window_height,
    ));

    let mut app = App::new(ctx, settings);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::MouseInput { state, button, .. } => {
                                if *button == MouseButton::Right {
                                    app.rotating = *state == ElementState::Pressed;
                                    if !app.rotating {
                                        app.last_mouse_pos = None;
                                    }
                                }
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                app.handle_mouse_move(position.x, position.y);
                            }
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        ..
                                    },
                                ..
                            } => {
                                if app.handle_key(*key, *state) {
                                    elwt.exit();
                                }
                            }
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.handle_scroll(scroll);
                            }
                            WindowEvent::RedrawRequested => {
                                let now = std::time::Instant::now();
                                let dt = (now - last_time).as_secs_f32().min(0.1);
                                last_time = now;

                                app.scene.advance(dt);
                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => log::error!("Render error: {:?}", e),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
