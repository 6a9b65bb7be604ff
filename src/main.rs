use std::sync::Arc;

use glam::Vec3;
use log::{info, warn};
use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use umbra::app::App;
use umbra::camera::Camera;
use umbra::config::RenderConfig;
use umbra::game_loop::GameLoop;
use umbra::obj;
use umbra::render::ShadowRenderer;
use umbra::scene::{Caster, Light, Mesh, MeshData, Scene};
use umbra::shapes;

const ORBIT_SPEED: f32 = 60.0; // degrees per second
const ZOOM_SPEED: f32 = 8.0;

#[derive(Default)]
struct CameraInput {
    orbit_left: bool,
    orbit_right: bool,
    orbit_up: bool,
    orbit_down: bool,
    zoom_in: bool,
    zoom_out: bool,
}

/// The demo application. All input, scene setup and per-frame
/// coordination live here; the crate itself only provides the pieces.
struct Station {
    app: Option<App>,
    renderer: Option<ShadowRenderer>,
    scene: Scene,
    camera: Camera,
    config: RenderConfig,
    game_loop: GameLoop,
    input: CameraInput,
    time: f32,
    // Indices into scene.casters for the animated models.
    spinning_cube: usize,
    spinning_ring: usize,
}

/// Loads a model from disk if present, otherwise falls back to the
/// generated shape so the demo runs without any assets.
fn load_or(path: &str, fallback: MeshData) -> MeshData {
    match obj::load_obj(path) {
        Ok(data) => {
            info!("loaded model {path}");
            data
        }
        Err(err) => {
            warn!("{path}: {err:#}; using generated shape");
            fallback
        }
    }
}

impl Station {
    fn new() -> Self {
        let mut scene = Scene::new();

        let interior = scene.add_mesh(Mesh::build(load_or(
            "data/models/interior.obj",
            shapes::inverted_cube(24.0),
        )));
        let cube = scene.add_mesh(Mesh::build(load_or("data/models/cube.obj", shapes::cube(2.0))));
        let cylinder = scene.add_mesh(Mesh::build(load_or(
            "data/models/cylinder.obj",
            shapes::cylinder(1.0, 2.5, 16),
        )));
        let ring = scene.add_mesh(Mesh::build(load_or(
            "data/models/ring.obj",
            shapes::ring(1.8, 0.5, 24, 12),
        )));

        scene.add_caster(Caster::new(cube, Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO));
        let spinning_cube =
            scene.add_caster(Caster::new(cube, Vec3::new(4.0, 3.0, 4.0), Vec3::ZERO));
        scene.add_caster(Caster::new(cylinder, Vec3::new(-3.0, 2.0, -2.0), Vec3::ZERO));
        scene.add_caster(Caster::new(cylinder, Vec3::new(3.0, 11.0, 3.0), Vec3::ZERO));
        let spinning_ring =
            scene.add_caster(Caster::new(ring, Vec3::new(5.0, 12.0, -4.0), Vec3::ZERO));

        // The room interior is an inverted model; extruding its
        // volume from the inside looks wrong, so it only receives.
        scene.add_caster(Caster::with_shadow(interior, Vec3::ZERO, Vec3::ZERO, false));

        // First two lights are animated, the rest are static.
        scene.add_light(Light::point(Vec3::new(2.0, 6.0, 2.0), Vec3::new(0.2, 0.2, 0.2)));
        scene.add_light(Light::point(Vec3::new(0.0, 8.0, 0.0), Vec3::new(0.4, 0.4, 0.4)));
        scene.add_light(Light::point(Vec3::new(5.0, 6.0, 5.0), Vec3::new(0.2, 0.2, 0.6)));
        scene.add_light(Light::point(Vec3::new(5.0, 6.0, -5.0), Vec3::new(0.2, 0.4, 0.2)));
        scene.add_light(Light::point(Vec3::new(-5.0, 6.0, -5.0), Vec3::new(0.5, 0.4, 0.1)));
        scene.add_light(Light::point(Vec3::new(-5.0, 6.0, 5.0), Vec3::new(0.2, 0.1, 0.1)));

        Self {
            app: None,
            renderer: None,
            scene,
            camera: Camera::new(Vec3::new(0.0, 4.0, 0.0), 18.0),
            config: RenderConfig::default(),
            game_loop: GameLoop::default(),
            input: CameraInput::default(),
            time: 0.0,
            spinning_cube,
            spinning_ring,
        }
    }

    fn update(&mut self, dt: f32) {
        let input = &self.input;
        let camera = &mut self.camera;
        if input.orbit_left {
            camera.yaw -= ORBIT_SPEED * dt;
        }
        if input.orbit_right {
            camera.yaw += ORBIT_SPEED * dt;
        }
        if input.orbit_up {
            camera.pitch = (camera.pitch + ORBIT_SPEED * dt).min(89.0);
        }
        if input.orbit_down {
            camera.pitch = (camera.pitch - ORBIT_SPEED * dt).max(-89.0);
        }
        if input.zoom_in {
            camera.distance = (camera.distance - ZOOM_SPEED * dt).max(2.0);
        }
        if input.zoom_out {
            camera.distance = (camera.distance + ZOOM_SPEED * dt).min(60.0);
        }

        if !self.config.animate {
            return;
        }
        self.time += dt;

        let t = self.time;
        self.scene.lights[0].position.x = 4.0 * t.sin();
        self.scene.lights[0].position.z = 4.0 * t.cos();
        self.scene.lights[1].position.x = 4.0 * (t * 1.25).sin() + 6.0;
        self.scene.lights[1].position.y = 4.0 * (t * 1.25).cos() + 6.0;

        self.scene.casters[self.spinning_ring].rotate(Vec3::new(10.0 * dt, 0.0, 20.0 * dt));
        self.scene.casters[self.spinning_cube].rotate(Vec3::new(45.0 * dt, 0.0, 0.0));
    }

    fn handle_key(&mut self, keycode: KeyCode, pressed: bool) {
        match keycode {
            KeyCode::ArrowLeft | KeyCode::KeyA => self.input.orbit_left = pressed,
            KeyCode::ArrowRight | KeyCode::KeyD => self.input.orbit_right = pressed,
            KeyCode::ArrowUp | KeyCode::KeyW => self.input.orbit_up = pressed,
            KeyCode::ArrowDown | KeyCode::KeyS => self.input.orbit_down = pressed,
            KeyCode::PageUp | KeyCode::Equal | KeyCode::NumpadAdd => {
                self.input.zoom_in = pressed;
            }
            KeyCode::PageDown | KeyCode::Minus | KeyCode::NumpadSubtract => {
                self.input.zoom_out = pressed;
            }
            _ if !pressed => {}
            KeyCode::BracketRight => {
                self.config.max_visible_lights =
                    (self.config.max_visible_lights + 1).min(self.scene.lights.len());
                info!("visible lights: {}", self.config.max_visible_lights);
            }
            KeyCode::BracketLeft => {
                self.config.max_visible_lights = self.config.max_visible_lights.saturating_sub(1);
                info!("visible lights: {}", self.config.max_visible_lights);
            }
            KeyCode::Space => {
                self.config.animate = !self.config.animate;
                info!("animation: {}", self.config.animate);
            }
            KeyCode::KeyV => {
                self.config.draw_shadow_volumes = !self.config.draw_shadow_volumes;
                info!("shadow volume overlay: {}", self.config.draw_shadow_volumes);
            }
            KeyCode::KeyC => {
                self.config.draw_shadows = !self.config.draw_shadows;
                info!("shadows: {}", self.config.draw_shadows);
            }
            KeyCode::KeyB => {
                self.config.ambient_only = !self.config.ambient_only;
                info!("ambient only: {}", self.config.ambient_only);
            }
            KeyCode::KeyL => {
                self.config.draw_light_markers = !self.config.draw_light_markers;
                info!("light markers: {}", self.config.draw_light_markers);
            }
            KeyCode::KeyN => {
                self.config.draw_silhouettes = !self.config.draw_silhouettes;
                info!("silhouette overlay: {}", self.config.draw_silhouettes);
            }
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let Self {
            app,
            renderer,
            scene,
            camera,
            config,
            ..
        } = self;
        let (Some(app), Some(renderer)) = (app.as_mut(), renderer.as_mut()) else {
            return;
        };

        let Some(frame) = app.gpu.begin_frame() else {
            app.window.request_redraw();
            return;
        };
        let color_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = app
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Station Encoder"),
            });

        let view_proj = camera.view_proj(app.gpu.aspect_ratio());
        renderer.draw_scene(
            &mut encoder,
            &color_view,
            app.gpu.depth_view(),
            scene,
            view_proj,
            config,
        );

        app.gpu.queue.submit(Some(encoder.finish()));
        app.gpu.end_frame(frame);
        app.window.request_redraw();
    }
}

impl ApplicationHandler for Station {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let app = match App::new(event_loop, "Station").block_on() {
            Ok(app) => app,
            Err(err) => {
                log::error!("startup failed: {err:#}");
                event_loop.exit();
                return;
            }
        };

        let mut renderer = ShadowRenderer::new(
            app.gpu.device.clone(),
            app.gpu.queue.clone(),
            app.gpu.surface_format(),
        );
        renderer.upload_scene(&self.scene);

        app.window.request_redraw();
        self.app = Some(app);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if let Some(ref app) = self.app {
            if app.window.id() != window_id {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(ref mut app) = self.app {
                    app.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                let steps = self.game_loop.tick();
                let dt = self.game_loop.delta_time();
                for _ in 0..steps {
                    self.update(dt);
                }
                self.redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.handle_key(keycode, event.state.is_pressed());
                }
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut station = Station::new();
    event_loop.run_app(&mut station)?;
    Ok(())
}
