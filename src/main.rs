#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::panel::Side;
use egui::{Color32, Id, Response};

use std::ops::RangeInclusive;
use std::sync::Arc;

mod gfx;
mod shade;
mod viewer;

use gfx::camera::Camera;
use gfx::shader::{Shader, ShaderUniformTypes};
use gfx::Model;
use shade::{fragment_shade, vertex_shade, FalloffMode, TexcoordSource};
use viewer::{Cloud, DiscModel};

const WIDTH: f32 = 1280f32;
const HEIGHT: f32 = 800f32;

const DEFAULT_POINT_COUNT: usize = 256;
const DEFAULT_HALF_SIZE: f32 = 0.1;

const SHADER_VERTEX: &str = include_str!("shaders/disc.vs");
const SHADER_FRAGMENT: &str = include_str!("shaders/disc.fs");

const PREVIEW_SIZE: usize = 96;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WIDTH, HEIGHT]),
        multisampling: 2,

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        "Point Cloud Disc Viewer",
        options,
        Box::new(|cc| Ok(Box::new(DiscViewerApp::new(cc)))),
    )
}

struct DiscViewerApp {
    /// Behind an `Arc<Mutex<…>>` so we can pass it to [`egui::PaintCallback`] and paint later.
    model: Arc<Mutex<DiscModel>>,
    shader: Shader,

    camera: Camera,
    model_mat: glam::Mat4,

    falloff_mode: FalloffMode,
    texcoord_source: TexcoordSource,
    point_count: usize,
    half_size: f32,
    animate: bool,
    cam_speed: f32,
    bg_color: Color32,

    preview: Option<egui::TextureHandle>,
    preview_mode: Option<FalloffMode>,

    /// Count from the last painted frame, shown in the panel.
    visible_points: usize,
}

impl DiscViewerApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader = Shader::from_src(gl, SHADER_VERTEX, SHADER_FRAGMENT)
            .expect("Could not build the disc shader");

        let mut model = DiscModel::new(Cloud::new(DEFAULT_POINT_COUNT), DEFAULT_HALF_SIZE);
        model.setup_gl(gl);

        log::info!("Generated a cloud of {DEFAULT_POINT_COUNT} points");

        Self {
            model: Arc::new(Mutex::new(model)),
            shader,
            camera: Camera::new(),
            model_mat: glam::Mat4::IDENTITY,
            falloff_mode: FalloffMode::CosineSmooth,
            texcoord_source: TexcoordSource::Attribute,
            point_count: DEFAULT_POINT_COUNT,
            half_size: DEFAULT_HALF_SIZE,
            animate: true,
            cam_speed: 1.5f32,
            bg_color: Color32::from_rgb(10, 10, 10),
            preview: None,
            preview_mode: None,
            visible_points: 0,
        }
    }
}

impl eframe::App for DiscViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        egui::SidePanel::new(Side::Left, Id::new("Control Panel")).show(ctx, |ui| {
            egui::ComboBox::from_label("Falloff")
                .selected_text(self.falloff_mode.label())
                .show_ui(ui, |ui| {
                    for mode in FalloffMode::ALL {
                        ui.selectable_value(&mut self.falloff_mode, mode, mode.label());
                    }
                });

            egui::ComboBox::from_label("Texcoord source")
                .selected_text(self.texcoord_source.label())
                .show_ui(ui, |ui| {
                    for source in TexcoordSource::ALL {
                        ui.selectable_value(&mut self.texcoord_source, source, source.label());
                    }
                });

            ui.add(egui::Separator::default());

            let count_changed = ui
                .add(
                    egui::Slider::new(&mut self.point_count, RangeInclusive::new(1, 4096))
                        .text("Points"),
                )
                .changed();
            if ui.button("Regenerate").clicked() || count_changed {
                let mut model = self.model.lock();
                model.set_cloud(Cloud::new(self.point_count));
                model.update_gl(frame.gl().unwrap());
                log::info!("Regenerated a cloud of {} points", self.point_count);
            }

            if ui
                .add(
                    egui::Slider::new(&mut self.half_size, RangeInclusive::new(0.01, 0.5))
                        .text("Disc size"),
                )
                .changed()
            {
                let mut model = self.model.lock();
                model.set_half_size(self.half_size);
                model.update_gl(frame.gl().unwrap());
            }

            ui.add(
                egui::Slider::new(&mut self.cam_speed, RangeInclusive::new(0.0, 10.0))
                    .text("Camera speed"),
            );
            ui.add(egui::Checkbox::new(&mut self.animate, "Animate"));
            ui.horizontal(|ui| {
                ui.color_edit_button_srgba(&mut self.bg_color);
                ui.label("BG Color");
            });

            ui.label(format!(
                "In view: {} / {}",
                self.visible_points, self.point_count
            ));

            ui.add(egui::Separator::default());
            self.falloff_preview_ui(ui, ctx);
        });

        if self.animate {
            let dt = ctx.input(|i| i.predicted_dt);
            let mut model = self.model.lock();
            model.step(dt);
            model.update_gl(frame.gl().unwrap());
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style())
                .fill(self.bg_color)
                .show(ui, |ui| {
                    self.custom_painting(ui, ctx);
                });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shader.destroy(gl);
            self.model.lock().destroy_gl(gl);
        }
    }
}

impl DiscViewerApp {
    fn handle_input(&mut self, ctx: &egui::Context, response: &Response) {
        let cam = &mut self.camera;

        ctx.input(|i| {
            let amount = self.cam_speed * i.predicted_dt;

            if i.key_down(egui::Key::W) {
                cam.move_forward(amount);
            }
            if i.key_down(egui::Key::S) {
                cam.move_backward(amount);
            }
            if i.key_down(egui::Key::A) {
                cam.move_left(amount);
            }
            if i.key_down(egui::Key::D) {
                cam.move_right(amount);
            }
            if i.key_down(egui::Key::Space) {
                cam.move_up(amount);
            }
            if i.modifiers.shift {
                cam.move_down(amount);
            }
        });

        cam.move_yaw(response.drag_motion().x * 0.1);
        cam.move_pitch(-response.drag_motion().y * 0.1);
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();

        let (rect, response) = ui.allocate_at_least(size, egui::Sense::drag());

        let proj =
            glam::Mat4::perspective_rh_gl(45f32.to_radians(), size.x / size.y, 0.01f32, 100f32);

        // Handle Input related things
        self.handle_input(ctx, &response);

        let view = self.camera.get_mtx();
        let model_mat = self.model_mat;

        // Run the vertex stage over the point centers to report how many
        // discs currently land inside the frustum.
        self.visible_points = {
            let model = self.model.lock();
            model
                .cloud
                .points()
                .iter()
                .filter(|&&point| {
                    let out = vertex_shade(
                        self.texcoord_source,
                        0,
                        glam::Vec2::ZERO,
                        point,
                        &model_mat,
                        &view,
                        &proj,
                    );
                    clip_visible(out.clip_position)
                })
                .count()
        };

        // Clone to Give to callback
        let model = self.model.clone();
        let shader = self.shader.clone();
        let falloff_mode = self.falloff_mode.uniform_index();
        let texcoord_source = self.texcoord_source.uniform_index();
        let bg_color = self.bg_color;

        // Create Callback
        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let model = &mut model.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.disable(glow::DEPTH_TEST);
                    gl.enable(glow::BLEND);
                    gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                    gl.clear_color(
                        bg_color.r() as f32 / u8::MAX as f32,
                        bg_color.g() as f32 / u8::MAX as f32,
                        bg_color.b() as f32 / u8::MAX as f32,
                        bg_color.a() as f32 / u8::MAX as f32,
                    );
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                shader.use_program(gl);
                shader.set_uniform(gl, "proj", ShaderUniformTypes::Mat4(&proj));
                shader.set_uniform(gl, "view", ShaderUniformTypes::Mat4(&view));
                shader.set_uniform(gl, "model", ShaderUniformTypes::Mat4(&model_mat));
                shader.set_uniform(gl, "falloff_mode", ShaderUniformTypes::I32(falloff_mode));
                shader.set_uniform(
                    gl,
                    "texcoord_source",
                    ShaderUniformTypes::I32(texcoord_source),
                );
                model.draw(gl, &shader);
            })),
        };
        ui.painter().add(callback);
    }

    /// Small CPU-shaded image of the current falloff, shown in the panel.
    fn falloff_preview_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.preview_mode != Some(self.falloff_mode) {
            let image = falloff_preview(self.falloff_mode);
            self.preview = Some(ctx.load_texture(
                "falloff preview",
                image,
                egui::TextureOptions::LINEAR,
            ));
            self.preview_mode = Some(self.falloff_mode);
        }

        if let Some(preview) = &self.preview {
            ui.label("Preview");
            ui.image(preview);
        }
    }
}

/// Whether a clip-space position survives clipping (before perspective
/// division).
fn clip_visible(clip: glam::Vec4) -> bool {
    clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z.abs() <= clip.w
}

/// Run [`fragment_shade`] over a small pixel grid covering slightly more than
/// the unit disc.
fn falloff_preview(mode: FalloffMode) -> egui::ColorImage {
    let mut rgba = Vec::with_capacity(PREVIEW_SIZE * PREVIEW_SIZE * 4);

    for y in 0..PREVIEW_SIZE {
        for x in 0..PREVIEW_SIZE {
            // Pixel centers mapped to [-1.1, 1.1]^2.
            let tc = glam::Vec2::new(
                (x as f32 + 0.5) / PREVIEW_SIZE as f32 * 2.2 - 1.1,
                (y as f32 + 0.5) / PREVIEW_SIZE as f32 * 2.2 - 1.1,
            );
            let color = fragment_shade(mode, tc);
            rgba.push((color.x * 255.0) as u8);
            rgba.push((color.y * 255.0) as u8);
            rgba.push((color.z * 255.0) as u8);
            rgba.push((color.w * 255.0) as u8);
        }
    }

    egui::ColorImage::from_rgba_unmultiplied([PREVIEW_SIZE, PREVIEW_SIZE], &rgba)
}
