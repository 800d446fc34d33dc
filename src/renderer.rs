use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::scene::{Material, Mesh, MeshId, Scene};
use crate::types::{CameraUniform, ModelUniform, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Control state mirrored onto the HUD each frame
#[derive(Debug, Clone, Copy)]
pub struct HudState {
    pub fps: f32,
    pub first_arc: bool,
    pub second_arc: bool,
    pub speed: u32,
    pub orbit: bool,
    pub keeper: bool,
}

/// GPU residency for one mesh: geometry buffers plus its model uniform
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct Hud {
    renderer: egui_wgpu::Renderer,
    state: egui_winit::State,
    ctx: egui::Context,
}

/// Forward rasterizer for the retained scene graph.
///
/// Geometry buffers upload once per mesh (keyed by [`MeshId`], lazily on
/// first sight so nodes parked outside the scene upload when they first
/// appear); per-mesh world transform and color re-upload every frame.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    opaque_pipeline: wgpu::RenderPipeline,
    double_sided_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    meshes: HashMap<MeshId, GpuMesh>,
    hud: Option<Hud>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, with_hud: bool) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create rendering surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| anyhow!("failed to find appropriate adapter"))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                // Line polygon mode backs the wireframe toggle
                required_features: wgpu::Features::POLYGON_MODE_LINE,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to acquire device")?;

        let config = Self::surface_config(&surface, &adapter, size);
        surface.configure(&device, &config);
        let depth_view = Self::create_depth_view(&device, size);

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("model_bind_group_layout"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            "opaque",
            wgpu::PolygonMode::Fill,
            Some(wgpu::Face::Back),
            wgpu::BlendState::REPLACE,
            true,
        );
        let double_sided_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            "double_sided",
            wgpu::PolygonMode::Fill,
            None,
            wgpu::BlendState::REPLACE,
            true,
        );
        let wireframe_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            "wireframe",
            wgpu::PolygonMode::Line,
            None,
            wgpu::BlendState::REPLACE,
            true,
        );
        let translucent_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            config.format,
            "translucent",
            wgpu::PolygonMode::Fill,
            None,
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        );

        let hud = with_hud.then(|| {
            let ctx = egui::Context::default();
            let state = egui_winit::State::new(
                ctx.clone(),
                egui::ViewportId::ROOT,
                &window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            let renderer =
                egui_wgpu::Renderer::new(&device, config.format, egui_wgpu::RendererOptions::default());
            Hud {
                renderer,
                state,
                ctx,
            }
        });

        Ok(Self {
            device,
            queue,
            surface,
            config,
            size,
            depth_view,
            camera_buffer,
            camera_bind_group,
            model_layout,
            opaque_pipeline,
            double_sided_pipeline,
            wireframe_pipeline,
            translucent_pipeline,
            meshes: HashMap::new(),
            hud,
        })
    }

    fn surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: caps.present_modes[0],
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(
        device: &wgpu::Device,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        label: &str,
        polygon_mode: wgpu::PolygonMode,
        cull_mode: Option<wgpu::Face>,
        blend: wgpu::BlendState,
        depth_write: bool,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, new_size);
    }

    /// Reconfigure with the current size after a lost/outdated surface.
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    /// Upload geometry buffers for a mesh the first time it is drawn.
    fn ensure_mesh(&mut self, mesh: &Mesh) {
        if self.meshes.contains_key(&mesh.id) {
            return;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertices"),
                contents: bytemuck::cast_slice(&mesh.geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Indices"),
                contents: bytemuck::cast_slice(&mesh.geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Uniform"),
                contents: bytemuck::cast_slice(&[ModelUniform::new(
                    Mat4::IDENTITY,
                    mesh.material.color,
                    mesh.material.opacity,
                )]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("model_bind_group"),
        });

        self.meshes.insert(
            mesh.id,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.geometry.indices.len() as u32,
                uniform_buffer,
                bind_group,
            },
        );
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        view_proj: Mat4,
        window: &Window,
        hud_state: &HudState,
    ) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view_proj)]),
        );

        // Flatten the scene and refresh per-mesh uniforms
        let mut items: Vec<(MeshId, Material)> = Vec::new();
        scene.visit_meshes(|world, mesh| {
            self.ensure_mesh(mesh);
            let gpu = &self.meshes[&mesh.id];
            self.queue.write_buffer(
                &gpu.uniform_buffer,
                0,
                bytemuck::cast_slice(&[ModelUniform::new(
                    world,
                    mesh.material.color,
                    mesh.material.opacity,
                )]),
            );
            items.push((mesh.id, mesh.material));
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let [bg_r, bg_g, bg_b] = scene.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg_r as f64,
                            g: bg_g as f64,
                            b: bg_b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            // Opaque and wireframe first, translucent last so the nets
            // blend over whatever is behind them
            let batches = [
                (
                    &self.opaque_pipeline,
                    Self::select(&items, |m| !m.wireframe && m.opacity >= 1.0 && !m.double_sided),
                ),
                (
                    &self.double_sided_pipeline,
                    Self::select(&items, |m| !m.wireframe && m.opacity >= 1.0 && m.double_sided),
                ),
                (
                    &self.wireframe_pipeline,
                    Self::select(&items, |m| m.wireframe),
                ),
                (
                    &self.translucent_pipeline,
                    Self::select(&items, |m| !m.wireframe && m.opacity < 1.0),
                ),
            ];

            for (pipeline, ids) in batches {
                if ids.is_empty() {
                    continue;
                }
                pass.set_pipeline(pipeline);
                for id in ids {
                    let gpu = &self.meshes[&id];
                    pass.set_bind_group(1, &gpu.bind_group, &[]);
                    pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }
        }

        if self.hud.is_some() {
            self.draw_hud(&mut encoder, &view, window, hud_state);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn select(items: &[(MeshId, Material)], keep: impl Fn(&Material) -> bool) -> Vec<MeshId> {
        items
            .iter()
            .filter(|(_, material)| keep(material))
            .map(|(id, _)| *id)
            .collect()
    }

    fn draw_hud(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        hud_state: &HudState,
    ) {
        let Some(hud) = self.hud.as_mut() else {
            return;
        };

        let raw_input = hud.state.take_egui_input(window);
        let full_output = hud.ctx.run(raw_input, |ctx| {
            egui::Window::new("HUD")
                .title_bar(false)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.0}", hud_state.fps))
                            .size(48.0)
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    ui.label(
                        egui::RichText::new("FPS")
                            .size(12.0)
                            .color(egui::Color32::GRAY),
                    );
                    let on_off = |flag: bool| if flag { "on" } else { "off" };
                    ui.label(format!(
                        "arc 1 {}  arc 2 {}  speed {}",
                        on_off(hud_state.first_arc),
                        on_off(hud_state.second_arc),
                        hud_state.speed,
                    ));
                    ui.label(format!(
                        "orbit {}  keeper {}",
                        on_off(hud_state.orbit),
                        on_off(hud_state.keeper),
                    ));
                    ui.label(
                        egui::RichText::new("o orbit | 1/2 arcs | up/down speed | 3 shrink | w wire | g keeper")
                            .size(11.0)
                            .color(egui::Color32::GRAY),
                    );
                });
        });

        hud.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = hud
            .ctx
            .tessellate(full_output.shapes, hud.ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            hud.renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        hud.renderer
            .update_buffers(&self.device, &self.queue, encoder, &tris, &screen_descriptor);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HUD Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // SAFETY: the render pass borrows the encoder, but egui-wgpu
            // wants 'static. The pass is dropped before the encoder is
            // touched again.
            let pass_static = unsafe {
                std::mem::transmute::<&mut wgpu::RenderPass<'_>, &mut wgpu::RenderPass<'static>>(
                    &mut pass,
                )
            };
            hud.renderer.render(pass_static, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            hud.renderer.free_texture(id);
        }
    }

    /// Let the HUD see a window event first; true means it consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match self.hud.as_mut() {
            Some(hud) => hud.state.on_window_event(window, event).consumed,
            None => false,
        }
    }
}
