//! Fade and glow-disc pipelines for the trail pass.

use bytemuck::{Pod, Zeroable};

use crate::frame::{Frame, ParticleInstance};
use crate::shaders::{FADE_SHADER, GLOW_EXTENT, GLOW_SHADER};

/// Initial instance buffer capacity, in particles.
const INITIAL_CAPACITY: usize = 4096;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenUniforms {
    size: [f32; 2],
    glow: f32,
    _padding: f32,
}

pub struct GlowRenderer {
    fade_pipeline: wgpu::RenderPipeline,
    fade_buffer: wgpu::Buffer,
    fade_bind_group: wgpu::BindGroup,
    glow_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    instance_count: u32,
}

impl GlowRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let fade_buffer = uniform_buffer(device, "Fade Uniform Buffer", 16);
        let screen_buffer = uniform_buffer(device, "Screen Uniform Buffer", std::mem::size_of::<ScreenUniforms>());

        let (fade_layout, fade_bind_group) =
            uniform_bind_group(device, "Fade", &fade_buffer, wgpu::ShaderStages::FRAGMENT);
        let (screen_layout, screen_bind_group) = uniform_bind_group(
            device,
            "Screen",
            &screen_buffer,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        let fade_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Fade Shader"),
            source: wgpu::ShaderSource::Wgsl(FADE_SHADER.into()),
        });
        let glow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Glow Shader"),
            source: wgpu::ShaderSource::Wgsl(GLOW_SHADER.into()),
        });

        let fade_pipeline = create_pipeline(device, "Fade", &fade_shader, &fade_layout, &[], format);

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x2,
                1 => Float32,
                2 => Float32,
                3 => Float32x3,
            ],
        };
        let glow_pipeline = create_pipeline(device, "Glow", &glow_shader, &screen_layout, &[instance_layout], format);

        Self {
            fade_pipeline,
            fade_buffer,
            fade_bind_group,
            glow_pipeline,
            screen_buffer,
            screen_bind_group,
            instance_buffer: instance_buffer(device, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            instance_count: 0,
        }
    }

    /// Upload this frame's uniforms and instances, growing the buffer if needed.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &Frame, width: u32, height: u32) {
        let fade = [0.0f32, 0.0, 0.0, frame.fade.clamp(0.0, 1.0)];
        queue.write_buffer(&self.fade_buffer, 0, bytemuck::cast_slice(&fade));

        let screen = ScreenUniforms {
            size: [width.max(1) as f32, height.max(1) as f32],
            glow: GLOW_EXTENT,
            _padding: 0.0,
        };
        queue.write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&screen));

        if frame.particles.len() > self.capacity {
            self.capacity = frame.particles.len().next_power_of_two();
            self.instance_buffer = instance_buffer(device, self.capacity);
            log::debug!("instance buffer grown to {} particles", self.capacity);
        }
        if !frame.particles.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&frame.particles));
        }
        self.instance_count = frame.particles.len() as u32;
    }

    /// Fade the previous contents, then draw the prepared discs in order.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.fade_pipeline);
        pass.set_bind_group(0, &self.fade_bind_group, &[]);
        pass.draw(0..3, 0..1);

        if self.instance_count > 0 {
            pass.set_pipeline(&self.glow_pipeline);
            pass.set_bind_group(0, &self.screen_bind_group, &[]);
            pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            pass.draw(0..6, 0..self.instance_count);
        }
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Glow Instance Buffer"),
        size: (capacity * std::mem::size_of::<ParticleInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn uniform_bind_group(
    device: &wgpu::Device,
    name: &str,
    buffer: &wgpu::Buffer,
    visibility: wgpu::ShaderStages,
) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{name} Bind Group Layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{name} Bind Group")),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (layout, bind_group)
}

fn create_pipeline(
    device: &wgpu::Device,
    name: &str,
    shader: &wgpu::ShaderModule,
    bind_group_layout: &wgpu::BindGroupLayout,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{name} Pipeline Layout")),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{name} Pipeline")),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
