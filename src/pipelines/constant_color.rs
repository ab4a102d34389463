use crate::{
    context::CullMode,
    data_structures::{
        instance::InstanceRaw,
        model::{PositionVertex, Vertex},
        texture::Texture,
    },
};

/// Straight alpha blending for both colour and alpha.
pub const ALPHA_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

/// The constant-colour pipeline in both rasterizer states the scene switches between.
#[derive(Debug)]
pub struct ConstantColorPipelines {
    pub unculled: wgpu::RenderPipeline,
    pub culled: wgpu::RenderPipeline,
}

impl ConstantColorPipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Constant Color Pipeline Layout"),
                bind_group_layouts: &[camera_bind_group_layout],
                immediate_size: 0,
            });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Constant Color Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("constant_color.wgsl").into()),
        });
        let vertex_layouts = [PositionVertex::desc(), InstanceRaw::desc()];

        let pipeline = |cull_mode| {
            mk_render_pipeline(
                device,
                &render_pipeline_layout,
                config.format,
                Some(ALPHA_BLEND),
                cull_mode,
                Some(Texture::DEPTH_FORMAT),
                &vertex_layouts,
                &shader,
            )
        };

        Self {
            unculled: pipeline(None),
            culled: pipeline(Some(wgpu::Face::Back)),
        }
    }

    pub fn for_cull_mode(&self, cull_mode: CullMode) -> &wgpu::RenderPipeline {
        match cull_mode {
            CullMode::None => &self.unculled,
            CullMode::Back => &self.culled,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    cull_mode: Option<wgpu::Face>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(match cull_mode {
            None => "Constant Color Pipeline (cull none)",
            Some(_) => "Constant Color Pipeline (cull back)",
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
