use wgpu::util::DeviceExt;

use crate::{
    blend::params::BlendParameterBlock,
    foundation::{
        core::Extent,
        error::{BlendError, BlendResult},
    },
    render::gpu::{
        context::GpuContext,
        texture::{TextureResource, TextureUsage},
    },
    settings::EngineSettings,
};

const KERNEL_SOURCE: &str = r#"
struct Params {
  x_offset: i32,
  y_offset: i32,
  wrap_horizontal: u32,
  wrap_vertical: u32,
  force_opaque_result: u32,
  _pad0: u32,
  _pad1: u32,
  _pad2: u32,
};

@group(0) @binding(0) var sprite_tex: texture_2d<f32>;
@group(0) @binding(1) var background_tex: texture_2d<f32>;
@group(0) @binding(2) var target_tex: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(3) var<uniform> params: Params;

// Wrapped offsets arrive reduced into 0..n, so c is never negative.
fn wrap_coord(c: i32, n: i32) -> i32 {
  return c % n;
}

@compute @workgroup_size(WG_X, WG_Y, 1)
fn composite(@builtin(global_invocation_id) gid: vec3<u32>) {
  let sprite_size = textureDimensions(sprite_tex);
  if (gid.x >= sprite_size.x || gid.y >= sprite_size.y) {
    return;
  }
  let bg_size = vec2<i32>(textureDimensions(background_tex));

  var bx = i32(gid.x) + params.x_offset;
  var by = i32(gid.y) + params.y_offset;
  if (params.wrap_horizontal != 0u) {
    bx = wrap_coord(bx, bg_size.x);
  } else if (bx < 0 || bx >= bg_size.x) {
    return;
  }
  if (params.wrap_vertical != 0u) {
    by = wrap_coord(by, bg_size.y);
  } else if (by < 0 || by >= bg_size.y) {
    return;
  }

  let s = textureLoad(sprite_tex, vec2<i32>(gid.xy), 0);
  let b = textureLoad(background_tex, vec2<i32>(bx, by), 0);
  let force = params.force_opaque_result != 0u;

  var out = s;
  if (b.a != 0.0 && s.a != 1.0) {
    if (s.a == 0.0) {
      // Target already holds the background.
      return;
    }
    let inv = 1.0 - s.a;
    out = vec4<f32>(s.rgb * s.a + b.rgb * inv, s.a + b.a * inv);
  }
  if (force) {
    out.a = 1.0;
  }
  textureStore(target_tex, vec2<i32>(bx, by), clamp(out, vec4<f32>(0.0), vec4<f32>(1.0)));
}
"#;

/// Compiled composite pipeline and its dispatch geometry.
#[derive(Debug)]
pub struct CompositeKernel {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    workgroup: (u32, u32),
    max_groups: u32,
}

impl CompositeKernel {
    /// Size thread groups for the device and compile the kernel.
    ///
    /// Compilation or pipeline validation failures are configuration errors.
    pub fn new(ctx: &GpuContext, settings: &EngineSettings) -> BlendResult<Self> {
        settings.validate()?;
        let limits = ctx.device().limits();
        let max_threads = settings
            .max_threads_per_group
            .unwrap_or(limits.max_compute_invocations_per_workgroup)
            .min(limits.max_compute_invocations_per_workgroup);
        let workgroup = workgroup_size(
            settings.execution_width,
            max_threads,
            limits.max_compute_workgroup_size_x,
            limits.max_compute_workgroup_size_y,
        );
        tracing::debug!(
            width = workgroup.0,
            height = workgroup.1,
            "composite workgroup size"
        );

        let source = KERNEL_SOURCE
            .replace("WG_X", &workgroup.0.to_string())
            .replace("WG_Y", &workgroup.1.to_string());

        let (pipeline, bind_group_layout) = ctx
            .scoped(|device| {
                let bind_group_layout =
                    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                        label: Some("spriteblend_composite_bgl"),
                        entries: &[
                            sampled_entry(0),
                            sampled_entry(1),
                            wgpu::BindGroupLayoutEntry {
                                binding: 2,
                                visibility: wgpu::ShaderStages::COMPUTE,
                                ty: wgpu::BindingType::StorageTexture {
                                    access: wgpu::StorageTextureAccess::WriteOnly,
                                    format: wgpu::TextureFormat::Rgba8Unorm,
                                    view_dimension: wgpu::TextureViewDimension::D2,
                                },
                                count: None,
                            },
                            wgpu::BindGroupLayoutEntry {
                                binding: 3,
                                visibility: wgpu::ShaderStages::COMPUTE,
                                ty: wgpu::BindingType::Buffer {
                                    ty: wgpu::BufferBindingType::Uniform,
                                    has_dynamic_offset: false,
                                    min_binding_size: wgpu::BufferSize::new(
                                        BlendParameterBlock::SIZE,
                                    ),
                                },
                                count: None,
                            },
                        ],
                    });

                let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("spriteblend_composite_shader"),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                });

                let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("spriteblend_composite_pl"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });

                let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("spriteblend_composite_pipeline"),
                    layout: Some(&layout),
                    module: &module,
                    entry_point: Some("composite"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    cache: None,
                });
                (pipeline, bind_group_layout)
            })
            .map_err(|e| {
                BlendError::configuration(format!("composite kernel failed to build: {e}"))
            })?;

        Ok(Self {
            pipeline,
            bind_group_layout,
            workgroup,
            max_groups: limits.max_compute_workgroups_per_dimension,
        })
    }

    /// Threads per group as `(width, height)`.
    pub fn workgroup(&self) -> (u32, u32) {
        self.workgroup
    }

    /// Blend `sprite` onto a copy of `background` and wait for the GPU to finish.
    ///
    /// Returns the read-write target holding the composite.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(
        &self,
        ctx: &GpuContext,
        background: &TextureResource,
        sprite: &TextureResource,
        block: &BlendParameterBlock,
    ) -> BlendResult<TextureResource> {
        let groups = dispatch_size(sprite.extent(), self.workgroup);
        if groups.0 > self.max_groups || groups.1 > self.max_groups {
            return Err(BlendError::resource(format!(
                "dispatch {}x{} exceeds device limit {}",
                groups.0, groups.1, self.max_groups
            )));
        }
        tracing::debug!(groups_x = groups.0, groups_y = groups.1, "composite dispatch");

        let target = TextureResource::allocate(
            ctx,
            background.extent(),
            TextureUsage::ReadWrite,
            "spriteblend_target",
        )?;

        let (bind_group, _uniform) = ctx
            .scoped(|device| {
                let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("spriteblend_params"),
                    contents: bytemuck::bytes_of(block),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("spriteblend_composite_bg"),
                    layout: &self.bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(sprite.view()),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(background.view()),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(target.view()),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: uniform.as_entire_binding(),
                        },
                    ],
                });
                (bind_group, uniform)
            })
            .map_err(|e| BlendError::resource(format!("composite bind group: {e}")))?;

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("spriteblend_composite"),
            });
        encoder.copy_texture_to_texture(
            background.copy_target(),
            target.copy_target(),
            background.copy_size(),
        );
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("spriteblend_composite_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups.0, groups.1, 1);
        }

        ctx.scoped(|_| {
            ctx.queue().submit(Some(encoder.finish()));
        })
        .map_err(|e| BlendError::resource(format!("composite submit: {e}")))?;
        ctx.wait_idle()?;

        Ok(target)
    }
}

fn sampled_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: false },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Thread-group shape: `execution_width` wide, as tall as the thread budget allows.
pub(crate) fn workgroup_size(
    execution_width: u32,
    max_threads: u32,
    max_x: u32,
    max_y: u32,
) -> (u32, u32) {
    let width = execution_width.clamp(1, max_x.min(max_threads).max(1));
    let height = (max_threads / width).clamp(1, max_y.max(1));
    (width, height)
}

/// Groups needed to cover `sprite`, rounding up.
pub(crate) fn dispatch_size(sprite: Extent, workgroup: (u32, u32)) -> (u32, u32) {
    (
        sprite.width.div_ceil(workgroup.0),
        sprite.height.div_ceil(workgroup.1),
    )
}

#[cfg(test)]
#[path = "../../../tests/unit/render/gpu/kernel.rs"]
mod tests;
