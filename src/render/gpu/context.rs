use crate::{
    foundation::error::{BlendError, BlendResult},
    settings::{EngineSettings, PowerPreference},
};

/// Device and queue a compositor submits work to.
///
/// Either requested from the system with [`GpuContext::request`] or handed in by a host that
/// already owns a device ([`GpuContext::from_parts`]).
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
}

impl GpuContext {
    /// Select an adapter and open a device that can run compute kernels.
    pub fn request(settings: &EngineSettings) -> BlendResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: match settings.power_preference {
                PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
                PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
            },
            compatible_surface: None,
            force_fallback_adapter: settings.force_fallback_adapter,
        }))
        .map_err(|e| match e {
            wgpu::RequestAdapterError::NotFound { .. } => {
                BlendError::configuration("no gpu adapter available")
            }
            other => {
                BlendError::configuration(format!("wgpu request_adapter failed: {other:?}"))
            }
        })?;

        let adapter_info = adapter.get_info();
        if !adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
        {
            return Err(BlendError::configuration(format!(
                "adapter '{}' does not support compute shaders",
                adapter_info.name
            )));
        }
        tracing::debug!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            device_type = ?adapter_info.device_type,
            "selected gpu adapter"
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("spriteblend_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| BlendError::configuration(format!("wgpu request_device failed: {e:?}")))?;

        Ok(Self::from_parts(device, queue, adapter_info))
    }

    /// Wrap a device owned by the caller.
    pub fn from_parts(
        device: wgpu::Device,
        queue: wgpu::Queue,
        adapter_info: wgpu::AdapterInfo,
    ) -> Self {
        Self {
            device,
            queue,
            adapter_info,
        }
    }

    /// Device the kernel runs on.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Queue for uploads, dispatches and copies.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Name and backend of the adapter behind the device.
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Run `f` inside validation and out-of-memory error scopes.
    ///
    /// Returns the first error either scope captured.
    pub(crate) fn scoped<T>(&self, f: impl FnOnce(&wgpu::Device) -> T) -> Result<T, wgpu::Error> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let out = f(&self.device);
        let validation = pollster::block_on(self.device.pop_error_scope());
        let oom = pollster::block_on(self.device.pop_error_scope());
        match validation.or(oom) {
            Some(err) => Err(err),
            None => Ok(out),
        }
    }

    /// Block until all submitted work has finished.
    pub(crate) fn wait_idle(&self) -> BlendResult<()> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map(|_| ())
            .map_err(|e| BlendError::resource(format!("wgpu poll failed: {e:?}")))
    }
}

impl std::fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuContext")
            .field("adapter", &self.adapter_info.name)
            .field("backend", &self.adapter_info.backend)
            .finish_non_exhaustive()
    }
}
