use crate::{
    foundation::error::{BlendError, BlendResult},
    render::backend::BackendKind,
};

/// Adapter preference passed to device selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    /// Integrated or otherwise power-saving adapter.
    LowPower,
    /// Discrete adapter when one exists.
    #[default]
    HighPerformance,
}

/// Compositor construction options.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Backend to construct.
    pub backend: BackendKind,
    /// Construct the CPU backend when the GPU backend cannot be configured.
    pub fallback_to_cpu: bool,
    /// Adapter class to prefer when several are available.
    pub power_preference: PowerPreference,
    /// Ask for a software adapter.
    pub force_fallback_adapter: bool,
    /// Preferred thread-group width. Clamped to the device limit.
    pub execution_width: u32,
    /// Threads per group. `None` uses the device's `max_compute_invocations_per_workgroup`.
    pub max_threads_per_group: Option<u32>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            #[cfg(feature = "gpu")]
            backend: BackendKind::Gpu,
            #[cfg(not(feature = "gpu"))]
            backend: BackendKind::Cpu,
            fallback_to_cpu: false,
            power_preference: PowerPreference::default(),
            force_fallback_adapter: false,
            execution_width: 16,
            max_threads_per_group: None,
        }
    }
}

impl EngineSettings {
    /// Defaults overlaid with `SPRITEBLEND_*` environment variables.
    ///
    /// Unset or unparsable values leave the default in place.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(json: &str) -> BlendResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| BlendError::configuration(format!("invalid settings json: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no backend can honor.
    pub fn validate(&self) -> BlendResult<()> {
        if self.execution_width == 0 {
            return Err(BlendError::configuration("execution_width must be > 0"));
        }
        if self.max_threads_per_group == Some(0) {
            return Err(BlendError::configuration("max_threads_per_group must be > 0"));
        }
        Ok(())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(kind) = lookup("SPRITEBLEND_BACKEND").and_then(|v| v.parse().ok()) {
            self.backend = kind;
        }
        if let Some(v) = lookup("SPRITEBLEND_FALLBACK_TO_CPU").and_then(|v| parse_flag(&v)) {
            self.fallback_to_cpu = v;
        }
        if let Some(v) = lookup("SPRITEBLEND_FORCE_FALLBACK_ADAPTER").and_then(|v| parse_flag(&v))
        {
            self.force_fallback_adapter = v;
        }
        self.execution_width = lookup("SPRITEBLEND_EXECUTION_WIDTH")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(self.execution_width);
        self
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
