use super::*;

#[test]
fn backend_kind_parses_case_insensitively() {
    assert_eq!(" Cpu ".parse::<BackendKind>().unwrap(), BackendKind::Cpu);
    #[cfg(feature = "gpu")]
    assert_eq!("GPU".parse::<BackendKind>().unwrap(), BackendKind::Gpu);

    let err = "vulkan".parse::<BackendKind>().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("vulkan"));
}

#[test]
fn backend_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&BackendKind::Cpu).unwrap(), "\"cpu\"");
}

#[test]
fn create_cpu_backend() {
    let backend = create_backend(BackendKind::Cpu, &EngineSettings::default()).unwrap();
    assert_eq!(backend.kind(), BackendKind::Cpu);
}

#[cfg(feature = "gpu")]
#[test]
fn gpu_request_falls_back_when_allowed() {
    let settings = EngineSettings {
        fallback_to_cpu: true,
        ..EngineSettings::default()
    };
    // Either a device exists or the CPU fallback is taken; construction never fails.
    let backend = create_backend(BackendKind::Gpu, &settings).unwrap();
    assert!(matches!(backend.kind(), BackendKind::Gpu | BackendKind::Cpu));
}
