use super::*;

use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_stable() {
    let s = EngineSettings::default();
    assert_eq!(s.execution_width, 16);
    assert_eq!(s.max_threads_per_group, None);
    assert!(!s.fallback_to_cpu);
    assert!(!s.force_fallback_adapter);
    assert_eq!(s.power_preference, PowerPreference::HighPerformance);
    s.validate().unwrap();
}

#[test]
fn env_overrides_apply() {
    let s = EngineSettings::default().with_overrides(env(&[
        ("SPRITEBLEND_BACKEND", "CPU"),
        ("SPRITEBLEND_FALLBACK_TO_CPU", "yes"),
        ("SPRITEBLEND_FORCE_FALLBACK_ADAPTER", "1"),
        ("SPRITEBLEND_EXECUTION_WIDTH", "32"),
    ]));
    assert_eq!(s.backend, BackendKind::Cpu);
    assert!(s.fallback_to_cpu);
    assert!(s.force_fallback_adapter);
    assert_eq!(s.execution_width, 32);
}

#[test]
fn invalid_env_values_are_ignored() {
    let base = EngineSettings::default();
    let s = base.clone().with_overrides(env(&[
        ("SPRITEBLEND_BACKEND", "quantum"),
        ("SPRITEBLEND_FALLBACK_TO_CPU", "maybe"),
        ("SPRITEBLEND_EXECUTION_WIDTH", "0"),
    ]));
    assert_eq!(s, base);

    let s = base.clone().with_overrides(env(&[("SPRITEBLEND_EXECUTION_WIDTH", "wide")]));
    assert_eq!(s.execution_width, 16);
}

#[test]
fn json_accepts_partial_documents() {
    let s = EngineSettings::from_json_str(
        r#"{"backend":"cpu","execution_width":8,"power_preference":"low_power"}"#,
    )
    .unwrap();
    assert_eq!(s.backend, BackendKind::Cpu);
    assert_eq!(s.execution_width, 8);
    assert_eq!(s.power_preference, PowerPreference::LowPower);
    assert!(!s.fallback_to_cpu);
}

#[test]
fn json_rejects_bad_values() {
    let err = EngineSettings::from_json_str(r#"{"execution_width":0}"#).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().starts_with("configuration error:"));

    assert!(EngineSettings::from_json_str("{not json").is_err());
    assert!(EngineSettings::from_json_str(r#"{"backend":"tpu"}"#).is_err());
}
