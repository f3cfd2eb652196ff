// ==========================================
// 轮换配置集成测试
// ==========================================
// 测试目标: 验证配置文件加载并驱动引擎行为
// ==========================================

mod helpers;

use chrono::Utc;
use helpers::test_data_builder::{capability, create_workers, WorkstationBuilder};
use std::io::Write;
use std::sync::Arc;
use workstation_rotation::config::{ConfigError, RotationConfig};
use workstation_rotation::domain::types::{RotationHalf, RotationType};
use workstation_rotation::domain::{RotationSession, RotationSnapshot};
use workstation_rotation::engine::{EngineError, EngineResult, RotationOrchestrator};

fn write_config(raw: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(raw.as_bytes()).unwrap();
    file
}

fn load(path: &std::path::Path) -> EngineResult<RotationConfig> {
    Ok(RotationConfig::from_file(path)?)
}

#[test]
fn test_config_file_drives_certification_threshold() -> EngineResult<()> {
    let file = write_config(r#"{"require_certification": true}"#);
    let config = load(file.path())?;

    let snapshot = RotationSnapshot::new(
        create_workers(2),
        vec![WorkstationBuilder::new(10).required(2).build()],
    )
    .with_capabilities(vec![capability(1, 10, 5, false), capability(2, 10, 1, true)]);

    let outcome = RotationOrchestrator::new(Arc::new(config)).generate(
        RotationSession::new("配置驱动", Utc::now()),
        &snapshot,
        RotationHalf::First,
        Utc::now(),
    )?;

    let ids: Vec<_> = outcome
        .assignments_of(RotationType::Current)
        .iter()
        .map(|a| a.worker_id)
        .collect();
    assert_eq!(ids, vec![2]);
    Ok(())
}

#[test]
fn test_invalid_config_surfaces_as_engine_error() {
    let file = write_config(r#"{"default_min_competency_level": 9}"#);

    let err = load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "default_min_competency_level"
    ));
}

#[test]
fn test_config_json_round_trip() {
    let config = RotationConfig {
        leader_can_exceed_capacity: false,
        ..RotationConfig::default()
    };

    let restored = RotationConfig::from_json_str(&config.to_json().unwrap()).unwrap();

    assert_eq!(restored, config);
}
