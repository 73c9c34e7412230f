use airframe::{SimError, VehicleConfig, VehicleKind};

#[test]
fn vehicle_config_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!(
        "airframe_config_{}.yaml",
        std::process::id()
    ));
    let config = VehicleConfig::scout();
    std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = VehicleConfig::from_file(&path).unwrap();
    assert_eq!(loaded.name, "Scout");
    assert_eq!(loaded.kind(), VehicleKind::Helicopter);
    assert_eq!(loaded.mass, config.mass);

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let result = VehicleConfig::from_file("/nonexistent/vehicle.yaml");
    assert!(matches!(result, Err(SimError::Io(_))));
}

#[test]
fn malformed_yaml_is_a_serialization_error() {
    let path = std::env::temp_dir().join(format!(
        "airframe_bad_config_{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, "name: [unclosed").unwrap();

    let result = VehicleConfig::from_file(&path);
    assert!(matches!(result, Err(SimError::SerializationError(_))));

    std::fs::remove_file(&path).ok();
}
