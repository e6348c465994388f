// Integration test for configuration file support

use logfile_endpoint::config::{
    CompositePropertySource, EnvPropertySource, FilePropertySource, PropertySource, ServerConfig,
    LOGGING_FILE_NAME, LOGGING_PATH,
};
use logfile_endpoint::error::LogFileError;
use logfile_endpoint::logs::LogFileResolver;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
        [server]
        bind = "0.0.0.0:9090"
        endpoint_path = "/logs"
        external_file = "/var/log/external.log"

        [logging.file]
        name = "/var/log/app.log"
    "#;

    fs::write(&config_path, toml_content).unwrap();

    let server = ServerConfig::from_file(&config_path).unwrap();
    assert_eq!(server.bind, "0.0.0.0:9090");
    assert_eq!(server.endpoint_path, "/logs");
    assert_eq!(
        server.external_file,
        Some(PathBuf::from("/var/log/external.log"))
    );

    let properties = FilePropertySource::from_file(&config_path).unwrap();
    assert_eq!(
        properties.get_property(LOGGING_FILE_NAME),
        Some("/var/log/app.log".to_string())
    );
}

#[test]
fn test_load_json_config_with_dotted_keys() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    fs::write(&config_path, r#"{ "logging.file.name": "/var/log/app.log" }"#).unwrap();

    let properties = FilePropertySource::from_file(&config_path).unwrap();
    assert_eq!(
        properties.get_property(LOGGING_FILE_NAME),
        Some("/var/log/app.log".to_string())
    );

    let server = ServerConfig::from_file(&config_path).unwrap();
    assert_eq!(server, ServerConfig::default());
}

#[test]
fn test_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[logging\nname = ").unwrap();

    assert!(matches!(
        FilePropertySource::from_file(&config_path),
        Err(LogFileError::InvalidConfig(_))
    ));
    assert!(matches!(
        ServerConfig::from_file(&config_path),
        Err(LogFileError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_config_file() {
    let result = FilePropertySource::from_file(&PathBuf::from("/nonexistent/config.toml"));
    assert!(matches!(result, Err(LogFileError::ConfigError(_))));
}

#[test]
fn test_invalid_server_section() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[server]\nendpoint_path = \"logs\"\n").unwrap();

    assert!(matches!(
        ServerConfig::from_file(&config_path),
        Err(LogFileError::ConfigValidationError(_))
    ));
}

#[test]
fn test_env_expansion_in_log_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("spring.log"), "--TEST--").unwrap();
    std::env::set_var("LFE_CONFIG_TEST_LOG_DIR", temp_dir.path());

    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[logging]\npath = \"${LFE_CONFIG_TEST_LOG_DIR}\"\n").unwrap();

    let properties = FilePropertySource::from_file(&config_path).unwrap();
    assert_eq!(
        properties.get_property(LOGGING_PATH).map(PathBuf::from),
        Some(temp_dir.path().to_path_buf())
    );

    let resolver = LogFileResolver::new(Arc::new(properties));
    assert_eq!(
        resolver.resolve().unwrap().path(),
        temp_dir.path().join("spring.log").as_path()
    );

    std::env::remove_var("LFE_CONFIG_TEST_LOG_DIR");
}

#[test]
fn test_environment_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let env_log = temp_dir.path().join("env.log");
    let file_log = temp_dir.path().join("file.log");
    fs::write(&env_log, "from env").unwrap();
    fs::write(&file_log, "from file").unwrap();

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[logging.file]\nname = {:?}\n", file_log.to_string_lossy()),
    )
    .unwrap();
    std::env::set_var("LFE_OVERRIDE_TEST_LOGGING_FILE_NAME", &env_log);

    let mut properties = CompositePropertySource::new();
    properties.add_last(Arc::new(EnvPropertySource::with_prefix("LFE_OVERRIDE_TEST")));
    properties.add_last(Arc::new(FilePropertySource::from_file(&config_path).unwrap()));

    let resolver = LogFileResolver::new(Arc::new(properties));
    assert_eq!(resolver.resolve().unwrap().path(), env_log.as_path());

    std::env::remove_var("LFE_OVERRIDE_TEST_LOGGING_FILE_NAME");
}
