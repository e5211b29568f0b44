use super::*;

use std::fs;

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&dir.path().join(SETTINGS_FILE_NAME)).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.file_name, "StepSequence.json");
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(
        &path,
        "data_dir = \"/tmp/steps\"\nfile_name = \"arm.json\"\nlog_filter = \"debug\"\n",
    )
    .expect("write settings");

    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/steps")));
    assert_eq!(settings.file_name, "arm.json");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn blank_values_in_settings_file_keep_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, "file_name = \"  \"\n").expect("write settings");

    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.file_name, DEFAULT_FILE_NAME);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, "file_name = [").expect("write settings");

    let err = load_settings(&path).expect_err("malformed");
    assert!(format!("{err:#}").contains("failed to parse settings file"));
}

#[test]
fn command_line_wins_over_settings_file() {
    let mut settings = Settings {
        data_dir: Some(PathBuf::from("/from/file")),
        file_name: "file.json".into(),
        log_filter: "warn".into(),
    };
    let args = Args::parse_from([
        "desktop_gui",
        "--data-dir",
        "/from/cli",
        "--log-filter",
        "editor_core=debug",
    ]);
    settings.apply_args(&args);

    assert_eq!(settings.data_dir, Some(PathBuf::from("/from/cli")));
    assert_eq!(settings.file_name, "file.json");
    assert_eq!(settings.log_filter, "editor_core=debug");
    assert_eq!(args.config, PathBuf::from(SETTINGS_FILE_NAME));
}

#[test]
fn app_paths_join_data_dir_and_file_name() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/data/editor")),
        ..Settings::default()
    };
    let paths = AppPaths::from_settings(&settings).expect("paths");
    assert_eq!(paths.data_root, PathBuf::from("/data/editor"));
    assert_eq!(
        paths.sequence_path,
        PathBuf::from("/data/editor").join("StepSequence.json")
    );
}
