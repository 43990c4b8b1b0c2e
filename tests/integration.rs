use std::path::Path;

use too_lazy::config_file::{CONFIG_FILENAME, Config, ConfigError};
use too_lazy::dispatch::{DispatchError, ResolvedCommand, resolve};
use too_lazy::{Error, execute, load_config};

fn write_config(dir: &Path, content: &str) -> String {
    let path = dir.join(CONFIG_FILENAME);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_load_config_minimal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "commands:\n  build: make all\n");
    let (config, config_path) = load_config(Some(&path)).unwrap();
    assert_eq!(config_path, dir.path().join(CONFIG_FILENAME));
    assert_eq!(config.project_dir, dir.path());
    let resolved = resolve(&config, "build", &[]).unwrap();
    assert_eq!(
        resolved,
        ResolvedCommand {
            executable: "make".to_string(),
            arguments: vec!["all".to_string()],
        }
    );
}

#[test]
fn test_project_dir_follows_config_location() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("repo").join("sub");
    std::fs::create_dir_all(&sub).unwrap();
    write_config(&sub, "commands:\n  build: make all\n");
    let nested = sub.join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    let found = Config::find_config_from(&nested).unwrap();
    let config = Config::from_file(&found).unwrap();
    assert_eq!(config.project_dir, sub);
}

#[test]
fn test_load_config_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "commands: [unclosed\n");
    assert!(matches!(
        load_config(Some(&path)),
        Err(ConfigError::Yaml { .. })
    ));
}

#[test]
fn test_execute_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "commands:\n  ok: \"sh -c 'exit 0'\"\n");
    let (config, _) = load_config(Some(&path)).unwrap();
    let result = execute(&config, "ok", &[]).unwrap();
    assert_eq!(result.exit_code, 0);
}

#[test]
fn test_execute_forwards_extra_args() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("args.txt");
    let path = write_config(
        dir.path(),
        &format!(
            "commands:\n  record: \"sh -c 'echo \\\"$@\\\" > {}' record fixed\"\n",
            out.display()
        ),
    );
    let (config, _) = load_config(Some(&path)).unwrap();
    execute(&config, "record", &["--flag".to_string(), "two words".to_string()]).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.trim(), "fixed --flag two words");
}

#[test]
fn test_execute_non_zero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "commands:\n  fail: \"sh -c 'exit 3'\"\n");
    let (config, _) = load_config(Some(&path)).unwrap();
    match execute(&config, "fail", &[]) {
        Err(err @ Error::ChildNonZeroExit(3)) => {
            assert_eq!(err.exit_code(), 3);
            assert!(err.is_silent());
        }
        other => panic!("Expected ChildNonZeroExit(3), got: {other:?}"),
    }
}

#[test]
fn test_execute_in_project_dir() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("project");
    std::fs::create_dir(&project).unwrap();
    let out = dir.path().join("pwd.txt");
    let path = write_config(
        dir.path(),
        &format!(
            "start_in_project_dir: true\nproject_dir: project\ncommands:\n  where: \"sh -c 'pwd -P > {}'\"\n",
            out.display()
        ),
    );
    let (config, _) = load_config(Some(&path)).unwrap();
    execute(&config, "where", &[]).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(Path::new(written.trim()), project.canonicalize().unwrap());
}

#[test]
fn test_execute_unknown_alias() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "commands:\n  build: make all\n  test: make test\n",
    );
    let (config, _) = load_config(Some(&path)).unwrap();
    match execute(&config, "deploy", &[]) {
        Err(Error::Dispatch(DispatchError::UnknownAlias { available, .. })) => {
            assert_eq!(available.len(), 2);
            assert!(available.contains(&"build".to_string()));
            assert!(available.contains(&"test".to_string()));
        }
        other => panic!("Expected UnknownAlias, got: {other:?}"),
    }
}

#[test]
fn test_execute_launch_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "commands:\n  missing: definitely-not-a-real-program-2lazy --help\n",
    );
    let (config, _) = load_config(Some(&path)).unwrap();
    let err = execute(&config, "missing", &[]).unwrap_err();
    assert!(matches!(err, Error::Run(_)));
    assert_eq!(err.exit_code(), 1);
}
