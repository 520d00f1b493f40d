use dockswap::config::Config;
use dockswap::runner::Captured;
use dockswap::{DockswapError, Orchestrator, ProjectRecord, Registry, RunOutcome, Runner, SwapOptions};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

/// Pretends every container command succeeds; `ps -aq` lists `containers`.
struct Recorder {
    containers: String,
    calls: RefCell<Vec<String>>,
}

impl Recorder {
    fn new(containers: &str) -> Self {
        Recorder {
            containers: containers.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Runner for Recorder {
    async fn status(&self, command: &str) -> io::Result<i32> {
        self.calls.borrow_mut().push(command.to_string());
        Ok(0)
    }

    async fn output(&self, command: &str) -> io::Result<Captured> {
        self.calls.borrow_mut().push(command.to_string());
        Ok(Captured {
            code: 0,
            stdout: self.containers.clone(),
        })
    }
}

fn setup() -> (TempDir, Config) {
    let temp = TempDir::new().unwrap();
    let config = Config::with_storage_dir(&temp.path().join(".dockswap"));
    (temp, config)
}

#[tokio::test]
async fn registered_project_dry_start_matches_expected_command() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    registry
        .register(&ProjectRecord::new("foo", "foo.yml", Some(PathBuf::from("env"))))
        .unwrap();

    let runner = Recorder::new("");
    let mut orch = Orchestrator::new(&mut registry, &runner, &config);
    let opts = SwapOptions {
        dry: true,
        ..Default::default()
    };

    assert_eq!(
        orch.start("foo", &opts).await.unwrap(),
        RunOutcome::Dry("docker-compose --env-file env -f foo.yml up -d".to_string())
    );
    assert_eq!(
        orch.stop("foo", true, false).await.unwrap(),
        RunOutcome::Dry("docker-compose -f foo.yml down".to_string())
    );
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn starting_unknown_project_mentions_its_name() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    let runner = Recorder::new("");
    let mut orch = Orchestrator::new(&mut registry, &runner, &config);

    let err = orch.start("nonexistent", &SwapOptions::default()).await.unwrap_err();
    assert!(matches!(err, DockswapError::NotFound(_)));
    assert!(err.to_string().contains("\"nonexistent\""));
}

#[tokio::test]
async fn swap_with_removal_of_other_containers() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    registry
        .register(&ProjectRecord::new("shop", "/srv/shop.yml", None))
        .unwrap();

    let runner = Recorder::new("1a2b\n3c4d\n");
    let mut orch = Orchestrator::new(&mut registry, &runner, &config);
    let opts = SwapOptions {
        remove_others: true,
        services: vec!["web".to_string()],
        ..Default::default()
    };

    assert_eq!(orch.start("shop", &opts).await.unwrap(), RunOutcome::Executed);
    assert_eq!(
        runner.calls(),
        vec![
            "docker ps -aq",
            "docker stop 1a2b 3c4d",
            "docker rm 1a2b 3c4d",
            "docker-compose -f /srv/shop.yml up -d web",
        ]
    );
}

#[tokio::test]
async fn stop_all_without_containers_does_nothing() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    let runner = Recorder::new("");
    let orch = Orchestrator::new(&mut registry, &runner, &config);

    assert_eq!(orch.stop_all(true, true).await.unwrap(), None);
    assert_eq!(orch.stop_all(false, false).await.unwrap(), None);
    // only the listing ran
    assert_eq!(runner.calls(), vec!["docker ps -aq", "docker ps -aq"]);
}

#[test]
fn corrupt_storage_behaves_like_empty_array() {
    let (_temp, config) = setup();
    fs::create_dir_all(&config.storage_dir).unwrap();

    fs::write(config.storage_path(), "[]").unwrap();
    let from_empty_array = Registry::from_config(&config).unwrap().get_all();

    fs::write(config.storage_path(), "][ garbage").unwrap();
    let from_garbage = Registry::from_config(&config).unwrap().get_all();

    assert!(from_empty_array.is_empty());
    assert_eq!(from_empty_array, from_garbage);
}

#[test]
fn prune_then_fresh_registry_is_empty() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    registry
        .register(&ProjectRecord::new("foo", "/srv/foo.yml", None))
        .unwrap();
    registry.prune().unwrap();
    assert!(!config.storage_path().exists());

    let mut fresh = Registry::from_config(&config).unwrap();
    assert!(fresh.get_all().is_empty());
}

#[test]
fn stored_file_uses_flat_records() {
    let (_temp, config) = setup();
    let mut registry = Registry::from_config(&config).unwrap();
    registry
        .register(&ProjectRecord::new("foo", "/srv/foo.yml", None))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.storage_path()).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!([{"project_name": "foo", "dc_path": "/srv/foo.yml", "env_path": null}])
    );
}
