use std::fs;
use std::path::{Path, PathBuf};

use notify::RecursiveMode;
use tempfile::TempDir;

use super::classifier::{EventClassifier, is_temp_file};
use super::watch_roots::{WatchRoots, watch_plan};
use crate::actor::messages::GateMsg;
use crate::config::PlotConfig;
use crate::utils::path::normalize_path;

fn make_config() -> (TempDir, PlotConfig) {
    let temp = TempDir::new().unwrap();
    let root = normalize_path(temp.path());

    let mut config = PlotConfig::default();
    config.set_root(&root);
    config.config_path = root.join("plotwatch.toml");
    config.render.output_dir = root.join(".plotwatch");

    fs::create_dir_all(root.join("plots")).unwrap();
    fs::create_dir_all(&config.render.output_dir).unwrap();
    fs::write(&config.config_path, "[watcher]\n").unwrap();

    (temp, config)
}

fn touch(path: &Path) -> PathBuf {
    fs::write(path, "plot sin(x)\n").unwrap();
    path.to_path_buf()
}

fn make_event(paths: Vec<PathBuf>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths,
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn metadata_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::WriteTime,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

#[test]
fn test_modified_script_is_changed() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let script = touch(&config.get_root().join("plots/sine.gp"));

    let messages =
        EventClassifier::classify(&make_event(vec![script.clone()], modify_kind()), &roots, &config);
    assert_eq!(messages, vec![GateMsg::Changed(script)]);
}

#[test]
fn test_created_script_is_changed() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let script = touch(&config.get_root().join("plots/new.gp"));

    let messages =
        EventClassifier::classify(&make_event(vec![script.clone()], create_kind()), &roots, &config);
    assert_eq!(messages, vec![GateMsg::Changed(script)]);
}

#[test]
fn test_other_files_pass_through() {
    // Kind filtering is the gate's job
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let data = touch(&config.get_root().join("plots/data.csv"));

    let messages =
        EventClassifier::classify(&make_event(vec![data.clone()], modify_kind()), &roots, &config);
    assert_eq!(messages, vec![GateMsg::Changed(data)]);
}

#[test]
fn test_metadata_and_remove_dropped() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let script = touch(&config.get_root().join("plots/sine.gp"));

    for kind in [metadata_kind(), remove_kind()] {
        let event = make_event(vec![script.clone()], kind);
        assert!(EventClassifier::classify(&event, &roots, &config).is_empty());
    }
}

#[test]
fn test_temp_files_dropped() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let plots = config.get_root().join("plots");
    let paths = vec![
        touch(&plots.join("sine.gp~")),
        touch(&plots.join(".sine.gp.swp")),
        touch(&plots.join("sine.gp.bak")),
    ];

    assert!(EventClassifier::classify(&make_event(paths, modify_kind()), &roots, &config).is_empty());
}

#[test]
fn test_is_temp_file() {
    assert!(is_temp_file(Path::new("/p/sine.gp~")));
    assert!(is_temp_file(Path::new("/p/.#sine.gp")));
    assert!(is_temp_file(Path::new("/p/4913.tmp")));
    assert!(!is_temp_file(Path::new("/p/sine.gp")));
}

#[test]
fn test_output_dir_dropped() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let image = touch(&config.render.output_dir.join("sine.png"));

    assert!(EventClassifier::classify(&make_event(vec![image], create_kind()), &roots, &config).is_empty());
}

#[test]
fn test_config_change_reloads() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().join("plots")]);

    let event = make_event(vec![config.config_path.clone()], modify_kind());
    assert_eq!(
        EventClassifier::classify(&event, &roots, &config),
        vec![GateMsg::ReloadConfig]
    );
}

#[test]
fn test_directories_and_vanished_files_dropped() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let dir = config.get_root().join("plots");
    let gone = dir.join("gone.gp");

    let event = make_event(vec![dir, gone], create_kind());
    assert!(EventClassifier::classify(&event, &roots, &config).is_empty());
}

#[test]
fn test_duplicate_paths_collapse() {
    let (_temp, config) = make_config();
    let roots = WatchRoots::new(vec![config.get_root().to_path_buf()]);
    let script = touch(&config.get_root().join("plots/sine.gp"));

    let event = make_event(vec![script.clone(), script.clone()], modify_kind());
    assert_eq!(
        EventClassifier::classify(&event, &roots, &config),
        vec![GateMsg::Changed(script)]
    );
}

#[test]
fn test_single_file_target_ignores_siblings() {
    let (_temp, config) = make_config();
    let plots = config.get_root().join("plots");
    let sine = touch(&plots.join("sine.gp"));
    let cosine = touch(&plots.join("cosine.gp"));
    let roots = WatchRoots::new(vec![sine.clone()]);

    let event = make_event(vec![sine.clone(), cosine], modify_kind());
    assert_eq!(
        EventClassifier::classify(&event, &roots, &config),
        vec![GateMsg::Changed(sine)]
    );
}

#[test]
fn test_watch_plan_folds_nested_dirs() {
    let dirs = vec![PathBuf::from("/p"), PathBuf::from("/p/plots"), PathBuf::from("/q")];
    let plan = watch_plan(&dirs, &[]);

    assert_eq!(
        plan,
        vec![
            (PathBuf::from("/p"), RecursiveMode::Recursive),
            (PathBuf::from("/q"), RecursiveMode::Recursive),
        ]
    );
}

#[test]
fn test_watch_plan_files_use_parent() {
    let dirs = vec![PathBuf::from("/p")];
    let files = vec![
        PathBuf::from("/p/plots/sine.gp"),
        PathBuf::from("/q/cos.gp"),
        PathBuf::from("/q/tan.gp"),
    ];
    let plan = watch_plan(&dirs, &files);

    assert_eq!(
        plan,
        vec![
            (PathBuf::from("/p"), RecursiveMode::Recursive),
            (PathBuf::from("/q"), RecursiveMode::NonRecursive),
        ]
    );
}
