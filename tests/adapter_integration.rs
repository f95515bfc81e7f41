use quillkit::adapter::{AdapterError, EditorAdapter};
use quillkit::config::{
    load_config_flags, parse_flag_tokens, ConfigFlags, SpawnConfig, Theme,
};
use quillkit::delta::{Attributes, Delta, DeltaOp};
use quillkit::markdown;
use quillkit::surface::{HeadlessHost, MountTarget, Surface};

fn attached_adapter() -> EditorAdapter<HeadlessHost> {
    let mount: MountTarget = "#editor".parse().unwrap();
    let mut adapter = EditorAdapter::new(HeadlessHost::with_mount(mount.clone()), mount);
    adapter.spawn(SpawnConfig::default()).unwrap();
    adapter
}

#[test]
fn test_full_editing_session_round_trips() {
    let mut adapter = attached_adapter();

    let surface = adapter.surface_mut().unwrap();
    surface.set_contents(
        [
            DeltaOp::text("Trip report"),
            DeltaOp::text_with(
                "\n",
                Attributes {
                    header: Some(3),
                    ..Attributes::default()
                },
            ),
            DeltaOp::text("We left at dawn."),
        ]
        .into_iter()
        .collect(),
    );
    surface.format(
        15,
        4,
        &Attributes {
            bold: Some(true),
            ..Attributes::default()
        },
    );

    let json = adapter.content().unwrap();
    let parsed = Delta::from_json(&json).unwrap();
    assert_eq!(parsed, adapter.surface().unwrap().contents());

    let markdown = markdown::render(&parsed);
    assert_eq!(markdown, "### Trip report\nWe **left** at dawn.\n");
}

#[test]
fn test_query_shapes_agree() {
    let mut adapter = attached_adapter();
    adapter
        .surface_mut()
        .unwrap()
        .insert_text(0, "hello world", None);

    let len = adapter.surface().unwrap().len();
    assert_eq!(
        adapter.content().unwrap(),
        adapter.content_range(0, len).unwrap()
    );
    assert_eq!(
        adapter.content_from(6).unwrap(),
        adapter.content_range(6, len - 6).unwrap()
    );
}

#[test]
fn test_dispose_then_query_fails() {
    let mut adapter = attached_adapter();
    adapter.dispose();
    assert!(matches!(adapter.content(), Err(AdapterError::Detached)));
}

#[test]
fn test_spawn_config_from_saved_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".quillkitrc");
    std::fs::write(
        &path,
        "# saved defaults\n--theme bubble\n--placeholder=Dear diary,\n",
    )
    .unwrap();

    let flags = load_config_flags(&path).unwrap();
    let config = flags.apply(SpawnConfig::default());
    assert_eq!(config.theme, Theme::Bubble);
    assert_eq!(config.placeholder, "Dear diary,");

    let mount: MountTarget = "#journal".parse().unwrap();
    let mut adapter = EditorAdapter::new(HeadlessHost::with_mount(mount.clone()), mount);
    adapter.spawn(config).unwrap();
    let surface = adapter.surface().unwrap();
    assert_eq!(surface.config().theme, Theme::Bubble);
    assert_eq!(surface.config().placeholder, "Dear diary,");
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".quillkitrc");
    std::fs::write(&path, "--markdown\n--theme snow\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "quillkit".to_string(),
        "--theme".to_string(),
        "bubble".to_string(),
        "--mount=#notes".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.markdown, "file flags should remain enabled");
    assert_eq!(effective.theme, Some(Theme::Bubble), "cli should override theme");
    assert_eq!(effective.mount, Some("#notes".to_string()));
}

#[test]
fn test_defaults_used_without_config() {
    let effective = ConfigFlags::default();
    let config = effective.apply(SpawnConfig::default());
    assert_eq!(config, SpawnConfig::default());
}
