//! Integration tests for keeping the registry and the depot tree in sync

use std::fs;
use tempfile::TempDir;

use artdepot::asset::AssetType;
use artdepot::config::Config;
use artdepot::depot::Depot;
use artdepot::error::DepotError;
use artdepot::registry::{AssetEntry, Registry};
use artdepot::scaffold::PROJECT_SUBDIRS;
use artdepot::templates::TemplateStore;

/// Create a depot in a temporary root with the default templates installed
fn setup_depot() -> (TempDir, Depot) {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    TemplateStore::new(config.depot.templates_dir())
        .install_defaults(false)
        .unwrap();
    let depot = Depot::open(config).unwrap();
    (dir, depot)
}

fn t(s: &str) -> AssetType {
    s.parse().unwrap()
}

#[test]
fn test_end_to_end_rig_with_reference() {
    let (dir, mut depot) = setup_depot();

    assert!(depot.create_project("Demo").unwrap());
    let created = depot
        .create_asset("Demo", "Hero", t("Rigs/Characters"), Some("Base"))
        .unwrap();

    assert!(created.registered);
    assert!(created.stub_written);
    assert_eq!(created.reference_found, Some(false));
    assert_eq!(
        created.stub,
        dir.path()
            .join("Projects/Demo/ArtDepot/Rigs/Characters/Hero/RIG_Hero.ma")
    );

    let content = fs::read_to_string(&created.stub).unwrap();
    let refs: Vec<&str> = content.lines().filter(|l| l.starts_with("file -r")).collect();
    assert_eq!(refs.len(), 1);
    assert!(refs[0].contains("\"../../../Models/Characters/Base/SM_Base.ma\""));

    // Registry on disk has exactly the one entry
    let registry = Registry::load(dir.path().join("project_data.json")).unwrap();
    assert_eq!(
        registry.assets("Demo"),
        &[AssetEntry::new("Hero", t("Rigs/Characters"))]
    );
}

#[test]
fn test_create_project_twice_is_idempotent() {
    let (dir, mut depot) = setup_depot();

    assert!(depot.create_project("Demo").unwrap());
    let config = dir.path().join("Projects/Demo/Config/config.json");
    fs::write(&config, "{\"edited\": true}").unwrap();

    assert!(!depot.create_project("Demo").unwrap());
    for sub in PROJECT_SUBDIRS {
        assert!(dir.path().join("Projects/Demo").join(sub).is_dir());
    }
    assert_eq!(fs::read_to_string(&config).unwrap(), "{\"edited\": true}");
    assert_eq!(depot.list_projects().len(), 1);
}

#[test]
fn test_invalid_names_have_no_side_effects() {
    let (dir, mut depot) = setup_depot();

    let err = depot.create_project("bad/name").unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
    assert!(!dir.path().join("Projects").exists());
    assert!(!dir.path().join("project_data.json").exists());

    depot.create_project("Demo").unwrap();
    let err = depot
        .create_asset("Demo", "has space", t("Models/Props"), None)
        .unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
    assert!(depot.registry().assets("Demo").is_empty());
}

#[test]
fn test_asset_requires_registered_project() {
    let (_dir, mut depot) = setup_depot();
    let err = depot
        .create_asset("Nowhere", "Barrel", t("Models/Props"), None)
        .unwrap_err();
    assert!(matches!(err, DepotError::UnknownProject(_)));
}

#[test]
fn test_reference_rules() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    let err = depot
        .create_asset("Demo", "Hero", t("Rigs/Characters"), None)
        .unwrap_err();
    assert!(matches!(err, DepotError::ReferenceRequired(_)));
    assert!(!dir
        .path()
        .join("Projects/Demo/ArtDepot/Rigs/Characters/Hero")
        .exists());

    let err = depot
        .create_asset("Demo", "Run", t("Animations/Props"), Some("  "))
        .unwrap_err();
    assert!(matches!(err, DepotError::ReferenceRequired(_)));

    let err = depot
        .create_asset("Demo", "Barrel", t("Models/Props"), Some("Other"))
        .unwrap_err();
    assert!(matches!(err, DepotError::ReferenceNotAllowed(_)));
}

#[test]
fn test_reference_found_when_target_exists() {
    let (_dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();

    let created = depot
        .create_asset("Demo", "BarrelRig", t("Rigs/Props"), Some("Barrel"))
        .unwrap();
    assert_eq!(created.reference_found, Some(true));
}

#[test]
fn test_duplicate_asset_is_silent_and_keeps_stub() {
    let (_dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    let first = depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();
    fs::write(&first.stub, "artist work").unwrap();

    let second = depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();
    assert!(!second.registered);
    assert!(!second.stub_written);
    assert_eq!(fs::read_to_string(&first.stub).unwrap(), "artist work");
    assert_eq!(depot.registry().assets("Demo").len(), 1);
}

#[test]
fn test_existing_stub_is_adopted() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    let asset_dir = dir.path().join("Projects/Demo/ArtDepot/VFX/Smoke");
    fs::create_dir_all(&asset_dir).unwrap();
    fs::write(asset_dir.join("VFX_Smoke.txt"), "notes").unwrap();

    let created = depot.create_asset("Demo", "Smoke", t("VFX"), None).unwrap();
    assert!(created.registered);
    assert!(!created.stub_written);
    assert_eq!(fs::read_to_string(&created.stub).unwrap(), "notes");
}

#[test]
fn test_missing_template_leaves_no_directory() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    fs::remove_file(depot.templates().path_for(t("Textures/Props").category())).unwrap();

    let err = depot
        .create_asset("Demo", "Wood", t("Textures/Props"), None)
        .unwrap_err();
    assert!(matches!(err, DepotError::TemplateMissing(_)));
    assert!(!dir
        .path()
        .join("Projects/Demo/ArtDepot/Textures/Props/Wood")
        .exists());
    assert!(depot.registry().assets("Demo").is_empty());
}

#[test]
fn test_rename_project_moves_directory() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("A").unwrap();
    depot
        .create_asset("A", "Barrel", t("Models/Props"), None)
        .unwrap();

    assert!(depot.rename_project("A", "B").unwrap());
    assert!(!dir.path().join("Projects/A").exists());
    assert!(dir
        .path()
        .join("Projects/B/ArtDepot/Models/Props/Barrel/SM_Barrel.ma")
        .is_file());
    assert_eq!(depot.list_assets("B").len(), 1);
}

#[test]
fn test_rename_project_onto_existing_fails() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("A").unwrap();
    depot.create_project("B").unwrap();

    let err = depot.rename_project("A", "B").unwrap_err();
    assert!(matches!(err, DepotError::DuplicateName { .. }));
    assert!(dir.path().join("Projects/A").is_dir());
    assert!(dir.path().join("Projects/B").is_dir());
    assert!(depot.registry().has_project("A"));
    assert!(depot.registry().has_project("B"));
}

#[test]
fn test_rename_project_onto_unregistered_directory_fails() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("A").unwrap();
    fs::create_dir_all(dir.path().join("Projects/Stray")).unwrap();

    let err = depot.rename_project("A", "Stray").unwrap_err();
    assert!(matches!(err, DepotError::DuplicateName { .. }));
}

#[test]
fn test_delete_project_removes_tree_and_entry() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    assert!(depot.delete_project("Demo").unwrap());
    assert!(!dir.path().join("Projects/Demo").exists());
    assert!(!depot.registry().has_project("Demo"));
    assert!(!depot.delete_project("Demo").unwrap());

    // Global folders survive
    assert!(dir.path().join("Tools").is_dir());
}

#[test]
fn test_delete_project_rejects_traversal() {
    let (dir, mut depot) = setup_depot();
    let err = depot.delete_project("..").unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
    assert!(dir.path().join("Config").exists());
}

#[test]
fn test_rename_asset_moves_directory_and_stub() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();

    assert!(depot.rename_asset("Demo", "Barrel", "Keg").unwrap());
    let props = dir.path().join("Projects/Demo/ArtDepot/Models/Props");
    assert!(!props.join("Barrel").exists());
    assert!(props.join("Keg/SM_Keg.ma").is_file());
    assert!(!props.join("Keg/SM_Barrel.ma").exists());
    assert_eq!(depot.registry().assets("Demo")[0].name, "Keg");
}

#[test]
fn test_rename_asset_collision_fails() {
    let (_dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Keg", t("Models/Props"), None)
        .unwrap();

    let err = depot.rename_asset("Demo", "Barrel", "Keg").unwrap_err();
    assert!(matches!(err, DepotError::DuplicateName { .. }));
    assert_eq!(depot.list_assets("Demo").len(), 2);
}

#[test]
fn test_rename_unknown_asset() {
    let (_dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    let err = depot.rename_asset("Demo", "Ghost", "Spirit").unwrap_err();
    assert!(matches!(err, DepotError::UnknownAsset { .. }));
}

#[test]
fn test_delete_asset_removes_every_type() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Hero", t("Models/Characters"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Hero", t("Rigs/Characters"), Some("Hero"))
        .unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();

    assert_eq!(depot.delete_asset("Demo", "Hero").unwrap(), 2);

    let art = dir.path().join("Projects/Demo/ArtDepot");
    assert!(!art.join("Models/Characters/Hero").exists());
    assert!(!art.join("Rigs/Characters/Hero").exists());
    let names: Vec<_> = depot
        .registry()
        .assets("Demo")
        .iter()
        .map(|a| a.name.clone())
        .collect();
    assert_eq!(names, vec!["Barrel"]);
}

#[test]
fn test_list_assets_hides_missing_directories() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Smoke", t("VFX"), None)
        .unwrap();

    fs::remove_dir_all(dir.path().join("Projects/Demo/ArtDepot/VFX/Smoke")).unwrap();

    let listed: Vec<_> = depot
        .list_assets("Demo")
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(listed, vec!["Barrel"]);
    // Still registered
    assert_eq!(depot.registry().assets("Demo").len(), 2);
}

#[test]
fn test_list_projects_flags_missing_tree() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot.create_project("Gone").unwrap();
    fs::remove_dir_all(dir.path().join("Projects/Gone")).unwrap();

    let projects = depot.list_projects();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().any(|p| p.name == "Demo" && p.on_disk));
    assert!(projects.iter().any(|p| p.name == "Gone" && !p.on_disk));
}

#[test]
fn test_reference_candidates_skip_tools_and_config() {
    let (_dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Crate", t("Models/Props"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Hero", t("Models/Characters"), None)
        .unwrap();

    let candidates = depot
        .reference_candidates("Demo", t("Rigs/Props"))
        .unwrap();
    assert_eq!(candidates, vec!["Barrel", "Crate"]);

    assert!(depot
        .reference_candidates("Demo", t("Models/Props"))
        .unwrap()
        .is_empty());
    assert!(depot
        .reference_candidates("Demo", t("Animations/Props"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_stub_path_narrowed_by_type() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Hero", t("Models/Characters"), None)
        .unwrap();
    depot
        .create_asset("Demo", "Hero", t("Rigs/Characters"), Some("Hero"))
        .unwrap();

    let art = dir.path().join("Projects/Demo/ArtDepot");
    assert_eq!(
        depot.stub_path("Demo", "Hero", None).unwrap(),
        art.join("Models/Characters/Hero/SM_Hero.ma")
    );
    assert_eq!(
        depot
            .stub_path("Demo", "Hero", Some(t("Rigs/Characters")))
            .unwrap(),
        art.join("Rigs/Characters/Hero/RIG_Hero.ma")
    );
}

#[test]
fn test_reload_sees_external_changes() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    let mut other = Registry::load(dir.path().join("project_data.json")).unwrap();
    other.add_project("FromElsewhere").unwrap();

    assert!(!depot.registry().has_project("FromElsewhere"));
    depot.reload().unwrap();
    assert!(depot.registry().has_project("FromElsewhere"));
}

#[test]
fn test_unrecognised_registry_types_are_hidden_not_fatal() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot.create_project("Other").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();

    // An earlier tool wrote "Models/" when no subtype was picked
    let path = dir.path().join("project_data.json");
    let content = fs::read_to_string(&path).unwrap().replace(
        r#""type": "Models/Props""#,
        r#""type": "Models/Props"
                },
                {
                    "name": "Odd",
                    "type": "Models/""#,
    );
    fs::write(&path, content).unwrap();

    let mut depot = Depot::open(Config::with_root(dir.path())).unwrap();
    let listed: Vec<_> = depot
        .list_assets("Demo")
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(listed, vec!["Barrel"]);
    assert_eq!(depot.registry().assets("Demo").len(), 2);

    depot
        .create_asset("Other", "Crate", t("Models/Props"), None)
        .unwrap();
    let err = depot.rename_asset("Demo", "Odd", "Even").unwrap_err();
    assert!(matches!(err, DepotError::UnknownAssetType(ref ty) if ty == "Models/"));

    let reloaded = Registry::load(&path).unwrap();
    assert_eq!(reloaded.assets("Demo")[1].asset_type, "Models/");
    assert_eq!(depot.delete_asset("Demo", "Odd").unwrap(), 1);
}

#[test]
fn test_asset_names_cannot_shadow_scaffold_dirs() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();

    let tools = dir.path().join("Projects/Demo/ArtDepot/Models/Props/Tools");
    fs::write(tools.join("studio_script.py"), "print('hi')").unwrap();

    for name in ["Tools", "config"] {
        let err = depot
            .create_asset("Demo", name, t("Models/Props"), None)
            .unwrap_err();
        assert!(matches!(err, DepotError::InvalidName { .. }));
    }
    assert!(!tools.join("SM_Tools.ma").exists());
    assert!(depot.registry().assets("Demo").is_empty());

    let err = depot.delete_asset("Demo", "Tools").unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
    assert!(tools.join("studio_script.py").is_file());

    let err = depot
        .create_asset("Demo", "Hero", t("Rigs/Props"), Some("Tools"))
        .unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
}

#[test]
fn test_path_arguments_reject_traversal() {
    let (dir, mut depot) = setup_depot();
    depot.create_project("Demo").unwrap();
    depot
        .create_asset("Demo", "Barrel", t("Models/Props"), None)
        .unwrap();

    let err = depot
        .reference_candidates("../..", t("Rigs/Props"))
        .unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));

    let err = depot.stub_path("../Demo", "Barrel", None).unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));

    let err = depot.rename_asset("Demo", "../x", "Keg").unwrap_err();
    assert!(matches!(err, DepotError::InvalidName { .. }));
    assert!(dir
        .path()
        .join("Projects/Demo/ArtDepot/Models/Props/Barrel")
        .is_dir());
}
