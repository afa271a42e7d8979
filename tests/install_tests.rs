// Staging and layout tests against a temporary prefix


use mtinstall::receipt::InstallReceipt;
use mtinstall::{InstallError, formula, layout, stage};
use std::fs;
use test_helpers::TestEnvironment;

#[test]
fn test_stage_installs_executable_without_placeholder() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();

    assert!(staged.bin_path.exists());
    assert_eq!(staged.bin_path, env.prefix.join("bin/mth"));

    let installed = fs::read_to_string(&staged.bin_path).unwrap();
    assert!(!installed.contains(stage::SHARE_PREFIX_TOKEN));
    assert!(installed.contains(&staged.share_dir.to_string_lossy().to_string()));
}

#[cfg(unix)]
#[test]
fn test_staged_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();

    let mode = fs::metadata(&staged.bin_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o755, 0o755);
}

#[test]
fn test_stage_copies_assets_verbatim() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();

    for rel in [
        "action/__init__.py",
        "action/TakeScreenshotAction.py",
        "action/RecordVideoAction.py",
        "framework/classes/ActionExecutor.py",
        "framework/utils/console.py",
    ] {
        let source = fs::read(env.source.join(rel)).unwrap();
        let installed = fs::read(staged.share_dir.join(rel)).unwrap();
        assert_eq!(source, installed, "{rel} differs from source");
    }

    let requirements = staged.share_dir.join(stage::REQUIREMENTS_FILE);
    assert_eq!(
        fs::read(env.source.join("install/requirements.txt")).unwrap(),
        fs::read(&requirements).unwrap()
    );
}

#[test]
fn test_stage_share_dir_is_versioned() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();

    assert_eq!(
        staged.share_dir,
        env.prefix.join("share/mth").join(formula::MTH.version)
    );
}

#[test]
fn test_reinstall_overwrites_wholesale() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();

    // Simulate drift in the installed copy
    fs::write(staged.share_dir.join("action/__init__.py"), "tampered").unwrap();
    fs::write(staged.share_dir.join("stray.txt"), "leftover").unwrap();

    let restaged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();
    assert_eq!(restaged.share_dir, staged.share_dir);
    assert!(!restaged.share_dir.join("stray.txt").exists());
    assert_eq!(
        fs::read(env.source.join("action/__init__.py")).unwrap(),
        fs::read(restaged.share_dir.join("action/__init__.py")).unwrap()
    );
}

#[test]
fn test_stage_rejects_incomplete_source() {
    let env = TestEnvironment::new();
    fs::remove_dir_all(env.source.join("framework")).unwrap();

    let err = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap_err();
    assert!(matches!(err, InstallError::MissingSource(_)));

    // Nothing staged on failure
    assert!(!env.prefix.join("bin/mth").exists());
}

#[test]
fn test_mtu_stages_its_own_script_and_share() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTU, &env.source, &env.prefix).unwrap();

    assert_eq!(staged.bin_path, env.prefix.join("bin/mtu"));
    assert!(staged.share_dir.starts_with(env.prefix.join("share/mtu")));
}

#[test]
fn test_receipt_and_listing_after_install() {
    let env = TestEnvironment::new();
    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();
    InstallReceipt::new(&formula::MTH, staged.staged_files)
        .write(&staged.share_dir)
        .unwrap();

    let installed = layout::list_installed(&env.prefix).unwrap();
    assert_eq!(installed.len(), 1);
    assert_eq!(installed[0].name, "mth");
    assert_eq!(installed[0].version, formula::MTH.version);

    let receipt = installed[0].receipt.as_ref().unwrap();
    assert!(!receipt.post_install_done);
    assert_eq!(receipt.staged_files, staged.staged_files);
}

#[test]
fn test_listing_ignores_foreign_share_directories() {
    let env = TestEnvironment::new();
    // Another package's share directory, no receipt
    fs::create_dir_all(env.prefix.join("share/ffmpeg/7.0")).unwrap();

    let staged = stage::stage(&formula::MTH, &env.source, &env.prefix).unwrap();
    InstallReceipt::new(&formula::MTH, staged.staged_files)
        .write(&staged.share_dir)
        .unwrap();

    let installed = layout::list_installed(&env.prefix).unwrap();
    assert_eq!(installed.len(), 1);
    assert_eq!(installed[0].name, "mth");
}

#[test]
fn test_installed_versions_newest_first() {
    let env = TestEnvironment::new();

    for version in ["1.0.0", "1.2.0", "1.10.0"] {
        let dir = layout::share_dir(&env.prefix, "mth", version);
        fs::create_dir_all(&dir).unwrap();
        let mut receipt = InstallReceipt::new(&formula::MTH, 0);
        receipt.version = version.to_string();
        receipt.write(&dir).unwrap();
    }

    let versions = layout::installed_versions(&env.prefix, "mth").unwrap();
    let order: Vec<&str> = versions.iter().map(|t| t.version.as_str()).collect();
    assert_eq!(order, ["1.10.0", "1.2.0", "1.0.0"]);
}
