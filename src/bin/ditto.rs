use ditto::logging::init_logging;
use ditto::mock::{build_mock_install, build_mock_project, MOCK_INSTALL_NAME, MOCK_PROJECT_NAME};
use ditto::predicate::is_engine_install;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    init_logging();

    let work_dir = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    let install = build_mock_install(&work_dir, MOCK_INSTALL_NAME)?;
    build_mock_project(&work_dir, MOCK_PROJECT_NAME)?;

    let candidates = [
        MOCK_INSTALL_NAME,
        "AFakeFakeUnrealInstallation",
        "ADifferentFakeUnrealInstallation",
        "AnotherAnotherFakeUnrealInstallation",
    ];
    for name in candidates {
        let path = work_dir.join(name);
        println!(
            "Is Unreal Engine Installation ({}): {}\nEngine Install Path: {}",
            name,
            is_engine_install(&path),
            path.display()
        );
    }

    let plugins = install.marketplace_plugins();
    println!("Marketplace plugins: {}", plugins.len());
    for plugin in &plugins {
        println!("  {}", plugin.display());
    }

    Ok(())
}
