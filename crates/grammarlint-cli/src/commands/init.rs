use std::fs;

use grammarlint_core::config::{LintConfig, CONFIG_FILE_NAME};

/// Run `grammarlint init` -- write the default configuration to the current directory.
pub fn run(force: bool) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("grammarlint init: failed to get current directory: {}", e);
            return 2;
        }
    };

    let config_path = cwd.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        eprintln!(
            "grammarlint init: {} already exists (use --force to overwrite)",
            CONFIG_FILE_NAME
        );
        return 2;
    }

    let config = LintConfig::default();
    if let Err(e) = fs::write(&config_path, config.to_json() + "\n") {
        eprintln!("grammarlint init: failed to write config: {}", e);
        return 2;
    }

    println!(
        "Wrote {} with {} checks enabled",
        CONFIG_FILE_NAME,
        config.checks.len()
    );
    println!("HeaderCheck is off until a headerFile is configured");
    0
}
