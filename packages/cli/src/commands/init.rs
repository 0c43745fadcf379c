use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagemap_editor::{DirectoryExporter, EditorSurface, FileStore, HostShell, LayoutDirection, STORAGE_KEY};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Layout direction (TB or LR)
    #[arg(short, long, default_value = "TB")]
    pub direction: LayoutDirection,

    /// Force overwrite existing config and saved document
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagemap project...".bright_blue().bold());

    let config = Config {
        direction: args.direction,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Seed the store with the built-in structure
    let surface = EditorSurface::with_document(Default::default(), config.direction)?;
    let mut host = HostShell::new(
        FileStore::new(config.store_path(cwd)),
        DirectoryExporter::new(config.export_path(cwd)),
    );
    host.save(&surface)?;
    println!(
        "  {} Saved default structure to {}/{}.json",
        "✓".green(),
        config.store_dir,
        STORAGE_KEY
    );

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagemap show");
    println!("  2. Run: pagemap add <id> <label> --parent home");
    println!("  3. Run: pagemap export");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Project;

    #[test]
    fn test_init_writes_config_and_document() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                direction: LayoutDirection::LR,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
        assert!(dir.path().join(".pagemap/pageStructure.json").exists());

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.config.direction, LayoutDirection::LR);
        assert_eq!(project.surface.document().page_count(), 12);
    }
}
