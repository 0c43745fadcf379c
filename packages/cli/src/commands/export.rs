use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagemap_editor::{DirectoryExporter, HostShell, MemoryStore, EXPORT_FILE_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let mut project = Project::open(cwd)?;

    match args.out_dir {
        Some(dir) => {
            let mut host = HostShell::new(MemoryStore::new(), DirectoryExporter::new(cwd.join(dir)));
            host.export(&project.surface)?;
            report(host.exporter())
        }
        None => {
            project.host.export(&project.surface)?;
            report(project.host.exporter())
        }
    }

    Ok(())
}

fn report(exporter: &DirectoryExporter) {
    let written = exporter
        .last_written()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
    println!("{} Exported {}", "✓".green(), written.bright_white());
}
