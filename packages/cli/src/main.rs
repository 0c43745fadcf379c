mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, export, init, move_page, pin, remove, rename, reorder, sections, show, unpin, AddArgs, ExportArgs, InitArgs,
    MoveArgs, PageArg, PinArgs, RenameArgs, ReorderArgs, SectionsArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagemap CLI - edit and lay out site hierarchy diagrams
#[derive(Parser, Debug)]
#[command(name = "pagemap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and save the default structure
    Init(InitArgs),

    /// Print the page tree with laid-out positions
    Show(ShowArgs),

    /// Add a page
    Add(AddArgs),

    /// Remove a page and everything below it
    Remove(PageArg),

    /// Change a page's label
    Rename(RenameArgs),

    /// Move a page under a new parent
    Move(MoveArgs),

    /// List or replace the home page sections
    Sections(SectionsArgs),

    /// Move one home section into another's slot
    Reorder(ReorderArgs),

    /// Fix a page at a canvas position
    Pin(PinArgs),

    /// Return a pinned page to auto-layout
    Unpin(PageArg),

    /// Write structure.json
    Export(ExportArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("PAGEMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Show(args) => show(args, &cwd),
            Command::Add(args) => add(args, &cwd),
            Command::Remove(args) => remove(args, &cwd),
            Command::Rename(args) => rename(args, &cwd),
            Command::Move(args) => move_page(args, &cwd),
            Command::Sections(args) => sections(args, &cwd),
            Command::Reorder(args) => reorder(args, &cwd),
            Command::Pin(args) => pin(args, &cwd),
            Command::Unpin(args) => unpin(args, &cwd),
            Command::Export(args) => export(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
