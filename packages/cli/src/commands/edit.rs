//! Structural page edits. Each command loads the project, applies one
//! mutation and saves.

use super::Project;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagemap_editor::{Mutation, PageNode, Position};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Id of the new page
    pub id: String,

    /// Display label
    pub label: String,

    /// Parent page id
    #[arg(short, long, default_value = "home")]
    pub parent: String,

    /// Level (defaults to one below the parent)
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Position among the parent's children (defaults to last)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct PageArg {
    /// Page id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    pub id: String,

    /// New parent page id
    pub parent: String,

    /// Position among the new parent's children (defaults to last)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct PinArgs {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[instrument(skip(cwd, mutation, done), fields(mutation = mutation.name()))]
fn commit(cwd: &Path, mutation: Mutation, done: String) -> Result<()> {
    let mut project = Project::open(cwd)?;
    project.surface.apply(mutation)?;
    project.save()?;
    info!(version = project.surface.version(), "Committed edit");
    println!("{} {}", "✓".green(), done);
    Ok(())
}

pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let project = Project::open(cwd)?;
    let parent = project
        .surface
        .document()
        .find(&args.parent)
        .ok_or_else(|| anyhow!("Parent page not found: {}", args.parent))?;
    let level = args.level.unwrap_or(parent.level + 1);

    let mutation = Mutation::AddPage {
        parent_id: args.parent.clone(),
        index: args.index.unwrap_or(usize::MAX),
        page: PageNode::new(args.id.clone(), args.label, level),
    };
    commit(cwd, mutation, format!("Added {} under {}", args.id.bold(), args.parent))
}

pub fn remove(args: PageArg, cwd: &Path) -> Result<()> {
    let done = format!("Removed {}", args.id.bold());
    commit(cwd, Mutation::RemovePage { page_id: args.id }, done)
}

pub fn rename(args: RenameArgs, cwd: &Path) -> Result<()> {
    let done = format!("Renamed {} to {}", args.id.bold(), args.label);
    commit(
        cwd,
        Mutation::RenamePage {
            page_id: args.id,
            label: args.label,
        },
        done,
    )
}

pub fn move_page(args: MoveArgs, cwd: &Path) -> Result<()> {
    let done = format!("Moved {} under {}", args.id.bold(), args.parent);
    commit(
        cwd,
        Mutation::MovePage {
            page_id: args.id,
            new_parent_id: args.parent,
            index: args.index.unwrap_or(usize::MAX),
        },
        done,
    )
}

pub fn pin(args: PinArgs, cwd: &Path) -> Result<()> {
    let done = format!("Pinned {} at ({}, {})", args.id.bold(), args.x, args.y);
    commit(
        cwd,
        Mutation::PinPage {
            page_id: args.id,
            position: Position::new(args.x, args.y),
        },
        done,
    )
}

pub fn unpin(args: PageArg, cwd: &Path) -> Result<()> {
    let done = format!("Unpinned {}", args.id.bold());
    commit(cwd, Mutation::UnpinPage { page_id: args.id }, done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();

        add(
            AddArgs {
                id: "team".to_string(),
                label: "Team".to_string(),
                parent: "about".to_string(),
                level: None,
                index: None,
            },
            dir.path(),
        )
        .unwrap();
        move_page(
            MoveArgs {
                id: "author".to_string(),
                parent: "team".to_string(),
                index: None,
            },
            dir.path(),
        )
        .unwrap();
        pin(
            PinArgs {
                id: "team".to_string(),
                x: 10.0,
                y: 20.0,
            },
            dir.path(),
        )
        .unwrap();

        let project = Project::open(dir.path()).unwrap();
        let team = project.surface.document().find("team").unwrap();
        assert_eq!(team.level, 3);
        assert_eq!(team.children[0].id, "author");
        assert_eq!(team.position, Some(Position::new(10.0, 20.0)));
    }

    #[test]
    fn test_failed_edit_does_not_save() {
        let dir = tempfile::tempdir().unwrap();

        let result = remove(PageArg { id: "home".to_string() }, dir.path());
        assert!(result.is_err());
        assert!(!dir.path().join(".pagemap").exists());
    }

    #[test]
    fn test_non_finite_pin_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        add(
            AddArgs {
                id: "team".to_string(),
                label: "Team".to_string(),
                parent: "about".to_string(),
                level: None,
                index: None,
            },
            dir.path(),
        )
        .unwrap();

        let result = pin(
            PinArgs {
                id: "team".to_string(),
                x: f64::NAN,
                y: 0.0,
            },
            dir.path(),
        );
        assert!(result.is_err());

        // the saved project still opens and the page stays unpinned
        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.surface.document().find("team").unwrap().position, None);
    }
}
