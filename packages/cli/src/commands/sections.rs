use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagemap_editor::Mutation;
use std::path::Path;

#[derive(Debug, Args)]
pub struct SectionsArgs {
    /// Replace the home section list
    #[arg(long, value_delimiter = ',')]
    pub set: Option<Vec<String>>,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Section being dragged
    pub dragged: String,

    /// Section whose slot it is dropped on
    pub target: String,
}

pub fn sections(args: SectionsArgs, cwd: &Path) -> Result<()> {
    let mut project = Project::open(cwd)?;

    if let Some(sections) = args.set {
        project.surface.apply(Mutation::SetHomeSections { sections })?;
        project.save()?;
    }

    print_sections(&project.surface.document().home_sections);
    Ok(())
}

pub fn reorder(args: ReorderArgs, cwd: &Path) -> Result<()> {
    let mut project = Project::open(cwd)?;

    if project.surface.reorder_sections(&args.dragged, &args.target)? {
        project.save()?;
    } else {
        println!("{}", "Nothing to reorder".yellow());
    }

    print_sections(&project.surface.document().home_sections);
    Ok(())
}

fn print_sections(sections: &[String]) {
    println!("{}", "Home sections:".bright_white().bold());
    for (i, section) in sections.iter().enumerate() {
        println!("  {}. {}", i + 1, section);
    }
}
