use super::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagemap_editor::{FlatGraph, LayoutDirection, PageNode};
use std::path::Path;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the positioned render snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Layout direction (overrides config)
    #[arg(short, long)]
    pub direction: Option<LayoutDirection>,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let mut project = Project::open(cwd)?;
    if let Some(direction) = args.direction {
        project.surface.set_direction(direction)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(project.surface.rendered())?);
        return Ok(());
    }

    let doc = project.surface.document();
    let mut lines = Vec::new();
    tree_lines(&doc.pages, project.surface.rendered(), "", true, true, &mut lines);
    for line in lines {
        println!("{}", line);
    }

    println!();
    println!("{}", "Home sections:".bright_white().bold());
    for (i, section) in doc.home_sections.iter().enumerate() {
        println!("  {}. {}", i + 1, section);
    }

    Ok(())
}

fn tree_lines(page: &PageNode, graph: &FlatGraph, prefix: &str, is_root: bool, is_last: bool, out: &mut Vec<String>) {
    let branch = match (is_root, is_last) {
        (true, _) => "",
        (false, true) => "└─ ",
        (false, false) => "├─ ",
    };
    let position = graph
        .node(&page.id)
        .and_then(|n| n.position)
        .map(|p| format!(" @ ({}, {})", p.x, p.y))
        .unwrap_or_default();
    let pin = if page.position.is_some() { " 📌" } else { "" };

    out.push(format!(
        "{}{}{} {}{}{}",
        prefix,
        branch,
        page.label.bold(),
        format!("[{}, level {}]", page.id, page.level).dimmed(),
        position.dimmed(),
        pin
    ));

    let child_prefix = match (is_root, is_last) {
        (true, _) => String::new(),
        (false, true) => format!("{}   ", prefix),
        (false, false) => format!("{}│  ", prefix),
    };
    for (i, child) in page.children.iter().enumerate() {
        tree_lines(child, graph, &child_prefix, false, i + 1 == page.children.len(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemap_editor::{layout, flatten, HierarchyDocument};

    #[test]
    fn test_tree_lines_cover_every_page() {
        colored::control::set_override(false);
        let doc = HierarchyDocument::default_structure();
        let graph = layout(&flatten(&doc.pages, &doc.home_sections).unwrap(), LayoutDirection::TB).unwrap();

        let mut lines = Vec::new();
        tree_lines(&doc.pages, &graph, "", true, true, &mut lines);

        assert_eq!(lines.len(), doc.page_count());
        assert!(lines[0].starts_with("Home [home, level 1]"));
        assert!(lines.last().unwrap().starts_with("   └─ Support Page"));
    }
}
