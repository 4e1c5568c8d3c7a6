// src/bin/pagecraft-debug.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

use pagecraft_core::{Component, PageDocument};
use pagecraft_layout::{fit_children, Bounds, LayoutConfig};
use pagecraft_runtime::EditorConfig;

const PREVIEW_LEN: usize = 40;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Json,
    Detailed,
}

#[derive(Parser)]
#[command(name = "pagecraft-debug")]
#[command(about = "Prints the component hierarchy of a page document")]
struct Args {
    /// Page JSON to inspect
    file: PathBuf,

    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show style entries under each component
    #[arg(long)]
    show_styles: bool,

    /// Show positions and sizes
    #[arg(long)]
    show_layout: bool,

    /// Editor config JSON used for the auto-size check
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.file.exists() {
        anyhow::bail!("Page file not found: {}", args.file.display());
    }

    let document = PageDocument::load(&args.file).context("Failed to load page document")?;
    let config = load_config(args.config.as_ref())?;

    let output_text = match args.format {
        Format::Tree => tree_output(&document, &args, None),
        Format::Json => document.to_json_pretty().context("Failed to serialize page")?,
        Format::Detailed => detailed_output(&document, &args, &config.layout),
    };

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file.display()))?;
        println!("Output written to: {}", output_file.display());
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid editor config in {}", path.display()))
}

fn tree_output(document: &PageDocument, args: &Args, layout: Option<&LayoutConfig>) -> String {
    let mut output = String::new();
    if document.components.is_empty() {
        output.push_str("(empty page)\n");
        return output;
    }
    for root in document.components.roots() {
        render_node(&mut output, root, "", None, args, layout);
    }
    output
}

fn detailed_output(document: &PageDocument, args: &Args, layout: &LayoutConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("Page: {} ({})\n", document.page_name, document.page_slug));
    if let Some(page_id) = &document.page_id {
        output.push_str(&format!("Id: {}\n", page_id));
    }
    output.push_str(&format!(
        "Components: {} ({} at root)\n\n",
        document.components.len(),
        document.components.root_len()
    ));
    output.push_str(&tree_output(document, args, Some(layout)));
    output
}

/// `prefix` is the indentation inherited from ancestors; `is_last` is `None`
/// for root nodes, which get no branch glyph.
fn render_node(
    output: &mut String,
    component: &Component,
    prefix: &str,
    is_last: Option<bool>,
    args: &Args,
    layout: Option<&LayoutConfig>,
) {
    let branch = match is_last {
        None => "",
        Some(true) => "└── ",
        Some(false) => "├── ",
    };
    output.push_str(&format!("{}{}{} #{}", prefix, branch, component.component_type, component.id));

    if let Some(content) = component.content().filter(|content| !content.is_empty()) {
        output.push_str(&format!(" \"{}\"", preview(content)));
    }

    if args.show_layout || layout.is_some() {
        let position = component.position();
        output.push_str(&format!(
            " pos:({},{}) size:({},{})",
            position.x,
            position.y,
            component.width(),
            component.height()
        ));
    }

    if let Some(layout) = layout {
        if let Some(fit) = fit_children(component.children(), layout).filter(|_| component.is_container()) {
            let stored = Bounds::of_component(component, 0.0).size();
            let marker = if stored == fit.size { "" } else { " stale" };
            output.push_str(&format!(" [fit {}x{}{}]", fit.size.x, fit.size.y, marker));
        }
    }
    output.push('\n');

    let child_prefix = match is_last {
        None => prefix.to_string(),
        Some(true) => format!("{}    ", prefix),
        Some(false) => format!("{}│   ", prefix),
    };

    if args.show_styles {
        if let Some(styles) = component.styles() {
            for (key, value) in styles.iter() {
                output.push_str(&format!("{}    • {}: {}\n", child_prefix, key, value));
            }
        }
    }

    let children = component.children();
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        render_node(output, child, &child_prefix, Some(last), args, layout);
    }
}

fn preview(content: &str) -> String {
    let single_line = content.replace('\n', " ");
    if single_line.chars().count() <= PREVIEW_LEN {
        return single_line;
    }
    let cut: String = single_line.chars().take(PREVIEW_LEN).collect();
    format!("{}...", cut)
}
