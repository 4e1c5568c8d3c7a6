// src/main.rs
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use pagecraft_core::PageDocument;
use pagecraft_render::{HtmlRenderer, PlainText, RenderOptions};

#[derive(Parser)]
#[command(author, version, about = "Render a page builder document to static HTML", long_about = None)]
struct Args {
    /// Page JSON to render, `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Write the HTML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Render as an unpublished draft
    #[arg(long)]
    draft: bool,

    /// Leave out the draft banner
    #[arg(long)]
    no_banner: bool,

    /// Treat text blocks as plain text instead of markdown
    #[arg(long)]
    plain_text: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let document = read_document(&args.input)?;

    let mut renderer = HtmlRenderer::new();
    if args.plain_text {
        renderer = renderer.with_markdown(PlainText);
    }
    let options = RenderOptions {
        is_draft: args.draft,
        show_draft_banner: !args.no_banner,
    };

    let html = renderer
        .render_page(&document, &options)
        .context("Failed to render page")?;
    debug!("Rendered {} bytes", html.len());

    match args.output {
        Some(path) => {
            fs::write(&path, &html).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

fn read_document(input: &str) -> Result<PageDocument> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read page from stdin")?;
        return PageDocument::from_json_str(&source).context("Invalid page document on stdin");
    }

    if !std::path::Path::new(input).exists() {
        anyhow::bail!("Page file not found: {}", input);
    }
    PageDocument::load(input).with_context(|| format!("Failed to load page {}", input))
}
