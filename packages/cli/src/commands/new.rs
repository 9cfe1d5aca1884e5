use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::path::Path;
use woosh_editor::{Document, Mutation};
use woosh_schema::Root;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Add a section with this many columns (repeatable)
    #[arg(short, long = "columns", value_name = "N")]
    pub columns: Vec<usize>,

    /// Template title (overrides config)
    #[arg(short, long)]
    pub title: Option<String>,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let mut root = Root::new(args.title.unwrap_or(config.default_title));
    root.preview_line = Some(config.default_preview_line);
    root.fonts = config.default_fonts.into_iter().collect::<BTreeSet<_>>();

    let mut document = Document::new(root);
    for columns in args.columns {
        document.apply(Mutation::AddSection { columns, preset: None })?;
    }

    println!("{}", document.to_json_pretty()?);
    Ok(())
}
