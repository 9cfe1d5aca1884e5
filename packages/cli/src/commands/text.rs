use anyhow::Result;
use clap::Args;
use woosh_richtext::{deserialize, serialize};

#[derive(Debug, Args)]
pub struct TextArgs {
    /// HTML fragment
    pub html: String,

    /// Print the parsed nodes as JSON instead of HTML
    #[arg(long)]
    pub json: bool,
}

pub fn text(args: TextArgs) -> Result<()> {
    let nodes = deserialize(&args.html);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        println!("{}", serialize(&nodes));
    }
    Ok(())
}
