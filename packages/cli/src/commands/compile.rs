use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use woosh_compiler_mjml::{unknown_tags, CompileOptions};
use woosh_editor::Document;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Template file or directory (defaults to the configured source directory)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// One tag per line, indented
    #[arg(long)]
    pub pretty: bool,
}

pub fn compile(args: CompileArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.path {
        Some(path) => cwd.join(path),
        None => config.get_src_dir(cwd),
    };

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let (src_dir, templates) = if input.is_file() {
        let parent = input.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
        (parent, vec![input.clone()])
    } else {
        (input.clone(), find_templates(&input))
    };

    if templates.is_empty() {
        println!("{}", "No template files found".yellow());
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => cwd.join(out),
        None => config.get_out_dir(cwd),
    };

    if !args.stdout {
        println!("{}", "Compiling templates...".bright_blue().bold());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for template in &templates {
        let relative_path = template.strip_prefix(&src_dir).unwrap_or(template);
        match compile_file(template, relative_path, &args, &out_dir) {
            Ok(output_path) => {
                success_count += 1;
                if let Some(output_path) = output_path {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), output_path.display());
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), relative_path.display(), format!("{:#}", e).red());
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} templates failed to compile", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} templates", "Done.".green(), success_count);
        Ok(())
    } else {
        Err(anyhow!("Compiled {} templates, {} errors", success_count, error_count))
    }
}

fn find_templates(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

/// Compile one template; returns the written path unless printing to stdout
fn compile_file(template: &Path, relative_path: &Path, args: &CompileArgs, out_dir: &Path) -> Result<Option<PathBuf>> {
    debug!(path = %template.display(), "compiling template file");
    let source = fs::read_to_string(template).with_context(|| format!("reading {}", template.display()))?;
    let document = Document::from_json(&source)?;

    for tag in unknown_tags(document.registry(), document.root()) {
        eprintln!("  {} {}: unknown element <{}> is skipped", "!".yellow(), relative_path.display(), tag);
    }

    let options = if args.pretty {
        CompileOptions::pretty()
    } else {
        CompileOptions::default()
    };
    let output = document.compile_with(options)?;

    if args.stdout {
        println!("{}", output);
        return Ok(None);
    }

    let output_file = out_dir.join(relative_path).with_extension("mjml");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok(Some(output_file))
}
