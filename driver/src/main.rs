use anyhow::Context;
use clap::Parser;
use rficore::engine::ManifestEngine;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::{launch, Runner};
use workflow::scripts::Script;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Launch CHIME/FRB RFI chains for the web viewer")]
struct Args {
    /// Canned run to launch
    #[arg(value_enum, required_unless_present = "workflow", conflicts_with = "workflow")]
    run: Option<Script>,
    /// Load a run description from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Directory receiving run manifests
    #[arg(long, default_value = "web_viewer")]
    output_dir: PathBuf,
    /// Log the chain without writing a manifest
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Print the assembled manifest as JSON
    #[arg(long, default_value_t = false)]
    print: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = match (args.workflow, args.run) {
        (Some(path), _) => WorkflowConfig::load(path)?,
        (None, Some(script)) => script.workflow(),
        (None, None) => anyhow::bail!("either a run name or --workflow is required"),
    };

    let runner = Runner::new(workflow_config);

    let manifest = runner.prepare()?;
    if args.print {
        let json = serde_json::to_string_pretty(&manifest).context("serializing manifest")?;
        println!("{json}");
    }

    let mut engine = if args.dry_run {
        ManifestEngine::dry_run()
    } else {
        ManifestEngine::new(&args.output_dir)
    };
    let summary = launch(&manifest, &mut engine)?;

    match &summary.manifest_path {
        Some(path) => println!(
            "{}: {} transforms -> {}",
            summary.label,
            summary.transform_count,
            path.display()
        ),
        None => println!("{}: {} transforms (dry run)", summary.label, summary.transform_count),
    }
    println!(":::::::::::: {} done ::::::::::::", runner.label());

    Ok(())
}
