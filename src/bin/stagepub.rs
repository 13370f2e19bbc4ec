use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stagepub", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a scene document as markup + script.
    Publish(PublishArgs),
    /// Print the collected document model as JSON without writing artifacts.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output markup path (overrides the settings file and the derived name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Publish settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding library media sources (defaults to the document's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Runtime directory copied next to the output.
    #[arg(long)]
    runtime_src: Option<PathBuf>,

    /// Publish only this scene (output name gets a `_<scene>` suffix).
    #[arg(long)]
    scene: Option<String>,

    /// Inclusive frame range for `--scene`, as `first:last`.
    #[arg(long, requires = "scene")]
    frames: Option<String>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Publish(args) => cmd_publish(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_doc_json(path: &Path) -> anyhow::Result<stagepub::SceneDocument> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let mut doc: stagepub::SceneDocument =
        serde_json::from_reader(r).with_context(|| "parse document JSON")?;
    if doc.path.is_none() {
        doc.path = Some(path.to_path_buf());
    }
    Ok(doc)
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<stagepub::PublishSettings> {
    let Some(path) = path else {
        return Ok(stagepub::PublishSettings::default());
    };
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let settings = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse settings '{}'", path.display()))?;
    Ok(settings)
}

fn parse_range(s: &str) -> anyhow::Result<stagepub::FrameRange> {
    let (a, b) = s
        .split_once(':')
        .with_context(|| format!("frame range '{s}' must look like first:last"))?;
    let first: u32 = a.trim().parse().with_context(|| format!("bad first frame '{a}'"))?;
    let last: u32 = b.trim().parse().with_context(|| format!("bad last frame '{b}'"))?;
    Ok(stagepub::FrameRange::new(first, last)?)
}

fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let mut settings = read_settings(args.settings.as_deref())?;
    if let Some(out) = args.out {
        settings.out_file = Some(out);
    }
    if let Some(rt) = args.runtime_src {
        settings.copy_runtime_from = Some(rt);
    }

    let assets_root = match args.assets {
        Some(p) => p,
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let mut sink = stagepub::FsSink;
    let mut media = stagepub::FsMediaExporter::new(assets_root);
    let outliner = stagepub::OutlineShapeService::default();
    let mut services = stagepub::ExportServices::new(&mut sink)
        .with_media(&mut media)
        .with_shapes(&outliner);

    let publisher = stagepub::Publisher::new(settings);
    let report = match &args.scene {
        Some(scene) => {
            let range = args.frames.as_deref().map(parse_range).transpose()?;
            publisher.publish_scene(&doc, scene, range, &mut services)?
        }
        None => publisher.publish_document(&doc, &mut services)?,
    };

    eprintln!(
        "wrote {} ({} actions over {} frames)",
        report.markup_path.display(),
        report.actions,
        report.frames
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let mut sink = stagepub::InMemorySink::new();
    let outliner = stagepub::OutlineShapeService::default();
    let mut services = stagepub::ExportServices::new(&mut sink).with_shapes(&outliner);
    let collected = stagepub::Publisher::default()
        .collect_document(&doc, &mut services)
        .with_context(|| format!("collect '{}'", args.in_path.display()))?;

    let json = serde_json::to_string_pretty(&collected.model).context("serialize model")?;
    println!("{json}");
    Ok(())
}
