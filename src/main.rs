use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use cropshare::app::{run_drag, CropSession, DragStep, FieldNudge};
use cropshare::clipboard::WlCopyBackend;
use cropshare::config::{self, AppConfig};
use cropshare::input::FieldKey;
use cropshare::notification::DesktopNotifier;
use cropshare::share;
use cropshare::storage::StorageService;

#[derive(Parser)]
#[command(name = "cropshare", about = "Crop an image and share the crop as a link")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the crop as a PNG into the output directory
    Crop(CropArgs),
    /// Print the share link for the crop
    Url(SessionArgs),
}

#[derive(Args)]
struct SessionArgs {
    /// Source image
    image: PathBuf,

    /// Query string or full share link to restore the crop from
    #[arg(short, long)]
    query: Option<String>,

    /// Raw text for the x1 field
    #[arg(long, allow_hyphen_values = true)]
    x1: Option<String>,

    /// Raw text for the y1 field
    #[arg(long, allow_hyphen_values = true)]
    y1: Option<String>,

    /// Raw text for the x2 field
    #[arg(long, allow_hyphen_values = true)]
    x2: Option<String>,

    /// Raw text for the y2 field
    #[arg(long, allow_hyphen_values = true)]
    y2: Option<String>,

    /// Stepper press, e.g. `x2:+10` (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    nudge: Vec<FieldNudge>,

    /// Drag gesture in display pixels, e.g. `se:20,20` (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    drag: Vec<DragStep>,

    /// Width the image is displayed at; defaults to its natural width
    #[arg(long)]
    display_width: Option<f64>,

    /// Config file to use instead of the XDG location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct CropArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output directory for the cropped PNG
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also copy the share link to the clipboard
    #[arg(long)]
    copy_url: bool,
}

type Session = CropSession<StorageService, WlCopyBackend, DesktopNotifier>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cropshare::logging::init(cli.verbose);

    match &cli.command {
        Commands::Crop(args) => run_crop(args),
        Commands::Url(args) => run_url(args),
    }
}

fn run_crop(args: &CropArgs) -> Result<()> {
    let config = load_config(&args.session);
    let sink = match args.out.clone().or_else(|| config.output_dir.clone()) {
        Some(dir) => StorageService::with_output_dir(dir),
        None => StorageService::with_default_paths().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to the temp directory for exports");
            StorageService::with_output_dir(std::env::temp_dir())
        }),
    };
    let mut session = open_session(&args.session, &config, sink)?;

    if session.execute()?.is_none() {
        anyhow::bail!("crop region is empty");
    }
    if let Some(path) = session.download()? {
        println!("{}", path.display());
    }
    if args.copy_url {
        session.copy_share_url();
    }
    Ok(())
}

fn run_url(args: &SessionArgs) -> Result<()> {
    let config = load_config(args);
    let sink = StorageService::with_output_dir(std::env::temp_dir());
    let session = open_session(args, &config, sink)?;
    let url = session
        .share_url()
        .context("no image loaded, cannot build a share link")?;
    println!("{url}");
    Ok(())
}

fn load_config(args: &SessionArgs) -> AppConfig {
    match args.config.as_deref() {
        Some(path) => config::load_app_config_from(path),
        None => config::load_app_config(),
    }
}

/// Replays the page lifecycle: query string first, then the image load, then
/// field edits, stepper presses and drags in that order.
fn open_session(args: &SessionArgs, config: &AppConfig, sink: StorageService) -> Result<Session> {
    let mut session = CropSession::new(config, sink, WlCopyBackend, DesktopNotifier);

    if let Some(query) = args.query.as_deref() {
        session
            .controller_mut()
            .apply_query_string(share::query_of(query));
    }

    session
        .open_image(&args.image, args.display_width)
        .with_context(|| format!("failed to open {}", args.image.display()))?;

    let fields = [
        (FieldKey::X1, &args.x1),
        (FieldKey::Y1, &args.y1),
        (FieldKey::X2, &args.x2),
        (FieldKey::Y2, &args.y2),
    ];
    for (key, text) in fields {
        if let Some(text) = text {
            session.controller_mut().set_field_text(key, text);
        }
    }
    for nudge in &args.nudge {
        session.controller_mut().adjust_field(nudge.key, nudge.delta);
    }
    for step in &args.drag {
        run_drag(session.controller_mut(), *step);
    }

    tracing::debug!(crop = ?session.controller().crop(), "crop ready");
    Ok(session)
}
