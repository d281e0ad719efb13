use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use newsframe::{
    AccentColor, Archive, BackgroundSource, FileConfigLoader, RenderRequest, Renderer,
    force_light_color, lookup_color_name,
};

#[derive(Parser, Debug)]
#[command(name = "newsframe", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an opaque PNG post.
    Post(PostArgs),
    /// Render a transparent PNG overlay for video.
    Overlay(TextArgs),
    /// Resolve a color name or hex value and show its badge-safe variant.
    Color {
        /// Color name, `#hex` or `r,g,b`.
        input: String,
    },
}

#[derive(Args, Debug)]
struct TextArgs {
    #[arg(long)]
    headline: String,

    #[arg(long, default_value = "")]
    subheading: String,

    #[arg(long, default_value = "")]
    source: String,

    #[arg(long, default_value = "")]
    date: String,

    /// Badge color: name, `#hex` or `r,g,b`. Extracted from the background when omitted.
    #[arg(long)]
    color: Option<String>,

    /// Phrase ending the highlighted span.
    #[arg(long)]
    highlight: Option<String>,

    /// Horizontal badge padding in pixels.
    #[arg(long)]
    padding: Option<u32>,

    /// Shared template JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Requester id selecting `<users-dir>/<id>/template_config.json`.
    #[arg(long, requires = "users_dir")]
    user: Option<String>,

    #[arg(long)]
    users_dir: Option<PathBuf>,

    /// Directory relative font and logo paths resolve against. Defaults to the config's folder.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PostArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Background image file.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Archive root for metadata and a copy of the post.
    #[arg(long)]
    archive: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.cmd {
        Command::Post(args) => cmd_post(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Color { input } => cmd_color(&input),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn renderer_for(args: &TextArgs) -> Renderer {
    let mut loader = FileConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_default_path(path);
    }
    if let Some(dir) = &args.users_dir {
        loader = loader.with_users_dir(dir);
    }
    let assets = args
        .assets
        .clone()
        .or_else(|| args.config.as_deref().and_then(Path::parent).map(Path::to_path_buf));
    if let Some(root) = assets {
        loader = loader.with_assets_root(root);
    }
    Renderer::new(Box::new(loader))
}

fn request_for(args: &TextArgs) -> RenderRequest {
    let mut req = RenderRequest::new(&args.headline)
        .subheading(&args.subheading)
        .source(&args.source)
        .date(&args.date);
    if let Some(c) = &args.color {
        req = req.accent_str(c);
    }
    if let Some(p) = &args.highlight {
        req = req.highlight(p);
    }
    if let Some(px) = args.padding {
        req = req.padding(px);
    }
    if let Some(user) = &args.user {
        req = req.requester(user);
    }
    req
}

fn cmd_post(args: PostArgs) -> anyhow::Result<()> {
    let mut renderer = renderer_for(&args.text);
    if let Some(root) = &args.archive {
        renderer = renderer.with_archive(Archive::new(root));
    }
    let mut req = request_for(&args.text);
    if let Some(path) = &args.background {
        let bytes =
            std::fs::read(path).with_context(|| format!("read background '{}'", path.display()))?;
        req = req.background(BackgroundSource::Bytes(bytes));
    }
    let png = renderer
        .render(&req)
        .context("render failed, see log for details")?;
    write_output(&args.text.out, &png)
}

fn cmd_overlay(args: TextArgs) -> anyhow::Result<()> {
    let renderer = renderer_for(&args);
    let png = renderer
        .render_overlay(&request_for(&args))
        .context("overlay render failed, see log for details")?;
    write_output(&args.out, &png)
}

fn cmd_color(input: &str) -> anyhow::Result<()> {
    let parsed = AccentColor::parse(input);
    let rgb = parsed
        .to_rgb()
        .with_context(|| format!("unknown color '{input}'"))?;
    if let AccentColor::Named(name) = &parsed {
        if let Some(m) = lookup_color_name(name) {
            let kind = if m.exact { "exact" } else { "closest" };
            println!("name: {} ({kind})", m.name);
        }
    }
    let light = force_light_color(rgb);
    println!("color: {} {rgb}", rgb.to_hex());
    println!("badge: {} {light}", light.to_hex());
    Ok(())
}

fn write_output(out: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
