use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "spriteblend", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend a sprite PNG onto a background PNG.
    Merge(MergeArgs),
    /// Blend a generated solid sprite onto a background PNG.
    Solid(SolidArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Sprite left edge in background pixels.
    #[arg(long, allow_negative_numbers = true)]
    x: i32,

    /// Sprite top edge in background pixels.
    #[arg(long, allow_negative_numbers = true)]
    y: i32,

    /// Write alpha 255 wherever the sprite is applied (`true` or `false`).
    #[arg(long, action = ArgAction::Set)]
    force_opaque: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use. Overrides the settings file and environment.
    #[arg(long, value_enum)]
    backend: Option<BackendChoice>,

    /// JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Sprite image.
    #[arg(long)]
    sprite: PathBuf,

    /// Wrap columns around the background width.
    #[arg(long)]
    wrap_horizontal: bool,

    /// Wrap rows around the background height.
    #[arg(long)]
    wrap_vertical: bool,
}

#[derive(Parser, Debug)]
struct SolidArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Sprite width in pixels.
    #[arg(long)]
    width: u32,

    /// Sprite height in pixels.
    #[arg(long)]
    height: u32,

    /// Fill color, `#RRGGBB` or `#RRGGBBAA`.
    #[arg(long)]
    color: String,

    /// Border thickness in pixels.
    #[arg(long)]
    border: Option<u32>,

    /// Border color. Defaults to black.
    #[arg(long, requires = "border")]
    border_color: Option<String>,

    /// Wrap columns around the background width.
    #[arg(long)]
    wrap: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
    #[cfg(feature = "gpu")]
    Gpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Merge(args) => cmd_merge(args),
        Command::Solid(args) => cmd_solid(args),
    }
}

fn make_compositor(common: &CommonArgs) -> anyhow::Result<spriteblend::Compositor> {
    let mut settings = match &common.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            spriteblend::EngineSettings::from_json_str(&json)
                .with_context(|| format!("parse settings '{}'", path.display()))?
        }
        None => spriteblend::EngineSettings::from_env(),
    };
    if let Some(choice) = common.backend {
        settings.backend = match choice {
            BackendChoice::Cpu => spriteblend::BackendKind::Cpu,
            #[cfg(feature = "gpu")]
            BackendChoice::Gpu => spriteblend::BackendKind::Gpu,
        };
    }
    Ok(spriteblend::Compositor::new(&settings)?)
}

fn read_image(path: &Path) -> anyhow::Result<spriteblend::RasterImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    spriteblend::RasterImage::decode(&bytes)
        .with_context(|| format!("load image '{}'", path.display()))
}

fn write_png(path: &Path, img: &spriteblend::RasterImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.data(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let compositor = make_compositor(&args.common)?;
    let background = read_image(&args.common.background)?;
    let sprite = read_image(&args.sprite)?;

    let params = spriteblend::BlendParameters::at(
        args.common.x,
        args.common.y,
        args.common.force_opaque,
    )
    .wrapped(args.wrap_horizontal, args.wrap_vertical);
    let out = compositor.composite(&background, &sprite, params)?;
    write_png(&args.common.out, &out)
}

fn cmd_solid(args: SolidArgs) -> anyhow::Result<()> {
    let compositor = make_compositor(&args.common)?;
    let background = read_image(&args.common.background)?;

    let fill = spriteblend::Rgba8::parse_hex(&args.color)
        .with_context(|| format!("parse --color '{}'", args.color))?;
    let mut sprite = spriteblend::SolidSprite::new(args.width, args.height, fill);
    if let Some(thickness) = args.border {
        let color = match &args.border_color {
            Some(c) => spriteblend::Rgba8::parse_hex(c)
                .with_context(|| format!("parse --border-color '{c}'"))?,
            None => spriteblend::Rgba8::BLACK,
        };
        sprite = sprite.with_border(thickness, color);
    }

    let out = compositor.composite_solid_sprite(
        &background,
        &sprite,
        args.common.x,
        args.common.y,
        args.wrap,
        args.common.force_opaque,
    )?;
    write_png(&args.common.out, &out)
}
