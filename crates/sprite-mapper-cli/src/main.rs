use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use image::{DynamicImage, ImageReader};
use serde::Deserialize;
use sprite_mapper_core::config::{Algorithm, FitPolicy, SortOrder};
use sprite_mapper_core::{
    Atlas, InputImage, PackerConfig, SpriteMapperError, SpriteSession, sprite_name,
};
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-mapper",
    about = "Pack a folder of images into one sprite sheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into a sheet (PNG + JSON)
    Pack(PackArgs),
    /// Layout-only export (no PNG): compute placements and write the JSON manifest
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Sheet base name (files will be name.png/.json)
    #[arg(short, long, default_value = "icons", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (values in the file override the flags)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Sheet width
    #[arg(long, default_value_t = 512, help_heading = "Layout")]
    sheet_width: u32,
    /// Sheet height
    #[arg(long, default_value_t = 512, help_heading = "Layout")]
    sheet_height: u32,
    /// Padding around each sprite
    #[arg(long, default_value_t = 1, help_heading = "Layout")]
    sprite_padding: u32,
    /// Padding around the sheet border
    #[arg(long, default_value_t = 1, help_heading = "Layout")]
    sheet_padding: u32,
    /// Algorithm: tree | linear
    #[arg(long, value_parser = ["tree", "linear"], default_value = "tree", help_heading = "Layout")]
    algorithm: String,
    /// Sort order: max_side_desc|area_desc|name_asc|none
    #[arg(long, default_value = "max_side_desc", help_heading = "Layout")]
    sort_order: String,
    /// Height fit test: symmetric | legacy
    #[arg(long, value_parser = ["symmetric", "legacy"], default_value = "symmetric", help_heading = "Layout")]
    fit_policy: String,

    // Export
    /// Layout-only: compute placements and export metadata (no PNG)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_only: bool,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => {
            let mut a = args.clone();
            a.layout_only = true;
            run_pack(&a, false)
        }
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let mut cfg = PackerConfig {
        sheet_width: cli.sheet_width,
        sheet_height: cli.sheet_height,
        sprite_padding: cli.sprite_padding,
        sheet_padding: cli.sheet_padding,
        algorithm: parse_algorithm(&cli.algorithm)?,
        sort_order: parse_sort_order(&cli.sort_order)?,
        fit_policy: parse_fit_policy(&cli.fit_policy)?,
        image_name: format!("{}.png", cli.name),
    };
    // Config file sets options en bloc on top of the flags
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = y.into_packer_config(cfg);
    }

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }
    cfg.validate()?;

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let mut session = SpriteSession::new(cfg);
    session.begin_batch();
    load_images_with_progress(&mut session, &paths, show_progress)?;
    info!(
        count = session.len(),
        errors = session.error_count(),
        "{}",
        session.summary()
    );

    if cli.layout_only {
        let atlas = session.pack_layout().map_err(report_pack_error)?;
        write_manifest(cli, &atlas)?;
        write_stats(cli, &atlas)?;
        return Ok(());
    }

    let out = session.pack().map_err(report_pack_error)?;
    if !cli.dry_run {
        let png_path = cli.out_dir.join(format!("{}.png", cli.name));
        out.rgba
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(?png_path, "wrote sheet");
    }
    write_manifest(cli, &out.atlas)?;
    write_stats(cli, &out.atlas)?;
    Ok(())
}

fn report_pack_error(e: SpriteMapperError) -> anyhow::Error {
    if let SpriteMapperError::InsufficientSpace { name, tree, .. } = &e {
        error!(sprite = %name, "did not allocate enough space for sprite");
        tracing::debug!(%tree, "partition at failure");
    }
    anyhow::Error::new(e).context("packing failed")
}

fn write_manifest(cli: &PackArgs, atlas: &Atlas) -> anyhow::Result<()> {
    if cli.dry_run {
        return Ok(());
    }
    let json_path = cli.out_dir.join(format!("{}.json", cli.name));
    let json = sprite_mapper_core::to_json_hash_string(atlas)?;
    fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
    info!(?json_path, frames = atlas.frames.len(), "manifest written");
    Ok(())
}

fn write_stats(cli: &PackArgs, atlas: &Atlas) -> anyhow::Result<()> {
    let stats = atlas.stats();
    info!(
        w = atlas.width,
        h = atlas.height,
        used_area = stats.used_frame_area,
        sheet_area = stats.sheet_area,
        occupancy = %format!("{:.2}%", stats.occupancy * 100.0),
        waste = %format!("{:.2}%", stats.waste_percentage()),
        "stats"
    );
    if let Some(stats_path) = &cli.export_stats {
        if cli.dry_run {
            println!("{}", stats.summary());
        } else {
            fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        }
    }
    Ok(())
}

fn parse_algorithm(s: &str) -> anyhow::Result<Algorithm> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown algorithm: {}", s))
}

fn parse_fit_policy(s: &str) -> anyhow::Result<FitPolicy> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown fit policy: {}", s))
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {}", s))
}

/// Image files under `path`, sorted by file name.
fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    list.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif" | "svg")
    )
}

fn load_images_with_progress(
    session: &mut SpriteSession,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    for p in paths {
        let file_name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(file_name.to_string());
        }
        match load_image(p) {
            Ok(img) => {
                info!(file = %file_name, w = img.width(), h = img.height(), "loaded");
                session.add(InputImage {
                    key: sprite_name(file_name),
                    image: img,
                });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
                if is_svg(p) {
                    info!("SVG input is not decoded; convert it to PNG first");
                }
                session.record_failure(file_name);
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(())
}

fn is_svg(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    sheet_width: Option<u32>,
    sheet_height: Option<u32>,
    sprite_padding: Option<u32>,
    sheet_padding: Option<u32>,
    algorithm: Option<String>,
    sort_order: Option<String>,
    fit_policy: Option<String>,
    image_name: Option<String>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some(v) = self.sheet_width {
            cfg.sheet_width = v;
        }
        if let Some(v) = self.sheet_height {
            cfg.sheet_height = v;
        }
        if let Some(v) = self.sprite_padding {
            cfg.sprite_padding = v;
        }
        if let Some(v) = self.sheet_padding {
            cfg.sheet_padding = v;
        }
        if let Some(v) = self.algorithm {
            cfg.algorithm = v.parse().unwrap_or(cfg.algorithm);
        }
        if let Some(v) = self.sort_order {
            cfg.sort_order = v.parse().unwrap_or(cfg.sort_order);
        }
        if let Some(v) = self.fit_policy {
            cfg.fit_policy = v.parse().unwrap_or(cfg.fit_policy);
        }
        if let Some(v) = self.image_name {
            cfg.image_name = v;
        }
        cfg
    }
}
