mod occupants;

use crate::occupants::{PlacedUnits, Placement};
use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use isokit::{timed, DrawList, Scene, SceneConfig, SvgCanvas};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for rendering isometric tile scenes with isokit.
#[derive(Debug, StructOpt)]
#[structopt(name = "isokit")]
struct Opt {
    /// Path to a config file that defines the scene to be rendered. Supported
    /// formats: JSON, TOML. If omitted, the default config (with a random
    /// seed) is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Directory to write output files to. The exact files that appear in
    /// the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: PathBuf,

    /// The format(s) to write. Supported formats:
    ///
    /// cfg - The full config used for the scene, in TOML format
    ///
    /// json - Every draw call of each frame, in order
    ///
    /// svg - Each frame as an SVG image
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Number of frames to render
    #[structopt(long, default_value = "1")]
    frames: u32,

    /// Time between frames, in milliseconds
    #[structopt(long, default_value = "100")]
    frame_interval: u64,

    /// Quarter turns to make before the first frame. Positive turns
    /// clockwise, negative counter-clockwise.
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    rotations: i32,

    /// Move the cursor to this tile before the first frame, as `ROW,COL`
    #[structopt(long, parse(try_from_str = parse_position))]
    cursor: Option<(isize, isize)>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the scene's full config in a human-readable file
    Cfg,
    /// Export the draw calls of each frame as JSON
    Json,
    /// Render each frame as an SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// Everything in a config file: the scene itself, plus units to place on it
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CliConfig {
    #[serde(flatten)]
    scene: SceneConfig,
    units: Vec<Placement>,
}

fn parse_position(s: &str) -> anyhow::Result<(isize, isize)> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected ROW,COL, got {:?}", s))?;
    Ok((row.trim().parse()?, col.trim().parse()?))
}

fn load_config(config_path: &Path) -> anyhow::Result<CliConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Write a chunk of output to a file in the output dir
fn write_output(
    output_dir: &Path,
    name: &str,
    output_format: OutputFormat,
    bytes: &[u8],
) -> anyhow::Result<()> {
    let output_file_path =
        output_dir.join(name).with_extension(output_format.file_ext());

    timed!(
        format!(
            "Writing {} output to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Render a single frame in each of the requested drawing formats
fn render_frame(
    scene: &mut Scene,
    units: &PlacedUnits,
    now: Instant,
    frame: u32,
    output_dir: &Path,
    output_formats: &[OutputFormat],
) -> anyhow::Result<()> {
    let name = format!("frame_{:03}", frame);
    for &output_format in output_formats {
        let bytes = match output_format {
            OutputFormat::Cfg => continue,
            OutputFormat::Json => {
                let mut draw_list = DrawList::new();
                scene.render_frame(now, &mut draw_list, units);
                serde_json::to_vec(&draw_list)
                    .context("error serializing draw list")?
            }
            OutputFormat::Svg => {
                let mut canvas = SvgCanvas::new(scene.config().viewport);
                canvas.comment(format!("seed: {}", scene.config().seed));
                scene.render_frame(now, &mut canvas, units);
                canvas.into_document().to_string().into_bytes()
            }
        };
        write_output(output_dir, &name, output_format, &bytes)?;
    }
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    if opt.output_formats.is_empty() {
        bail!("no output formats were given")
    }
    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => CliConfig::default(),
    };
    fs::create_dir_all(&opt.output)?;

    let mut scene = Scene::new(config.scene.clone())?;
    let units = PlacedUnits::new(&config.units);
    info!(
        "Scene ready with {} tiles and {} units",
        scene.grid().tiles().len(),
        config.units.len()
    );

    if opt.output_formats.iter().any(|f| matches!(f, OutputFormat::Cfg)) {
        let bytes = toml::to_string_pretty(&config)
            .context("error serializing config")?
            .into_bytes();
        write_output(&opt.output, "scene", OutputFormat::Cfg, &bytes)?;
    }

    // All commands go in at the same instant, and frames are sampled at
    // fixed offsets from it, so output is the same on every run
    let start = Instant::now();
    if let Some((row, col)) = opt.cursor {
        if !scene.set_cursor(start, row, col) {
            bail!("cursor position ({}, {}) is off the grid", row, col);
        }
    }
    for _ in 0..opt.rotations.abs() {
        if opt.rotations > 0 {
            scene.rotate_right(start);
        } else {
            scene.rotate_left(start);
        }
    }

    let interval = Duration::from_millis(opt.frame_interval);
    for frame in 0..opt.frames {
        render_frame(
            &mut scene,
            &units,
            start + interval * frame,
            frame,
            &opt.output,
            &opt.output_formats,
        )?;
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
