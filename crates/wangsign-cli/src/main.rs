use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glob::glob;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wangsign_core::{
    BitmapError, DisplayMode, Encoded, GrayRaster, HidrawSink, Message, Packet, PacketError,
    PacketSink, SAMPLE_PACKET, Speed, UsbId, decode_packet, hex_dump, inspect_packet,
};

mod image_raster;
mod message_spec;

use image_raster::ImageRaster;
use message_spec::MessageSpec;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("WANGSIGN_BUILD_COMMIT"),
    ", ",
    env!("WANGSIGN_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  wangsign send -m hello.png -m logo.png,mode=laser,border\n  wangsign send --mode anim --speed 7 -m frames.png --dump --dry-run\n  wangsign inspect packet.bin --pretty\n  wangsign demo --device /dev/hidraw3";

#[derive(Parser, Debug)]
#[command(name = "wangsign")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Encode images into LED name badge packets and write them to the badge.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Log codec and device activity to stderr (filter with WANGSIGN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode up to eight image messages and write them to the badge.
    Send {
        /// Message image, optionally with overrides: PATH[,mode=M][,speed=N][,blink][,border]
        #[arg(short = 'm', long = "message", value_name = "SPEC", required = true)]
        messages: Vec<MessageSpec>,

        #[command(flatten)]
        defaults: MessageDefaults,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Decode a packet file and print a JSON report.
    Inspect {
        /// Path to an encoded packet (glob patterns must match one file)
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Write the built-in sample packet plus a one-pixel animation frame.
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct MessageDefaults {
    /// Display mode: left, right, up, down, center, anim, drop, curtain, laser
    #[arg(long, default_value = "left")]
    mode: DisplayMode,

    /// Animation speed (0-15)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=15))]
    speed: u8,

    /// Blink messages without an explicit blink/noblink
    #[arg(long)]
    blink: bool,

    /// Draw a border around messages without an explicit border/noborder
    #[arg(long)]
    border: bool,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// hidraw device node to write to (skips discovery)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["devid", "devnr"])]
    device: Option<PathBuf>,

    /// USB id of the badge (vendor:product, hex)
    #[arg(long, default_value = "0416:5020")]
    devid: UsbId,

    /// Index among matching badges
    #[arg(long, default_value_t = 0)]
    devnr: usize,

    /// sysfs mount point used for discovery
    #[arg(long, default_value = "/sys", hide = true)]
    sysfs_root: PathBuf,

    /// Also save the encoded packet to a file
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print a hex dump of the packet to stdout
    #[arg(long)]
    dump: bool,

    /// Encode only; do not write to the badge
    #[arg(long)]
    dry_run: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        init_logging();
    }

    let result = match cli.command {
        Commands::Send {
            messages,
            defaults,
            output,
        } => cmd_send(&messages, &defaults, &output),
        Commands::Inspect { input, pretty } => cmd_inspect(&input, pretty),
        Commands::Demo { output } => cmd_demo(&output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("WANGSIGN_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<PacketError> for CliError {
    fn from(err: PacketError) -> Self {
        let hint = match err {
            PacketError::TooManyMessages { .. } => Some("a packet holds at most 8 messages"),
            PacketError::BufferTooLarge { .. } | PacketError::MessageTooLong { .. } => {
                Some("use fewer or narrower images")
            }
            PacketError::TruncatedHeader { .. } | PacketError::TruncatedBody { .. } => {
                Some("the file is not a complete badge packet")
            }
            _ => None,
        };
        CliError::new(err.to_string(), hint.map(str::to_string))
    }
}

fn cmd_send(
    specs: &[MessageSpec],
    defaults: &MessageDefaults,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let default_speed = Speed::new(defaults.speed)?;
    let mut packet = Packet::new();

    for spec in specs {
        let raster = ImageRaster::open(&spec.path)?;
        let mode = spec.mode.unwrap_or(defaults.mode);
        let speed = spec.speed.unwrap_or(default_speed);
        let message = Message::from_raster(&raster, mode, speed)
            .map_err(|err| image_error(&spec.path, err))?
            .with_blink(spec.blink.unwrap_or(defaults.blink))
            .with_border(spec.border.unwrap_or(defaults.border));
        debug!(
            path = %spec.path.display(),
            %mode,
            speed = speed.get(),
            cells = message.columns.len(),
            "message built"
        );
        packet.push(message)?;
    }

    deliver(packet.encode()?, output)
}

fn image_error(path: &Path, err: BitmapError) -> CliError {
    let hint = match err {
        BitmapError::BadRasterHeight { .. } => Some("badge images must be exactly 11 pixels high"),
        BitmapError::PixelCount { .. } => None,
    };
    CliError::new(
        format!("cannot use {} as a message: {}", path.display(), err),
        hint.map(str::to_string),
    )
}

fn cmd_demo(output: &OutputArgs) -> Result<(), CliError> {
    let mut packet = decode_packet(&SAMPLE_PACKET)?;
    if let Some(first) = packet.messages.first_mut() {
        first.speed = Speed::new(6)?;
    }

    let mut raster = GrayRaster::new(25, 11);
    raster.set(10, 5, 255);
    let frame = Message::from_raster(&raster, DisplayMode::Animation, Speed::new(0)?)
        .context("Failed to render demo frame")?
        .with_border(true);
    packet.push(frame)?;

    deliver(packet.encode()?, output)
}

fn deliver(encoded: Encoded, output: &OutputArgs) -> Result<(), CliError> {
    if output.dump {
        print!("{}", hex_dump(encoded.bytes()));
    }
    let bytes = encoded.into_transmittable()?;

    if let Some(path) = output.output.as_ref() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path, &bytes)
            .with_context(|| format!("Failed to write packet: {}", path.display()))?;
        if !output.quiet {
            eprintln!("OK: packet saved -> {}", path.display());
        }
    }

    if output.dry_run {
        if !output.quiet {
            eprintln!("OK: dry run, {} bytes not sent", bytes.len());
        }
        return Ok(());
    }

    let mut sink = open_sink(output)?;
    sink.send(&bytes)
        .with_context(|| format!("Failed to write to device: {}", sink.path().display()))?;
    if !output.quiet {
        eprintln!("OK: {} bytes written -> {}", bytes.len(), sink.path().display());
    }
    Ok(())
}

fn open_sink(output: &OutputArgs) -> Result<HidrawSink, CliError> {
    let sink = match output.device.as_ref() {
        Some(path) => HidrawSink::open(path)
            .with_context(|| format!("Failed to open device: {}", path.display()))?,
        None => HidrawSink::locate(&output.sysfs_root, output.devid, output.devnr).map_err(
            |err| {
                CliError::new(
                    err.to_string(),
                    Some("check the USB connection and hidraw permissions, or pass --device".to_string()),
                )
            },
        )?,
    };
    Ok(sink)
}

fn cmd_inspect(input: &Path, pretty: bool) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(input)?;
    validate_input_file(&resolved_input)?;

    let bytes = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let report = inspect_packet(&bytes)?;
    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("JSON serialization failed")?;

    println!("{}", json);
    if !report.within_limit {
        eprintln!(
            "warning: packet is {} bytes, larger than the badge accepts",
            report.bytes
        );
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a packet saved with `wangsign send -o FILE`".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a packet saved with `wangsign send -o FILE`".to_string()),
        ));
    }
    Ok(())
}

/// Expands a glob pattern that must name exactly one packet file.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(input.to_path_buf());
    }

    let bad_pattern = |detail: String| {
        CliError::new(format!("invalid input pattern '{}'", pattern), Some(detail))
    };
    let mut matches = Vec::new();
    for entry in glob(&pattern).map_err(|err| bad_pattern(err.msg.to_string()))? {
        let path = entry.map_err(|err| bad_pattern(err.to_string()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => Err(CliError::new(
            format!("multiple files match pattern '{}' ({} matches)", pattern, count),
            Some("inspect one packet at a time".to_string()),
        )),
    }
}
