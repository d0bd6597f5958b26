//! Sortboard CLI
//!
//! Usage:
//!   sortboard [OPTIONS] <SCENE>
//!
//! Options:
//!   -s, --script <FILE>      Gesture script to replay before rendering
//!       --summary            Print a text summary instead of SVG
//!       --compact            Write SVG on a single line
//!       --no-xml-decl        Leave out the XML declaration
//!       --class-prefix <P>   Prefix for CSS classes [default: sb-]
//!       --padding <N>        Space around the drawing [default: 20]
//!   -d, --debug              Shorthand for --log-level debug
//!       --log-level <LEVEL>  Log level (off, error, warn, info, debug, trace)
//!   -h, --help               Print help

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, info, LevelFilter};

use sortboard::{render_with_config, OutputFormat, RenderConfig, SvgConfig};

#[derive(Parser, Debug)]
#[command(name = "sortboard")]
#[command(about = "Lay out sort/process diagrams and replay pointer gestures on them")]
struct Cli {
    /// Scene file (TOML)
    scene: PathBuf,

    /// Gesture script to replay before rendering
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print a text summary of the final geometry instead of SVG
    #[arg(long)]
    summary: bool,

    /// Write SVG on a single line
    #[arg(long)]
    compact: bool,

    /// Leave out the XML declaration
    #[arg(long)]
    no_xml_decl: bool,

    /// Prefix for CSS classes (empty for none)
    #[arg(long, default_value = "sb-")]
    class_prefix: String,

    /// Space around the drawing
    #[arg(long, default_value_t = 20.0)]
    padding: f64,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read(path: &Path, what: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {} '{}': {}", what, path.display(), e);
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
            LevelFilter::Warn
        })
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(cli:?; "Parsed arguments");

    let scene = read(&cli.scene, "scene file");
    let script = cli.script.as_ref().map(|path| read(path, "script"));

    let output = if cli.summary {
        OutputFormat::Summary
    } else {
        OutputFormat::Svg
    };
    let svg = SvgConfig::default()
        .with_pretty_print(!cli.compact)
        .with_standalone(!cli.no_xml_decl)
        .with_class_prefix(cli.class_prefix.as_str())
        .with_viewbox_padding(cli.padding);
    let config = RenderConfig::new().with_svg(svg).with_output(output);

    match render_with_config(&scene, script.as_deref(), &config) {
        Ok(rendered) => {
            println!("{}", rendered);
            info!("Completed successfully");
        }
        Err(e) => {
            let filename = cli
                .script
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            eprintln!("{}", e.format(script.as_deref().unwrap_or_default(), &filename));
            process::exit(1);
        }
    }
}
