//! Tether CLI
//!
//! Usage:
//!   tether [OPTIONS] [FILE]
//!
//! Reads a scene description (TOML) from a file or stdin, routes every
//! connector, and writes the rendered SVG to stdout.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use tether::{render_scene, RenderConfig, Scene, Stylesheet, SvgConfig};

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Connector routing and attachment engine for canvas shapes")]
struct Cli {
    /// Input scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for stroke colors (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Viewport zoom factor
    #[arg(short, long, default_value_t = 1.0)]
    zoom: f64,

    /// Padding around the SVG viewBox
    #[arg(short, long)]
    padding: Option<f64>,

    /// Debug mode: dump resolved endpoints to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let mut scene = match &cli.input {
        Some(path) => match Scene::from_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error reading scene '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            match Scene::from_toml_str(&buffer) {
                Ok(scene) => scene,
                Err(e) => {
                    eprintln!("Error parsing scene: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut svg_config = SvgConfig::default();
    if let Some(padding) = cli.padding {
        svg_config = svg_config.with_viewbox_padding(padding);
    }
    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_svg(svg_config)
        .with_zoom(cli.zoom)
        .with_debug(cli.debug);

    match render_scene(&mut scene, &config) {
        Ok(svg) => {
            println!("{}", svg);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Tether - connector routing and attachment engine

USAGE:
    tether [OPTIONS] [FILE]
    cat scene.toml | tether

OPTIONS:
    -s, --stylesheet   Custom stroke palette (TOML file)
    -z, --zoom         Viewport zoom factor (default 1.0)
    -p, --padding      Padding around the SVG viewBox
    -d, --debug        Dump resolved endpoints to stderr
    -h, --help         Print help

SCENE FORMAT (TOML):
    [[shapes]]
    id = "a"
    left = 0.0      # shape center x
    top = 0.0       # shape center y
    width = 100.0
    height = 60.0

    [[shapes]]
    id = "b"
    left = 300.0
    top = 200.0
    width = 100.0
    height = 60.0

    [[connectors]]
    id = "c1"
    routing = "angled"          # straight | curved | angled
    tips = "end"                # none | start | end | both
    stroke = "solid"            # solid | dashed | dotted
    start_attachment = {{ target = "a", side = "right" }}
    end_attachment = {{ target = "b", side = "left" }}

Bound endpoints track their shape's current geometry; free endpoints
use their stored start/end coordinates."#
    );
}
