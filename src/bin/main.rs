extern crate rust_rasterizer as root;

#[macro_use]
extern crate log;
extern crate simplelog;

use root::parsing::construct_scene;
use root::renderer::{output_film, Renderer};

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use structopt::StructOpt;

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, StructOpt)]
#[structopt(name = "renderer", rename_all = "kebab-case")]
struct Opt {
    /// Scene configuration file (YAML).
    pub scene_file: PathBuf,
    /// Rendered image destination.
    #[structopt(long, default_value = "output.png")]
    pub output: PathBuf,
    /// Grayscale depth image destination.
    #[structopt(long, default_value = "depth.png")]
    pub depth_output: PathBuf,
    /// Draw triangle edges instead of shaded surfaces.
    #[structopt(long)]
    pub wireframe: bool,
    #[structopt(long, default_value = "warn")]
    pub print_log_level: String,
    #[structopt(long, default_value = "info")]
    pub write_log_level: String,
}

fn parse_log_level(level: &str, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => default,
    }
}

fn main() {
    let opts = Opt::from_args();

    let term_log_level = parse_log_level(&opts.print_log_level, LevelFilter::Warn);
    let write_log_level = parse_log_level(&opts.write_log_level, LevelFilter::Info);
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_log_level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Ok(file) = File::create("render.log") {
        loggers.push(WriteLogger::new(
            write_log_level,
            simplelog::Config::default(),
            file,
        ));
    }
    let _ = CombinedLogger::init(loggers);

    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global();

    let scene = match construct_scene(&opts.scene_file) {
        Ok(scene) => scene,
        Err(e) => {
            error!("fatal error loading {}: {}", opts.scene_file.display(), e);
            std::process::exit(1);
        }
    };

    let renderer = Renderer {
        wireframe: opts.wireframe,
        show_progress: true,
    };

    let now = Instant::now();
    let output = renderer.render(&scene);
    println!("{} milliseconds", now.elapsed().as_millis());

    if let Err(e) = output_film(&output, &opts.output, &opts.depth_output) {
        error!("failed to write output: {}", e);
        std::process::exit(1);
    }
}
