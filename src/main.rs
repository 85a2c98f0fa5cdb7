extern crate clap;
extern crate env_logger;
extern crate histobrot;
#[macro_use]
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use histobrot::planes::derived_height;
use histobrot::{BitDepth, Coloring, RenderConfig};
use std::path::PathBuf;
use std::str::FromStr;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "iterations";
const COLORING: &str = "coloring";
const DEPTH: &str = "depth";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("histobrot")
        .version("0.1.0")
        .about("Grayscale Mandelbrot renderer with histogram equalization")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("image.png")
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("1600")
                .validator(|s| {
                    // Anything narrower derives a height under 2.
                    validate_range(
                        &s,
                        4,
                        65_535,
                        "Could not parse image width",
                        "Image width must be between 4 and 65535",
                    )
                })
                .help("Width of output image"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        2,
                        65_535,
                        "Could not parse image height",
                        "Image height must be between 2 and 65535",
                    )
                })
                .help("Height of output image (default: width / 1.75)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(COLORING)
                .long(COLORING)
                .short("c")
                .takes_value(true)
                .possible_values(&["linear", "histogram"])
                .default_value("histogram")
                .help("Coloring policy"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .possible_values(&["8", "16"])
                .default_value("16")
                .help("Bits per gray sample"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: all CPUs)"),
        )
        .get_matches()
}

// Every value below has already passed a clap validator or a
// possible_values check, so parsing cannot fail.
fn config_from(matches: &ArgMatches) -> RenderConfig {
    fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
        matches.value_of(name).and_then(|s| T::from_str(s).ok())
    }

    let defaults = RenderConfig::default();
    let width = value(matches, WIDTH).unwrap_or(defaults.width);
    RenderConfig {
        width,
        height: value(matches, HEIGHT).unwrap_or_else(|| derived_height(width)),
        limit: value(matches, ITERATIONS).unwrap_or(defaults.limit),
        coloring: value::<Coloring>(matches, COLORING).unwrap_or(defaults.coloring),
        depth: value::<BitDepth>(matches, DEPTH).unwrap_or(defaults.depth),
        threads: value(matches, THREADS).unwrap_or(defaults.threads),
        output: matches
            .value_of(OUTPUT)
            .map(PathBuf::from)
            .unwrap_or(defaults.output),
    }
}

fn main() {
    env_logger::init();
    let config = config_from(&args());
    debug!("{:?}", config);

    match histobrot::render_to_file(&config) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(report) => {
            println!("Time to run: {:.6}", report.elapsed.as_secs_f64());
            info!(
                "{} pixels escaped, {} in the set",
                report.escaped, report.in_set
            );
        }
    }
}
