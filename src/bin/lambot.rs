extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate lambot;
#[macro_use]
extern crate log;
extern crate num;

use clap::{App, Arg, ArgMatches};
use failure::{err_msg, Error};
use lambot::output::{encode_png, filename};
use lambot::sink::DEFAULT_BUCKET_URL;
use lambot::{DirectorySink, Fractal, HttpSink, RenderParams, Renderer, Sink};
use num::Complex;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

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

const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const MONOCHROME: &str = "monochrome";
const JULIA: &str = "julia";
const OUTPUT: &str = "output";
const BUCKET_URL: &str = "bucket-url";
const VERBOSE: &str = "verbose";

fn args<'a>() -> ArgMatches<'a> {
    App::new("lambot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a Mandelbrot fractal and publishes it")
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("600x400")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::with_name(MONOCHROME)
                .long(MONOCHROME)
                .short("m")
                .help("Render black and white instead of the color palette"),
        )
        .arg(
            Arg::with_name(JULIA)
                .long(JULIA)
                .short("j")
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse Julia constant"))
                .help("Render the Julia set for this constant (re,im) instead"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .conflicts_with(BUCKET_URL)
                .help("Write the image into this directory instead of uploading it"),
        )
        .arg(
            Arg::with_name(BUCKET_URL)
                .long(BUCKET_URL)
                .short("b")
                .takes_value(true)
                .help("Object store URL to upload to (defaults to the lambot bucket)"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail"),
        )
        .get_matches()
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_module_path(false)
        .init();
}

fn params(matches: &ArgMatches) -> Result<RenderParams, Error> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<u16>(s, 'x'))
        .ok_or_else(|| err_msg("Error parsing image dimensions"))?;
    let iterations = matches
        .value_of(ITERATIONS)
        .and_then(|s| usize::from_str(s).ok())
        .ok_or_else(|| err_msg("Error parsing iteration count"))?;
    let fractal = match matches.value_of(JULIA) {
        Some(s) => Fractal::Julia(
            parse_complex(s).ok_or_else(|| err_msg("Error parsing Julia constant"))?,
        ),
        None => Fractal::Mandelbrot,
    };
    Ok(
        RenderParams::new(u32::from(width), u32::from(height), iterations)?
            .monochrome(matches.is_present(MONOCHROME))
            .fractal(fractal),
    )
}

fn sink(matches: &ArgMatches) -> Result<Box<dyn Sink>, Error> {
    Ok(match matches.value_of(OUTPUT) {
        Some(dir) => Box::new(DirectorySink::new(dir)),
        None => Box::new(HttpSink::new(
            matches.value_of(BUCKET_URL).unwrap_or(DEFAULT_BUCKET_URL),
        )?),
    })
}

fn run(matches: &ArgMatches) -> Result<String, Error> {
    let params = params(matches)?;
    let key = filename(&params);
    info!("{}", key);

    let renderer = Renderer::new(params)?;
    info!("rendering...");
    let canvas = renderer.render();
    let bytes = encode_png(&canvas)?;

    info!("uploading...");
    let location = sink(matches)?.put(&key, &bytes)?;
    Ok(location)
}

fn main() {
    let matches = args();
    init_logging(matches.occurrences_of(VERBOSE));

    match run(&matches) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(location) => println!("{}", location),
    }
}
