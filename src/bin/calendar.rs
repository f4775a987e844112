extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate lambot;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use lambot::webhook::Calendar;
use std::fs;
use std::io::{self, Read};

const PAYLOAD: &str = "payload";

fn args<'a>() -> ArgMatches<'a> {
    let info = Calendar::info();
    App::new(info.name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(info.description)
        .arg(
            Arg::with_name(PAYLOAD)
                .required(false)
                .index(1)
                .help("File holding the JSON payload; reads standard input when absent"),
        )
        .get_matches()
}

fn read_payload(matches: &ArgMatches) -> Result<String, Error> {
    match matches.value_of(PAYLOAD) {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<Option<String>, Error> {
    let body = read_payload(matches)?;
    Ok(Calendar::new()?.handle(&body)?)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let matches = args();
    match run(&matches) {
        Err(e) => {
            eprintln!("plugin {} failed: {}", Calendar::info().name, e);
            std::process::exit(1);
        }
        Ok(Some(message)) => println!("{}", message),
        Ok(None) => {}
    }
}
