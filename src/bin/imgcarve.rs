// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use imgcarve::energy::greyscale_from_color;
use imgcarve::io::{
    load_color_image, load_pixmap, save_color_image, save_greyscale_image, save_pixmap,
};
use imgcarve::{CarveError, Filter, SeamCarver};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{err_msg, Error};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_count(matches: &ArgMatches, name: &str) -> Result<usize, Error> {
    Ok(matches
        .value_of(name)
        .map(str::parse::<usize>)
        .transpose()?
        .unwrap_or(0))
}

fn run_filter(matches: &ArgMatches, sub: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or("");
    let output = matches.value_of("output").unwrap_or("");
    let grey = matches.is_present("grey");

    let steps = sub
        .values_of("spec")
        .into_iter()
        .flatten()
        .map(str::parse)
        .collect::<Result<Vec<Filter>, CarveError>>()?;
    let filter = Filter::compose(steps);
    let filter = if grey { filter } else { filter.for_color() };

    let image = load_pixmap(input, grey)?;
    let (width, height) = image.dimensions();
    info!(input, width, height, filter = ?filter, "filtering");
    save_pixmap(&filter.apply(&image)?, output)
}

fn run_carve(matches: &ArgMatches, sub: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or("");
    let output = matches.value_of("output").unwrap_or("");
    let (columns, rows) = (parse_count(sub, "columns")?, parse_count(sub, "rows")?);

    let image = load_color_image(input)?;
    let (width, height) = image.dimensions();
    info!(input, width, height, columns, rows, "carving");
    let carved = SeamCarver::new(&image).carve_columns(columns)?;
    let carved = SeamCarver::new(&carved).carve_rows(rows)?;

    if matches.is_present("grey") {
        save_greyscale_image(&greyscale_from_color(&carved), output)
    } else {
        save_color_image(&carved, output)
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("imgcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Spatial filters and seam carving")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("grey")
                .long("grey")
                .short("g")
                .help("Treat the image as greyscale"),
        )
        .arg(
            Arg::with_name("input")
                .help("The image to read")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the extension picks the format")
                .required(true)
                .index(2),
        )
        .subcommand(
            SubCommand::with_name("filter")
                .about("Apply filters in order: invert, edges, vignette, blur:N, sharpen:N")
                .arg(
                    Arg::with_name("spec")
                        .help("A filter, or a comma-separated list of them")
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("carve")
                .about("Remove low-energy seams")
                .arg(
                    Arg::with_name("columns")
                        .long("columns")
                        .short("c")
                        .takes_value(true)
                        .help("Number of vertical seams to remove"),
                )
                .arg(
                    Arg::with_name("rows")
                        .long("rows")
                        .short("r")
                        .takes_value(true)
                        .help("Number of horizontal seams to remove"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("filter", Some(sub)) => run_filter(&matches, sub),
        ("carve", Some(sub)) => run_carve(&matches, sub),
        _ => Err(err_msg("a subcommand is required")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("imgcarve: {}", e);
        process::exit(1);
    }
}
