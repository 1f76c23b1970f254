// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! sphere-nav: an interactive spherical navigation calculator.
//!
//! Loads a coordinate file, prints the coordinates and a menu of commands,
//! then executes commands read from stdin until `0` or end of input.

use anyhow::Context;
use clap::Parser;
use sphere_nav::dispatch::{Command, Dispatcher, DispatcherConfig, Reply};
use sphere_nav::registry::Registry;
use sphere_nav::sphere::earth;
use sphere_nav::{CourseConvention, Kilometres, Sphere, TravelMode, Validate};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SEPARATOR: &str = "********************************************";

/// Navigation calculations between the coordinates of a coordinate file
/// on a spherical Earth.
#[derive(Parser)]
#[command(name = "sphere-nav", version)]
struct Args {
    /// The coordinate file
    #[arg(default_value = "in.txt")]
    input: PathBuf,

    /// The radius of the sphere in kilometres
    #[arg(long, default_value_t = earth::MEAN_RADIUS.0)]
    radius: f64,

    /// How great circle headings are reported: interior or true
    #[arg(long, default_value_t = CourseConvention::InteriorAngle)]
    course: CourseConvention,

    /// The default travel mode of intermediate points: bounded or unbounded
    #[arg(long, default_value_t = TravelMode::Bounded)]
    mode: TravelMode,

    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log to stderr, at a level given by `RUST_LOG` or the verbosity.
fn init_logging(verbose: u8) {
    let max_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sphere_nav={max_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let sphere = Sphere::new(Kilometres(args.radius));
    anyhow::ensure!(sphere.is_valid(), "invalid sphere radius: {} km", args.radius);

    println!("{SEPARATOR}\n\n\tSPHERICAL TRIGONOMETRY\n\n\t\t{SEPARATOR}\n");
    println!("  Reading coordinates from '{}'...\n", args.input.display());

    let registry = Registry::from_path(&args.input)
        .with_context(|| format!("failed to load coordinates from '{}'", args.input.display()))?;
    anyhow::ensure!(
        !registry.is_empty(),
        "no coordinates in '{}'",
        args.input.display()
    );

    let config = DispatcherConfig {
        sphere,
        course: args.course,
        mode: args.mode,
    };
    tracing::info!("{:?}", config);
    let dispatcher = Dispatcher::new(&registry, config);

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}\n{}", dispatcher.listing(), dispatcher.menu())?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line
            .parse::<Command>()
            .and_then(|command| dispatcher.execute(&command))
        {
            Ok(Reply::Text(text)) => writeln!(stdout, "{text}\n")?,
            Ok(Reply::Exit) => break,
            Err(error) => eprintln!("Invalid command: {error}"),
        }
        stdout.flush()?;
    }

    Ok(())
}
