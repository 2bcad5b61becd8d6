use docopt::Docopt;
use error_chain::bail;
use serde_derive::Deserialize;
use mazepath::{
    grid_displays::PathDisplay,
    maze::Maze,
    units::GridSize,
    validation,
    waypoints::Waypoints,
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    rc::Rc,
};
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "Mazepath

Grows a perfect maze, solves it with A* and walks the route, as many times as asked.
Logging goes to stderr and honours RUST_LOG.

Usage:
    mazepath_driver [options]
    mazepath_driver -h | --help

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid is n * n tiles [default: 40].
    --seed=<s>             Seed for the random generator, for repeatable mazes.
    --cycles=<n>           Generate, solve and walk this many mazes [default: 1].
    --show-path            Mark the last solved route in the text rendering.
    --text-out=<path>      Write the text rendering to a file instead of stdout.
    --quiet                Do not render the final maze.
    --validate             Check every generated maze is a perfect maze before solving it.
    --verbose              Log at debug level unless RUST_LOG says otherwise.
";
#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_size: usize,
    flag_seed: Option<u64>,
    flag_cycles: usize,
    flag_show_path: bool,
    flag_text_out: String,
    flag_quiet: bool,
    flag_validate: bool,
    flag_verbose: bool,
}

mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazepath::errors::Error, ::mazepath::errors::ErrorKind);
        }

        foreign_links {
            DocOpt(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

/// One generate, solve and walk round.
struct CycleReport {
    route: Waypoints,
    steps: usize,
}

fn main() -> Result<()> {

    let args: DriverArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e) if e.fatal() => return Err(e.into()),
        // --help
        Err(e) => e.exit(),
    };

    init_logging(args.flag_verbose);

    let size = GridSize(args.flag_grid_size);
    let mut maze = match args.flag_seed {
        Some(seed) => Maze::with_seed(size, seed)?,
        None => Maze::new(size)?,
    };
    info!(grid_size = size.0, seed = ?args.flag_seed, cycles = args.flag_cycles, "starting");

    let mut last_route = None;
    for cycle in 1..=args.flag_cycles {
        match run_cycle(&mut maze, args.flag_validate) {
            Ok(report) => {
                info!(cycle,
                      start_row = ?maze.start_row().map(|r| r.0),
                      goal_row = ?maze.goal_row().map(|r| r.0),
                      waypoints = report.route.len(),
                      steps = report.steps,
                      "route walked");
                last_route = Some(report.route);
            }
            // Every failure is local to this maze, the next cycle starts over with a new one.
            Err(e) => warn!(cycle, error = %e, "cycle abandoned"),
        }
    }

    if !args.flag_quiet {
        if args.flag_show_path {
            if let Some(ref route) = last_route {
                let display = Rc::new(PathDisplay::new(route.iter()));
                maze.set_grid_display(Some(display));
            }
        }

        let rendering = format!("{}", maze.grid());
        if args.flag_text_out.is_empty() {
            print!("{}", rendering);
        } else {
            write_text_to_file(&rendering, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Generate a maze, solve it and follow the waypoints until they run out, the way a walker
/// steps from one waypoint to the next.
fn run_cycle(maze: &mut Maze, validate: bool) -> Result<CycleReport> {

    maze.generate_maze()?;
    if validate {
        let summary = validation::validate(maze.grid())?;
        debug!(path_cells = summary.path_cells, links = summary.links, "maze validated");
    }
    maze.solve()?;

    let route = match maze.waypoints() {
        Some(waypoints) => waypoints.clone(),
        None => bail!(ErrorKind::Maze(::mazepath::errors::ErrorKind::Unsolved)),
    };

    let mut position = maze.pop_next_waypoint();
    let mut steps = 0;
    while let Some(next) = maze.pop_next_waypoint() {
        if let Some(current) = position {
            if !current.is_cardinal_step_to(next) {
                bail!(ErrorKind::Maze(::mazepath::errors::ErrorKind::MalformedMaze(
                    format!("waypoint {:?} does not follow on from {:?}", next, current))));
            }
        }
        trace!(x = next.x, y = next.y, "next waypoint");
        position = Some(next);
        steps += 1;
    }

    Ok(CycleReport { route, steps })
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
