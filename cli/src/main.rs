use anyhow::Context;
use clap::Parser;
use hexcat_core::{BoardGeometry, Coord, HexGrid, PathFinder};
use hexcat_runtime::Board;
use std::io::{self, BufRead};
use std::path::PathBuf;

use crate::command::{Command, HELP};
use crate::settings::Settings;
use crate::terminal::{SharedView, TerminalSurface};

mod command;
mod settings;
mod terminal;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cells along one side of the board
    #[arg(short, long)]
    edge_size: Option<Coord>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.render_loop.seed = Some(seed);
        }
        if let Some(edge_size) = self.edge_size {
            settings.game.edge_size = edge_size;
        }
        Ok(settings.normalized())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = args.settings()?;
    log::debug!("{:?}", settings);

    let shared = SharedView::default();
    let mut board = Board::new(settings.game, settings.render_loop);
    board
        .attach_surface(TerminalSurface::new(settings.screen.size(), shared.clone()))
        .context("Could not start the render loop")?;
    println!("{HELP}");

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Tap { x, y } => board.submit_pointer_press(x, y),
            Command::Cell(cell) => {
                let edge_size = shared
                    .get()
                    .map_or(settings.game.edge_size, |view| view.edge_size);
                if !cell.is_inside(edge_size) {
                    eprintln!("{cell} is not on the board");
                    continue;
                }
                let geometry = BoardGeometry::new(edge_size, settings.screen.size());
                let (x, y) = geometry.cell_center(cell);
                board.submit_pointer_press(x, y);
            }
            Command::Reset => board.request_reset(),
            Command::Hint => hint(&shared)?,
            Command::Dump => match shared.get() {
                Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
                None => eprintln!("Nothing drawn yet"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    board.detach_surface();
    log::debug!("Bye");
    Ok(())
}

fn hint(shared: &SharedView) -> anyhow::Result<()> {
    let Some(view) = shared.get() else {
        eprintln!("Nothing drawn yet");
        return Ok(());
    };
    let Some(agent) = view.agent else {
        println!("The cat is gone");
        return Ok(());
    };

    let grid = HexGrid::from_wall_mask(view.walls)?;
    match PathFinder::new(&grid).escape_route(agent)? {
        Some(route) => {
            let steps: Vec<String> = route.iter().map(ToString::to_string).collect();
            println!("{}", steps.join(" -> "));
        }
        None => println!("No way out"),
    }
    Ok(())
}
