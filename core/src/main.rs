mod annotator;
mod args;
mod game;
mod samples;

use annotator::{progress_bar, Annotator};
use args::Args;
use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::{
    error::Error,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    // Set up SIGINT handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = Arc::clone(&stop_flag);

    ctrlc::set_handler(move || {
        log::info!("Received SIGINT, finishing current games...");
        stop_flag_handler.store(true, Ordering::Relaxed);
    })?;

    let games = game::read_games(BufReader::new(File::open(&args.input)?), args.max_games)?;
    if games.is_empty() {
        log::warn!("No games in {}", args.input.display());
        return Ok(());
    }

    let annotator = Annotator::new(args.workers, args.depth, args.engine_config())?;
    let progress = progress_bar(games.len())?;
    let annotations = annotator.run(&games, &stop_flag, &progress)?;
    progress.finish();

    let annotated_games = annotations.iter().filter(|a| a.ply == 0).count();
    log::info!(
        "Annotated {} positions from {} games",
        annotations.len(),
        annotated_games
    );

    let path = output_path(&args)?;
    log::info!("Writing annotations to {}", path.display());

    let mut writer = BufWriter::new(File::create(&path)?);
    samples::write_csv(&annotations, &mut writer)?;
    writer.flush()?;

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match &args.log_file {
        Some(log_file) => WriteLogger::init(level, Config::default(), File::create(log_file)?)?,
        None => SimpleLogger::init(level, Config::default())?,
    }

    Ok(args)
}

fn output_path(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(path) = &args.output {
        return Ok(path.clone());
    }

    fs::create_dir_all("annotations")?;

    let timestamp = Local::now().format("%Y-%m-%d-%H:%M");
    Ok(PathBuf::from(format!("annotations/{}.csv", timestamp)))
}
