use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;

use canopy_cli::args::filter_known_args;
use canopy_cli::train::{self, TrainArgs, DEFAULT_TEST_FILE, DEFAULT_TRAIN_FILE};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or(
            "CANOPY_LOG",
            "error,canopy_classifiers=info,canopy_cli=info",
        ))
        .init();

    log::info!("extracting arguments");

    let matches = Command::new("canopy")
        .version(clap::crate_version!())
        .about("Train a gradient-boosted tree classifier on tabular CSV data")
        .arg(
            Arg::new("n_estimators")
                .long("n_estimators")
                .help("Number of trees in the ensemble")
                .value_parser(clap::value_parser!(i64))
                .allow_hyphen_values(true)
                .default_value("100"),
        )
        .arg(
            Arg::new("random_state")
                .long("random_state")
                .help("Seed recorded with the trained model")
                .value_parser(clap::value_parser!(i64))
                .allow_hyphen_values(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("model_dir")
                .long("model-dir")
                .help("Directory the trained model is written to (default: $SM_MODEL_DIR)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("train")
                .long("train")
                .help("Directory holding the training CSV (default: $SM_CHANNEL_TRAIN)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("test")
                .long("test")
                .help("Directory holding the test CSV (default: $SM_CHANNEL_TEST)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("train_file")
                .long("train-file")
                .help("Training CSV filename inside the train directory")
                .default_value(DEFAULT_TRAIN_FILE),
        )
        .arg(
            Arg::new("test_file")
                .long("test-file")
                .help("Test CSV filename inside the test directory")
                .default_value(DEFAULT_TEST_FILE),
        )
        // Unrecognized arguments were already filtered out; everything that
        // remains must parse.
        .get_matches_from(filter_known_args(std::env::args()));

    let n_estimators_raw = matches
        .get_one::<i64>("n_estimators")
        .copied()
        .unwrap_or(100);
    let n_estimators = usize::try_from(n_estimators_raw)
        .with_context(|| format!("n_estimators out of range: {}", n_estimators_raw))?;

    let random_state_raw = matches
        .get_one::<i64>("random_state")
        .copied()
        .unwrap_or(0);
    let random_state = u64::try_from(random_state_raw)
        .with_context(|| format!("random_state out of range: {}", random_state_raw))?;

    let args = TrainArgs {
        n_estimators,
        random_state,
        model_dir: matches.get_one::<PathBuf>("model_dir").cloned(),
        train_dir: matches.get_one::<PathBuf>("train").cloned(),
        test_dir: matches.get_one::<PathBuf>("test").cloned(),
        train_file: matches
            .get_one::<String>("train_file")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TRAIN_FILE.to_string()),
        test_file: matches
            .get_one::<String>("test_file")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TEST_FILE.to_string()),
    };

    let config = args.resolve()?;
    train::run(&config)
}
