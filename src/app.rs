use crate::cli::{Cli, Commands, ConvertArgs};
use gpuconv::engine::{
    self, BatchPlan, BatchSummary, EncoderAvailability, Ffmpeg, Session, WorkerMessage, registry,
};
use gpuconv::{config, ui};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) {
    let config_result = config::Config::load();
    let config = config_result.as_ref().cloned().unwrap_or_default();

    // The dashboard owns the terminal; only log there when sent to a file
    let dashboard = match &cli.command {
        None => wants_dashboard(config.defaults.use_tui, false, false),
        Some(Commands::Convert(args)) => {
            wants_dashboard(config.defaults.use_tui, args.plain, args.dry_run)
        }
        Some(_) => false,
    };
    init_logging(cli.verbose, cli.log_file.as_deref(), dashboard);

    if let Err(e) = &config_result {
        warn!("Using default config: {:#}", e);
    }

    let binary = engine::resolve_ffmpeg_binary(cli.ffmpeg.as_deref(), config.ffmpeg.path.as_deref());
    let ffmpeg = Ffmpeg::new(binary);

    match cli.command {
        Some(Commands::Probe { json }) => handle_probe(&ffmpeg, json),
        Some(Commands::List { directory }) => handle_list(directory),
        Some(Commands::Convert(args)) => handle_convert(args, &config, ffmpeg),
        Some(Commands::CheckFfmpeg) => handle_check_ffmpeg(&ffmpeg),
        Some(Commands::InitConfig) => handle_init_config(),
        None => handle_convert(
            ConvertArgs {
                directory: cli.directory,
                ..Default::default()
            },
            &config,
            ffmpeg,
        ),
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>, dashboard: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gpuconv={}", level)));

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            Err(e) => eprintln!("Warning: could not open log file {}: {}", path.display(), e),
        }
    } else if !dashboard {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn current_dir_or(directory: Option<PathBuf>) -> PathBuf {
    directory.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn probe_or_exit(ffmpeg: &Ffmpeg) -> EncoderAvailability {
    println!("Detecting working GPU encoders...");
    let availability = engine::probe(ffmpeg, &registry::candidates());

    if let Err(e) = engine::ensure_usable(&availability) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    availability
}

fn print_availability(availability: &EncoderAvailability) {
    for vendor in availability.vendors() {
        println!("{}: {}", vendor.vendor, vendor.encoders.join(", "));
    }
}

fn handle_probe(ffmpeg: &Ffmpeg, json: bool) {
    let availability = engine::probe(ffmpeg, &registry::candidates());

    if json {
        match serde_json::to_string_pretty(&availability) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: failed to serialize probe result: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_availability(&availability);
    }

    if let Err(e) = engine::ensure_usable(&availability) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn handle_list(directory: Option<PathBuf>) {
    let dir = current_dir_or(directory);

    match engine::list_video_files(&dir) {
        Ok(files) => {
            for file in &files {
                println!("- {}", file.file_name());
            }
            println!("{} video files found.", files.len());
        }
        Err(e) => {
            eprintln!("Error listing {}: {}", dir.display(), e);
            process::exit(1);
        }
    }
}

/// Encoder precedence: explicit flag, configured default if it works, first working encoder
fn pick_encoder<'a>(
    requested: Option<&'a str>,
    configured: Option<&'a str>,
    availability: &'a EncoderAvailability,
) -> Option<&'a str> {
    requested
        .or_else(|| configured.filter(|enc| availability.contains(enc)))
        .or_else(|| availability.first_encoder())
}

fn handle_convert(args: ConvertArgs, config: &config::Config, ffmpeg: Ffmpeg) {
    let availability = probe_or_exit(&ffmpeg);
    print_availability(&availability);

    let mut session = Session::new();

    let encoder = pick_encoder(
        args.encoder.as_deref(),
        config.defaults.encoder.as_deref(),
        &availability,
    );
    if let Some(encoder) = encoder {
        if let Err(e) = session.select_encoder(&availability, encoder) {
            eprintln!("Error: {}", e);
            eprintln!("Available encoders: {}", availability.all_encoders().join(", "));
            process::exit(1);
        }
    }
    session.set_output_format(args.format.unwrap_or(config.defaults.output_format));

    let dir = current_dir_or(args.directory);
    match session.select_folder(&dir) {
        Ok(count) => println!("{} video files found.", count),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    if args.dry_run {
        match session.preview() {
            Ok(plan) => print_dry_run(&ffmpeg, &plan),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let plan = match session.plan() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let use_dashboard = wants_dashboard(config.defaults.use_tui, args.plain, args.dry_run);
    let handle = engine::start_batch(Arc::new(ffmpeg), plan.clone());

    if use_dashboard {
        // The batch is already running; a broken terminal only changes how progress is shown
        if let Err(e) = ui::run_batch_dashboard(&handle, &plan) {
            warn!("Dashboard failed: {}", e);
            eprintln!("Dashboard unavailable ({}), continuing with plain output", e);
            run_plain(&handle);
        }
    } else {
        run_plain(&handle);
    }

    print_summary(&handle.join(), &plan);
}

/// The dashboard needs a terminal on stdout; piped or detached runs print plain lines
fn wants_dashboard(use_tui: bool, plain: bool, dry_run: bool) -> bool {
    use_tui && !plain && !dry_run && io::stdout().is_terminal()
}

fn print_dry_run(ffmpeg: &Ffmpeg, plan: &BatchPlan) {
    println!(
        "Dry run: {} files -> {} with {} ({})",
        plan.jobs.len(),
        plan.output_dir.display(),
        plan.encoder,
        plan.output_format
    );
    for job in &plan.jobs {
        let cmd = engine::build_convert_cmd(ffmpeg.binary().as_os_str(), job);
        println!("{}", engine::format_ffmpeg_cmd(&cmd));
    }
}

/// Print progress lines until the batch reports completion
fn run_plain(handle: &engine::BatchHandle) {
    while let Ok(msg) = handle.receiver().recv() {
        match msg {
            WorkerMessage::FileStarted { input_path, .. } => {
                println!("Converting {}", input_path.display());
            }
            WorkerMessage::Progress {
                progress, outcome, ..
            } => {
                if let engine::ConversionOutcome::Failed(reason) = outcome {
                    eprintln!("  failed: {}", reason);
                }
                println!("{}", progress.label());
            }
            WorkerMessage::BatchFinished { .. } => break,
        }
    }
}

fn print_summary(summary: &BatchSummary, plan: &BatchPlan) {
    println!("Video conversion completed.");
    println!(
        "{} of {} converted into {}",
        summary.succeeded(),
        summary.total,
        plan.output_dir.display()
    );
    for path in &summary.failed {
        println!("  failed: {}", path.display());
    }
}

fn handle_check_ffmpeg(ffmpeg: &Ffmpeg) {
    match engine::ffmpeg_version(ffmpeg.binary()) {
        Ok(version) => {
            println!("ffmpeg found at {}: {}", ffmpeg.binary().display(), version);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn handle_init_config() {
    match config::Config::load() {
        Ok(cfg) => {
            match config::Config::config_path() {
                Ok(path) => println!("Config loaded successfully from {}", path.display()),
                Err(e) => println!("Config loaded, but config path unknown: {:#}", e),
            }
            println!("{:#?}", cfg);
        }
        Err(e) => {
            println!("Config missing or invalid: {:#}", e);
            println!("Creating default config...");

            if let Err(err) = config::Config::default().save() {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            }
            match config::Config::config_path() {
                Ok(path) => println!("Default config saved to {}", path.display()),
                Err(e) => println!("Default config saved (path unknown): {:#}", e),
            }
        }
    }
}
