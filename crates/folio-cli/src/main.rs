mod cards;
mod config;
mod logging;
mod ui;

use std::env;
use std::path::PathBuf;

use folio_core::config::GalleryConfig;
use folio_core::GalleryController;
use folio_core::JsonFileSessionStore;
use folio_core::MemoryNavigation;
use folio_core::RecordingRenderer;
use folio_core::SessionStore;
use folio_source::source_for;
use tracing::info;

use crate::cards::CardView;
use crate::config::default_session_path;
use crate::config::load_config;
use crate::logging::init_logging;
use crate::logging::LogConfig;
use crate::logging::LogTarget;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "browse" => {
            let options = parse_options(args.collect::<Vec<_>>())?;
            browse(options)
        }
        "list" => {
            let options = parse_options(args.collect::<Vec<_>>())?;
            list(options)
        }
        "stash-tab" => {
            let options = parse_options(args.collect::<Vec<_>>())?;
            stash_tab(options)
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<PathBuf>,
    url: Option<String>,
    file: Option<String>,
    location: String,
    session: Option<PathBuf>,
    log_file: Option<PathBuf>,
    verbosity: u8,
    tab: Option<String>,
    pages: usize,
    json: bool,
    positional: Vec<String>,
}

fn parse_options(args: Vec<String>) -> Result<CliOptions, Box<dyn std::error::Error>> {
    let mut options = CliOptions::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let takes_value = matches!(
            flag,
            "--config" | "--url" | "--file" | "--location" | "--session" | "--log-file" | "--tab"
                | "--pages"
        );
        if takes_value {
            let Some(value) = args.get(i + 1).cloned() else {
                return Err(format!("{flag} requires a value").into());
            };
            match flag {
                "--config" => options.config = Some(PathBuf::from(value)),
                "--url" => options.url = Some(value),
                "--file" => options.file = Some(value),
                "--location" => options.location = value,
                "--session" => options.session = Some(PathBuf::from(value)),
                "--log-file" => options.log_file = Some(PathBuf::from(value)),
                "--tab" => options.tab = Some(value),
                _ => {
                    options.pages = value
                        .parse()
                        .map_err(|_| format!("--pages expects a number, got {value:?}"))?;
                }
            }
            i += 2;
            continue;
        }
        match flag {
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            "--json" => options.json = true,
            other if other.starts_with('-') => {
                return Err(format!("unsupported argument: {other}").into());
            }
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }
    if options.url.is_some() && options.file.is_some() {
        return Err("--url and --file are mutually exclusive".into());
    }
    Ok(options)
}

/// Config file first, then command-line overrides.
fn resolve_config(options: &CliOptions) -> Result<GalleryConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(url) = &options.url {
        config.source.url = url.clone();
        config.source.file = None;
    }
    if let Some(file) = &options.file {
        config.source.file = Some(file.clone());
    }
    config.validate()?;
    Ok(config)
}

fn open_session(options: &CliOptions) -> std::io::Result<JsonFileSessionStore> {
    let path = options.session.clone().unwrap_or_else(default_session_path);
    JsonFileSessionStore::open(path)
}

fn browse(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    if !options.positional.is_empty() {
        return Err(format!("unexpected argument: {}", options.positional[0]).into());
    }
    let target = match &options.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Discard,
    };
    init_logging(&LogConfig::from_verbosity(options.verbosity, target))?;

    let config = resolve_config(&options)?;
    let source = source_for(&config.source)?;
    let session = open_session(&options)?;
    ui::run(
        &config,
        source.as_ref(),
        MemoryNavigation::new(&options.location),
        session,
    )
}

fn list(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    if !options.positional.is_empty() {
        return Err(format!("unexpected argument: {}", options.positional[0]).into());
    }
    let target = match &options.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Stderr,
    };
    init_logging(&LogConfig::from_verbosity(options.verbosity, target))?;

    let config = resolve_config(&options)?;
    let source = source_for(&config.source)?;
    let mut controller = GalleryController::new(
        &config,
        RecordingRenderer::new(),
        MemoryNavigation::new(&options.location),
        open_session(&options)?,
    )?;

    let resolved = controller.bootstrap(source.as_ref());
    info!(tab = %resolved.tab_id, origin = resolved.origin.label(), "initial tab");
    if let Some(tab) = &options.tab {
        if !controller.activate(tab, true) {
            return Err(format!("unknown tab: {tab}").into());
        }
    }
    for _ in 0..options.pages {
        if !controller.load_more() {
            break;
        }
    }

    let renderer = controller.renderer();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&renderer.items)?);
        return Ok(());
    }
    if let Some(error) = &renderer.error {
        println!("{error}");
    }
    let tab = controller.state().active_tab_label().unwrap_or("-");
    println!(
        "tab: {tab} | {} of {} | location: {}",
        renderer.items.len(),
        controller.state().filtered().len(),
        controller.navigation().location()
    );
    for project in &renderer.items {
        println!();
        for line in CardView::from_project(project).plain_lines() {
            println!("  {line}");
        }
    }
    println!();
    println!(
        "more: {}",
        if renderer.load_more_visible { "yes" } else { "no" }
    );
    Ok(())
}

fn stash_tab(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let [tab] = options.positional.as_slice() else {
        return Err("stash-tab requires exactly one tab id".into());
    };
    let config = load_config(options.config.as_deref())?;
    let mut session = open_session(&options)?;
    session.set(&config.session_key, tab)?;
    println!("stored {tab} in {}", session.path().display());
    Ok(())
}

fn print_help() {
    println!("folio {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  folio browse [--config PATH] [--url URL | --file PATH] [--location LOC]");
    println!("               [--session PATH] [--log-file PATH] [-v]");
    println!("  folio list [--tab ID] [--pages N] [--location LOC] [--json] [--config PATH]");
    println!("             [--url URL | --file PATH] [--session PATH] [-v]");
    println!("  folio stash-tab ID [--session PATH] [--config PATH]");
    println!("  folio --help");
    println!("  folio --version");
}
