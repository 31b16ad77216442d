use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dropstage::dialog::{DialogState, SelectFilesDialog};
use dropstage::infra::notify::TracingNotifier;
use dropstage::infra::picker::PresetPicker;
use dropstage::infra::send::{ManifestLauncher, StaticDiscovery};
use tracing::{Level, debug};

mod cli;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    let max_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();

    let picker = PresetPicker::new(args.files.clone(), args.folders.clone());
    let mut dialog = SelectFilesDialog::new(
        args.staging_options(),
        Box::new(picker),
        Box::new(TracingNotifier),
        Arc::new(StaticDiscovery::new(args.destinations.clone())),
    );

    if !args.files.is_empty() {
        dialog.add_files();
    }
    for _ in &args.folders {
        dialog.add_folder();
    }
    if !args.drops.is_empty() {
        dialog.drop_urls(&args.drops);
    }
    dialog.remove_selected(args.remove.iter().copied());

    for (index, name) in dialog.display_names().iter().enumerate() {
        debug!(index, %name, "Staged");
    }

    let mut launcher = ManifestLauncher::new(io::stdout().lock());
    match dialog.accept(&mut launcher) {
        DialogState::Accepted => ExitCode::SUCCESS,
        DialogState::Open | DialogState::Cancelled => ExitCode::FAILURE,
    }
}
