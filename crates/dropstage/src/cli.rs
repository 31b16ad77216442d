use std::path::PathBuf;

use clap::Parser;
use dropstage::StagingOptions;
use url::Url;

/// Stage files and folders for sending and print the send manifest.
#[derive(Debug, Parser)]
#[command(name = "dropstage", version, about)]
pub(crate) struct Args {
    /// Files to stage at the top level.
    pub(crate) files: Vec<PathBuf>,

    /// Folder to stage recursively, keeping its name as the top directory.
    #[arg(long = "folder", value_name = "DIR")]
    pub(crate) folders: Vec<PathBuf>,

    /// Dropped `file://` URL to stage; other schemes are ignored.
    #[arg(long = "drop", value_name = "URL")]
    pub(crate) drops: Vec<Url>,

    /// Row of the staged list to remove before sending.
    #[arg(long = "remove", value_name = "INDEX")]
    pub(crate) remove: Vec<usize>,

    /// Destination peer to hand to the sender.
    #[arg(long = "to", value_name = "PEER")]
    pub(crate) destinations: Vec<String>,

    /// Include hidden files when walking folders.
    #[arg(long)]
    pub(crate) hidden: bool,

    /// Skip paths matched by `.gitignore` and `.ignore` files in folders.
    #[arg(long)]
    pub(crate) respect_ignore: bool,

    /// Maximum folder walk depth, where the folder itself is depth 0.
    #[arg(long, value_name = "N")]
    pub(crate) max_depth: Option<usize>,

    /// Log every staging step.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Args {
    pub(crate) fn staging_options(&self) -> StagingOptions {
        StagingOptions::default()
            .with_hidden(self.hidden)
            .with_ignore_files(self.respect_ignore)
            .with_max_depth(self.max_depth)
    }
}
