//! Sender and peer-discovery boundary, plus a JSON manifest sender.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::StagedSnapshot;

/// Peer-location service handed to the sender together with the files.
#[cfg_attr(test, mockall::automock)]
pub trait Discovery: Send + Sync {
    /// Returns the names of the peers that can currently receive files.
    fn destinations(&self) -> Vec<String>;
}

/// Starts a transfer of a confirmed snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait SendLauncher {
    /// Takes ownership of `snapshot` and begins sending it.
    ///
    /// # Errors
    /// Returns an error when the send could not be started.
    fn launch(
        &mut self,
        snapshot: StagedSnapshot,
        discovery: Arc<dyn Discovery>,
    ) -> Result<(), String>;
}

/// Discovery service with a fixed list of destinations.
#[derive(Clone, Debug, Default)]
pub struct StaticDiscovery {
    destinations: Vec<String>,
}

impl StaticDiscovery {
    pub fn new(destinations: Vec<String>) -> Self {
        Self { destinations }
    }
}

impl Discovery for StaticDiscovery {
    fn destinations(&self) -> Vec<String> {
        self.destinations.clone()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendManifest<'a> {
    destinations: Vec<String>,
    files: &'a StagedSnapshot,
    total_size: u64,
}

/// Sender front-end that writes the snapshot as a JSON manifest.
pub struct ManifestLauncher<W: Write> {
    writer: W,
}

impl<W: Write> ManifestLauncher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SendLauncher for ManifestLauncher<W> {
    fn launch(
        &mut self,
        snapshot: StagedSnapshot,
        discovery: Arc<dyn Discovery>,
    ) -> Result<(), String> {
        let manifest = SendManifest {
            destinations: discovery.destinations(),
            files: &snapshot,
            total_size: snapshot.total_size(),
        };

        serde_json::to_writer_pretty(&mut self.writer, &manifest)
            .map_err(|error| format!("Failed to write send manifest: {error}"))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .map_err(|error| format!("Failed to write send manifest: {error}"))?;

        info!(
            files = snapshot.len(),
            total_size = manifest.total_size,
            "Handed staged files to sender"
        );

        Ok(())
    }
}
