//! Ordered firmware manifest for a flashing session

use tokio::sync::mpsc;

use crate::models::ManifestChange;

/// One firmware image to write: a hex-formatted flash offset (e.g. "0x00")
/// and the path to the binary file.
///
/// Entries are immutable once created; the manifest replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareEntry {
    pub address: String,
    pub path: String,
}

/// Ordered list of firmware images to flash in one session.
///
/// Insertion order is significant: it defines the order of address/file pairs
/// on the esptool command line. Duplicate addresses are permitted and entries
/// are never sorted. The manifest lives only for the lifetime of the session
/// controller and is never persisted.
#[derive(Default)]
pub struct FirmwareManifest {
    entries: Vec<FirmwareEntry>,
    subscribers: Vec<mpsc::UnboundedSender<ManifestChange>>,
}

impl FirmwareManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change subscriber. Every add/remove is reported to all live
    /// subscribers; closed receivers are dropped silently.
    pub fn subscribe(&mut self, tx: mpsc::UnboundedSender<ManifestChange>) {
        self.subscribers.push(tx);
    }

    /// Append an entry. No validation of the address format or path existence
    /// happens here; esptool reports those problems itself. An empty path is
    /// treated as a cancelled file dialog and adds nothing.
    pub fn add(&mut self, address: &str, path: &str) {
        if path.is_empty() {
            return;
        }
        self.entries.push(FirmwareEntry {
            address: address.to_string(),
            path: path.to_string(),
        });
        self.notify(ManifestChange::Added(self.entries.len() - 1));
    }

    /// Remove entries at the given row indices.
    ///
    /// Duplicate indices collapse to a single removal and indices are
    /// processed from highest to lowest so earlier removals cannot shift
    /// later ones. Out-of-range indices are ignored. Relative order of the
    /// surviving entries is preserved.
    pub fn remove_at(&mut self, indices: &[usize]) {
        let mut rows: Vec<usize> = indices.to_vec();
        rows.sort_unstable();
        rows.dedup();

        let mut removed = Vec::new();
        for &row in rows.iter().rev() {
            if row < self.entries.len() {
                self.entries.remove(row);
                removed.push(row);
            }
        }

        if !removed.is_empty() {
            self.notify(ManifestChange::Removed(removed));
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_at(&self, index: usize) -> Option<&FirmwareEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FirmwareEntry> {
        self.entries.iter()
    }

    fn notify(&mut self, change: ManifestChange) {
        self.subscribers
            .retain(|tx| tx.send(change.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_in_order() {
        let mut manifest = FirmwareManifest::new();
        manifest.add("0x1000", "/a.bin");
        manifest.add("0x8000", "/b.bin");

        assert_eq!(manifest.count(), 2);
        assert_eq!(manifest.entry_at(0).unwrap().address, "0x1000");
        assert_eq!(manifest.entry_at(1).unwrap().path, "/b.bin");
    }

    #[test]
    fn empty_path_is_a_cancelled_dialog() {
        let mut manifest = FirmwareManifest::new();
        manifest.add("0x00", "");
        assert_eq!(manifest.count(), 0);
    }
}
