use crate::catalog::{PoiCatalog, WaypointCatalog};
use crate::diag::DiagnosticSink;
use crate::error::PersistenceError;
use crate::parser::parse_into;
use crate::serializer::serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// How a read combines the document with what the catalogs already hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Keep existing entries; records from the document overwrite entries
    /// with the same name.
    Merge,
    /// Empty both catalogs before parsing begins.
    Replace,
}

/// File-backed persistence for the two catalogs: one JSON document holds
/// both databases.
///
/// Reading is fault-tolerant by design. Malformed tokens and corrupted
/// objects are reported to the caller's [`DiagnosticSink`] and skipped; the
/// only condition that fails a read or write is the storage medium itself
/// being unavailable.
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    media_name: PathBuf,
}

impl JsonPersistence {
    pub fn new(media_name: impl Into<PathBuf>) -> Self {
        Self {
            media_name: media_name.into(),
        }
    }

    pub fn set_media_name(&mut self, media_name: impl Into<PathBuf>) {
        self.media_name = media_name.into();
    }

    pub fn media_name(&self) -> &Path {
        &self.media_name
    }

    /// Serializes both catalogs and writes the document to the medium.
    pub fn write_data(
        &self,
        waypoints: &WaypointCatalog,
        pois: &PoiCatalog,
    ) -> Result<(), PersistenceError> {
        let document = serialize(waypoints, pois);
        fs::write(&self.media_name, document).map_err(|source| PersistenceError::Write {
            path: self.media_name.clone(),
            source,
        })
    }

    /// Reads the document from the medium into the catalogs.
    ///
    /// With [`MergeMode::Replace`] the catalogs are cleared only after the
    /// file was read successfully, so an absent medium leaves them
    /// untouched.
    pub fn read_data(
        &self,
        waypoints: &mut WaypointCatalog,
        pois: &mut PoiCatalog,
        mode: MergeMode,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), PersistenceError> {
        let document =
            fs::read_to_string(&self.media_name).map_err(|source| PersistenceError::Read {
                path: self.media_name.clone(),
                source,
            })?;

        if mode == MergeMode::Replace {
            waypoints.clear();
            pois.clear();
        }

        parse_into(&document, waypoints, pois, sink);
        Ok(())
    }
}
