//! File drop regions attached to file inputs through `data-dropzone`.

use serde::Serialize;
use tracing::{debug, warn};

use formwire_model::attrs::DATA_DROPZONE;
use formwire_model::{Document, EnhanceOptions, Event, EventType, NodeId};

use crate::error::DropZoneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DropZoneId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZone {
    pub id: DropZoneId,
    /// Input receiving the dropped files.
    pub input: NodeId,
    pub region: NodeId,
}

#[derive(Debug, Default)]
pub struct DropZoneSetup {
    pub wired: Vec<DropZoneId>,
    pub errors: Vec<DropZoneError>,
}

/// Events a region listens for.
pub const DROP_EVENTS: [EventType; 3] =
    [EventType::DragOver, EventType::DragLeave, EventType::Drop];

#[derive(Debug, Clone)]
pub struct DropZones {
    options: EnhanceOptions,
    zones: Vec<DropZone>,
}

impl DropZones {
    pub fn new(options: EnhanceOptions) -> Self {
        Self {
            options,
            zones: Vec::new(),
        }
    }

    pub fn discover(&mut self, document: &mut Document, form: NodeId) -> DropZoneSetup {
        let mut setup = DropZoneSetup::default();
        for input in document.elements_with_attr(form, DATA_DROPZONE) {
            match self.register(document, input) {
                Ok(id) => setup.wired.push(id),
                Err(err) => {
                    warn!(input = %input, error = %err, "drop zone skipped");
                    setup.errors.push(err);
                }
            }
        }
        setup
    }

    pub fn register(
        &mut self,
        document: &mut Document,
        input: NodeId,
    ) -> Result<DropZoneId, DropZoneError> {
        let region_id = document.attr(input, DATA_DROPZONE).unwrap_or_default();
        let region = document
            .element_by_id(region_id)
            .ok_or_else(|| DropZoneError::MissingRegion {
                input,
                region: region_id.to_string(),
            })?;
        document.add_class(region, &self.options.drop_zone_class)?;

        let id = DropZoneId(self.zones.len());
        debug!(input = %input, region = %region, "drop zone registered");
        self.zones.push(DropZone { id, input, region });
        Ok(id)
    }

    /// React to a drag event on the zone's region. Returns whether the
    /// event's default action is prevented.
    pub fn handle(
        &self,
        document: &mut Document,
        id: DropZoneId,
        event: &Event,
    ) -> Result<bool, DropZoneError> {
        let zone = self.zones.get(id.0).ok_or(DropZoneError::UnknownZone(id))?;
        match event.kind {
            EventType::DragOver => {
                for class in &self.options.drop_highlight_classes {
                    document.add_class(zone.region, class)?;
                }
                Ok(true)
            }
            EventType::DragLeave => {
                self.clear_highlight(document, zone.region)?;
                Ok(false)
            }
            EventType::Drop => {
                debug!(input = %zone.input, files = event.files.len(), "files dropped");
                document.set_files(zone.input, event.files.clone())?;
                self.clear_highlight(document, zone.region)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn clear_highlight(
        &self,
        document: &mut Document,
        region: NodeId,
    ) -> Result<(), DropZoneError> {
        for class in &self.options.drop_highlight_classes {
            document.remove_class(region, class)?;
        }
        Ok(())
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn zone(&self, id: DropZoneId) -> Option<&DropZone> {
        self.zones.get(id.0)
    }
}
