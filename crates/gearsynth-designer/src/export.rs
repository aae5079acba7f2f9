//! DXF export
//!
//! Writes a closed outline as one `LINE` entity per edge, closing edge
//! included. Entity handles are assigned sequentially by the `dxf` writer in
//! edge order.

use dxf::entities::{Entity, EntityType, Line};
use dxf::Drawing;
use gearsynth_core::{ExportError, GeometryError, IntPath, Polygon};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Serializes outlines to DXF line lists
#[derive(Debug, Clone)]
pub struct DxfExporter {
    layer: String,
}

impl Default for DxfExporter {
    fn default() -> Self {
        Self {
            layer: "0".to_string(),
        }
    }
}

impl DxfExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts every entity on `layer` instead of the default layer `0`.
    pub fn with_layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
        }
    }

    /// Builds a drawing holding one line per polygon edge.
    pub fn drawing(&self, polygon: &Polygon) -> Result<Drawing, ExportError> {
        if polygon.is_empty() {
            return Err(ExportError::EmptyPath);
        }
        if !polygon.is_finite() {
            return Err(GeometryError::NonFinite {
                context: "exported outline".to_string(),
            }
            .into());
        }

        let mut drawing = Drawing::new();
        for segment in polygon.segments() {
            let line = Line::new(
                dxf::Point::new(segment.p0.x, segment.p0.y, 0.0),
                dxf::Point::new(segment.p1.x, segment.p1.y, 0.0),
            );
            let mut entity = Entity::new(EntityType::Line(line));
            entity.common.layer = self.layer.clone();
            drawing.add_entity(entity);
        }
        Ok(drawing)
    }

    pub fn write_to<W: Write>(&self, polygon: &Polygon, writer: &mut W) -> Result<(), ExportError> {
        let drawing = self.drawing(polygon)?;
        drawing
            .save(writer)
            .map_err(|e| ExportError::Dxf(e.to_string()))
    }

    pub fn to_bytes(&self, polygon: &Polygon) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write_to(polygon, &mut buffer)?;
        Ok(buffer)
    }

    pub fn write_polygon(&self, polygon: &Polygon, path: &Path) -> Result<(), ExportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(polygon, &mut writer)?;
        writer.flush()?;
        info!(
            "Exported {} line entities to {}",
            polygon.len(),
            path.display()
        );
        Ok(())
    }

    /// Writes a fixed-point outline after dividing it by `scale`.
    pub fn write_fixed(&self, outline: &IntPath, scale: f64, path: &Path) -> Result<(), ExportError> {
        self.write_polygon(&outline.to_polygon(scale), path)
    }
}
