//! Annotation store: every measurement, keyed by image and point.
//!
//! Data flows into this layer from the push channel (wholesale snapshots via
//! [`AnnotationStore::replace_all`]) and from clicks (single measurements via
//! [`AnnotationStore::upsert`]). The renderer reads a single image's points
//! through [`AnnotationStore::get`]. Maps are ordered so that draw order is
//! stable between redraws.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;

use wire::PointsByImage;

use crate::transform::Point;

pub use wire::{ImageId, PointId};

/// Points of one image keyed by point id.
pub type PointMap = BTreeMap<PointId, Measurement>;

static EMPTY: PointMap = BTreeMap::new();

/// A single annotated point in normalized image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Image the point was placed on.
    pub image_id: ImageId,
    /// Logical point this measurement locates.
    pub point_id: PointId,
    /// Normalized x, relative to the image center.
    pub x: f64,
    /// Normalized y, relative to the image center.
    pub y: f64,
}

impl Measurement {
    #[must_use]
    pub fn new(image_id: impl Into<ImageId>, point_id: impl Into<PointId>, norm: Point) -> Self {
        Self { image_id: image_id.into(), point_id: point_id.into(), x: norm.x, y: norm.y }
    }

    /// Normalized position as a point.
    #[must_use]
    pub fn norm(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Whether an upsert created a new entry or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Existed,
}

/// In-memory store of measurements.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    images: BTreeMap<ImageId, PointMap>,
}

impl AnnotationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a snapshot in wire form. Nothing from the
    /// previous contents survives.
    pub fn replace_all(&mut self, points: PointsByImage) {
        self.images = points
            .into_iter()
            .map(|(image_id, by_point)| {
                let map = by_point
                    .into_iter()
                    .map(|(point_id, [x, y])| {
                        let m = Measurement { image_id: image_id.clone(), point_id: point_id.clone(), x, y };
                        (point_id, m)
                    })
                    .collect();
                (image_id, map)
            })
            .collect();
    }

    /// Insert or overwrite the measurement for its `(image_id, point_id)`.
    pub fn upsert(&mut self, measurement: Measurement) -> Upsert {
        let points = self.images.entry(measurement.image_id.clone()).or_default();
        match points.insert(measurement.point_id.clone(), measurement) {
            Some(_) => Upsert::Existed,
            None => Upsert::Created,
        }
    }

    /// All measurements of `image_id`; empty when the image is unknown.
    #[must_use]
    pub fn get(&self, image_id: &str) -> &PointMap {
        self.images.get(image_id).unwrap_or(&EMPTY)
    }

    /// Look up one measurement.
    #[must_use]
    pub fn measurement(&self, image_id: &str, point_id: &str) -> Option<&Measurement> {
        self.images.get(image_id).and_then(|points| points.get(point_id))
    }

    /// Image ids known to the store, in order.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Total number of measurements across all images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if the store holds no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
