// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Geographic area, in decimal degrees, where an operation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicBoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeographicBoundingBox {
    /// Values in the order `[west, south, east, north]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

/// Envelope expressed in the coordinates of the target CRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Values in the order `[minX, minY, maxX, maxY]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationMetadata {
    /// Positional accuracy in metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic_bounding_box: Option<GeographicBoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_of_validity: Option<Envelope>,
}

impl OperationMetadata {
    /// The accuracy, or `None` when unknown. NaN and negative values count as unknown.
    pub fn known_accuracy(&self) -> Option<f64> {
        self.accuracy.filter(|a| *a >= 0.0)
    }
}
