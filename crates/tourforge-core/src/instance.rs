//! Immutable problem data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourForgeError};
use crate::matrix::DistanceMatrix;

/// A location in the plane, used for Euclidean distances and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A validated tour problem: node count, arc costs and optional coordinates.
///
/// Node 0 is the root every tour starts from and returns to. Coordinates are
/// carried for reporting only; the solver reads the distance matrix.
///
/// # Examples
///
/// ```
/// use tourforge_core::{Instance, Point};
///
/// let instance = Instance::from_points(vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
/// ]).unwrap();
/// assert_eq!(instance.node_count(), 3);
/// assert!((instance.distance(0, 2) - 2f64.sqrt()).abs() < 1e-12);
/// assert!(instance.coordinates().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    distances: DistanceMatrix,
    coordinates: Option<Vec<Point>>,
}

impl Instance {
    /// Index of the node every tour starts from.
    pub const ROOT: usize = 0;

    /// Creates an instance from a distance matrix.
    ///
    /// Fails if there are fewer than two nodes or an off-diagonal distance is
    /// negative or not finite.
    pub fn new(distances: DistanceMatrix) -> Result<Self> {
        if distances.size() < 2 {
            return Err(TourForgeError::MalformedInstance(format!(
                "a tour needs at least 2 nodes, got {}",
                distances.size()
            )));
        }
        if let Some((i, j, d)) = distances.find_invalid_entry() {
            return Err(TourForgeError::MalformedInstance(format!(
                "distance {} -> {} is {}, expected a finite nonnegative value",
                i, j, d
            )));
        }
        Ok(Self {
            distances,
            coordinates: None,
        })
    }

    /// Creates an instance from nested distance rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::new(DistanceMatrix::from_rows(rows)?)
    }

    /// Creates an instance with Euclidean distances between `points`.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        Self::new(DistanceMatrix::euclidean(&points))?.with_coordinates(points)
    }

    /// Attaches reporting coordinates, one per node.
    pub fn with_coordinates(mut self, points: Vec<Point>) -> Result<Self> {
        if points.len() != self.node_count() {
            return Err(TourForgeError::MalformedInstance(format!(
                "{} coordinates given for {} nodes",
                points.len(),
                self.node_count()
            )));
        }
        self.coordinates = Some(points);
        Ok(self)
    }

    /// Parses the JSON instance format.
    ///
    /// The document holds `n` (customers besides the depot), an
    /// `(n + 1) × (n + 1)` matrix `dist`, and optional `xCord`/`yCord` arrays.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourforge_core::Instance;
    ///
    /// let instance = Instance::from_json_str(r#"{
    ///     "n": 2,
    ///     "dist": [[0, 1, 2], [1, 0, 1], [2, 1, 0]]
    /// }"#).unwrap();
    /// assert_eq!(instance.node_count(), 3);
    /// ```
    pub fn from_json_str(s: &str) -> Result<Self> {
        let data: InstanceData = serde_json::from_str(s)
            .map_err(|e| TourForgeError::MalformedInstance(format!("invalid JSON: {}", e)))?;
        data.into_instance()
    }

    /// Reads and parses a JSON instance file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TourForgeError::MalformedInstance(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.distances.size()
    }

    /// Cost of arc `from → to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Reporting coordinates, if the instance carries them.
    pub fn coordinates(&self) -> Option<&[Point]> {
        self.coordinates.as_deref()
    }
}

/// Serialized form of an instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InstanceData {
    /// Number of customers; the document describes `n + 1` nodes.
    n: usize,
    dist: Vec<Vec<f64>>,
    #[serde(rename = "xCord", default, skip_serializing_if = "Option::is_none")]
    x_cord: Option<Vec<f64>>,
    #[serde(rename = "yCord", default, skip_serializing_if = "Option::is_none")]
    y_cord: Option<Vec<f64>>,
}

impl InstanceData {
    fn into_instance(self) -> Result<Instance> {
        let nodes = self.n + 1;
        if self.dist.len() != nodes {
            return Err(TourForgeError::MalformedInstance(format!(
                "n = {} requires a {}x{} distance matrix, got {} rows",
                self.n,
                nodes,
                nodes,
                self.dist.len()
            )));
        }
        let instance = Instance::from_rows(&self.dist)?;
        match (self.x_cord, self.y_cord) {
            (Some(xs), Some(ys)) => {
                if xs.len() != ys.len() {
                    return Err(TourForgeError::MalformedInstance(format!(
                        "xCord has {} entries but yCord has {}",
                        xs.len(),
                        ys.len()
                    )));
                }
                let points = xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y));
                instance.with_coordinates(points.collect())
            }
            (None, None) => Ok(instance),
            _ => Err(TourForgeError::MalformedInstance(
                "xCord and yCord must be given together".to_string(),
            )),
        }
    }
}
