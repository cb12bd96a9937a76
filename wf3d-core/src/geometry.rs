/// Geometry primitives for wireframe rendering
use nalgebra::{Matrix4, RowVector4};

use crate::error::ModelError;

/// A point in homogeneous coordinates (x, y, z, 1), stored as a row vector
/// so transforms compose as `point * matrix`.
pub type Vertex = RowVector4<f64>;

/// Build a homogeneous vertex from cartesian coordinates.
pub fn vertex(x: f64, y: f64, z: f64) -> Vertex {
    RowVector4::new(x, y, z, 1.0)
}

/// An undirected line segment between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

/// A wireframe model: vertices in first-seen order plus edges between them.
///
/// Edges always reference valid vertex indices. Transforms move vertices but
/// never touch the edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Model {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, ModelError> {
        let count = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.source, edge.target] {
                if index >= count {
                    return Err(ModelError::InvalidEdge {
                        edge: i,
                        index,
                        count,
                    });
                }
            }
        }
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Both endpoints of an edge
    pub fn endpoints(&self, edge: &Edge) -> (&Vertex, &Vertex) {
        (&self.vertices[edge.source], &self.vertices[edge.target])
    }

    /// Multiply every vertex by `matrix` in place.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for v in &mut self.vertices {
            *v = *v * matrix;
        }
    }

    /// Create an axis-aligned wireframe cube centred on the origin
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            vertex(-h, -h, -h),
            vertex(h, -h, -h),
            vertex(h, h, -h),
            vertex(-h, h, -h),
            vertex(-h, -h, h),
            vertex(h, -h, h),
            vertex(h, h, h),
            vertex(-h, h, h),
        ];
        let edges = [
            // Near face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Far face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Connectors
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ]
        .into_iter()
        .map(|(a, b)| Edge::new(a, b))
        .collect();

        Self { vertices, edges }
    }
}
