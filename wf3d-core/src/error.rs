/// Error types for model loading and viewer configuration
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("model file contains no edges")]
    Empty,
    #[error("edge {edge} references vertex {index}, but the model has {count} vertices")]
    InvalidEdge {
        edge: usize,
        index: usize,
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("focal bounds are inverted: min {min} > max {max}")]
    InvertedFocalBounds { min: f64, max: f64 },
    #[error("minimum focal length must be positive, got {0}")]
    NonPositiveFocal(f64),
    #[error("initial focal length {initial} lies outside [{min}, {max}]")]
    FocalOutOfBounds { initial: f64, min: f64, max: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveStep { name: &'static str, value: f64 },
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}
