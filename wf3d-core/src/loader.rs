/// Loader for line-segment model files.
///
/// Each line holds one edge as six numbers `x1, y1, z1, x2, y2, z2`,
/// separated by a comma followed by a single space.
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use nom::{
    bytes::complete::tag,
    character::complete::space0,
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};

use crate::error::ModelError;
use crate::geometry::{vertex, Edge, Model};

const VALUES_PER_LINE: usize = 6;

/// Result of loading one file from a model directory
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub result: Result<Model, ModelError>,
}

/// Load a single model file
pub fn load(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_model(&text)
}

/// Parse model text, deduplicating endpoints by exact value
pub fn parse_model(input: &str) -> Result<Model, ModelError> {
    let mut points = PointIndex::default();
    let mut edges = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let values = parse_line(line).map_err(|reason| ModelError::Parse {
            line: number + 1,
            reason,
        })?;
        let source = points.index_of([values[0], values[1], values[2]]);
        let target = points.index_of([values[3], values[4], values[5]]);
        edges.push(Edge::new(source, target));
    }

    if edges.is_empty() {
        return Err(ModelError::Empty);
    }

    let vertices = points
        .into_points()
        .into_iter()
        .map(|[x, y, z]| vertex(x, y, z))
        .collect();
    Model::new(vertices, edges)
}

/// Load every regular file in `dir`, in file-name order.
///
/// Per-file failures are kept in the returned outcomes and unreadable
/// entries are skipped; only a failure to open the directory itself is an
/// error.
pub fn load_dir(dir: impl AsRef<Path>) -> io::Result<Vec<LoadOutcome>> {
    let entries = fs::read_dir(dir.as_ref())?.map(|entry| entry.map(|e| e.path()));

    Ok(regular_files(entries)
        .into_iter()
        .map(|path| {
            let result = load(&path);
            LoadOutcome { path, result }
        })
        .collect())
}

/// Sorted regular files among `entries`, skipping entries that failed to read
fn regular_files(entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if path.is_file() {
            paths.push(path);
        } else {
            debug!("Skipping non-regular entry: {}", path.display());
        }
    }
    paths.sort();
    paths
}

/// Load all models in `dir`, logging and skipping files that fail.
pub fn load_models(dir: impl AsRef<Path>) -> io::Result<Vec<Model>> {
    let mut models = Vec::new();
    for outcome in load_dir(dir)? {
        match outcome.result {
            Ok(model) => {
                info!(
                    "Loaded {} ({} vertices, {} edges)",
                    outcome.path.display(),
                    model.vertices().len(),
                    model.edges().len()
                );
                models.push(model);
            }
            Err(e) => warn!("Failed to load {}: {}", outcome.path.display(), e),
        }
    }
    Ok(models)
}

fn parse_line(line: &str) -> Result<Vec<f64>, String> {
    let values = match all_consuming(coordinates)(line.trim_end()) {
        Ok((_, values)) => values,
        Err(e) => return Err(format!("expected comma-separated numbers: {:?}", e)),
    };
    if values.len() != VALUES_PER_LINE {
        return Err(format!(
            "expected {} values, found {}",
            VALUES_PER_LINE,
            values.len()
        ));
    }
    Ok(values)
}

fn coordinates(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(tag(", "), delimited(space0, double, space0))(input)
}

/// Point to index map assigning indices in first-seen order
#[derive(Default)]
struct PointIndex {
    indices: HashMap<[u64; 3], usize>,
    points: Vec<[f64; 3]>,
}

impl PointIndex {
    fn index_of(&mut self, point: [f64; 3]) -> usize {
        let key = point.map(|c| if c == 0.0 { 0 } else { c.to_bits() });
        let points = &mut self.points;
        *self.indices.entry(key).or_insert_with(|| {
            points.push(point);
            points.len() - 1
        })
    }

    fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment() {
        let model = parse_model("0.0, 0.0, 200.0, 10.0, 0.0, 200.0\n").unwrap();
        assert_eq!(model.vertices().len(), 2);
        assert_eq!(model.edges(), &[Edge::new(0, 1)]);
        assert_eq!(model.vertices()[1], vertex(10.0, 0.0, 200.0));
        assert!(model.vertices().iter().all(|v| v[3] == 1.0));
    }

    #[test]
    fn test_shared_endpoint_is_deduplicated() {
        let text = "0, 0, 0, 1, 0, 0\n1, 0, 0, 1, 1, 0\n1, 1, 0, 0, 0, 0\n";
        let model = parse_model(text).unwrap();
        assert_eq!(model.vertices().len(), 3);
        assert_eq!(
            model.edges(),
            &[Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)]
        );
    }

    #[test]
    fn test_signed_zero_is_one_point() {
        let model = parse_model("0.0, 0.0, 0.0, 1.0, 1.0, 1.0\n-0.0, 0.0, 0.0, 2.0, 2.0, 2.0").unwrap();
        assert_eq!(model.vertices().len(), 3);
        assert_eq!(model.edges()[1].source, 0);
    }

    #[test]
    fn test_degenerate_segment_uses_one_vertex() {
        let model = parse_model("5, 5, 5, 5, 5, 5").unwrap();
        assert_eq!(model.vertices().len(), 1);
        assert_eq!(model.edges(), &[Edge::new(0, 0)]);
    }

    #[test]
    fn test_tolerates_crlf_and_padding() {
        let model = parse_model("1.5,  -2, 3e2 , 4, 5, 6\r\n").unwrap();
        assert_eq!(model.vertices()[0], vertex(1.5, -2.0, 300.0));
    }

    #[test]
    fn test_wrong_value_count() {
        let err = parse_model("1, 2, 3, 4, 5, 6\n1, 2, 3, 4, 5").unwrap_err();
        match err {
            ModelError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 5"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_separator_requires_space() {
        assert!(matches!(
            parse_model("1,2,3,4,5,6"),
            Err(ModelError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(matches!(
            parse_model("1, 2, three, 4, 5, 6"),
            Err(ModelError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_blank_line_is_rejected() {
        assert!(matches!(
            parse_model("1, 2, 3, 4, 5, 6\n\n1, 2, 3, 7, 8, 9"),
            Err(ModelError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_model(""), Err(ModelError::Empty)));
    }

    #[test]
    fn test_unreadable_entry_does_not_abort_listing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "0.0, 0.0, 200.0, 10.0, 0.0, 200.0\n").unwrap();
        fs::write(&b, "0.0, 0.0, 200.0, 10.0, 0.0, 200.0\n").unwrap();

        let entries = vec![
            Ok(b.clone()),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(dir.path().to_path_buf()),
            Ok(a.clone()),
        ];
        assert_eq!(regular_files(entries), vec![a, b]);
    }
}
