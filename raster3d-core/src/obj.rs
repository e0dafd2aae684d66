/// Loader for the vertex/face subset of Wavefront OBJ text
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use nalgebra::Point3;
use nom::{
    character::complete::{char, i64 as integer},
    combinator::{all_consuming, opt, rest},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};
use thiserror::Error;

use crate::geometry::{Mesh, Triangle};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("vertex index {0} out of range")]
    IndexOutOfRange(i64),
}

/// Read and parse a mesh file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&text)?;
    log::info!("loaded {} triangles from {}", mesh.triangles.len(), path.display());
    Ok(mesh)
}

/// Parse `v x y z` and `f i j k` lines into a mesh.
///
/// Lines with fewer than four fields and unknown statements are skipped.
/// Face indices are 1-based and may carry `/texture/normal` suffixes,
/// which are ignored. Each face gets an arbitrary opaque color.
pub fn parse_obj(input: &str) -> Result<Mesh, LoadError> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut mesh = Mesh::new();

    for (number, line) in input.lines().enumerate() {
        let line_number = number + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            if !fields.is_empty() {
                log::trace!("skipping short line {line_number}");
            }
            continue;
        }

        let parse_err = |kind| LoadError::Parse {
            line: line_number,
            kind,
        };

        match fields[0] {
            "v" => {
                let mut coords = [0.0; 3];
                for (coord, field) in coords.iter_mut().zip(&fields[1..4]) {
                    *coord = parse_field(field, vertex_coord).map_err(parse_err)?;
                }
                vertices.push(coords.into());
            }
            "f" => {
                let mut corners = [Point3::origin(); 3];
                for (corner, field) in corners.iter_mut().zip(&fields[1..4]) {
                    let index = parse_field(field, face_index).map_err(parse_err)?;
                    *corner = lookup(&vertices, index).map_err(parse_err)?;
                }
                let [a, b, c] = corners;
                mesh.add_triangle(Triangle::new(a, b, c, face_color()));
            }
            other => log::trace!("skipping {other:?} statement on line {line_number}"),
        }
    }

    Ok(mesh)
}

fn vertex_coord(input: &str) -> IResult<&str, f64> {
    double(input)
}

fn face_index(input: &str) -> IResult<&str, i64> {
    terminated(integer, opt(preceded(char('/'), rest)))(input)
}

fn parse_field<T>(
    field: &str,
    parser: impl FnMut(&str) -> IResult<&str, T>,
) -> Result<T, ParseErrorKind> {
    all_consuming(parser)(field)
        .map(|(_, value)| value)
        .map_err(|_| ParseErrorKind::InvalidNumber(field.to_string()))
}

fn lookup(vertices: &[Point3<f64>], index: i64) -> Result<Point3<f64>, ParseErrorKind> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| vertices.get(i).copied())
        .ok_or(ParseErrorKind::IndexOutOfRange(index))
}

/// Opaque color taken from the low 24 bits of the current microsecond clock
fn face_color() -> u32 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros())
        .unwrap_or_default();
    0xFF00_0000 | (micros % (1 << 24)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
# two triangles
v 0 0 1
v 1.5 0 1
v 1.5 -2e0 1 1.0
v 0 -2 1
vn 0 0 1
f 1 2 3
f 1/1/1 3/3/1 4//1

f 1 2
";

    #[test]
    fn test_parse_faces() {
        let mesh = parse_obj(SQUARE).unwrap();
        assert_eq!(mesh.triangles.len(), 2);

        let first = mesh.triangles[0];
        assert_eq!(first.a, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(first.b, Point3::new(1.5, 0.0, 1.0));
        assert_eq!(first.c, Point3::new(1.5, -2.0, 1.0));

        let second = mesh.triangles[1];
        assert_eq!(second.b, Point3::new(1.5, -2.0, 1.0));
        assert_eq!(second.c, Point3::new(0.0, -2.0, 1.0));

        for triangle in &mesh.triangles {
            assert_eq!(triangle.color >> 24, 0xFF);
        }
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_obj("v 0 0 1\nv 1 zero 1\n").unwrap_err();
        match err {
            LoadError::Parse { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(kind, ParseErrorKind::InvalidNumber("zero".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_index_out_of_range() {
        for (face, bad) in [("f 1 2 4", 4), ("f 0 1 2", 0), ("f -1 1 2", -1)] {
            let text = format!("v 0 0 0\nv 1 0 0\nv 0 1 0\n{face}\n");
            match parse_obj(&text).unwrap_err() {
                LoadError::Parse { line, kind } => {
                    assert_eq!(line, 4);
                    assert_eq!(kind, ParseErrorKind::IndexOutOfRange(bad));
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.obj"));
    }
}
