//! Mesh loading from the Wavefront-style text format.
//!
//! Only the subset needed by the renderer is understood:
//!
//! | Prefix | Fields                       | Meaning                          |
//! |--------|------------------------------|----------------------------------|
//! | `v`    | `x y z`                      | position                         |
//! | `vn`   | `x y z`                      | normal                           |
//! | `vt`   | `u v [w]`                    | texture coordinate, `w` ignored  |
//! | `f`    | `v/t/n v/t/n v/t/n`          | triangle, 1-based indices        |
//!
//! Every other line is skipped. Anything malformed on a recognized line is a
//! [`LoadError::Parse`] naming the line, never a silent default.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::math::{Normal, Position, TexCoord, Vec2, Vec3};

/// One triangle corner: 0-based indices into each attribute array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

// A triangle defined by three corners. Each corner indexes the three
// attribute arrays of the mesh independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: Corner,
    pub b: Corner,
    pub c: Corner,
}

impl Face {
    pub fn corners(&self) -> [Corner; 3] {
        [self.a, self.b, self.c]
    }
}

/// The three vertex attribute arrays a face can index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Position => write!(f, "position"),
            Attribute::TexCoord => write!(f, "texture coordinate"),
            Attribute::Normal => write!(f, "normal"),
        }
    }
}

/// What was wrong with a rejected line.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// A field that should be a number isn't one.
    InvalidNumber(String),
    /// The line has too few or too many fields for its prefix.
    WrongFieldCount { expected: &'static str, found: usize },
    /// A face with other than three corners.
    NonTriangularFace(usize),
    /// A face corner that isn't `v/t/n`.
    MalformedCorner(String),
    /// A `v`, `vn`, `vt` or `f` line that isn't valid UTF-8.
    InvalidUtf8,
    /// A 1-based face index that refers to nothing declared so far.
    IndexOutOfRange {
        attribute: Attribute,
        index: i64,
        len: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidNumber(field) => write!(f, "invalid number '{}'", field),
            ParseErrorKind::WrongFieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            ParseErrorKind::NonTriangularFace(corners) => {
                write!(f, "face has {} corners, only triangles are supported", corners)
            }
            ParseErrorKind::MalformedCorner(corner) => {
                write!(f, "face corner '{}' is not of the form v/t/n", corner)
            }
            ParseErrorKind::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            ParseErrorKind::IndexOutOfRange {
                attribute,
                index,
                len,
            } => write!(
                f,
                "{} index {} out of range (1..={} declared so far)",
                attribute, index, len
            ),
        }
    }
}

/// Errors that can occur while loading a mesh.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse {
        /// 1-based line number.
        line: usize,
        content: String,
        kind: ParseErrorKind,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "io error: {}", err),
            LoadError::Parse {
                line,
                content,
                kind,
            } => write!(f, "line {}: {} ('{}')", line, kind, content),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse { .. } => None,
        }
    }
}

/// A triangle mesh with independently indexed attributes.
///
/// Built through [`MeshBuilder`] (or one of the loaders, which use it), so
/// every face index is known to be in range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Position>,
    normals: Vec<Normal>,
    texcoords: Vec<TexCoord>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Load a mesh from a file on disk.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a mesh from any line-oriented reader.
    ///
    /// Lines are read as bytes: a line that isn't UTF-8 is only an error
    /// when it starts with a prefix the loader understands.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, LoadError> {
        let mut builder = MeshBuilder::new();
        let mut raw = Vec::new();
        let mut number = 0;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            number += 1;

            let parsed = match std::str::from_utf8(&raw) {
                Ok(line) => parse_line(&mut builder, line),
                Err(_) if is_recognized(&raw) => Err(ParseErrorKind::InvalidUtf8),
                Err(_) => Ok(()),
            };
            parsed.map_err(|kind| LoadError::Parse {
                line: number,
                content: String::from_utf8_lossy(&raw).trim().to_string(),
                kind,
            })?;
        }

        Ok(builder.build())
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

/// Append-only mesh construction.
///
/// Faces are validated against the attributes pushed so far, so a face can
/// only reference data declared before it.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&mut self, position: Position) -> &mut Self {
        self.mesh.positions.push(position);
        self
    }

    pub fn push_normal(&mut self, normal: Normal) -> &mut Self {
        self.mesh.normals.push(normal);
        self
    }

    pub fn push_texcoord(&mut self, texcoord: TexCoord) -> &mut Self {
        self.mesh.texcoords.push(texcoord);
        self
    }

    /// Append a face given 0-based corner indices.
    pub fn push_face(&mut self, face: Face) -> Result<&mut Self, ParseErrorKind> {
        for corner in face.corners() {
            check_index(Attribute::Position, corner.position, self.mesh.positions.len())?;
            check_index(Attribute::TexCoord, corner.texcoord, self.mesh.texcoords.len())?;
            check_index(Attribute::Normal, corner.normal, self.mesh.normals.len())?;
        }
        self.mesh.faces.push(face);
        Ok(self)
    }

    pub fn build(self) -> Mesh {
        self.mesh
    }
}

fn check_index(attribute: Attribute, index: usize, len: usize) -> Result<(), ParseErrorKind> {
    if index < len {
        Ok(())
    } else {
        Err(ParseErrorKind::IndexOutOfRange {
            attribute,
            index: index as i64 + 1,
            len,
        })
    }
}

fn is_recognized(raw: &[u8]) -> bool {
    let prefix = raw
        .split(|byte| byte.is_ascii_whitespace())
        .find(|token| !token.is_empty());
    matches!(prefix, Some(b"v" | b"vn" | b"vt" | b"f"))
}

fn parse_line(builder: &mut MeshBuilder, line: &str) -> Result<(), ParseErrorKind> {
    let mut fields = line.split_whitespace();
    let Some(prefix) = fields.next() else {
        return Ok(());
    };
    let fields: Vec<&str> = fields.collect();

    match prefix {
        "v" => {
            let values = parse_floats(&fields, 3..=usize::MAX, "at least 3")?;
            builder.push_position(Vec3::new(values[0], values[1], values[2]));
        }
        "vn" => {
            let values = parse_floats(&fields, 3..=3, "3")?;
            builder.push_normal(Vec3::new(values[0], values[1], values[2]));
        }
        "vt" => {
            let values = parse_floats(&fields, 2..=3, "2 or 3")?;
            builder.push_texcoord(Vec2::new(values[0], values[1]));
        }
        "f" => {
            let face = parse_face(builder, &fields)?;
            builder.push_face(face)?;
        }
        _ => {}
    }
    Ok(())
}

fn parse_floats(
    fields: &[&str],
    count: std::ops::RangeInclusive<usize>,
    expected: &'static str,
) -> Result<Vec<f32>, ParseErrorKind> {
    if !count.contains(&fields.len()) {
        return Err(ParseErrorKind::WrongFieldCount {
            expected,
            found: fields.len(),
        });
    }
    fields
        .iter()
        .map(|field| {
            field
                .parse::<f32>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ParseErrorKind::InvalidNumber(field.to_string()))
        })
        .collect()
}

fn parse_face(builder: &MeshBuilder, fields: &[&str]) -> Result<Face, ParseErrorKind> {
    let &[a, b, c] = fields else {
        return Err(ParseErrorKind::NonTriangularFace(fields.len()));
    };
    Ok(Face {
        a: parse_corner(builder, a)?,
        b: parse_corner(builder, b)?,
        c: parse_corner(builder, c)?,
    })
}

fn parse_corner(builder: &MeshBuilder, corner: &str) -> Result<Corner, ParseErrorKind> {
    let parts: Vec<&str> = corner.split('/').collect();
    let &[position, texcoord, normal] = parts.as_slice() else {
        return Err(ParseErrorKind::MalformedCorner(corner.to_string()));
    };
    let mesh = &builder.mesh;
    Ok(Corner {
        position: parse_index(corner, position, Attribute::Position, mesh.positions.len())?,
        texcoord: parse_index(corner, texcoord, Attribute::TexCoord, mesh.texcoords.len())?,
        normal: parse_index(corner, normal, Attribute::Normal, mesh.normals.len())?,
    })
}

/// Converts a 1-based file index to a 0-based one, checking it against the
/// attribute count seen so far.
fn parse_index(
    corner: &str,
    field: &str,
    attribute: Attribute,
    len: usize,
) -> Result<usize, ParseErrorKind> {
    if field.is_empty() {
        return Err(ParseErrorKind::MalformedCorner(corner.to_string()));
    }
    let index: i64 = field
        .parse()
        .map_err(|_| ParseErrorKind::InvalidNumber(field.to_string()))?;
    if index < 1 || index as u64 > len as u64 {
        return Err(ParseErrorKind::IndexOutOfRange {
            attribute,
            index,
            len,
        });
    }
    Ok(index as usize - 1)
}
