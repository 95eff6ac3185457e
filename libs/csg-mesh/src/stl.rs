//! # STL Import and Export
//!
//! Reads and writes the STL (Stereolithography) triangle format.
//!
//! ## Format Detection
//!
//! Binary STL carries no magic number, and binary headers may begin with
//! the word `solid`. Detection therefore goes by size first:
//!
//! 1. At least 84 bytes and the declared facet count matches the file
//!    length exactly: binary
//! 2. Valid UTF-8 text starting with `solid` (after optional whitespace): ASCII
//! 3. Anything else: binary, which fails if the record data is truncated
//!
//! ## Binary Layout
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of facets
//! foreach facet
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use config::constants::{
    binary_stl_size, ASCII_STL_FORMAT, MAX_FILE_SIZE, MAX_TRIANGLES, OUTPUT_FORMAT,
    STL_HEADER_SIZE, STL_HEADER_TEXT, STL_TRIANGLE_SIZE,
};
use glam::DVec3;
use tracing::debug;

use crate::error::MeshError;
use crate::mesh::Mesh;

// =============================================================================
// ENCODING
// =============================================================================

/// On-disk STL flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    /// Little-endian binary records.
    Binary,
    /// Human-readable `solid ... endsolid` text.
    Ascii,
}

impl StlEncoding {
    /// Resolves a serialization format name.
    ///
    /// `"STL"` selects binary and `"STL-ASCII"` selects text. Matching is
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// [`MeshError::UnsupportedFormat`] for any other name.
    pub fn from_format_name(format: &str) -> Result<Self, MeshError> {
        if format.eq_ignore_ascii_case(OUTPUT_FORMAT) {
            Ok(Self::Binary)
        } else if format.eq_ignore_ascii_case(ASCII_STL_FORMAT) {
            Ok(Self::Ascii)
        } else {
            Err(MeshError::UnsupportedFormat {
                format: format.to_string(),
            })
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Loads a mesh from an STL file, detecting ASCII or binary encoding.
///
/// # Errors
///
/// - [`MeshError::FileNotFound`] if `path` does not exist
/// - [`MeshError::FileTooLarge`] if the file exceeds the import limit
/// - Any error from [`read_stl`]
///
/// # Example
///
/// ```no_run
/// use csg_mesh::stl::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} facets", mesh.triangle_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let not_found = |e: io::Error| {
        if e.kind() == io::ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    };

    let size = fs::metadata(path).map_err(not_found)?.len();
    if size > MAX_FILE_SIZE {
        return Err(MeshError::FileTooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = fs::read(path).map_err(not_found)?;
    let mesh = read_stl(&bytes)?;
    debug!(path = %path.display(), facets = mesh.triangle_count(), "loaded STL");
    Ok(mesh)
}

/// Parses STL data already held in memory.
///
/// # Errors
///
/// - [`MeshError::InvalidFaceCount`] if binary data ends early
/// - [`MeshError::InvalidContent`] for malformed text or non-finite coordinates
/// - [`MeshError::TooManyPolygons`] if the declared facet count is above the limit
pub fn read_stl(bytes: &[u8]) -> Result<Mesh, MeshError> {
    if let Some(count) = declared_facet_count(bytes) {
        if binary_stl_size(count as usize) == bytes.len() as u64 {
            return read_binary(bytes);
        }
    }

    let text_start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    if bytes[text_start..].starts_with(b"solid") {
        // Binary headers may start with `solid` too; those are rarely UTF-8
        if let Ok(text) = std::str::from_utf8(bytes) {
            return read_ascii(text);
        }
    }

    read_binary(bytes)
}

/// Facet count stored after the binary header, if the data is long enough.
fn declared_facet_count(bytes: &[u8]) -> Option<u32> {
    let field = bytes.get(STL_HEADER_SIZE..STL_HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

fn read_binary(bytes: &[u8]) -> Result<Mesh, MeshError> {
    let count = declared_facet_count(bytes).ok_or_else(|| {
        MeshError::invalid_content(format!(
            "file too small to be valid STL ({} bytes)",
            bytes.len()
        ))
    })?;

    if count as usize > MAX_TRIANGLES {
        return Err(MeshError::TooManyPolygons {
            count: count as usize,
            max: MAX_TRIANGLES,
        });
    }

    let records = &bytes[STL_HEADER_SIZE + 4..];
    let complete = (records.len() / STL_TRIANGLE_SIZE).min(count as usize);
    if complete < count as usize {
        return Err(MeshError::InvalidFaceCount {
            expected: count,
            got: complete as u32,
        });
    }

    let mut mesh = Mesh::with_capacity(complete * 3, complete);
    for record in records.chunks_exact(STL_TRIANGLE_SIZE).take(complete) {
        // Skip the stored normal; it is recomputed on write
        let facet = [
            read_vertex(&record[12..24])?,
            read_vertex(&record[24..36])?,
            read_vertex(&record[36..48])?,
        ];
        mesh.add_facet(facet);
    }

    Ok(mesh)
}

/// Reads three little-endian f32 coordinates.
fn read_vertex(buf: &[u8]) -> Result<DVec3, MeshError> {
    let coord = |i: usize| {
        f64::from(f32::from_le_bytes([
            buf[i],
            buf[i + 1],
            buf[i + 2],
            buf[i + 3],
        ]))
    };
    finite(DVec3::new(coord(0), coord(4), coord(8)))
}

fn finite(v: DVec3) -> Result<DVec3, MeshError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MeshError::invalid_content(format!(
            "non-finite vertex coordinate {v}"
        )))
    }
}

fn read_ascii(text: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut corners: Vec<DVec3> = Vec::with_capacity(3);
    let mut last_line = 0;

    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        last_line = line_no;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                if in_facet {
                    return Err(MeshError::invalid_content(format!(
                        "line {line_no}: facet opened before the previous one ended"
                    )));
                }
                in_facet = true;
                corners.clear();
            }
            "outer" if in_facet => in_loop = true,
            "vertex" if in_loop => {
                let coords = parts
                    .take(3)
                    .map(str::parse::<f64>)
                    .collect::<Result<Vec<_>, _>>()?;
                let &[x, y, z] = coords.as_slice() else {
                    return Err(MeshError::invalid_content(format!(
                        "line {line_no}: vertex needs three coordinates"
                    )));
                };
                corners.push(finite(DVec3::new(x, y, z))?);
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                let [a, b, c] = corners[..] else {
                    return Err(MeshError::invalid_content(format!(
                        "line {line_no}: facet has {} vertices, expected 3",
                        corners.len()
                    )));
                };
                mesh.add_facet([a, b, c]);
                corners.clear();
                in_facet = false;
                in_loop = false;

                if mesh.triangle_count() > MAX_TRIANGLES {
                    return Err(MeshError::TooManyPolygons {
                        count: mesh.triangle_count(),
                        max: MAX_TRIANGLES,
                    });
                }
            }
            "endsolid" => break,
            _ => {}
        }
    }

    if in_facet || !corners.is_empty() {
        return Err(MeshError::invalid_content(format!(
            "line {last_line}: unterminated facet ({} vertices read)",
            corners.len()
        )));
    }

    Ok(mesh)
}

// =============================================================================
// SAVING
// =============================================================================

/// Writes a mesh to an STL file, replacing any existing file.
///
/// # Errors
///
/// [`MeshError::Io`] if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use csg_mesh::stl::{save_stl, StlEncoding};
/// use csg_mesh::Mesh;
/// use glam::DVec3;
///
/// let cube = Mesh::cuboid(DVec3::ZERO, DVec3::ONE);
/// save_stl(&cube, "cube.stl", StlEncoding::Binary).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    encoding: StlEncoding,
) -> Result<(), MeshError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(mesh, &mut writer, encoding)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        facets = mesh.triangle_count(),
        ?encoding,
        "wrote STL"
    );
    Ok(())
}

/// Writes a mesh to an STL file in the named serialization format.
///
/// # Errors
///
/// [`MeshError::UnsupportedFormat`] for an unknown format name, otherwise
/// as [`save_stl`].
pub fn save_stl_format<P: AsRef<Path>>(mesh: &Mesh, path: P, format: &str) -> Result<(), MeshError> {
    save_stl(mesh, path, StlEncoding::from_format_name(format)?)
}

/// Serializes a mesh as STL into any writer.
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W, encoding: StlEncoding) -> io::Result<()> {
    match encoding {
        StlEncoding::Binary => write_binary(mesh, writer),
        StlEncoding::Ascii => write_ascii(mesh, writer),
    }
}

/// Unit normal of a facet, or zero for a degenerate one.
fn facet_normal([a, b, c]: [DVec3; 3]) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

fn write_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    let mut header = [b' '; STL_HEADER_SIZE];
    header[..STL_HEADER_TEXT.len()].copy_from_slice(STL_HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    for facet in mesh.facets() {
        write_vertex(writer, facet_normal(facet))?;
        for corner in facet {
            write_vertex(writer, corner)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_vertex<W: Write>(writer: &mut W, v: DVec3) -> io::Result<()> {
    for coord in v.as_vec3().to_array() {
        writer.write_all(&coord.to_le_bytes())?;
    }
    Ok(())
}

fn write_ascii<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "solid csg")?;

    for facet in mesh.facets() {
        let n = facet_normal(facet);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in facet {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid csg")?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
