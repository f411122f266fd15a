use crate::io::IoError;
use crate::mesh::Mesh;
use crate::triangulated::Triangulated3D;
use std::fmt::Debug;
use std::path::Path;

#[cfg(feature = "stl-io")]
use crate::{
    float_types::Real,
    mesh::{polygon::Polygon, vertex::Vertex},
};
#[cfg(feature = "stl-io")]
use nalgebra::{Point3, Vector3};
#[cfg(feature = "stl-io")]
use std::io::Cursor;

/// STL flavour to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    Ascii,
    #[default]
    Binary,
}

/// Export to ASCII STL
/// Convert this Mesh to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use dicecarve::mesh::Mesh;
/// let mesh = Mesh::<()>::cube(1.0, None);
/// let text = mesh.to_stl_ascii("my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Binary STL has no room for a name beyond the 80 byte header, which
/// `stl_io` leaves blank.
#[cfg(feature = "stl-io")]
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    let p = v.pos;
                    Vertex::new([p.x as f32, p.y as f32, p.z as f32])
                }),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    #[cfg(feature = "stl-io")]
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    /// Write the mesh to `path`; the solid name is the file stem
    pub fn write_stl(&self, path: impl AsRef<Path>, format: StlFormat) -> Result<(), IoError> {
        let path = path.as_ref();
        let bytes = match format {
            StlFormat::Ascii => {
                let name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("mesh");
                self.to_stl_ascii(name).into_bytes()
            },
            #[cfg(feature = "stl-io")]
            StlFormat::Binary => self.to_stl_binary()?,
            #[cfg(not(feature = "stl-io"))]
            StlFormat::Binary => {
                return Err(IoError::Unimplemented(
                    "binary STL needs the `stl-io` feature".to_string(),
                ));
            },
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read an ASCII or binary STL.
    ///
    /// Every facet becomes one triangle polygon carrying `metadata`; facets
    /// with zero area are dropped.
    #[cfg(feature = "stl-io")]
    pub fn from_stl(bytes: &[u8], metadata: Option<S>) -> Result<Mesh<S>, IoError> {
        let indexed = stl_io::read_stl(&mut Cursor::new(bytes))
            .map_err(|e| IoError::MalformedInput(format!("STL: {e}")))?;

        let point = |i: usize| -> Result<Point3<Real>, IoError> {
            let v = indexed.vertices.get(i).ok_or_else(|| {
                IoError::MalformedInput(format!("STL vertex {i} does not exist"))
            })?;
            Ok(Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
        };

        let mut polygons = Vec::with_capacity(indexed.faces.len());
        let mut skipped = 0usize;
        for face in &indexed.faces {
            let [a, b, c] = face.vertices;
            let (a, b, c) = (point(a)?, point(b)?, point(c)?);
            let normal = (b - a).cross(&(c - a));
            if normal.norm_squared() == 0.0 {
                skipped += 1;
                continue;
            }
            let normal: Vector3<Real> = normal.normalize();
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(a, normal),
                    Vertex::new(b, normal),
                    Vertex::new(c, normal),
                ],
                metadata.clone(),
            ));
        }
        if skipped > 0 {
            log::warn!("dropped {skipped} zero-area STL facets");
        }

        Ok(Mesh::from_polygons(&polygons, metadata))
    }
}
