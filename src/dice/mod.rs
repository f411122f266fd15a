//! Engraved d20 pipeline: face frames, numbering, glyph tools and the
//! per-face subtraction that carves them into the die.

use crate::errors::DiceError;
use crate::float_types::{EPSILON, PI, Real, parry3d::bounding_volume::Aabb};
use crate::font::GlyphFont;
use crate::mesh::Mesh;
use crate::mesh::shapes::{icosahedron_buffer, icosahedron_midradius_ratio};
use crate::sketch::Sketch;
use crate::traits::CSG;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod params;
pub use params::DiceParams;

/// What a polygon of the finished die belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Untouched part of the face with this zero-based index
    Face(usize),
    /// Wall or floor of the pocket cut for this number
    Engraving(u32),
    /// Spherical cap left by rounding the corners
    Rounding,
}

/// How numbers are spread over the faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Numbering {
    /// Face `i` carries `i + 1`
    #[default]
    Sequential,
    /// Opposite faces add up to `faces + 1`
    OppositeSum,
}

/// Which way is "up" for a glyph lying on its face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphOrientation {
    /// Shortest rotation of +Z onto the face normal; the in-plane angle
    /// then depends on where the face sits.
    MinimalRotation,
    /// The top of the glyph points at the face's first corner
    #[default]
    Apex,
}

/// Position and orientation of one triangular face
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrame {
    /// Zero-based face order
    pub index: usize,
    /// Average of the three corners
    pub center: Point3<Real>,
    /// Outward unit normal, from counter-clockwise winding
    pub normal: Unit<Vector3<Real>>,
    /// First corner of the face
    pub apex: Point3<Real>,
}

/// Compute one frame per triangle.
///
/// Without `indices` the positions are consecutive triples; with them every
/// three indices name a triangle.
pub fn face_frames(
    positions: &[Point3<Real>],
    indices: Option<&[u32]>,
) -> Result<Vec<FaceFrame>, DiceError> {
    let triangles: Vec<[Point3<Real>; 3]> = match indices {
        None => {
            if positions.len() % 3 != 0 {
                return Err(DiceError::MalformedBuffer(format!(
                    "{} positions do not form whole triangles",
                    positions.len()
                )));
            }
            positions
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect()
        },
        Some(indices) => {
            if indices.len() % 3 != 0 {
                return Err(DiceError::MalformedBuffer(format!(
                    "{} indices do not form whole triangles",
                    indices.len()
                )));
            }
            let lookup = |i: u32| {
                positions
                    .get(i as usize)
                    .copied()
                    .ok_or(DiceError::IndexOutOfRange { index: i as usize, len: positions.len() })
            };
            indices
                .chunks_exact(3)
                .map(|tri| Ok([lookup(tri[0])?, lookup(tri[1])?, lookup(tri[2])?]))
                .collect::<Result<_, DiceError>>()?
        },
    };

    triangles
        .iter()
        .enumerate()
        .map(|(index, [a, b, c])| {
            let normal = Unit::try_new((b - a).cross(&(c - a)), EPSILON * EPSILON)
                .ok_or(DiceError::DegenerateFace(index))?;
            Ok(FaceFrame {
                index,
                center: Point3::from((a.coords + b.coords + c.coords) / 3.0),
                normal,
                apex: *a,
            })
        })
        .collect()
}

/// Number the faces. The result is always a permutation of `1..=frames.len()`.
pub fn assign_numbers(frames: &[FaceFrame], numbering: Numbering) -> Vec<u32> {
    let count = frames.len() as u32;
    match numbering {
        Numbering::Sequential => (1..=count).collect(),
        Numbering::OppositeSum => {
            let mut numbers = vec![0u32; frames.len()];
            let mut next = 1;
            for i in 0..frames.len() {
                if numbers[i] != 0 {
                    continue;
                }
                numbers[i] = next;
                // the most opposed face still free
                let partner = (0..frames.len())
                    .filter(|&j| j != i && numbers[j] == 0)
                    .min_by(|&j, &k| {
                        let dj = frames[i].normal.dot(&frames[j].normal);
                        let dk = frames[i].normal.dot(&frames[k].normal);
                        dj.total_cmp(&dk)
                    });
                if let Some(j) = partner {
                    numbers[j] = count + 1 - next;
                }
                next += 1;
            }
            numbers
        },
    }
}

/// Matrix taking glyph space (outline in XY, +Z out of the face) onto the face
pub fn glyph_transform(frame: &FaceFrame, orientation: GlyphOrientation) -> Matrix4<Real> {
    let z = frame.normal.into_inner();

    let minimal = || {
        UnitQuaternion::rotation_between(&Vector3::z(), &z)
            // antiparallel: any half turn about a horizontal axis works
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
            .to_rotation_matrix()
    };

    let rotation = match orientation {
        GlyphOrientation::MinimalRotation => minimal(),
        GlyphOrientation::Apex => {
            let towards_apex = frame.apex - frame.center;
            let up = towards_apex - z * towards_apex.dot(&z);
            match Unit::try_new(up, EPSILON) {
                Some(y) => {
                    let x = y.cross(&z);
                    Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y.into_inner(), z]))
                },
                None => minimal(),
            }
        },
    };

    Translation3::from(frame.center.coords).to_homogeneous() * rotation.to_homogeneous()
}

/// Cutting tool for `number` on `frame`: the outline, scaled and centred,
/// extruded from `depth` below the face to `depth / 2` above it so the cut
/// always breaks through the surface.
pub fn glyph_tool(
    font: &dyn GlyphFont,
    number: u32,
    frame: &FaceFrame,
    params: &DiceParams,
) -> Result<Mesh<Surface>, DiceError> {
    let text = number.to_string();
    let outline = font.outline(&text, params.font_size)?;
    let sketch = Sketch::from_geo(outline, Some(Surface::Engraving(number)))
        .scale(params.text_scale, params.text_scale)
        .center();
    if sketch.is_empty() {
        let first = text.chars().next().unwrap_or('0');
        return Err(DiceError::MissingGlyph(first));
    }

    let transform = glyph_transform(frame, params.orientation);
    log::debug!(
        "glyph {number} on face {}: centre {:?}, normal {:?}, scale {}",
        frame.index,
        frame.center.coords.as_slice(),
        frame.normal.as_slice(),
        params.text_scale,
    );

    Ok(sketch
        .extrude_between(-params.depth, params.depth * 0.5)
        .transform(&transform))
}

/// Subtract every tool from `base`, one face at a time in face order
pub fn engrave(
    base: &Mesh<Surface>,
    frames: &[FaceFrame],
    numbers: &[u32],
    tools: &[Mesh<Surface>],
) -> Result<Mesh<Surface>, DiceError> {
    if frames.len() != numbers.len() || frames.len() != tools.len() {
        return Err(DiceError::MalformedBuffer(format!(
            "{} faces, {} numbers and {} tools do not line up",
            frames.len(),
            numbers.len(),
            tools.len()
        )));
    }

    let mut die = base.clone();
    for ((frame, number), tool) in frames.iter().zip(numbers).zip(tools) {
        log::debug!("subtracting {number} from face {}", frame.index);
        die = die.difference(tool);
    }
    Ok(die)
}

/// A finished die together with what went into it
#[derive(Debug, Clone)]
pub struct EngravedDie {
    pub mesh: Mesh<Surface>,
    pub frames: Vec<FaceFrame>,
    pub numbers: Vec<u32>,
    /// Volume before engraving (after rounding)
    pub base_volume: Real,
    /// Bounds before engraving
    pub base_bounds: Aabb,
}

impl EngravedDie {
    pub fn volume(&self) -> Real {
        self.mesh.volume()
    }

    /// Material cut away by the digits
    pub fn removed_volume(&self) -> Real {
        self.base_volume - self.volume()
    }

    /// Mass in grams for a density in g/cm³, reading model units as millimetres
    pub fn estimated_mass(&self, density: Real) -> Real {
        self.volume() / 1000.0 * density
    }
}

/// Step-by-step die construction; [`build_die`] runs all steps.
pub struct DiceBuilder<'a> {
    params: DiceParams,
    font: &'a dyn GlyphFont,
}

impl<'a> DiceBuilder<'a> {
    pub fn new(params: DiceParams, font: &'a dyn GlyphFont) -> Self {
        DiceBuilder { params, font }
    }

    pub const fn params(&self) -> &DiceParams {
        &self.params
    }

    /// Face frames of the base icosahedron, through its indexed buffer
    pub fn frames(&self) -> Result<Vec<FaceFrame>, DiceError> {
        let (positions, indices) = icosahedron_buffer(self.params.dice_size);
        face_frames(&positions, Some(&indices))
    }

    /// The icosahedron, faces tagged by index, rounded when asked to
    pub fn base(&self) -> Mesh<Surface> {
        let radius = self.params.dice_size;
        let mut base = Mesh::icosahedron(radius, None);
        for (i, poly) in base.polygons.iter_mut().enumerate() {
            poly.set_metadata(Surface::Face(i));
        }

        if self.params.rounding <= 0.0 {
            return base;
        }
        let midradius = radius * icosahedron_midradius_ratio();
        let sphere_radius = radius - self.params.rounding * (radius - midradius);
        let segments = self.params.sphere_segments;
        log::info!("rounding corners with a sphere of radius {sphere_radius:.3}");
        let sphere = Mesh::sphere(sphere_radius, segments, segments / 2, Some(Surface::Rounding));
        base.intersection(&sphere)
    }

    /// One cutting tool per face, in face order
    pub fn tools(
        &self,
        frames: &[FaceFrame],
        numbers: &[u32],
    ) -> Result<Vec<Mesh<Surface>>, DiceError> {
        #[cfg(feature = "parallel")]
        let tools = frames
            .par_iter()
            .zip(numbers.par_iter())
            .map(|(frame, &number)| glyph_tool(self.font, number, frame, &self.params))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let tools = frames
            .iter()
            .zip(numbers)
            .map(|(frame, &number)| glyph_tool(self.font, number, frame, &self.params))
            .collect();

        tools
    }

    pub fn build(&self) -> Result<EngravedDie, DiceError> {
        self.params.validate()?;

        let frames = self.frames()?;
        let numbers = assign_numbers(&frames, self.params.numbering);
        let base = self.base();
        let base_volume = base.volume();
        let base_bounds = base.bounding_box();

        let tools = self.tools(&frames, &numbers)?;
        let mut mesh = engrave(&base, &frames, &numbers, &tools)?;
        mesh.renormalize();

        let die = EngravedDie { mesh, frames, numbers, base_volume, base_bounds };
        log::info!(
            "engraved {} faces with font {}: {} polygons, volume {:.3} (removed {:.3})",
            die.frames.len(),
            self.font.name(),
            die.mesh.polygons.len(),
            die.volume(),
            die.removed_volume(),
        );
        Ok(die)
    }
}

/// Build an engraved die from `params` with `font`
pub fn build_die(params: &DiceParams, font: &dyn GlyphFont) -> Result<EngravedDie, DiceError> {
    DiceBuilder::new(params.clone(), font).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame_with_normal(normal: Vector3<Real>) -> FaceFrame {
        FaceFrame {
            index: 0,
            center: Point3::new(1.0, 2.0, 3.0),
            normal: Unit::new_normalize(normal),
            apex: Point3::new(1.0, 2.0, 3.0) + Vector3::new(0.3, 0.9, 0.1),
        }
    }

    #[test]
    fn minimal_rotation_maps_z_onto_normal() {
        for n in [Vector3::z(), -Vector3::z(), Vector3::new(1.0, -2.0, 0.5)] {
            let frame = frame_with_normal(n);
            let m = glyph_transform(&frame, GlyphOrientation::MinimalRotation);
            let mapped = m.transform_vector(&Vector3::z());
            assert_relative_eq!(mapped, frame.normal.into_inner(), epsilon = 1e-12);
            let origin = m.transform_point(&Point3::origin());
            assert_relative_eq!(origin, frame.center, epsilon = 1e-12);
        }
    }

    #[test]
    fn apex_orientation_points_up_at_apex() {
        let frame = frame_with_normal(Vector3::new(0.0, 0.0, 1.0));
        let m = glyph_transform(&frame, GlyphOrientation::Apex);
        let up = m.transform_vector(&Vector3::y());
        assert_relative_eq!(up, Vector3::new(0.3, 0.9, 0.0).normalize(), epsilon = 1e-12);
        // still a proper rotation
        assert_relative_eq!(m.fixed_view::<3, 3>(0, 0).determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn opposite_sum_pairs_antipodes() {
        let (positions, indices) = icosahedron_buffer(1.0);
        let frames = face_frames(&positions, Some(&indices)).expect("frames");
        let numbers = assign_numbers(&frames, Numbering::OppositeSum);
        for (i, fi) in frames.iter().enumerate() {
            let opposite = frames
                .iter()
                .position(|fj| fj.normal.dot(&fi.normal) < -0.999)
                .expect("antipode");
            assert_eq!(numbers[i] + numbers[opposite], 21);
        }
    }

    #[test]
    fn engrave_rejects_mismatched_inputs() {
        let base: Mesh<Surface> = Mesh::cube(1.0, None);
        assert!(matches!(
            engrave(&base, &[], &[1], &[]),
            Err(DiceError::MalformedBuffer(_))
        ));
    }
}
