#![cfg(feature = "stl-io")]

mod support;

use dicecarve::{
    font::BlockFont,
    io::StlFormat,
    mesh::Mesh,
    traits::CSG,
    triangulated::Triangulated3D,
};

use crate::support::{approx_eq, small_die};

#[test]
fn ascii_stl_has_a_facet_per_triangle() {
    let cube: Mesh<()> = Mesh::cube(2.0, None);
    let text = cube.to_stl_ascii("cube");

    assert!(text.starts_with("solid cube\n"));
    assert!(text.trim_end().ends_with("endsolid cube"));
    assert_eq!(text.matches("facet normal").count(), 12);
    assert_eq!(text.matches("vertex ").count(), 36);
}

#[test]
fn binary_stl_round_trips_the_cube() {
    let cube: Mesh<()> = Mesh::cube(2.0, None);
    let bytes = cube.to_stl_binary().expect("in-memory write");
    // header, count, then 50 bytes per facet
    assert_eq!(bytes.len(), 84 + 12 * 50);

    let back: Mesh<()> = Mesh::from_stl(&bytes, None).expect("readable STL");
    assert_eq!(back.polygons.len(), 12);
    assert!(approx_eq(back.volume(), 8.0, 1e-5));
    assert!(back.is_manifold());
}

#[test]
fn ascii_stl_reads_back() {
    let cube: Mesh<()> = Mesh::cube(1.0, None).translate(1.0, 0.0, 0.0);
    let text = cube.to_stl_ascii("moved");
    let back: Mesh<()> = Mesh::from_stl(text.as_bytes(), None).expect("readable STL");
    assert_eq!(back.triangle_count(), 12);
    assert!(approx_eq(back.bounding_box().mins.x, 1.0, 1e-6));
}

#[test]
fn garbage_is_not_an_stl() {
    assert!(Mesh::<()>::from_stl(b"not an stl", None).is_err());
}

#[test]
fn engraved_die_writes_to_disk() {
    let die = dicecarve::build_die(&small_die(), &BlockFont::default()).expect("die builds");
    let path = std::env::temp_dir().join(format!("dicecarve-test-{}.stl", std::process::id()));

    die.mesh.write_stl(&path, StlFormat::Binary).expect("writable temp dir");
    let bytes = std::fs::read(&path).expect("file was written");
    std::fs::remove_file(&path).ok();

    let back: Mesh<()> = Mesh::from_stl(&bytes, None).expect("readable STL");
    // single precision may collapse a few slivers, which the reader drops
    assert!(back.triangle_count() <= die.mesh.triangle_count());
    assert!(back.triangle_count() > die.mesh.triangle_count() / 2);
    assert!(approx_eq(back.volume(), die.volume(), 1e-2));
}

#[test]
fn ascii_file_is_named_after_its_stem() {
    let cube: Mesh<()> = Mesh::cube(1.0, None);
    let path =
        std::env::temp_dir().join(format!("dicecarve-named-{}.stl", std::process::id()));

    cube.write_stl(&path, StlFormat::Ascii).expect("writable temp dir");
    let text = std::fs::read_to_string(&path).expect("file was written");
    std::fs::remove_file(&path).ok();

    let stem = path.file_stem().and_then(|s| s.to_str()).expect("utf-8 stem");
    assert!(text.starts_with(&format!("solid {stem}")));
}
