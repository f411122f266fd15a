#![cfg(feature = "truetype-text")]

mod support;

use approx::assert_relative_eq;
use dicecarve::{
    DiceParams, build_die,
    font::{GlyphFont, TrueTypeFont},
};
use geo::BoundingRect;

use crate::support::{assert_pockets_within_depth, pocket_volume};

fn dejavu() -> TrueTypeFont {
    let font_data = include_bytes!("fonts/DejaVuSans.ttf");
    TrueTypeFont::from_bytes(font_data.to_vec(), 12).expect("bundled font parses")
}

#[test]
fn zero_is_size_tall() {
    let font = dejavu();
    for size in [1.0, 2.5] {
        let rect = font.outline("0", size).expect("digit").bounding_rect().expect("not empty");
        // flattened curves may fall a hair short of the font's own bbox
        assert_relative_eq!(rect.height(), size, epsilon = 1e-3 * size);
    }
}

#[test]
fn counters_become_holes() {
    let font = dejavu();

    let zero = font.outline("0", 1.5).expect("digit");
    assert_eq!(zero.0.len(), 1);
    assert_eq!(zero.0[0].interiors().len(), 1);

    let eight = font.outline("8", 1.5).expect("digit");
    assert_eq!(eight.0.len(), 1);
    assert_eq!(eight.0[0].interiors().len(), 2);

    let one = font.outline("1", 1.5).expect("digit");
    assert!(one.0.iter().all(|p| p.interiors().is_empty()));
}

#[test]
fn digits_advance_left_to_right() {
    let font = dejavu();
    let one = font.outline("1", 1.0).expect("digit").bounding_rect().expect("not empty");
    let eleven = font.outline("11", 1.0).expect("digits").bounding_rect().expect("not empty");
    assert!(eleven.width() > 1.5 * one.width());
    assert_relative_eq!(eleven.height(), one.height(), epsilon = 1e-9);
}

#[test]
fn truetype_die_pockets_match_outlines() {
    let font = dejavu();
    let params = DiceParams::default();
    let die = build_die(&params, &font).expect("die builds");

    let expected = pocket_volume(&font, &die.numbers, &params);
    assert_relative_eq!(die.removed_volume(), expected, epsilon = 1e-4);
    assert_pockets_within_depth(&die, params.depth);
    assert!(!font.name().is_empty());
}
