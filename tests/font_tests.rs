use dicecarve::{
    DiceError,
    font::{BlockFont, GlyphFont},
    sketch::Sketch,
};
use geo::{Area, BoundingRect};

#[test]
fn block_digits_are_size_tall() {
    let font = BlockFont::default();
    for digit in '0'..='9' {
        let outline = font.outline(&digit.to_string(), 2.5).expect("digit");
        let rect = outline.bounding_rect().expect("not empty");
        assert!((rect.height() - 2.5).abs() < 1e-12, "{digit}");
        assert!(rect.min().y.abs() < 1e-12, "{digit} sits on the baseline");
    }
}

#[test]
fn fonts_work_behind_a_trait_object() {
    let fonts: Vec<Box<dyn GlyphFont>> = vec![Box::new(BlockFont::new(false))];
    for font in &fonts {
        let outline = font.outline("17", 1.0).expect("digits");
        assert!(outline.unsigned_area() > 0.0);
        assert!(!font.name().is_empty());
    }
}

#[test]
fn unknown_characters_are_reported() {
    let err = BlockFont::default().outline("1x", 1.0).expect_err("no x glyph");
    assert!(matches!(err, DiceError::MissingGlyph('x')));
}

#[test]
fn marked_nine_is_taller_below_the_baseline() {
    let plain = BlockFont::new(false).outline("9", 1.0).expect("digit");
    let marked = BlockFont::new(true).outline("9", 1.0).expect("digit");
    let plain_rect = plain.bounding_rect().expect("not empty");
    let marked_rect = marked.bounding_rect().expect("not empty");

    assert!(marked_rect.min().y < plain_rect.min().y);
    assert!(marked.unsigned_area() > plain.unsigned_area());
    // 19 is unambiguous, so no bar
    let teen = BlockFont::new(true).outline("19", 1.0).expect("digits");
    assert!(teen.bounding_rect().expect("not empty").min().y.abs() < 1e-12);
}

#[test]
fn outlines_extrude_into_closed_tools() {
    let outline = BlockFont::default().outline("8", 1.0).expect("digit");
    let area = outline.unsigned_area();
    let tool = Sketch::<()>::from_geo(outline, None).extrude(0.5);
    assert!((tool.volume() - area * 0.5).abs() < 1e-9);
    assert!(tool.is_manifold());
}

#[cfg(feature = "truetype-text")]
#[test]
fn truetype_rejects_garbage() {
    let err = dicecarve::font::TrueTypeFont::from_bytes(vec![0u8; 64], 8).expect_err("not a font");
    assert!(matches!(err, DiceError::Font(_)));
}

#[cfg(feature = "truetype-text")]
#[test]
fn truetype_missing_file_is_an_io_error() {
    let err = dicecarve::font::TrueTypeFont::from_file("/nonexistent/font.ttf", 8)
        .expect_err("no such file");
    assert!(matches!(err, DiceError::Io(_)));
}
