//! Tests for show-text decoding and the character substitution table.

use pdf_layout_state::error::Error;
use pdf_layout_state::fonts::{decode_text, Font, FontEncoding};
use pdf_layout_state::layout::TextStateManager;
use std::collections::HashMap;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn codec(name: &str) -> Font {
    Font::new("Type0", 250.0).with_encoding(FontEncoding::Codec(name.to_string()))
}

#[test]
fn test_ascii_round_trips_through_codec() {
    let input = b"Hello, World! 0123456789 ~";
    let text = decode_text(input, Some(&codec("utf-8"))).unwrap();
    assert_eq!(text.as_bytes(), input);
}

#[test]
fn test_undecodable_bytes_do_not_fail() {
    init_logging();
    let text = decode_text(&[0xff, 0xfe, 0x41], Some(&codec("utf-8"))).unwrap();
    assert!(text.contains('\u{FFFD}'));
    assert!(text.ends_with('A'));
}

#[test]
fn test_decode_without_font() {
    let mgr = TextStateManager::new();
    assert!(matches!(mgr.decode(b"x"), Err(Error::FontNotSet)));
    assert!(matches!(decode_text(b"x", None), Err(Error::FontNotSet)));
}

#[test]
fn test_differences_table_with_substitutions() {
    // A subset font: code 0x03 is drawn with a glyph the char map names
    let mut table = HashMap::new();
    table.insert(0x03u8, "\u{E001}".to_string());
    let font = Font::new("TrueType", 250.0)
        .with_encoding(FontEncoding::Table(table))
        .with_char_mapping('\u{E001}', "ﬀ");

    let mut mgr = TextStateManager::new();
    mgr.set_font(Arc::new(font), 11.0);
    let params = mgr.text_state_params(&[b'o', 0x03, b'e', b'r'][..]).unwrap();
    assert_eq!(params.text(), "oﬀer");
}

#[test]
fn test_utf16_with_substitution() {
    init_logging();
    // Presentation form back to the base letter
    let font = codec("UTF-16-BE").with_char_mapping('\u{FE8D}', "\u{0627}");
    let text = decode_text(&[0xfe, 0x8d, 0x00, 0x20], Some(&font)).unwrap();
    assert_eq!(text, "\u{0627} ");
}
