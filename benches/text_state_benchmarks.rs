//! Benchmarks for operator replay and text decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf_layout_state::content::{Matrix, Operator, TextElement};
use pdf_layout_state::fonts::{decode_text, Font, FontEncoding};
use pdf_layout_state::layout::{LayoutInterpreter, TextStateParams};
use std::collections::HashMap;
use std::sync::Arc;

fn page_operators(lines: usize) -> Vec<Operator> {
    let mut ops = vec![
        Operator::SaveState,
        Operator::Cm {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 36.0,
            f: 36.0,
        },
        Operator::BeginText,
        Operator::Tf {
            font: "F1".to_string(),
            size: 10.0,
        },
        Operator::TL { leading: 12.0 },
    ];
    for _ in 0..lines {
        ops.push(Operator::TStar);
        ops.push(Operator::TJ {
            array: vec![
                TextElement::String(b"The quick brown".to_vec()),
                TextElement::Offset(-120.0),
                TextElement::String(b"fox jumps".to_vec()),
            ],
        });
    }
    ops.push(Operator::EndText);
    ops.push(Operator::RestoreState);
    ops
}

fn bench_replay(c: &mut Criterion) {
    let mut fonts = HashMap::new();
    let font = Font::new("Type1", 278.0).with_encoding(FontEncoding::Codec("latin-1".into()));
    fonts.insert("F1".to_string(), Arc::new(font));
    let ops = page_operators(60);

    c.bench_function("replay_60_lines", |b| {
        b.iter(|| {
            let mut interp = LayoutInterpreter::new(&fonts);
            let mut count = 0usize;
            interp
                .run(black_box(&ops), &mut |_: TextStateParams| count += 1)
                .unwrap();
            count
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let utf16 = Font::new("Type0", 500.0).with_encoding(FontEncoding::Codec("utf-16-be".into()));
    let bytes: Vec<u8> = "Layout preserving extraction"
        .encode_utf16()
        .flat_map(|u| u.to_be_bytes())
        .collect();

    c.bench_function("decode_utf16_be", |b| {
        b.iter(|| decode_text(black_box(&bytes), Some(&utf16)).unwrap())
    });
}

fn bench_compose(c: &mut Criterion) {
    let m = Matrix::new(0.8, 0.1, -0.1, 0.8, 12.0, 700.0);
    c.bench_function("matrix_multiply", |b| {
        b.iter(|| black_box(m).multiply(black_box(&m)))
    });
}

criterion_group!(benches, bench_replay, bench_decode, bench_compose);
criterion_main!(benches);
