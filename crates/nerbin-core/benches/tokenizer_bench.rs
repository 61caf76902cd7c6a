use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nerbin_core::pipeline::{Language, Tokenizer};
use nerbin_core::store::DocBin;
use nerbin_core::types::AlignmentMode;

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::new(Language::English).unwrap();

    let inputs = vec![
        "what is the price of polo?",
        "what is the price of t-shirt?",
        "My favourite website is stackoverflow",
        "\"Don't\" she said... (twice)! Visit https://github.com/enrell/nerbin now.",
        "Prices: $5, 10kg, 50% off -- now/later, e.g. Mr. Smith's U.S. store.",
    ];

    c.bench_function("tokenize_single", |b| {
        b.iter(|| tokenizer.tokenize(black_box(inputs[0])));
    });

    c.bench_function("tokenize_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = tokenizer.tokenize(black_box(input));
            }
        });
    });

    c.bench_function("docbin_to_bytes_100", |b| {
        let mut bin = DocBin::new();
        for _ in 0..20 {
            for input in &inputs {
                let mut doc = tokenizer.tokenize(input);
                if let Some(span) = doc.char_span(0, 4, "X", AlignmentMode::Expand) {
                    doc.set_ents(vec![span]);
                }
                bin.add(doc);
            }
        }
        b.iter(|| black_box(&bin).to_bytes().unwrap());
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
