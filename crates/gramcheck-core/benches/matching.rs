use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gramcheck_core::matcher::{answer_matches, normalize};

fn bench_normalize(c: &mut Criterion) {
    let input = "  I   Have  Been \t WORKING here  since   2019  ";
    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(input))));
}

fn bench_answer_matches(c: &mut Criterion) {
    let accepted = vec![
        "I have been working here since 2019".to_string(),
        "I've been working here since 2019".to_string(),
        "have been working".to_string(),
    ];
    c.bench_function("answer_matches", |b| {
        b.iter(|| answer_matches(black_box("  i've been   working here since 2019"), &accepted))
    });
}

criterion_group!(benches, bench_normalize, bench_answer_matches);
criterion_main!(benches);
