use criterion::{Criterion, black_box, criterion_group, criterion_main};
use retag_matrix::{ParseOptions, generate_matrix, parse_retags};

fn benchmark_parse_retags(c: &mut Criterion) {
    let yaml = r#"
images:
  - source: docker.io/library/alpine
    tags:
      - latest
      - "3.20"
  - source: gcr.io/distroless/static
    destination: unlisted/mirror/gcr/distroless/static
    tags:
      - debug
      - latest
      - nonroot
  - source: nvcr.io/nvidia/tritonserver
    tool: oras
    tags:
      - 22.05-py3
"#;
    let options = ParseOptions::default();

    c.bench_function("parse_retags_small", |b| {
        b.iter(|| parse_retags(black_box(yaml), &options).expect("parse failed"))
    });
}

fn benchmark_large_config_parse(c: &mut Criterion) {
    let mut yaml = String::from("images:\n");
    for i in 0..100 {
        yaml.push_str(&format!(
            "  - source: docker.io/library/image{i}\n    tags: [latest]\n"
        ));
    }
    let options = ParseOptions::default();

    c.bench_function("parse_100_images", |b| {
        b.iter(|| parse_retags(black_box(&yaml), &options).expect("parse failed"))
    });
}

fn benchmark_generate_matrix(c: &mut Criterion) {
    let mut yaml = String::from("images:\n");
    for i in 0..100 {
        yaml.push_str(&format!(
            "  - source: docker.io/library/image-{i}.x\n    tags: [latest, stable]\n"
        ));
    }
    let options = ParseOptions::default();
    let entries = parse_retags(&yaml, &options).expect("parse failed");

    c.bench_function("generate_matrix_100_entries", |b| {
        b.iter(|| generate_matrix(black_box(&entries)))
    });
}

criterion_group!(
    benches,
    benchmark_parse_retags,
    benchmark_large_config_parse,
    benchmark_generate_matrix
);
criterion_main!(benches);
