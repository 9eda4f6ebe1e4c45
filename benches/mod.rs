use criterion::{criterion_group, criterion_main};

mod shell;

criterion_group!(
    benches,
    shell::bench_step,
    shell::bench_edit_in_middle,
    shell::bench_tokenize,
    shell::bench_printf
);
criterion_main!(benches);
