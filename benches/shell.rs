use criterion::{Criterion, Throughput, black_box};
use ushell::format::{Arg, write_formatted};
use ushell::io::{ByteSink, Detached};
use ushell::shell::{Shell, Terminal, tokenize};

/// Sink that discards output, so only shell work is measured
struct Discard;

impl ByteSink for Discard {
    type Error = ();

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        black_box(byte);
        Ok(())
    }
}

fn add(term: &mut Terminal<Discard>, argc: usize, argv: &[&str]) -> i32 {
    if argc != 3 {
        return 1;
    }
    let a: i32 = argv[1].parse().unwrap_or(0);
    let b: i32 = argv[2].parse().unwrap_or(0);
    let _ = term.printf("%d\r\n", &[Arg::Int(i64::from(a + b))]);
    0
}

pub fn bench_step(c: &mut Criterion) {
    let line = b"add 1234 5678\r";
    let mut shell = Shell::init(Detached, Discard, None).unwrap();
    shell.register(&add, "add").unwrap();

    let mut group = c.benchmark_group("shell");
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("step_full_line", |b| {
        b.iter(|| {
            for &byte in line {
                black_box(shell.process_byte(byte).unwrap());
            }
        })
    });
    group.finish();
}

pub fn bench_edit_in_middle(c: &mut Criterion) {
    // Type a line, walk to its start, insert and erase there, then submit
    let mut input = b"set frequency 700".to_vec();
    for _ in 0..16 {
        input.extend_from_slice(b"\x1b[D");
    }
    input.extend_from_slice(b"xx\x08\x08\r");

    let mut shell = Shell::init(Detached, Discard, None).unwrap();

    let mut group = c.benchmark_group("shell");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("edit_in_middle", |b| {
        b.iter(|| black_box(shell.input(&input).unwrap()))
    });
    group.finish();
}

pub fn bench_tokenize(c: &mut Criterion) {
    let line = "  config   set   wpm 25   tone 700  ";
    c.bench_function("tokenize", |b| b.iter(|| black_box(tokenize(black_box(line)))));
}

pub fn bench_printf(c: &mut Criterion) {
    let args = [Arg::Str("adc"), Arg::Uint(3), Arg::Int(-1234567), Arg::Uint(0xbeef)];
    c.bench_function("printf", |b| {
        b.iter(|| {
            write_formatted(&mut Discard, black_box("%s[%u] = %d (0x%04X)\r\n"), &args).unwrap()
        })
    });
}
