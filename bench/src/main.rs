use fascan::input::*;
use fascan::*;

use needletail::{parse_fastx_file, parse_fastx_reader};
use paraseq::{Record as _, fastx};
use regex::bytes::RegexBuilder;

use std::env::args;
use std::fs::read;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

const FULL: Config = ParserOptions::default().config();
const NAME_SEQUENCE: Config = ParserOptions::default().ignore_comments().config();
const LENGTH_ONLY: Config = ParserOptions::default()
    .ignore_comments()
    .ignore_sequence()
    .config();

struct Setup<'a, P: AsRef<Path>> {
    path: P,
    data: &'a [u8],
    size: u64,
    rep: u64,
    compressed: bool,
}

fn throughput(size: u64, rep: u64, now: Instant) -> f64 {
    (size * rep) as f64 / 1e9 / now.elapsed().as_secs_f64()
}

fn drain<const CONFIG: Config, I: std::io::Read>(reader: FastaReader<CONFIG, I>) {
    for record in reader {
        black_box(record.expect("invalid record"));
    }
}

fn bench_config<const CONFIG: Config, P: AsRef<Path>>(label: &str, s: &Setup<P>) {
    let now = Instant::now();
    for _ in 0..s.rep {
        drain(FastaReader::<CONFIG, _>::from_file(&s.path).expect("Cannot open file"));
    }
    println!("{label} (file):\t {:5.2} GB/s", throughput(s.size, s.rep, now));

    if !s.compressed {
        let now = Instant::now();
        for _ in 0..s.rep {
            drain(FastaReader::<CONFIG, _>::from_file_mmap(&s.path).expect("Cannot map file"));
        }
        println!("{label} (mmap):\t {:5.2} GB/s", throughput(s.size, s.rep, now));

        let now = Instant::now();
        for _ in 0..s.rep {
            drain(FastaReader::<CONFIG, _>::from_slice(s.data).expect("invalid input"));
        }
        println!("{label} (slice):\t {:5.2} GB/s", throughput(s.size, s.rep, now));
    } else {
        let now = Instant::now();
        for _ in 0..s.rep {
            drain(FastaReader::<CONFIG, _>::from_reader(s.data).expect("invalid input"));
        }
        println!("{label} (reader):\t {:5.2} GB/s", throughput(s.size, s.rep, now));
    }
}

fn main() {
    let path = args().nth(1).expect("No input file given");
    let content = read(&path).expect("Cannot open file");
    let data = content.as_slice();
    let size = data.len() as u64;
    let mut input_file = FileInput::open(&path).expect("Cannot open file");
    let compressed = input_file.is_compressed().unwrap();
    let rep = 3;

    let s = Setup {
        path: &path,
        data,
        size,
        compressed,
        rep,
    };

    if !compressed {
        let match_header = RegexBuilder::new(r"(>[^\n]*\n)").build().unwrap();
        let now = Instant::now();
        for _ in 0..rep {
            match_header.find_iter(data).for_each(|m| {
                black_box(m);
            });
        }
        println!("Regex header (slice):\t {:5.2} GB/s", throughput(size, rep, now));
    }

    let now = Instant::now();
    for _ in 0..rep {
        let mut reader = parse_fastx_file(&path).expect("invalid file");
        while let Some(r) = reader.next() {
            let record = r.expect("invalid record");
            black_box(record.seq());
        }
    }
    println!("Needletail (file):\t {:5.2} GB/s", throughput(size, rep, now));

    let now = Instant::now();
    for _ in 0..rep {
        let mut reader = parse_fastx_reader(data).expect("invalid reader");
        while let Some(r) = reader.next() {
            let record = r.expect("invalid record");
            black_box(record.seq());
        }
    }
    println!("Needletail (reader):\t {:5.2} GB/s", throughput(size, rep, now));

    if !compressed {
        let now = Instant::now();
        for _ in 0..rep {
            let mut reader =
                fastx::Reader::from_path_with_batch_size(&path, 1).expect("invalid file");
            let mut record_set = reader.new_record_set();
            while record_set.fill(&mut reader).unwrap() {
                for r in record_set.iter() {
                    let record = r.expect("invalid record");
                    black_box(record.seq());
                }
            }
        }
        println!("Paraseq (file):\t\t {:5.2} GB/s", throughput(size, rep, now));
    }

    println!("---");

    bench_config::<FULL, _>("Full record", &s);
    bench_config::<NAME_SEQUENCE, _>("Name + sequence", &s);
    bench_config::<LENGTH_ONLY, _>("Length only", &s);
}
