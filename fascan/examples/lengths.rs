use fascan::input::*;
use fascan::*;

// sequences are measured but never stored
const CONFIG: Config = ParserOptions::default()
    .ignore_comments()
    .ignore_sequence()
    .config();

fn main() {
    let mut reader = FastaReader::<CONFIG, _>::from_stdin().expect("Cannot read stdin");
    let mut total = 0;
    for record in &mut reader {
        let record = record.expect("Invalid record");
        total += record.sequence_len();
        println!("{}\t{}", record.name(), record.sequence_len());
    }
    eprintln!("{} records, {total} residues", reader.records_read());
}
