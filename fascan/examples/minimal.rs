use fascan::input::*;
use fascan::*;

// set the options of the parser (at compile-time)
const CONFIG: Config = ParserOptions::default().config();

fn main() {
    let path = std::env::args().nth(1).expect("No input file given");

    // create a parser with the desired options
    let mut reader = FastaReader::<CONFIG, _>::from_file(&path).expect("Cannot open file");

    // read records until the input is exhausted or invalid
    while !reader.is_done() {
        let record = match reader.read_record() {
            Ok(record) => record,
            Err(e) => {
                eprintln!("{path}: {e}");
                std::process::exit(1);
            }
        };
        println!(
            "{}\t{}\t{}",
            record.name(),
            record.comment().unwrap_or("-"),
            record.sequence_len()
        );
    }
}
