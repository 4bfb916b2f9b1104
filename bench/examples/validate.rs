use fascan::input::*;
use fascan::*;
use needletail::parse_fastx_file;

const CONFIG: Config = ParserOptions::default().config();

fn check_mismatch(left: &[u8], right: &[u8]) -> Option<usize> {
    let len = left.len().min(right.len());
    (0..len).find(|&i| left[i] != right[i]).or({
        if left.len() != right.len() {
            Some(len)
        } else {
            None
        }
    })
}

fn get_scope(slice: &[u8], pos: usize) -> String {
    let start = pos.saturating_sub(10);
    let stop = (pos + 5).min(slice.len());
    String::from_utf8_lossy(&slice[start..stop]).into_owned()
}

fn report(what: &str, line: u64, left: &[u8], right: &[u8]) -> bool {
    match check_mismatch(left, right) {
        Some(pos) => {
            eprintln!("{what} mismatch line {line} pos {pos}");
            eprintln!("Needletail: \t{}", get_scope(left, pos));
            eprintln!("Fascan: \t{}", get_scope(right, pos));
            eprintln!("----------------");
            true
        }
        None => false,
    }
}

fn main() {
    let path = std::env::args().nth(1).expect("No input file given");
    let mut reader = parse_fastx_file(&path).expect("Cannot open file");
    let mut parser = FastaReader::<CONFIG, _>::from_file(&path).expect("Cannot open file");
    while let Some(r) = reader.next() {
        let record = r.expect("Invalid record");
        let line = record.start_line_number();
        let ours = match parser.read_record() {
            Ok(ours) => ours,
            Err(e) => {
                eprintln!("Fascan failed near line {line}: {e}");
                return;
            }
        };

        // needletail keeps the comment inside the id
        let name = record.id().split(|b| b.is_ascii_whitespace()).next();
        if report("Name", line, name.unwrap_or(b""), ours.name().as_bytes())
            || report("Seq", line, &record.seq(), ours.sequence().as_bytes())
        {
            return;
        }
    }
    if !parser.is_done() {
        eprintln!("Fascan found more records than Needletail");
    }
}
