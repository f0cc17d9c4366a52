//! Command-line driver for the MD5 library, after the RFC 1321 `mddriver`:
//! digests strings, files, or standard input, and can run the reference test
//! suite or a throughput trial.

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::time::Instant;

use md5_digest::{md5_digest, Md5Hash, Result};

const HELP: &str = "\
Arguments (may be any combination):
\t-sstring - digests string
\t-t       - runs time trial
\t-x       - runs test script
\t-h       - prints this message
\tfilename - digests file
\t(none)   - digests standard input
";

const TEST_BLOCK_LEN: usize = 1000;
const TEST_BLOCK_COUNT: usize = 1000;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        return match digest_stdin() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("md5: stdin: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let mut failed = false;
    for arg in &args {
        if let Some(text) = arg.strip_prefix("-s") {
            digest_string(text);
        } else if arg == "-t" {
            time_trial();
        } else if arg == "-x" {
            test_suite();
        } else if arg == "-h" {
            print!("{HELP}");
        } else if let Err(err) = digest_file(arg) {
            eprintln!("md5: {arg}: {err}");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Digests a string argument and prints the result.
fn digest_string(text: &str) {
    println!("MD5 (\"{}\") = {}", text, Md5Hash::of_str(text));
}

/// Digests a file and prints the result.
fn digest_file(path: &str) -> Result<()> {
    let file = File::open(path)?;
    let hash = Md5Hash::of_reader(BufReader::new(file))?;
    println!("MD5 ({path}) = {hash}");
    Ok(())
}

/// Digests standard input until EOF and prints the bare digest.
fn digest_stdin() -> Result<()> {
    let hash = Md5Hash::of_reader(io::stdin().lock())?;
    println!("{hash}");
    Ok(())
}

/// Measures the time to digest `TEST_BLOCK_COUNT` blocks of
/// `TEST_BLOCK_LEN` bytes each.
fn time_trial() {
    println!("MD5 time trial. Digesting {TEST_BLOCK_COUNT} {TEST_BLOCK_LEN}-byte blocks ...");

    let mut block = [0u8; TEST_BLOCK_LEN];
    for (i, byte) in block.iter_mut().enumerate() {
        *byte = (i & 0xff) as u8;
    }

    let start = Instant::now();
    let mut digest = [0u8; 16];
    for _ in 0..TEST_BLOCK_COUNT {
        digest = md5_digest(&block);
    }
    let elapsed = start.elapsed();

    println!("done");
    println!("Digest = {}", Md5Hash::from_bytes(digest));
    let usecs = elapsed.as_micros();
    println!("Time = {usecs} usecs");
    if usecs > 0 {
        let bytes = (TEST_BLOCK_COUNT * TEST_BLOCK_LEN) as u128;
        println!("Speed = {} bytes/usec", bytes / usecs);
    }
}

/// Digests the RFC 1321 reference strings and prints the results.
fn test_suite() {
    println!("MD5 test suite:");
    let strings = [
        "",
        "a",
        "abc",
        "message digest",
        "abcdefghijklmnopqrstuvwxyz",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
    ];
    for s in strings {
        digest_string(s);
    }
}
