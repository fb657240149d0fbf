/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use invaders_8080::opcode;

#[derive(Parser, Debug)]
#[command(about = "Prints an 8080 listing of a raw binary image", long_about = None)]
struct CommandLineArgs {
    /// raw binary file
    file: PathBuf,

    /// offset in the file where the listing starts (decimal or 0x prefixed)
    #[arg(long, default_value = "0", value_parser = parse_number)]
    start: usize,

    /// address at which the file is loaded, added to the printed addresses
    #[arg(long, default_value = "0", value_parser = parse_number)]
    origin: usize,
}

fn parse_number(text: &str) -> Result<usize, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid number {}: {}", text, e))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CommandLineArgs::parse();
    let program = fs::read(&args.file)?;

    let mut offset = args.start;
    while offset < program.len() {
        let (text, size) = opcode::disassemble(&program, offset);
        println!("0x{:04x} - {}", args.origin + offset, text);
        offset += size as usize;
    }
    Ok(())
}
