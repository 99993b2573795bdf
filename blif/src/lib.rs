//! Reader for the Berkeley Logic Interchange Format.
//!
//! Supports a single `.model` with `.inputs`, `.outputs`, `.names` covers and `.latch` flip-flops. All
//! latches are clocked by one synthesized clock input (see [`ReadOptions`]); their type and control
//! fields are ignored. `.exdc` sections and timing directives are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bnet_netlist::{Network, ParseError, ReadOptions};

mod lines;
mod parse;

pub fn read_blif(path: impl AsRef<Path>) -> Result<Network, ParseError> {
    read_blif_with(path, &ReadOptions::default())
}

pub fn read_blif_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Network, ParseError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading BLIF");
    let file = File::open(path)?;
    parse_blif_from(BufReader::new(file), options)
}

pub fn parse_blif(text: &str) -> Result<Network, ParseError> {
    parse_blif_from(text.as_bytes(), &ReadOptions::default())
}

pub fn parse_blif_from(reader: impl BufRead, options: &ReadOptions) -> Result<Network, ParseError> {
    parse::parse(reader, options)
}
