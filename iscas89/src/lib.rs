//! Reader for the ISCAS89 `.bench` netlist format.
//!
//! Statements are `INPUT(name)`, `OUTPUT(name)` or `name = GATE(arg, ...)`, with `#` comments running
//! to the end of the line. Line breaks are plain whitespace, so a statement may span lines. Gate
//! keywords are case-insensitive. `DFF` lines become flip-flops clocked by a single synthesized
//! clock input (see [`ReadOptions`]).

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bnet_netlist::{DffInit, Error, Fanin, GateType, NameResolver, Network, NetworkBuilder, ParseError, ReadOptions};

use crate::parse::{Statement, Statements};

mod parse;

/// Name given to every network read from a bench file.
pub const NETWORK_NAME: &str = "iscas89_network";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    /// `INPUT`/`OUTPUT` declarations seen, no gates yet.
    Header,
    Body,
}

struct Iscas89Parser {
    builder: NetworkBuilder,
    resolver: NameResolver,
    state: State,
}

fn gate_type(keyword: &str) -> Option<GateType> {
    Some(match keyword.to_ascii_uppercase().as_str() {
        "AND" => GateType::And,
        "NAND" => GateType::Nand,
        "OR" => GateType::Or,
        "NOR" => GateType::Nor,
        "XOR" => GateType::Xor,
        "XNOR" => GateType::Xnor,
        "NOT" | "INV" => GateType::Not,
        "BUFF" | "BUF" => GateType::Buff,
        "CONST0" => GateType::C0,
        "CONST1" => GateType::C1,
        "MUX" => GateType::Mux,
        _ => return None,
    })
}

impl Iscas89Parser {
    fn new(options: &ReadOptions) -> Self {
        Iscas89Parser {
            builder: NetworkBuilder::with_options(NETWORK_NAME, options),
            resolver: NameResolver::new(),
            state: State::Start,
        }
    }

    fn statement(&mut self, line: usize, statement: Statement) -> Result<(), Error> {
        match statement {
            Statement::Input(name) => {
                self.enter_header(line);
                let node = self.builder.add_input_port(&name);
                self.resolver.declare(&name, node)?;
            }
            Statement::Output(name) => {
                self.enter_header(line);
                let src = self.resolver.reference(&name);
                self.builder.add_output_port(&name, src);
            }
            Statement::Assign { output, gate, args } => {
                if self.state != State::Body {
                    tracing::debug!(line, "first gate");
                    self.state = State::Body;
                }
                self.assign(output, &gate, &args)?;
            }
        }
        Ok(())
    }

    fn enter_header(&mut self, line: usize) {
        match self.state {
            State::Start => self.state = State::Header,
            State::Header => (),
            State::Body => tracing::debug!(line, "declaration after gates"),
        }
    }

    fn assign(&mut self, output: String, gate: &str, args: &[String]) -> Result<(), Error> {
        if gate.eq_ignore_ascii_case("DFF") {
            let [input] = args else {
                return Err(Error::ArityMismatch { gate: "DFF".into(), found: args.len() });
            };
            let data = self.resolver.reference(input);
            let dff = self.builder.add_dff(output.as_str(), data, DffInit::Unknown);
            self.resolver.declare(&output, self.builder.dff(dff).data_out())?;
            return Ok(());
        }
        let Some(gate_type) = gate_type(gate) else {
            return Err(Error::UnknownGateType(gate.to_owned()));
        };
        if !gate_type.accepts_arity(args.len()) {
            return Err(Error::ArityMismatch { gate: gate_type.name().into(), found: args.len() });
        }
        let fanins: Vec<Fanin> = args.iter().map(|arg| self.resolver.reference(arg).into()).collect();
        let node = self.builder.add_logic(output.as_str(), fanins, gate_type);
        self.resolver.declare(&output, node)?;
        Ok(())
    }

    fn finish(self) -> Result<Network, ParseError> {
        if self.state == State::Start {
            tracing::warn!("no declarations or gates");
        }
        Ok(self.builder.resolve_and_freeze(&self.resolver)?)
    }
}

pub fn read_iscas89(path: impl AsRef<Path>) -> Result<Network, ParseError> {
    read_iscas89_with(path, &ReadOptions::default())
}

pub fn read_iscas89_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Network, ParseError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading bench");
    let file = File::open(path)?;
    parse_iscas89_from(BufReader::new(file), options)
}

pub fn parse_iscas89(text: &str) -> Result<Network, ParseError> {
    parse_iscas89_from(text.as_bytes(), &ReadOptions::default())
}

pub fn parse_iscas89_from(mut reader: impl BufRead, options: &ReadOptions) -> Result<Network, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let mut parser = Iscas89Parser::new(options);
    for statement in Statements::new(&source) {
        let (line, statement) = statement?;
        parser.statement(line, statement).map_err(|error| error.at(line))?;
    }
    parser.finish()
}
