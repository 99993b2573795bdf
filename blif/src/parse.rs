use std::io::BufRead;

use bnet_netlist::{
    Cover, DffInit, Error, Fanin, Literal, NameResolver, Network, NetworkBuilder, ParseError, PendingRef, ReadOptions,
};

use crate::lines::LogicalLines;

/// Directives that only carry timing or physical information.
const SKIPPED_DIRECTIVES: &[&str] = &[
    ".wire_load_slope",
    ".wire",
    ".input_arrival",
    ".default_input_arrival",
    ".output_required",
    ".default_output_required",
    ".input_drive",
    ".default_input_drive",
    ".output_load",
    ".default_output_load",
    ".area",
    ".delay",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing but blank lines and comments so far.
    Start,
    /// After `.model`.
    Body,
    /// Inside an `.exdc` section, up to its `.end`.
    Exdc,
    /// After `.end`.
    Ended,
}

/// A `.names` block whose cover rows are still being read.
struct OpenCover {
    line: usize,
    output: String,
    fanins: Vec<PendingRef>,
    cubes: Vec<Vec<Literal>>,
    phase: Option<bool>,
}

impl OpenCover {
    fn add_row(&mut self, tokens: &[String]) -> Result<(), Error> {
        let input_num = self.fanins.len();
        let (cube, output) = match (input_num, tokens) {
            (0, [output]) => ("", output),
            (1.., [cube, output]) => (cube.as_str(), output),
            _ => {
                return Err(Error::malformed_cover(format!(
                    "expected {} fields in a row of `{}`, got {}",
                    if input_num == 0 { 1 } else { 2 },
                    self.output,
                    tokens.len()
                )));
            }
        };
        if cube.chars().count() != input_num {
            return Err(Error::malformed_cover(format!(
                "cube `{cube}` of `{}` should have {input_num} literals",
                self.output
            )));
        }
        let cube = cube
            .chars()
            .map(|c| Literal::from_char(c).ok_or_else(|| Error::malformed_cover(format!("illegal literal `{c}`"))))
            .collect::<Result<Vec<_>, _>>()?;
        let phase = match output.as_str() {
            "0" => false,
            "1" => true,
            _ => return Err(Error::malformed_cover(format!("illegal output value `{output}`"))),
        };
        match self.phase {
            Some(expected) if expected != phase => {
                return Err(Error::malformed_cover(format!("mixed output values in cover of `{}`", self.output)));
            }
            _ => self.phase = Some(phase),
        }
        self.cubes.push(cube);
        Ok(())
    }
}

struct BlifParser {
    builder: NetworkBuilder,
    resolver: NameResolver,
    state: State,
    cover: Option<OpenCover>,
}

impl BlifParser {
    fn new(options: &ReadOptions) -> Self {
        BlifParser {
            builder: NetworkBuilder::with_options("", options),
            resolver: NameResolver::new(),
            state: State::Start,
            cover: None,
        }
    }

    fn close_cover(&mut self) -> Result<(), ParseError> {
        let Some(cover) = self.cover.take() else {
            return Ok(());
        };
        // A cover without rows is constant zero.
        let function = Cover::with_cubes(cover.fanins.len(), cover.phase.unwrap_or(true), cover.cubes);
        let node = self.builder.add_logic(cover.output.as_str(), cover.fanins.into_iter().map(Fanin::from), function);
        self.resolver.declare(&cover.output, node).map_err(|error| error.at(cover.line))?;
        Ok(())
    }

    fn statement(&mut self, line: usize, tokens: &[String]) -> Result<(), Error> {
        let directive = tokens[0].as_str();
        let args = &tokens[1..];
        match self.state {
            State::Ended => {
                tracing::warn!(line, "ignoring `{directive}` after `.end`");
                return Ok(());
            }
            State::Exdc => {
                if directive == ".end" {
                    tracing::debug!(line, "end of `.exdc` section");
                    self.state = State::Ended;
                }
                return Ok(());
            }
            State::Start if directive != ".model" => {
                return Err(Error::syntax(format!("expected `.model`, found `{directive}`")));
            }
            State::Start | State::Body => (),
        }

        if !directive.starts_with('.') {
            return match &mut self.cover {
                Some(cover) => cover.add_row(tokens),
                None => Err(Error::syntax(format!("cover row `{}` outside of `.names`", tokens.join(" ")))),
            };
        }

        match directive {
            ".model" => {
                if self.state == State::Start {
                    let [name] = args else {
                        return Err(Error::syntax("`.model` takes exactly one name"));
                    };
                    tracing::debug!(line, model = %name, "reading model");
                    self.builder.set_name(name.as_str());
                    self.state = State::Body;
                } else {
                    tracing::warn!(line, "ignoring repeated `.model`");
                }
            }
            ".inputs" => {
                if args.is_empty() {
                    tracing::warn!(line, "empty `.inputs`");
                }
                for name in args {
                    let node = self.builder.add_input_port(name);
                    self.resolver.declare(name, node)?;
                }
            }
            ".outputs" => {
                if args.is_empty() {
                    tracing::warn!(line, "empty `.outputs`");
                }
                for name in args {
                    let src = self.resolver.reference(name);
                    self.builder.add_output_port(name, src);
                }
            }
            ".names" => {
                let Some((output, inputs)) = args.split_last() else {
                    return Err(Error::syntax("`.names` requires an output name"));
                };
                let fanins = inputs.iter().map(|name| self.resolver.reference(name)).collect();
                self.cover = Some(OpenCover { line, output: output.clone(), fanins, cubes: Vec::new(), phase: None });
            }
            ".latch" => self.latch(args)?,
            ".end" => self.state = State::Ended,
            ".exdc" => {
                tracing::debug!(line, "skipping `.exdc` section");
                self.state = State::Exdc;
            }
            _ if SKIPPED_DIRECTIVES.contains(&directive) => {
                tracing::debug!(line, "skipping `{directive}`");
            }
            _ => return Err(Error::syntax(format!("unsupported directive `{directive}`"))),
        }
        Ok(())
    }

    fn latch(&mut self, args: &[String]) -> Result<(), Error> {
        let (input, output, init) = match args {
            [input, output] | [input, output, _, _] => (input, output, None),
            [input, output, init] | [input, output, _, _, init] => (input, output, Some(init)),
            _ => return Err(Error::syntax(format!("`.latch` takes 2 to 5 arguments, got {}", args.len()))),
        };
        let init = match init {
            None => DffInit::Unknown,
            Some(init) => {
                let mut chars = init.chars();
                match (chars.next().and_then(DffInit::from_char), chars.next()) {
                    (Some(init), None) => init,
                    _ => return Err(Error::syntax(format!("illegal `.latch` initial value `{init}`"))),
                }
            }
        };
        let data = self.resolver.reference(input);
        let dff = self.builder.add_dff(output.as_str(), data, init);
        self.resolver.declare(output, self.builder.dff(dff).data_out())?;
        Ok(())
    }

    fn finish(mut self) -> Result<Network, ParseError> {
        self.close_cover()?;
        match self.state {
            State::Start => return Err(Error::syntax("missing `.model`").into()),
            State::Body | State::Exdc => tracing::warn!("missing `.end`"),
            State::Ended => (),
        }
        Ok(self.builder.resolve_and_freeze(&self.resolver)?)
    }
}

pub(crate) fn parse(reader: impl BufRead, options: &ReadOptions) -> Result<Network, ParseError> {
    let mut parser = BlifParser::new(options);
    for line in LogicalLines::new(reader) {
        let (line, tokens) = line?;
        if tokens[0].starts_with('.') {
            parser.close_cover()?;
        }
        parser.statement(line, &tokens).map_err(|error| error.at(line))?;
    }
    parser.finish()
}
