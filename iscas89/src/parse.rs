use bnet_netlist::{Error, ParseError};
use yap::types::StrTokens;
use yap::{IntoTokens, Tokens};

/// One statement of a bench file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement {
    Input(String),
    Output(String),
    /// `output = GATE(args...)`, with the gate keyword as written.
    Assign { output: String, gate: String, args: Vec<String> },
}

fn parse_space(t: &mut impl Tokens<Item = char>) -> bool {
    t.skip_while(|c| c.is_whitespace()) > 0
}

fn parse_comment(t: &mut impl Tokens<Item = char>) -> bool {
    if !t.token('#') {
        return false;
    }
    t.skip_while(|&c| c != '\n');
    true
}

/// Newlines are ordinary whitespace; statements end at their closing parenthesis.
fn parse_blank(t: &mut impl Tokens<Item = char>) -> bool {
    let mut blank = false;
    while parse_space(t) || parse_comment(t) {
        blank = true;
    }
    blank
}

#[must_use]
fn parse_symbol(t: &mut impl Tokens<Item = char>, symbol: char) -> Option<()> {
    if !t.token(symbol) {
        return None;
    }
    Some(())
}

fn is_name_char(c: &char) -> bool {
    !c.is_whitespace() && !matches!(c, '#' | '=' | '(' | ')' | ',')
}

fn parse_name(t: &mut impl Tokens<Item = char>) -> Option<String> {
    let name: String = t.take_while(is_name_char).collect();
    if name.is_empty() {
        return None;
    }
    Some(name)
}

fn parse_args(t: &mut impl Tokens<Item = char>) -> Option<Vec<String>> {
    parse_symbol(t, '(')?;
    parse_blank(t);
    let mut args = Vec::new();
    if let Some(first) = t.optional(|t| parse_name(t)) {
        args.push(first);
        while let Some(arg) = t.optional(|t| {
            parse_blank(t);
            parse_symbol(t, ',')?;
            parse_blank(t);
            parse_name(t)
        }) {
            args.push(arg);
        }
    }
    parse_blank(t);
    parse_symbol(t, ')')?;
    Some(args)
}

fn parse_declaration(t: &mut impl Tokens<Item = char>, keyword: &str) -> Option<Statement> {
    let args = parse_args(t)?;
    let [name] = <[String; 1]>::try_from(args).ok()?;
    if keyword.eq_ignore_ascii_case("INPUT") {
        Some(Statement::Input(name))
    } else if keyword.eq_ignore_ascii_case("OUTPUT") {
        Some(Statement::Output(name))
    } else {
        None
    }
}

fn parse_assign(t: &mut impl Tokens<Item = char>, output: String) -> Option<Statement> {
    parse_symbol(t, '=')?;
    parse_blank(t);
    let gate = parse_name(t)?;
    parse_blank(t);
    let args = parse_args(t)?;
    Some(Statement::Assign { output, gate, args })
}

fn parse_statement(t: &mut impl Tokens<Item = char>) -> Option<Statement> {
    let name = parse_name(t)?;
    parse_blank(t);
    match t.optional(|t| parse_declaration(t, &name)) {
        Some(statement) => Some(statement),
        None => parse_assign(t, name),
    }
}

/// Statements of a whole bench source, each with the 1-based line it starts on.
///
/// Iteration stops after the first malformed statement.
pub(crate) struct Statements<'a> {
    tokens: StrTokens<'a>,
    line: usize,
    counted: usize,
}

impl<'a> Statements<'a> {
    pub fn new(source: &'a str) -> Self {
        Statements { tokens: source.into_tokens(), line: 1, counted: 0 }
    }

    fn current_line(&mut self) -> usize {
        let consumed = self.tokens.consumed();
        self.line += consumed[self.counted..].matches('\n').count();
        self.counted = consumed.len();
        self.line
    }
}

impl Iterator for Statements<'_> {
    type Item = Result<(usize, Statement), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        parse_blank(&mut self.tokens);
        if self.tokens.eof() {
            return None;
        }
        let line = self.current_line();
        let start = self.tokens.location();
        if let Some(statement) = parse_statement(&mut self.tokens) {
            return Some(Ok((line, statement)));
        }
        self.tokens.set_location(start);
        let excerpt = self.tokens.remaining().lines().next().unwrap_or_default().trim();
        self.tokens.skip_while(|_| true);
        Some(Err(Error::syntax(format!("malformed statement `{excerpt}`")).at(line)))
    }
}
