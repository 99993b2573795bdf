use std::io::{self, BufRead};

/// Splits BLIF text into logical lines of whitespace-separated tokens.
///
/// Comments run from `#` to the end of the physical line. A line ending in `\` continues onto the next
/// one. Lines with no tokens are skipped. Each logical line is reported with the 1-based number of
/// its first physical line.
pub(crate) struct LogicalLines<R> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> LogicalLines<R> {
    pub fn new(reader: R) -> Self {
        LogicalLines { reader, line_no: 0 }
    }

    fn read_logical(&mut self) -> io::Result<Option<(usize, Vec<String>)>> {
        let mut physical = String::new();
        loop {
            let mut logical = String::new();
            let mut first_line = None;
            loop {
                physical.clear();
                if self.reader.read_line(&mut physical)? == 0 {
                    break;
                }
                self.line_no += 1;
                if first_line.is_none() {
                    first_line = Some(self.line_no);
                }
                let mut text = physical.trim_end_matches(['\n', '\r']);
                if let Some(position) = text.find('#') {
                    text = &text[..position];
                }
                match text.trim_end().strip_suffix('\\') {
                    Some(continued) => {
                        logical.push_str(continued);
                        logical.push(' ');
                    }
                    None => {
                        logical.push_str(text);
                        break;
                    }
                }
            }
            let Some(line_no) = first_line else {
                return Ok(None);
            };
            let tokens: Vec<String> = logical.split_whitespace().map(str::to_owned).collect();
            if !tokens.is_empty() {
                return Ok(Some((line_no, tokens)));
            }
        }
    }
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<(usize, Vec<String>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_logical().transpose()
    }
}
