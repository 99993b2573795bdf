use std::collections::HashMap;
use std::fmt::Display;

use crate::FuncId;

/// Largest input count for which a truth table is built.
const MAX_ANALYZE_INPUTS: usize = 10;

/// Built-in gate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateType {
    C0,
    C1,
    Buff,
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
    /// `k` select inputs (LSB first) followed by `2^k` data inputs.
    Mux,
}

impl GateType {
    pub fn name(self) -> &'static str {
        match self {
            GateType::C0 => "CONST0",
            GateType::C1 => "CONST1",
            GateType::Buff => "BUFF",
            GateType::Not => "NOT",
            GateType::And => "AND",
            GateType::Nand => "NAND",
            GateType::Or => "OR",
            GateType::Nor => "NOR",
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
            GateType::Mux => "MUX",
        }
    }

    pub fn accepts_arity(self, fanin_num: usize) -> bool {
        match self {
            GateType::C0 | GateType::C1 => fanin_num == 0,
            GateType::Buff | GateType::Not => fanin_num == 1,
            GateType::And | GateType::Nand | GateType::Or | GateType::Nor | GateType::Xor | GateType::Xnor => {
                fanin_num >= 1
            }
            GateType::Mux => mux_select_width(fanin_num).is_some(),
        }
    }

    pub fn eval(self, inputs: &[bool]) -> bool {
        assert!(self.accepts_arity(inputs.len()), "{} cannot take {} inputs", self.name(), inputs.len());
        let all = || inputs.iter().all(|&x| x);
        let any = || inputs.iter().any(|&x| x);
        let parity = || inputs.iter().fold(false, |acc, &x| acc ^ x);
        match self {
            GateType::C0 => false,
            GateType::C1 => true,
            GateType::Buff => inputs[0],
            GateType::Not => !inputs[0],
            GateType::And => all(),
            GateType::Nand => !all(),
            GateType::Or => any(),
            GateType::Nor => !any(),
            GateType::Xor => parity(),
            GateType::Xnor => !parity(),
            GateType::Mux => {
                let width = mux_select_width(inputs.len()).unwrap();
                let select = inputs[..width].iter().enumerate().fold(0, |acc, (i, &x)| acc | (usize::from(x) << i));
                inputs[width + select]
            }
        }
    }
}

impl Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `k` such that `k + 2^k == fanin_num`, the select width of a multiplexer.
pub fn mux_select_width(fanin_num: usize) -> Option<usize> {
    let mut width = 0;
    loop {
        let total = width + (1usize << width);
        if total == fanin_num {
            return Some(width);
        } else if total > fanin_num {
            return None;
        }
        width += 1;
    }
}

/// One position of a cover cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    Zero,
    One,
    DontCare,
}

impl Literal {
    pub fn from_char(c: char) -> Option<Literal> {
        match c {
            '0' => Some(Literal::Zero),
            '1' => Some(Literal::One),
            '-' => Some(Literal::DontCare),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Literal::Zero => '0',
            Literal::One => '1',
            Literal::DontCare => '-',
        }
    }

    pub fn matches(self, value: bool) -> bool {
        match self {
            Literal::Zero => !value,
            Literal::One => value,
            Literal::DontCare => true,
        }
    }
}

/// A sum-of-products cover over `input_num` inputs.
///
/// With `phase == true` the cubes list the on-set; with `phase == false` they list the off-set and the
/// function is the complement of their union. An empty on-set cover is constant zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cover {
    input_num: usize,
    cubes: Vec<Vec<Literal>>,
    phase: bool,
}

impl Cover {
    pub fn new(input_num: usize, phase: bool) -> Self {
        Cover { input_num, cubes: Vec::new(), phase }
    }

    pub fn with_cubes(input_num: usize, phase: bool, cubes: impl IntoIterator<Item = Vec<Literal>>) -> Self {
        let mut cover = Cover::new(input_num, phase);
        for cube in cubes {
            cover.add_cube(cube);
        }
        cover
    }

    pub fn add_cube(&mut self, cube: Vec<Literal>) {
        assert_eq!(cube.len(), self.input_num, "cube width should match cover width");
        self.cubes.push(cube);
    }

    pub fn input_num(&self) -> usize {
        self.input_num
    }

    pub fn cubes(&self) -> &[Vec<Literal>] {
        &self.cubes
    }

    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn eval(&self, inputs: &[bool]) -> bool {
        assert_eq!(inputs.len(), self.input_num);
        let hit = self.cubes.iter().any(|cube| cube.iter().zip(inputs).all(|(literal, &value)| literal.matches(value)));
        hit == self.phase
    }
}

impl Display for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, cube) in self.cubes.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            if cube.is_empty() {
                write!(f, "*")?;
            }
            for literal in cube {
                write!(f, "{}", literal.as_char())?;
            }
        }
        write!(f, "}}={}", u8::from(self.phase))
    }
}

/// The function computed by a logic node from its ordered fanins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicFunction {
    Primitive(GateType),
    Cover(Cover),
}

impl LogicFunction {
    pub fn accepts_arity(&self, fanin_num: usize) -> bool {
        match self {
            LogicFunction::Primitive(gate) => gate.accepts_arity(fanin_num),
            LogicFunction::Cover(cover) => cover.input_num() == fanin_num,
        }
    }

    pub fn eval(&self, inputs: &[bool]) -> bool {
        match self {
            LogicFunction::Primitive(gate) => gate.eval(inputs),
            LogicFunction::Cover(cover) => cover.eval(inputs),
        }
    }

    /// Truth table indexed by input pattern; bit `i` of the index is the value of input `i`.
    pub fn truth_table(&self, input_num: usize) -> Vec<bool> {
        assert!(input_num < usize::BITS as usize);
        let mut inputs = vec![false; input_num];
        (0..1usize << input_num)
            .map(|pattern| {
                for (i, input) in inputs.iter_mut().enumerate() {
                    *input = pattern >> i & 1 != 0;
                }
                self.eval(&inputs)
            })
            .collect()
    }

    /// Returns the gate type this function is equivalent to, if any.
    ///
    /// Covers are classified by their truth table, for up to 10 inputs. Constants are only
    /// recognized without inputs, so that the returned gate always accepts the same fanins.
    pub fn primitive(&self) -> Option<GateType> {
        match self {
            LogicFunction::Primitive(gate) => Some(*gate),
            LogicFunction::Cover(cover) if cover.input_num() <= MAX_ANALYZE_INPUTS => {
                classify(cover.input_num(), &self.truth_table(cover.input_num()))
            }
            LogicFunction::Cover(_) => None,
        }
    }
}

/// Interns the functions of a network, merging those with equal truth tables.
///
/// Functions of more than 10 inputs are never compared and always get a fresh id. When two
/// functions merge, the form registered first is kept.
#[derive(Debug, Default)]
pub(crate) struct FunctionPool {
    functions: Vec<LogicFunction>,
    by_table: HashMap<Vec<bool>, FuncId>,
}

impl FunctionPool {
    pub fn intern(&mut self, function: LogicFunction, input_num: usize) -> FuncId {
        let id = FuncId::from_index(self.functions.len());
        if input_num <= MAX_ANALYZE_INPUTS {
            let table = function.truth_table(input_num);
            if let Some(&existing) = self.by_table.get(&table) {
                return existing;
            }
            self.by_table.insert(table, id);
        }
        self.functions.push(function);
        id
    }

    pub fn into_functions(self) -> Vec<LogicFunction> {
        self.functions
    }
}

impl From<GateType> for LogicFunction {
    fn from(gate: GateType) -> Self {
        LogicFunction::Primitive(gate)
    }
}

impl From<Cover> for LogicFunction {
    fn from(cover: Cover) -> Self {
        LogicFunction::Cover(cover)
    }
}

impl Display for LogicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicFunction::Primitive(gate) => write!(f, "{gate}"),
            LogicFunction::Cover(cover) => write!(f, "cover {cover}"),
        }
    }
}

fn classify(input_num: usize, table: &[bool]) -> Option<GateType> {
    let last = table.len() - 1;
    match input_num {
        0 => Some(if table[0] { GateType::C1 } else { GateType::C0 }),
        1 => match table {
            [false, true] => Some(GateType::Buff),
            [true, false] => Some(GateType::Not),
            _ => None,
        },
        _ => {
            let only = |index: usize, value: bool| table.iter().enumerate().all(|(p, &v)| (p == index) == (v == value));
            let parity = |pattern: usize| pattern.count_ones() % 2 == 1;
            if only(last, true) {
                Some(GateType::And)
            } else if only(last, false) {
                Some(GateType::Nand)
            } else if only(0, false) {
                Some(GateType::Or)
            } else if only(0, true) {
                Some(GateType::Nor)
            } else if table.iter().enumerate().all(|(p, &v)| v == parity(p)) {
                Some(GateType::Xor)
            } else if table.iter().enumerate().all(|(p, &v)| v != parity(p)) {
                Some(GateType::Xnor)
            } else {
                None
            }
        }
    }
}
