use std::fmt::Write;
use std::path::PathBuf;

use bnet_iscas89::{NETWORK_NAME, parse_iscas89, parse_iscas89_from, read_iscas89, read_iscas89_with};
use bnet_netlist::{DffInit, Error, GateType, LogicFunction, Network, Node, ParseError, ReadOptions};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn counts(network: &Network) -> [usize; 5] {
    [network.input_num(), network.output_num(), network.logic_num(), network.port_num(), network.dff_num()]
}

fn logic<'a>(network: &'a Network, name: &str) -> &'a Node {
    network.nodes().find(|node| node.is_logic() && node.name() == name).unwrap()
}

fn function<'a>(network: &'a Network, name: &str) -> &'a LogicFunction {
    network.node_function(logic(network, name).id()).unwrap().unwrap()
}

fn fanin_names(network: &Network, name: &str) -> Vec<String> {
    let fanins = logic(network, name).fanins();
    fanins.iter().map(|&fanin| network.node(fanin).unwrap().name().to_owned()).collect()
}

fn expect_error(text: &str) -> ParseError {
    match parse_iscas89(text) {
        Ok(network) => panic!("unexpected success:\n{network}"),
        Err(error) => error,
    }
}

/// Builds a bench netlist with the given interface size, with gates referring to gates defined after them.
fn synthesize(input_num: usize, output_num: usize, dff_num: usize, gate_num: usize) -> String {
    let mut text = String::new();
    writeln!(text, "# synthetic").unwrap();
    for index in 0..input_num {
        writeln!(text, "INPUT(i{index})").unwrap();
    }
    for index in 0..output_num {
        writeln!(text, "OUTPUT(g{index})").unwrap();
    }
    writeln!(text).unwrap();
    for index in 0..dff_num {
        writeln!(text, "q{index} = DFF(g{})", gate_num - 1 - index).unwrap();
    }
    for index in 0..gate_num {
        let keyword = ["AND", "nand", "Xor", "NOR"][index % 4];
        if index % 2 == 0 || index + 1 == gate_num {
            writeln!(text, "g{index} = {keyword}(i{}, q{})", index % input_num, index % dff_num).unwrap();
        } else {
            writeln!(text, "g{index} = {keyword}(g{}, i{})", index + 1, index % input_num).unwrap();
        }
    }
    text
}

#[test]
fn test_s27_file() {
    init_logging();
    let network = read_iscas89(data_path("s27.bench")).unwrap();
    assert_eq!(network.name(), NETWORK_NAME);
    assert_eq!(counts(&network), [8, 7, 10, 6, 3]);
    assert_eq!(fanin_names(&network, "G8"), ["G14", "G6.output"]);
    assert_eq!(fanin_names(&network, "G15"), ["G12", "G8"]);
    assert_eq!(function(&network, "G9").primitive(), Some(GateType::Nand));
    let dff_inputs: Vec<&str> = network
        .dffs()
        .map(|dff| network.node(network.output_src(dff.data_in()).unwrap().unwrap()).unwrap().name())
        .collect();
    assert_eq!(dff_inputs, ["G10", "G11", "G13"]);
    assert!(network.dffs().all(|dff| dff.init() == DffInit::Unknown));
}

#[test]
fn test_b10_shape() {
    init_logging();
    let network = parse_iscas89(&synthesize(11, 6, 17, 172)).unwrap();
    assert_eq!(counts(&network), [29, 40, 172, 18, 17]);
}

#[test]
fn test_invariants() {
    for (input_num, output_num, dff_num, gate_num) in [(1, 1, 1, 2), (2, 3, 4, 10), (7, 2, 1, 25)] {
        let network = parse_iscas89(&synthesize(input_num, output_num, dff_num, gate_num)).unwrap();
        assert_eq!(network.input_num(), input_num + dff_num + 1);
        assert_eq!(network.output_num(), output_num + 2 * dff_num);
        assert_eq!(network.port_num(), input_num + output_num + 1);
        assert_eq!(network.logic_num(), gate_num);
        assert_eq!(network.dff_num(), dff_num);
    }
}

#[test]
fn test_idempotent() {
    let text = synthesize(4, 2, 3, 16);
    let first = parse_iscas89(&text).unwrap();
    let second = parse_iscas89_from(text.as_bytes(), &ReadOptions::default()).unwrap();
    assert_eq!(counts(&first), counts(&second));
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_forward_reference() {
    let ordered = parse_iscas89("INPUT(a)\nINPUT(b)\nOUTPUT(y)\nt = AND(a, b)\ny = OR(t, a)\n").unwrap();
    let reversed = parse_iscas89("INPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = OR(t, a)\nt = AND(a, b)\n").unwrap();
    for network in [&ordered, &reversed] {
        assert_eq!(fanin_names(network, "y"), ["t", "a"]);
        assert_eq!(fanin_names(network, "t"), ["a", "b"]);
    }
    assert_eq!(counts(&ordered), counts(&reversed));
}

#[test]
fn test_keywords_and_aliases() {
    let network = parse_iscas89(concat!(
        "input(a)\n",
        "Input(b)\n",
        "output(y)\n",
        "n1 = nand(a, b)\n",
        "n2 = BUF(n1)\n",
        "n3 = inv(n2)\n",
        "n4 = Buff(n3)\n",
        "zero = CONST0()\n",
        "one = const1( )\n",
        "y = xnor(n4, zero, one)\n",
        "w = AND(a)\n",
    ))
    .unwrap();
    let primitive = |name| function(&network, name).primitive();
    assert_eq!(primitive("n1"), Some(GateType::Nand));
    assert_eq!(primitive("n2"), Some(GateType::Buff));
    assert_eq!(primitive("n3"), Some(GateType::Not));
    assert_eq!(primitive("zero"), Some(GateType::C0));
    assert_eq!(primitive("one"), Some(GateType::C1));
    assert_eq!(primitive("y"), Some(GateType::Xnor));
    // A one-input AND computes the same function as a buffer, so it shares the first BUF's entry.
    assert_eq!(primitive("w"), Some(GateType::Buff));
    let func_id = |name| logic(&network, name).func_id().unwrap();
    assert_eq!(func_id("w"), func_id("n2"));
    assert_eq!(func_id("n4"), func_id("n2"));
    assert_eq!(network.func_num(), 6);
    assert_eq!(counts(&network), [3, 1, 8, 4, 0]);
}

#[test]
fn test_mux() {
    let network = parse_iscas89("INPUT(s)\nINPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = MUX(s, a, b)\n").unwrap();
    assert_eq!(fanin_names(&network, "y"), ["s", "a", "b"]);
    let mux = function(&network, "y");
    assert!(mux.eval(&[true, false, true]));
    assert!(!mux.eval(&[false, false, true]));

    let error = expect_error("INPUT(s)\nINPUT(a)\nOUTPUT(y)\ny = MUX(s, a)\n");
    assert_eq!(error.line(), Some(4));
    match error.error() {
        Error::ArityMismatch { gate, found } => {
            assert_eq!(gate, "MUX");
            assert_eq!(*found, 2);
        }
        error => panic!("unexpected error {error}"),
    }
}

#[test]
fn test_arity_mismatch() {
    for (text, expected_gate, expected_found) in [
        ("INPUT(a)\ny = NOT(a, a)\n", "NOT", 2),
        ("INPUT(a)\ny = BUFF()\n", "BUFF", 0),
        ("INPUT(a)\ny = AND()\n", "AND", 0),
        ("INPUT(a)\ny = CONST1(a)\n", "CONST1", 1),
        ("INPUT(a)\ny = DFF(a, a)\n", "DFF", 2),
        ("INPUT(a)\ny = dff()\n", "DFF", 0),
    ] {
        let error = expect_error(text);
        assert_eq!(error.line(), Some(2), "{text}");
        match error.error() {
            Error::ArityMismatch { gate, found } => {
                assert_eq!(gate, expected_gate);
                assert_eq!(*found, expected_found);
            }
            error => panic!("unexpected error {error} for {text}"),
        }
    }
}

#[test]
fn test_unknown_gate() {
    let error = expect_error("INPUT(a)\nINPUT(b)\ny = FOO(a,b)\nOUTPUT(y)\n");
    assert_eq!(error.line(), Some(3));
    match error.error() {
        Error::UnknownGateType(gate) => assert_eq!(gate, "FOO"),
        error => panic!("unexpected error {error}"),
    }
    assert_eq!(error.to_string(), "line 3: unknown gate type `FOO`");
}

#[test]
fn test_syntax_errors() {
    for text in [
        "INPUT(a b)\n",
        "INPUT(a, b)\n",
        "INPUT a\n",
        "y = AND(a,,b)\n",
        "y AND(a)\n",
        "y = AND(a) b\n",
        "FOO(a)\n",
        "y = (a)\n",
    ] {
        let error = expect_error(text);
        assert_eq!(error.line(), Some(1), "{text}");
        assert!(matches!(error.error(), Error::Syntax(_)), "{text}: {error}");
    }
}

#[test]
fn test_comments_and_blank_lines() {
    let network = parse_iscas89(concat!(
        "# header comment\n",
        "\n",
        "   \n",
        "INPUT(a)   # the input\n",
        "OUTPUT(y)\n",
        "y = NOT(a)# inverter\n",
        "  z\t=\tBUFF ( a )  \n",
    ))
    .unwrap();
    assert_eq!(counts(&network), [2, 1, 2, 3, 0]);
    assert_eq!(fanin_names(&network, "z"), ["a"]);
}

#[test]
fn test_statement_spanning_lines() {
    let network = parse_iscas89(concat!(
        "INPUT(a)\n",
        "INPUT(b)\n",
        "OUTPUT(y)\n",
        "y = AND(a,\n",
        "      b)\n",
        "z = OR( # first operand\n",
        "  a, b\n",
        ") w = NOT(\n",
        "\n",
        "  z)\n",
    ))
    .unwrap();
    assert_eq!(fanin_names(&network, "y"), ["a", "b"]);
    assert_eq!(fanin_names(&network, "z"), ["a", "b"]);
    assert_eq!(fanin_names(&network, "w"), ["z"]);
    assert_eq!(counts(&network), [3, 1, 3, 4, 0]);

    let error = expect_error("INPUT(a)\ny = AND(a,\n  a)\n\nz = FOO(\n a)\n");
    assert_eq!(error.line(), Some(5));
    assert!(matches!(error.error(), Error::UnknownGateType(_)));
    let error = expect_error("INPUT(a)\n# note\ny = AND(a,\n\n  a\n");
    assert_eq!(error.line(), Some(3));
    assert!(matches!(error.error(), Error::Syntax(_)));
}

#[test]
fn test_unusual_names() {
    let network = parse_iscas89("INPUT(a[0])\nINPUT(top.b$1)\nOUTPUT(out/y)\nout/y = AND(a[0], top.b$1)\n").unwrap();
    assert_eq!(fanin_names(&network, "out/y"), ["a[0]", "top.b$1"]);
}

#[test]
fn test_unresolved_signal() {
    let error = expect_error("INPUT(a)\nOUTPUT(y)\ny = AND(a, ghost)\n");
    assert_eq!(error.line(), None);
    match error.error() {
        Error::UnresolvedSignal(name) => assert_eq!(name, "ghost"),
        error => panic!("unexpected error {error}"),
    }
}

#[test]
fn test_duplicate_declaration() {
    let error = expect_error("INPUT(a)\na = NOT(a)\n");
    assert_eq!(error.line(), Some(2));
    match error.error() {
        Error::DuplicateDeclaration(name) => assert_eq!(name, "a"),
        error => panic!("unexpected error {error}"),
    }
}

#[test]
fn test_combinational_loop() {
    let error = expect_error("OUTPUT(x)\nx = NOT(y)\ny = NOT(x)\n");
    assert!(matches!(error.error(), Error::CombinationalLoop(_)));
}

#[test]
fn test_empty_input() {
    let network = parse_iscas89("# nothing\n").unwrap();
    assert_eq!(network.name(), NETWORK_NAME);
    assert_eq!(counts(&network), [1, 0, 0, 1, 0]);
}

#[test]
fn test_clock_name() {
    let options = ReadOptions::new().with_clock_name("CK");
    let network = read_iscas89_with(data_path("s27.bench"), &options).unwrap();
    assert_eq!(network.node(network.clock()).unwrap().name(), "CK");
    assert_eq!(network.fanouts(network.clock()).unwrap().len(), 3);
}

#[test]
fn test_missing_file() {
    let error = read_iscas89(data_path("does_not_exist.bench")).unwrap_err();
    assert!(matches!(error.error(), Error::Io(_)));
}
