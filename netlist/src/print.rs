use std::fmt::Display;

use crate::{DffInit, Direction, InputKind, Network, Node, NodeId, NodeKind, OutputKind};

struct DisplayFn<'a, F: for<'b> Fn(&Network, &mut std::fmt::Formatter<'b>) -> std::fmt::Result>(&'a Network, F);

impl<F: Fn(&Network, &mut std::fmt::Formatter) -> std::fmt::Result> Display for DisplayFn<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.1(self.0, f)
    }
}

impl Display for DffInit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DffInit::Zero => write!(f, "0"),
            DffInit::One => write!(f, "1"),
            DffInit::DontCare => write!(f, "x"),
            DffInit::Unknown => write!(f, "?"),
        }
    }
}

impl Network {
    fn write_fanins(&self, f: &mut std::fmt::Formatter, fanins: &[NodeId]) -> std::fmt::Result {
        for fanin in fanins {
            write!(f, " {fanin}")?;
        }
        Ok(())
    }

    fn write_node(&self, f: &mut std::fmt::Formatter, node: &Node) -> std::fmt::Result {
        write!(f, "{} = ", node.id())?;
        match node.kind() {
            NodeKind::Input(InputKind::Primary { port, bit }) => write!(f, "input {:?} {port}[{bit}]", node.name())?,
            NodeKind::Input(InputKind::DffOutput(dff)) => write!(f, "dff_output {:?} {dff}", node.name())?,
            NodeKind::Output(kind) => {
                match kind {
                    OutputKind::Primary { port, bit } => write!(f, "output {:?} {port}[{bit}]", node.name())?,
                    OutputKind::DffInput(dff) => write!(f, "dff_input {:?} {dff}", node.name())?,
                    OutputKind::DffClock(dff) => write!(f, "dff_clock {:?} {dff}", node.name())?,
                }
                write!(f, " <-")?;
                self.write_fanins(f, node.fanins())?;
            }
            NodeKind::Logic(func) => {
                write!(f, "logic {:?} {func}", node.name())?;
                self.write_fanins(f, node.fanins())?;
            }
        }
        Ok(())
    }

    /// Formats a single node the way it appears in the network listing.
    pub fn display_node(&self, node: NodeId) -> impl Display + '_ {
        DisplayFn(self, move |network: &Network, f| {
            let node = network.node(node).map_err(|_| std::fmt::Error)?;
            network.write_node(f, node)
        })
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "network {:?}", self.name())?;
        for port in self.ports() {
            let direction = match port.direction() {
                Direction::Input => "input",
                Direction::Output => "output",
            };
            write!(f, "{} = {direction} port {:?}", port.id(), port.name())?;
            self.write_fanins(f, port.bits())?;
            writeln!(f)?;
        }
        for node in self.nodes() {
            self.write_node(f, node)?;
            writeln!(f)?;
        }
        for (func, function) in self.funcs() {
            writeln!(f, "{func} = function {function}")?;
        }
        for dff in self.dffs() {
            writeln!(
                f,
                "{} = dff {:?} input={} output={} clock={} init={}",
                dff.id(),
                dff.name(),
                dff.data_in(),
                dff.data_out(),
                dff.clock(),
                dff.init()
            )?;
        }
        Ok(())
    }
}
