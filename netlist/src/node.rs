use smallvec::SmallVec;

use crate::{DffId, FuncId, NodeId, PortId};

pub(crate) type FaninList = SmallVec<[NodeId; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A bit of an input port. The synthesized clock is one of these.
    Primary { port: PortId, bit: usize },
    /// The data output of a flip-flop, seen by combinational logic as a source.
    DffOutput(DffId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// A bit of an output port.
    Primary { port: PortId, bit: usize },
    /// The data input of a flip-flop, seen by combinational logic as a sink.
    DffInput(DffId),
    /// The clock pin of a flip-flop; always driven by the network clock.
    DffClock(DffId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input(InputKind),
    Output(OutputKind),
    /// A combinational node; the function lives in the network's function pool.
    Logic(FuncId),
}

/// A vertex of a [`Network`](crate::Network).
///
/// Inputs have no fanins, outputs have exactly one (their source), logic nodes have as many as
/// their function takes, in order.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) fanins: FaninList,
    pub(crate) fanouts: Vec<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn fanins(&self) -> &[NodeId] {
        &self.fanins
    }

    pub fn fanouts(&self) -> &[NodeId] {
        &self.fanouts
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input(_))
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output(_))
    }

    pub fn is_logic(&self) -> bool {
        matches!(self.kind, NodeKind::Logic(_))
    }

    pub fn is_primary_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input(InputKind::Primary { .. }))
    }

    pub fn is_primary_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output(OutputKind::Primary { .. }))
    }

    /// The function id of a logic node, for [`Network::func`](crate::Network::func).
    pub fn func_id(&self) -> Option<FuncId> {
        match self.kind {
            NodeKind::Logic(func) => Some(func),
            _ => None,
        }
    }

    /// The flip-flop this node is a terminal of.
    pub fn dff(&self) -> Option<DffId> {
        match self.kind {
            NodeKind::Input(InputKind::DffOutput(dff))
            | NodeKind::Output(OutputKind::DffInput(dff))
            | NodeKind::Output(OutputKind::DffClock(dff)) => Some(dff),
            _ => None,
        }
    }

    /// The port bit this node is, for primary inputs and outputs.
    pub fn port_bit(&self) -> Option<(PortId, usize)> {
        match self.kind {
            NodeKind::Input(InputKind::Primary { port, bit }) | NodeKind::Output(OutputKind::Primary { port, bit }) => {
                Some((port, bit))
            }
            _ => None,
        }
    }

    /// The source of an output node.
    pub fn output_src(&self) -> Option<NodeId> {
        if self.is_output() { self.fanins.first().copied() } else { None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

/// A declared external I/O: an ordered group of input or output nodes.
#[derive(Debug, Clone)]
pub struct Port {
    pub(crate) id: PortId,
    pub(crate) name: String,
    pub(crate) direction: Direction,
    pub(crate) bits: Vec<NodeId>,
}

impl Port {
    pub fn id(&self) -> PortId {
        self.id
    }

    /// Empty for an output port whose name was already taken by another port.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bits(&self) -> &[NodeId] {
        &self.bits
    }

    pub fn bit(&self, index: usize) -> Option<NodeId> {
        self.bits.get(index).copied()
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }
}

/// Initial state of a flip-flop, as given by a BLIF `.latch` init value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DffInit {
    Zero,
    One,
    DontCare,
    #[default]
    Unknown,
}

impl DffInit {
    pub fn from_char(c: char) -> Option<DffInit> {
        match c {
            '0' => Some(DffInit::Zero),
            '1' => Some(DffInit::One),
            '2' => Some(DffInit::DontCare),
            '3' => Some(DffInit::Unknown),
            _ => None,
        }
    }
}

/// A D flip-flop, split into terminal nodes: `data_in` and `clock` are outputs of the
/// combinational network, `data_out` is an input to it.
#[derive(Debug, Clone)]
pub struct Dff {
    pub(crate) id: DffId,
    pub(crate) name: String,
    pub(crate) data_in: NodeId,
    pub(crate) data_out: NodeId,
    pub(crate) clock: NodeId,
    pub(crate) init: DffInit,
}

impl Dff {
    pub fn id(&self) -> DffId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_in(&self) -> NodeId {
        self.data_in
    }

    pub fn data_out(&self) -> NodeId {
        self.data_out
    }

    pub fn clock(&self) -> NodeId {
        self.clock
    }

    pub fn init(&self) -> DffInit {
        self.init
    }
}
