use std::collections::HashMap;

use smallvec::SmallVec;

use crate::function::FunctionPool;
use crate::node::FaninList;
use crate::{
    Dff, DffId, DffInit, Direction, Error, InputKind, LogicFunction, NameResolver, Network, Node, NodeId, NodeKind,
    OutputKind, PendingRef, Port, PortId, ReadOptions,
};

/// A fanin that is either a known node or a name to be resolved when the network is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fanin {
    Node(NodeId),
    Pending(PendingRef),
}

impl From<NodeId> for Fanin {
    fn from(node: NodeId) -> Self {
        Fanin::Node(node)
    }
}

impl From<PendingRef> for Fanin {
    fn from(pending: PendingRef) -> Self {
        Fanin::Pending(pending)
    }
}

#[derive(Debug, Clone)]
enum EntryKind {
    Input(InputKind),
    Output(OutputKind),
    Logic(LogicFunction),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    name: String,
    kind: EntryKind,
    fanins: SmallVec<[Fanin; 4]>,
}

/// Mutable form of a [`Network`], filled in by a reader while it streams its input.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    name: String,
    clock_name: String,
    nodes: Vec<NodeEntry>,
    ports: Vec<Port>,
    port_names: HashMap<String, PortId>,
    dffs: Vec<Dff>,
    clock: Option<(NodeId, PortId)>,
}

impl NetworkBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, &ReadOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: &ReadOptions) -> Self {
        NetworkBuilder {
            name: name.into(),
            clock_name: options.clock_name.clone(),
            nodes: Vec::new(),
            ports: Vec::new(),
            port_names: HashMap::new(),
            dffs: Vec::new(),
            clock: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn node_num(&self) -> usize {
        self.nodes.len()
    }

    pub fn port_num(&self) -> usize {
        self.ports.len()
    }

    pub fn dff_num(&self) -> usize {
        self.dffs.len()
    }

    fn add_node(&mut self, name: String, kind: EntryKind, fanins: SmallVec<[Fanin; 4]>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeEntry { name, kind, fanins });
        id
    }

    /// Adds an empty port. An empty `name` leaves the port unnamed.
    ///
    /// If `name` is already taken, lookups by name keep finding the earlier port. This happens when
    /// a declared input shares its name with the synthesized clock.
    pub fn add_port(&mut self, name: impl Into<String>, direction: Direction) -> PortId {
        let name = name.into();
        let id = PortId::from_index(self.ports.len());
        if !name.is_empty() {
            if self.port_names.contains_key(&name) {
                tracing::warn!(port = %name, "port name already in use");
            } else {
                self.port_names.insert(name.clone(), id);
            }
        }
        self.ports.push(Port { id, name, direction, bits: Vec::new() });
        id
    }

    pub fn find_port(&self, name: &str) -> Option<PortId> {
        self.port_names.get(name).copied()
    }

    pub fn port(&self, port: PortId) -> &Port {
        &self.ports[port.index()]
    }

    /// Appends an input node as the next bit of `port`.
    pub fn add_primary_input(&mut self, port: PortId, name: impl Into<String>) -> NodeId {
        let bit = self.port_bit(port, Direction::Input);
        let id = self.add_node(name.into(), EntryKind::Input(InputKind::Primary { port, bit }), SmallVec::new());
        self.ports[port.index()].bits.push(id);
        id
    }

    /// Appends an output node driven by `src` as the next bit of `port`.
    pub fn add_primary_output(&mut self, port: PortId, name: impl Into<String>, src: impl Into<Fanin>) -> NodeId {
        let bit = self.port_bit(port, Direction::Output);
        let kind = EntryKind::Output(OutputKind::Primary { port, bit });
        let id = self.add_node(name.into(), kind, SmallVec::from_elem(src.into(), 1));
        self.ports[port.index()].bits.push(id);
        id
    }

    fn port_bit(&self, port: PortId, direction: Direction) -> usize {
        let port = &self.ports[port.index()];
        assert_eq!(port.direction, direction, "port {} has the wrong direction", port.name);
        port.bits.len()
    }

    /// Adds a single-bit input port and its node.
    pub fn add_input_port(&mut self, name: &str) -> NodeId {
        let port = self.add_port(name, Direction::Input);
        self.add_primary_input(port, name)
    }

    /// Adds a single-bit output port and its node. If another port already uses `name`, the new
    /// port is left unnamed; the node keeps the name.
    pub fn add_output_port(&mut self, name: &str, src: impl Into<Fanin>) -> NodeId {
        let port_name = if self.find_port(name).is_some() { "" } else { name };
        let port = self.add_port(port_name, Direction::Output);
        self.add_primary_output(port, name, src)
    }

    /// Returns the network clock input, creating it and its port on first use.
    pub fn clock(&mut self) -> NodeId {
        self.clock_terminal().0
    }

    fn clock_terminal(&mut self) -> (NodeId, PortId) {
        if let Some(clock) = self.clock {
            return clock;
        }
        let name = self.clock_name.clone();
        let port = self.add_port(name.as_str(), Direction::Input);
        let node = self.add_primary_input(port, name);
        tracing::debug!(clock = %node, "synthesized clock input");
        self.clock = Some((node, port));
        (node, port)
    }

    /// Adds a flip-flop clocked by the network clock, with its data input driven by `data`.
    pub fn add_dff(&mut self, name: impl Into<String>, data: impl Into<Fanin>, init: DffInit) -> DffId {
        let name = name.into();
        let clock_src = self.clock();
        let id = DffId::from_index(self.dffs.len());
        let data_in = self.add_node(
            format!("{name}.input"),
            EntryKind::Output(OutputKind::DffInput(id)),
            SmallVec::from_elem(data.into(), 1),
        );
        let data_out =
            self.add_node(format!("{name}.output"), EntryKind::Input(InputKind::DffOutput(id)), SmallVec::new());
        let clock = self.add_node(
            format!("{name}.clock"),
            EntryKind::Output(OutputKind::DffClock(id)),
            SmallVec::from_elem(Fanin::Node(clock_src), 1),
        );
        self.dffs.push(Dff { id, name, data_in, data_out, clock, init });
        id
    }

    pub fn dff(&self, dff: DffId) -> &Dff {
        &self.dffs[dff.index()]
    }

    /// Adds a logic node. The number of fanins must be one `function` accepts.
    pub fn add_logic(
        &mut self,
        name: impl Into<String>,
        fanins: impl IntoIterator<Item = impl Into<Fanin>>,
        function: impl Into<LogicFunction>,
    ) -> NodeId {
        let name = name.into();
        let function = function.into();
        let fanins: SmallVec<[Fanin; 4]> = fanins.into_iter().map(Into::into).collect();
        assert!(function.accepts_arity(fanins.len()), "{function} cannot take {} fanins ({name})", fanins.len());
        self.add_node(name, EntryKind::Logic(function), fanins)
    }

    /// Binds every pending fanin through `resolver`, checks the network, and freezes it.
    pub fn resolve_and_freeze(mut self, resolver: &NameResolver) -> Result<Network, Error> {
        resolver.resolve_all()?;
        let (clock, clock_port) = self.clock_terminal();

        if let Some(port) = self.ports.iter().find(|port| port.bits.is_empty()) {
            return Err(Error::EmptyPort(port.name.clone()));
        }

        let node_num = self.nodes.len();
        let mut nodes = Vec::with_capacity(node_num);
        let mut functions = FunctionPool::default();
        for (index, entry) in self.nodes.into_iter().enumerate() {
            let mut fanins = FaninList::new();
            for fanin in entry.fanins {
                let node = match fanin {
                    Fanin::Node(node) => node,
                    Fanin::Pending(pending) => resolver
                        .resolve(pending)
                        .ok_or_else(|| Error::UnresolvedSignal(resolver.name(pending).to_owned()))?,
                };
                assert!(node.index() < node_num, "fanin {node} of {} does not exist", entry.name);
                fanins.push(node);
            }
            let kind = match entry.kind {
                EntryKind::Input(kind) => NodeKind::Input(kind),
                EntryKind::Output(kind) => NodeKind::Output(kind),
                EntryKind::Logic(function) => NodeKind::Logic(functions.intern(function, fanins.len())),
            };
            let id = NodeId::from_index(index);
            nodes.push(Node { id, name: entry.name, kind, fanins, fanouts: Vec::new() });
        }

        for index in 0..node_num {
            for fanin_index in 0..nodes[index].fanins.len() {
                let fanin = nodes[index].fanins[fanin_index];
                let fanouts = &mut nodes[fanin.index()].fanouts;
                if fanouts.last() != Some(&NodeId::from_index(index)) {
                    fanouts.push(NodeId::from_index(index));
                }
            }
        }

        let logic = topological_order(&nodes)?;
        let functions = functions.into_functions();
        let network = Network::new(self.name, nodes, self.ports, self.dffs, functions, logic, clock, clock_port);
        tracing::debug!(
            name = network.name(),
            inputs = network.input_num(),
            outputs = network.output_num(),
            logic = network.logic_num(),
            functions = network.func_num(),
            ports = network.port_num(),
            dffs = network.dff_num(),
            "network frozen"
        );
        Ok(network)
    }
}

/// Orders logic nodes so that each comes after all of its logic fanins, sources first.
fn topological_order(nodes: &[Node]) -> Result<Vec<NodeId>, Error> {
    let mut waiting: Vec<usize> = nodes
        .iter()
        .map(|node| match node.kind {
            NodeKind::Logic(_) => node.fanins.iter().filter(|fanin| nodes[fanin.index()].is_logic()).count(),
            _ => 0,
        })
        .collect();
    let mut order: Vec<NodeId> =
        nodes.iter().filter(|node| node.is_logic() && waiting[node.id.index()] == 0).map(|node| node.id).collect();
    let mut position = 0;
    while position < order.len() {
        let node = &nodes[order[position].index()];
        position += 1;
        for &fanout in &node.fanouts {
            let fanout_node = &nodes[fanout.index()];
            if !fanout_node.is_logic() {
                continue;
            }
            let uses = fanout_node.fanins.iter().filter(|&&fanin| fanin == node.id).count();
            waiting[fanout.index()] -= uses;
            if waiting[fanout.index()] == 0 {
                order.push(fanout);
            }
        }
    }
    match nodes.iter().find(|node| node.is_logic() && waiting[node.id.index()] > 0) {
        Some(stuck) => Err(Error::CombinationalLoop(stuck.name.clone())),
        None => Ok(order),
    }
}
