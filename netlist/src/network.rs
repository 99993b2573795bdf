use crate::{Dff, DffId, Error, FuncId, LogicFunction, Node, NodeId, Port, PortId};

/// A frozen structural netlist.
///
/// Built by [`NetworkBuilder::resolve_and_freeze`](crate::NetworkBuilder::resolve_and_freeze); holds only
/// owned data and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    name: String,
    nodes: Vec<Node>,
    ports: Vec<Port>,
    dffs: Vec<Dff>,
    functions: Vec<LogicFunction>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    primary_inputs: Vec<NodeId>,
    primary_outputs: Vec<NodeId>,
    logic: Vec<NodeId>,
    clock: NodeId,
    clock_port: PortId,
}

impl Network {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        nodes: Vec<Node>,
        ports: Vec<Port>,
        dffs: Vec<Dff>,
        functions: Vec<LogicFunction>,
        logic: Vec<NodeId>,
        clock: NodeId,
        clock_port: PortId,
    ) -> Self {
        let select =
            |pred: fn(&Node) -> bool| -> Vec<NodeId> { nodes.iter().filter(|node| pred(node)).map(Node::id).collect() };
        let inputs = select(Node::is_input);
        let outputs = select(Node::is_output);
        let primary_inputs =
            nodes.iter().filter(|node| node.is_primary_input() && node.id != clock).map(Node::id).collect();
        let primary_outputs = select(Node::is_primary_output);
        Network {
            name,
            nodes,
            ports,
            dffs,
            functions,
            inputs,
            outputs,
            primary_inputs,
            primary_outputs,
            logic,
            clock,
            clock_port,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of input nodes: primary inputs, flip-flop outputs and the clock.
    pub fn input_num(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output nodes: primary outputs, flip-flop data inputs and flip-flop clock pins.
    pub fn output_num(&self) -> usize {
        self.outputs.len()
    }

    pub fn logic_num(&self) -> usize {
        self.logic.len()
    }

    pub fn port_num(&self) -> usize {
        self.ports.len()
    }

    pub fn dff_num(&self) -> usize {
        self.dffs.len()
    }

    pub fn node_num(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct logic functions. Functions of up to 10 inputs with equal truth tables
    /// are counted once.
    pub fn func_num(&self) -> usize {
        self.functions.len()
    }

    pub fn node(&self, node: NodeId) -> Result<&Node, Error> {
        self.nodes
            .get(node.index())
            .ok_or(Error::OutOfRange { what: "node", index: node.index(), len: self.nodes.len() })
    }

    pub fn port(&self, port: PortId) -> Result<&Port, Error> {
        self.ports
            .get(port.index())
            .ok_or(Error::OutOfRange { what: "port", index: port.index(), len: self.ports.len() })
    }

    pub fn dff(&self, dff: DffId) -> Result<&Dff, Error> {
        self.dffs
            .get(dff.index())
            .ok_or(Error::OutOfRange { what: "dff", index: dff.index(), len: self.dffs.len() })
    }

    pub fn func(&self, func: FuncId) -> Result<&LogicFunction, Error> {
        self.functions
            .get(func.index())
            .ok_or(Error::OutOfRange { what: "function", index: func.index(), len: self.functions.len() })
    }

    /// The function of a logic node; `None` for other nodes.
    pub fn node_function(&self, node: NodeId) -> Result<Option<&LogicFunction>, Error> {
        match self.node(node)?.func_id() {
            Some(func) => Ok(Some(self.func(func)?)),
            None => Ok(None),
        }
    }

    pub fn fanins(&self, node: NodeId) -> Result<&[NodeId], Error> {
        Ok(self.node(node)?.fanins())
    }

    pub fn fanouts(&self, node: NodeId) -> Result<&[NodeId], Error> {
        Ok(self.node(node)?.fanouts())
    }

    /// The source of an output node; `None` for other nodes.
    pub fn output_src(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        Ok(self.node(node)?.output_src())
    }

    /// The clock input shared by every flip-flop.
    pub fn clock(&self) -> NodeId {
        self.clock
    }

    pub fn clock_port(&self) -> PortId {
        self.clock_port
    }

    pub fn find_port(&self, name: &str) -> Option<&Port> {
        if name.is_empty() {
            return None;
        }
        self.ports.iter().find(|port| port.name() == name)
    }

    /// Finds a node by name; flip-flop terminals are named `<dff>.input`, `<dff>.output`, `<dff>.clock`.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn ports(&self) -> impl ExactSizeIterator<Item = &Port> + '_ {
        self.ports.iter()
    }

    pub fn dffs(&self) -> impl ExactSizeIterator<Item = &Dff> + '_ {
        self.dffs.iter()
    }

    pub fn funcs(&self) -> impl ExactSizeIterator<Item = (FuncId, &LogicFunction)> + '_ {
        self.functions.iter().enumerate().map(|(index, function)| (FuncId::from_index(index), function))
    }

    /// All input nodes, by id.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// All output nodes, by id.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Declared primary inputs in declaration order; excludes the clock.
    pub fn primary_inputs(&self) -> &[NodeId] {
        &self.primary_inputs
    }

    pub fn primary_outputs(&self) -> &[NodeId] {
        &self.primary_outputs
    }

    /// Logic nodes in topological order: every node comes after its logic fanins.
    pub fn logic_nodes(&self) -> &[NodeId] {
        &self.logic
    }
}
