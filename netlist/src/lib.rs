//! This library provides the in-memory form of a structural gate-level netlist.
//!
//! A [`Network`] is a graph of [`Node`]s identified by dense [`NodeId`]s: inputs, outputs and
//! combinational logic. Flip-flops are split into terminal nodes (a data input, a data output and a clock
//! pin), so the combinational part is acyclic and every network has a single clock input shared by
//! all flip-flops. Networks are assembled with a [`NetworkBuilder`], which accepts fanins by name
//! through a [`NameResolver`] before their producers exist, and then frozen. Freezing interns logic
//! functions, so nodes computing the same function share a [`FuncId`].

mod id;
mod error;
mod function;
mod node;
mod resolver;
mod options;
mod builder;
mod network;
mod print;

pub use id::{NodeId, PortId, DffId, FuncId};
pub use error::{Error, ParseError};
pub use function::{GateType, Literal, Cover, LogicFunction, mux_select_width};
pub use node::{Node, NodeKind, InputKind, OutputKind, Port, Direction, Dff, DffInit};
pub use resolver::{NameResolver, PendingRef};
pub use options::ReadOptions;
pub use builder::{NetworkBuilder, Fanin};
pub use network::Network;
