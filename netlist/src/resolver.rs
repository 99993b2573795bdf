use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{Error, NodeId};

/// A handle to a signal name that may not have a producer yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingRef(usize);

/// Maps signal names to the nodes producing them, allowing names to be used before they are declared.
///
/// Names are kept in first-mention order, so that the first unresolved name reported is the first
/// one that appeared in the source.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    names: IndexMap<String, Option<NodeId>>,
}

impl NameResolver {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn declare(&mut self, name: &str, node: NodeId) -> Result<PendingRef, Error> {
        match self.names.entry(name.to_owned()) {
            Entry::Occupied(mut entry) => {
                let bound = *entry.get();
                match bound {
                    Some(bound) if bound != node => Err(Error::DuplicateDeclaration(name.to_owned())),
                    _ => {
                        entry.insert(Some(node));
                        Ok(PendingRef(entry.index()))
                    }
                }
            }
            Entry::Vacant(entry) => {
                let index = entry.index();
                entry.insert(Some(node));
                Ok(PendingRef(index))
            }
        }
    }

    pub fn reference(&mut self, name: &str) -> PendingRef {
        let entry = self.names.entry(name.to_owned());
        let index = entry.index();
        entry.or_insert(None);
        PendingRef(index)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied().flatten()
    }

    pub fn resolve(&self, pending: PendingRef) -> Option<NodeId> {
        self.names.get_index(pending.0).and_then(|(_, node)| *node)
    }

    pub fn name(&self, pending: PendingRef) -> &str {
        self.names.get_index(pending.0).map(|(name, _)| name.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks that every mentioned name has been declared.
    pub fn resolve_all(&self) -> Result<(), Error> {
        match self.names.iter().find(|(_, node)| node.is_none()) {
            Some((name, _)) => Err(Error::UnresolvedSignal(name.clone())),
            None => Ok(()),
        }
    }
}
