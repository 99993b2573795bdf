use std::fmt::{Debug, Display};

macro_rules! entity_id {
    ($(#[$attr:meta])* pub id $name:ident, $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub fn from_index(index: usize) -> Self {
                assert!(index < u32::MAX as usize, "too many entities");
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.index()
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

entity_id! {
    /// Index of a node in a [`Network`](crate::Network); assigned in creation order.
    pub id NodeId, "%";
}

entity_id! {
    /// Index of a port in a [`Network`](crate::Network).
    pub id PortId, "&";
}

entity_id! {
    /// Index of a flip-flop in a [`Network`](crate::Network).
    pub id DffId, "@";
}

entity_id! {
    /// Index of a distinct logic function in a [`Network`](crate::Network).
    pub id FuncId, "$";
}
