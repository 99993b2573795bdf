/// Settings shared by the readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Name of the synthesized clock input and its port.
    ///
    /// A declared port may use the same name; `find_port` then returns whichever port was added
    /// first, and [`Network::clock_port`](crate::Network::clock_port) still identifies the clock.
    pub clock_name: String,
}

impl ReadOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_clock_name(self, clock_name: impl Into<String>) -> Self {
        Self { clock_name: clock_name.into(), ..self }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { clock_name: "clock".into() }
    }
}
