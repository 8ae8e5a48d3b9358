use casper_types::Key;

/// Caller and block time for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Key,
    /// Block time in milliseconds
    pub block_time: u64,
}

impl CallContext {
    pub fn new(caller: Key, block_time: u64) -> Self {
        Self { caller, block_time }
    }

    /// Same caller at a later block
    pub fn at(&self, block_time: u64) -> Self {
        Self {
            caller: self.caller,
            block_time,
        }
    }
}
