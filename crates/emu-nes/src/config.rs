//! NES configuration.

/// Power-on stack pointer.
pub const DEFAULT_STACK_POINTER: u8 = 0xFF;

/// NES configuration.
#[derive(Debug, Clone)]
pub struct NesConfig {
    /// Program image mapped at $8000 and mirrored up to $FFFF.
    pub program: Vec<u8>,
    /// Initial PC. `None` reads the reset vector at $FFFC.
    pub entry_point: Option<u16>,
    /// Initial stack pointer.
    pub stack_pointer: u8,
}

impl NesConfig {
    /// Configuration that boots `program` through its reset vector.
    #[must_use]
    pub fn new(program: Vec<u8>) -> Self {
        Self {
            program,
            entry_point: None,
            stack_pointer: DEFAULT_STACK_POINTER,
        }
    }

    /// Start at `pc` instead of the reset vector.
    #[must_use]
    pub fn with_entry_point(mut self, pc: u16) -> Self {
        self.entry_point = Some(pc);
        self
    }

    #[must_use]
    pub fn with_stack_pointer(mut self, s: u8) -> Self {
        self.stack_pointer = s;
        self
    }
}
