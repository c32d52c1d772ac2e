use thiserror::Error;

/// Fatal conditions raised by [`crate::Z80::step`].
///
/// An unimplemented opcode is not recoverable: the machine state after
/// the partial fetch is unspecified, so callers should stop the machine
/// and report the flattened index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("opcode not implemented: {index:06X}")]
    UnimplementedOpcode { index: u32 },
}
