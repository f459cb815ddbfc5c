use crate::ast::BlockStyle;

/// Options for a script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// The block style in effect before any `STYLE` directive.
    pub style:        BlockStyle,
    /// Print a banner when the script stops at `END`.
    pub announce_end: bool,
}

impl Config {
    /// The banner printed at `END` when `announce_end` is set.
    pub const END_BANNER: &'static str = "\nProgram execution terminated by END command.\n";
}
