//! Terminal escape sequences used to redraw the prompt line

/// Move to column 0 of the current line and clear it
pub const CLEAR_LINE: &str = "\x1b[0G\x1b[2K";

/// Move to the start of the previous line and clear it
pub const CLEAR_PREV_LINE: &str = "\x1b[1F\x1b[2K";
