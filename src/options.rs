pub(crate) const DEFAULT_REAL_PRECISION: usize = 17;

/// Knobs honored while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Permit raw (unescaped) ASCII control characters below 0x20 inside
    /// string literals. Strict JSON rejects them; this is off by default.
    pub allow_control_chars: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_control_chars(mut self, allow: bool) -> Self {
        self.allow_control_chars = allow;
        self
    }
}

/// Knobs honored while writing.
///
/// An empty `indent` selects fully compact output. A non-empty `indent` is
/// repeated once per nesting level before each child, and `line_end`
/// follows every value and closing brace, including the outermost value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    pub indent: String,
    pub line_end: String,
    pub sort_keys: bool,
    pub real_precision: usize,
}

impl WriteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_line_end(mut self, line_end: impl Into<String>) -> Self {
        self.line_end = line_end.into();
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn with_real_precision(mut self, real_precision: usize) -> Self {
        self.real_precision = real_precision;
        self
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            indent: String::new(),
            line_end: "\n".to_string(),
            sort_keys: false,
            real_precision: DEFAULT_REAL_PRECISION,
        }
    }
}

/// Mutable state threaded through recursive writer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteState {
    pub nest_level: usize,
}

impl WriteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn deeper(self) -> Self {
        Self {
            nest_level: self.nest_level + 1,
        }
    }
}
