use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// A unique token with an optional description.
///
/// Clones share identity; two symbols built separately never compare equal,
/// even with the same description.
#[derive(Clone)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Symbol(Arc::new(Some(description.into())))
    }

    pub fn anonymous() -> Self {
        Symbol(Arc::new(None))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A callable value, kept as its name. Equality is identity: clones compare
/// equal, separately built functions never do.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// An error object: name, message and a stack trace text.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: String,
}

impl ErrorValue {
    /// A plain `Error` with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_name("Error", message)
    }

    /// An error with a specific name such as `TypeError`.
    ///
    /// The stack starts with the `name: message` header, followed by a
    /// captured backtrace when `RUST_BACKTRACE` enables one.
    pub fn with_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let mut stack = header(&name, &message);
        let trace = Backtrace::capture();
        if trace.status() == BacktraceStatus::Captured {
            stack.push('\n');
            stack.push_str(&trace.to_string());
        }
        Self {
            name,
            message,
            stack,
        }
    }

    /// Snapshot a Rust error. Each `source()` in the chain adds a
    /// `caused by:` line to the stack.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let message = err.to_string();
        let mut stack = header("Error", &message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            name: "Error".to_string(),
            message,
            stack,
        }
    }

    /// Replace the stack text.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&header(&self.name, &self.message))
    }
}

fn header(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_string()
    } else {
        format!("{name}: {message}")
    }
}

/// A value of a shape outside the model, kept only by its type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    type_name: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}
