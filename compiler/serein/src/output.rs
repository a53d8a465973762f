//! Where `print` and `println` write.
//!
//! Enum dispatch over the few destinations an engine needs: stdout for the
//! CLI, a buffer for tests and embedding hosts, or nothing at all.

use std::sync::Arc;

use parking_lot::Mutex;

/// Output destination of the print builtins.
pub enum Output {
    Stdout,
    Buffer(Mutex<String>),
    Silent,
}

/// An output shared by an engine and its mounted functions.
pub type SharedOutput = Arc<Output>;

impl Output {
    pub fn stdout() -> SharedOutput {
        Arc::new(Output::Stdout)
    }

    pub fn buffer() -> SharedOutput {
        Arc::new(Output::Buffer(Mutex::new(String::new())))
    }

    pub fn silent() -> SharedOutput {
        Arc::new(Output::Silent)
    }

    pub fn print(&self, text: &str) {
        match self {
            Output::Stdout => print!("{text}"),
            Output::Buffer(buffer) => buffer.lock().push_str(text),
            Output::Silent => {}
        }
    }

    pub fn println(&self, text: &str) {
        match self {
            Output::Stdout => println!("{text}"),
            Output::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(text);
                buffer.push('\n');
            }
            Output::Silent => {}
        }
    }

    /// Everything captured so far; empty unless buffered.
    pub fn captured(&self) -> String {
        match self {
            Output::Buffer(buffer) => buffer.lock().clone(),
            Output::Stdout | Output::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Output::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Stdout => f.write_str("Output::Stdout"),
            Output::Buffer(_) => f.write_str("Output::Buffer"),
            Output::Silent => f.write_str("Output::Silent"),
        }
    }
}
