//! Code generation context and state.
//!
//! The `CodegenContext` holds the program, its type table and the output
//! buffer while one method is emitted.

use serein_ir::{Name, NodeArena, NodeId, NodeRange, Program, ScriptType};
use serein_types::TypeTable;

use crate::CodegenOptions;

/// State for emitting one method.
pub struct CodegenContext<'a> {
    pub program: &'a Program,
    pub table: &'a TypeTable,
    pub options: &'a CodegenOptions,
    /// Current indentation level.
    indent: usize,
    output: String,
}

impl<'a> CodegenContext<'a> {
    pub fn new(program: &'a Program, table: &'a TypeTable, options: &'a CodegenOptions) -> Self {
        CodegenContext {
            program,
            table,
            options,
            indent: 0,
            output: String::with_capacity(program.source().len() * 2),
        }
    }

    #[inline]
    pub fn arena(&self) -> &'a NodeArena {
        self.program.arena()
    }

    #[inline]
    pub fn list(&self, range: NodeRange) -> &'a [NodeId] {
        self.program.arena().get_list(range)
    }

    #[inline]
    pub fn type_of(&self, id: NodeId) -> &'a ScriptType {
        self.table.type_of(id)
    }

    #[inline]
    pub fn is_async(&self, id: NodeId) -> bool {
        self.table.is_async_call(id)
    }

    #[inline]
    pub fn is_dynamic(&self, id: NodeId) -> bool {
        self.table.is_dynamic(id)
    }

    #[inline]
    pub fn resolve_name(&self, name: Name) -> &'static str {
        self.program.name(name)
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line with indentation and a trailing newline.
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// `{` on its own line, then indent.
    pub fn open_block(&mut self) {
        self.writeln("{");
        self.indent();
    }

    /// Dedent, then `}` on its own line.
    pub fn close_block(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
