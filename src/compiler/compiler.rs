//! Main compiler module.
//!
//! This module contains the core Compiler structure, which walks a parsed
//! Program and streams TypeScript to any `std::io::Write` sink one line at a
//! time. It owns the scope arena used to resolve the types of declarations
//! whose initializers do not carry a type of their own.

use std::io::Write;

use log::{debug, trace};

use crate::{
    ast::{ast::Node, statements::Program, types::StaticType},
    errors::errors::Error,
};

use super::{
    scope::{Scopes, Symbol, SymbolKind},
    stmt::gen_statement,
};

/// Names that are always in scope, with the TypeScript they render as and
/// their result type.
pub const BUILTINS: [(&str, &str, StaticType); 3] = [
    ("fmt.Println", "console.log", StaticType::NoType),
    ("fmt.Print", "console.log", StaticType::NoType),
    ("len", "len", StaticType::Integer),
];

/// TypeScript spelling of a builtin, `None` for user names.
pub fn builtin_target(name: &str) -> Option<&'static str> {
    BUILTINS
        .iter()
        .find(|(builtin, _, _)| *builtin == name)
        .map(|(_, target, _)| *target)
}

/// Knobs for the emitted text.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// One level of indentation.
    pub indent: String,
    /// Emit `main();` after the program when it defines a top-level `main`.
    pub call_main: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            indent: String::from("\t"),
            call_main: false,
        }
    }
}

/// The main compiler structure that holds the state of the emission.
///
/// # Type Parameters
///
/// * `W` - The sink the TypeScript is written to
pub struct Compiler<W: Write> {
    /// Output sink, written line by line
    out: W,
    /// Scope arena mirroring the lexical nesting being emitted
    pub scopes: Scopes,
    /// Current nesting depth of emitted blocks
    indent_level: usize,
    pub options: CompileOptions,
}

impl<W: Write> Compiler<W> {
    /// Creates a Compiler whose global scope holds the builtins.
    pub fn new(out: W, options: CompileOptions) -> Self {
        let mut scopes = Scopes::new();
        for (name, _, result) in BUILTINS {
            scopes.define_global(Symbol::new(name, result, SymbolKind::Builtin));
        }

        Compiler {
            out,
            scopes,
            indent_level: 0,
            options,
        }
    }

    /// Writes one line at the current indentation.
    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        let indent = self.options.indent.repeat(self.indent_level);
        writeln!(self.out, "{}{}", indent, line)?;
        Ok(())
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Emits `body` one level deeper, inside a fresh scope.
    pub fn nested<F>(&mut self, body: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.scopes.push();
        self.indent();
        let result = body(self);
        self.dedent();
        self.scopes.pop();
        result
    }

    /// Registers every top-level function before anything is emitted, so
    /// calls may come before the definition.
    fn hoist_functions(&mut self, program: &Program) {
        for stmt in &program.body {
            if let Node::Function(function) = stmt {
                if let Some(name) = &function.name {
                    trace!("hoisting {}", name);
                    self.scopes.define_global(Symbol::new(
                        name,
                        function.resolved_return_type(),
                        SymbolKind::Function,
                    ));
                }
            }
        }
    }

    pub fn compile_program(&mut self, program: &Program) -> Result<(), Error> {
        self.hoist_functions(program);

        for stmt in &program.body {
            gen_statement(self, stmt)?;
        }

        let has_main = program.body.iter().any(|stmt| {
            matches!(stmt, Node::Function(function) if function.name.as_deref() == Some("main"))
        });
        if self.options.call_main && has_main {
            self.write_line("main();")?;
        }

        self.out.flush()?;
        debug!("emitted {} top level statements", program.body.len());
        Ok(())
    }

    /// Gives the sink back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Emits `program` as TypeScript into `out`.
///
/// Stops at the first error; whatever was written before it stays in the sink.
pub fn compile<W: Write>(program: &Program, out: W, options: &CompileOptions) -> Result<(), Error> {
    let mut compiler = Compiler::new(out, options.clone());
    compiler.compile_program(program)
}
