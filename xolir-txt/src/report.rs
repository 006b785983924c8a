//! Human-readable listings of a parsed program, as printed by the CLI.

use std::fmt;

use crate::ir::ast::{Program, TypeDefTarget};

/// Name, versions and counts.
pub struct Summary<'a>(pub &'a Program);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.0;
        writeln!(f, "Successfully parsed program: {}", program.name)?;
        writeln!(f, "IR version: {}", program.ir_version)?;
        writeln!(f, "TELC version: {}", program.telc_version)?;
        writeln!(f, "Types: {}", program.types.len())?;
        writeln!(f, "Functions: {}", program.funcs.len())
    }
}

/// Every type and function with the spans they were read from.
pub struct Detail<'a>(pub &'a Program);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.0;

        if !program.types.is_empty() {
            writeln!(f, "\nTypes:")?;
            for (i, def) in program.types.iter().enumerate() {
                writeln!(f, "  {}. {} (pos: {}, len: {})", i + 1, def.name(), def.pos.start, def.pos.length)?;
                match &def.target {
                    TypeDefTarget::Struct(s) => {
                        writeln!(f, "    Fields:")?;
                        for field in &s.fields {
                            writeln!(f, "      - {} (pos: {}, len: {})", field.name, field.pos.start, field.pos.length)?;
                        }
                    }
                }
            }
        }

        if !program.funcs.is_empty() {
            writeln!(f, "\nFunctions:")?;
            for (i, func) in program.funcs.iter().enumerate() {
                writeln!(f, "  {}. {} (pos: {}, len: {})", i + 1, func.name, func.pos.start, func.pos.length)?;
                writeln!(f, "    Arguments:")?;
                for arg in &func.signature.args {
                    writeln!(f, "      - {} (pos: {}, len: {})", arg.name, arg.pos.start, arg.pos.length)?;
                }
                writeln!(f, "    Results:")?;
                for result in &func.signature.results {
                    writeln!(f, "      - TypeRef (pos: {}, len: {})", result.pos.start, result.pos.length)?;
                }
            }
        }

        Ok(())
    }
}
