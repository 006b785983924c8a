use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::span::Position;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub pos: Position,
    pub name: String,
    pub ir_version: u32,
    pub telc_version: u32,
    pub types: Vec<TypeDef>,
    pub funcs: Vec<Function>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinType {
    #[serde(rename = "S_INT_32")]
    SInt32 = 0,
    #[serde(rename = "S_INT_64")]
    SInt64 = 1,
    #[serde(rename = "REAL_64")]
    Real64 = 2,
    #[serde(rename = "BOOL")]
    Bool = 3,
}

impl BuiltinType {
    pub fn all() -> [Self; 4] {
        [Self::SInt32, Self::SInt64, Self::Real64, Self::Bool]
    }

    /// Enumerator name as written after `%`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SInt32 => "S_INT_32",
            Self::SInt64 => "S_INT_64",
            Self::Real64 => "REAL_64",
            Self::Bool => "BOOL",
        }
    }
}

impl FromStr for BuiltinType {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or(())
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `{ TypeRef target = #builtin (...) }` or `{ TypeRef target = #type_id (N) }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeRef {
    pub pos: Position,
    pub target: TypeTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeTarget {
    Builtin(BuiltinType),
    /// Index into `Program::types`; not resolved here.
    ById(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedName {
    pub pos: Position,
    pub name: String,
    pub typ: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructType {
    pub pos: Position,
    pub name: String,
    pub is_anonymous: bool,
    pub fields: Vec<TypedName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub pos: Position,
    pub target: TypeDefTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDefTarget {
    Struct(StructType),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match &self.target {
            TypeDefTarget::Struct(s) => &s.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionType {
    pub pos: Position,
    pub args: Vec<TypedName>,
    pub results: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub pos: Position,
    pub name: String,
    pub signature: FunctionType,
    pub locals: Vec<TypedName>,
    pub code: Vec<Statement>,
}

/// Statements inside `code = [...]`. The text reader accepts no statement
/// forms yet, so this has no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {}
