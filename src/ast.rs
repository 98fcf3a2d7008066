//! The Cflat abstract syntax tree and its pretty-printer.
//!
//! Every node owns its children outright; the tree is immutable once the
//! parser returns it. `Display` renders the stable textual form that the
//! `parse` executable prints and the tests assert against.

use std::fmt;

// Type
// | Int
// | Struct(name)
// | Fn(params, ret)
// | Ptr(type)
// | Array(type)
// | Nil
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Int,
    Struct(String),
    Fn { params: Vec<Type>, ret: Box<Type> },
    Ptr(Box<Type>),
    Array(Box<Type>),
    Nil,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub name: String,
    pub typ: Type,
}

// Place
// | Id(name)
// | Deref(exp)
// | ArrayAccess { array, index }
// | FieldAccess { ptr, field }
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Place {
    Id(String),
    Deref(Box<Exp>),
    ArrayAccess { array: Box<Exp>, index: Box<Exp> },
    FieldAccess { ptr: Box<Exp>, field: String },
}

// Exp
// | Val(place)
// | Num(i64)          -- non-negative; a leading `-` is UnOp(Neg, ..)
// | Nil
// | Select { guard, tt, ff }
// | UnOp(op, exp)
// | BinOp { op, left, right }
// | NewSingle(type)
// | NewArray { typ, size }
// | Call(funcall)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exp {
    Val(Place),
    Num(i64),
    Nil,
    Select {
        guard: Box<Exp>,
        tt: Box<Exp>,
        ff: Box<Exp>,
    },
    UnOp(UnaryOp, Box<Exp>),
    BinOp {
        op: BinaryOp,
        left: Box<Exp>,
        right: Box<Exp>,
    },
    NewSingle(Type),
    NewArray {
        typ: Type,
        size: Box<Exp>,
    },
    Call(FunCall),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunCall {
    pub callee: Box<Exp>,
    pub args: Vec<Exp>,
}

// Stmt
// | Assign(place, exp)
// | Call(funcall)
// | If { guard, tt, ff }
// | While(guard, body)
// | Break
// | Continue
// | Return(exp)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Assign(Place, Exp),
    Call(FunCall),
    If {
        guard: Exp,
        tt: Vec<Stmt>,
        ff: Vec<Stmt>,
    },
    While(Exp, Vec<Stmt>),
    Break,
    Continue,
    Return(Exp),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Decl>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Decl>,
    pub rettyp: Type,
    pub locals: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub structs: Vec<StructDef>,
    pub externs: Vec<Decl>,
    pub functions: Vec<FunctionDef>,
}

/// Writes `items` separated by `", "`.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("Int"),
            Type::Struct(name) => write!(f, "Struct({name})"),
            Type::Fn { params, ret } => {
                f.write_str("Fn([")?;
                write_list(f, params)?;
                write!(f, "], {ret})")
            }
            Type::Ptr(base) => write!(f, "Ptr({base})"),
            Type::Array(element) => write!(f, "Array({element})"),
            Type::Nil => f.write_str("Nil"),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decl {{ name: \"{}\", typ: {} }}", self.name, self.typ)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Id(name) => write!(f, "Id(\"{name}\")"),
            Place::Deref(exp) => write!(f, "Deref({exp})"),
            Place::ArrayAccess { array, index } => {
                write!(f, "ArrayAccess {{ array: {array}, index: {index} }}")
            }
            Place::FieldAccess { ptr, field } => {
                write!(f, "FieldAccess {{ ptr: {ptr}, field: \"{field}\" }}")
            }
        }
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Val(place) => write!(f, "Val({place})"),
            Exp::Num(value) => write!(f, "Num({value})"),
            Exp::Nil => f.write_str("Nil"),
            Exp::Select { guard, tt, ff } => {
                write!(f, "Select {{ guard: {guard}, tt: {tt}, ff: {ff} }}")
            }
            Exp::UnOp(op, exp) => write!(f, "UnOp({op}, {exp})"),
            Exp::BinOp { op, left, right } => {
                write!(f, "BinOp {{ op: {op}, left: {left}, right: {right} }}")
            }
            Exp::NewSingle(typ) => write!(f, "NewSingle({typ})"),
            Exp::NewArray { typ, size } => write!(f, "NewArray {{ typ: {typ}, size: {size} }}"),
            Exp::Call(call) => write!(f, "Call({call})"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "Neg",
            UnaryOp::Not => "Not",
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
            BinaryOp::Eq => "Eq",
            BinaryOp::NotEq => "NotEq",
            BinaryOp::Lt => "Lt",
            BinaryOp::Lte => "Lte",
            BinaryOp::Gt => "Gt",
            BinaryOp::Gte => "Gte",
        })
    }
}

impl fmt::Display for FunCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunCall {{ callee: {}, args: [", self.callee)?;
        write_list(f, &self.args)?;
        f.write_str("] }")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assign(place, exp) => write!(f, "Assign({place}, {exp})"),
            Stmt::Call(call) => write!(f, "Call({call})"),
            Stmt::If { guard, tt, ff } => {
                write!(f, "If {{ guard: {guard}, tt: [")?;
                write_list(f, tt)?;
                f.write_str("], ff: [")?;
                write_list(f, ff)?;
                f.write_str("] }")
            }
            Stmt::While(guard, body) => {
                write!(f, "While({guard}, [")?;
                write_list(f, body)?;
                f.write_str("])")
            }
            Stmt::Break => f.write_str("Break"),
            Stmt::Continue => f.write_str("Continue"),
            Stmt::Return(exp) => write!(f, "Return({exp})"),
        }
    }
}

impl fmt::Display for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Struct {{ name: \"{}\", fields: [", self.name)?;
        write_list(f, &self.fields)?;
        f.write_str("] }")
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {{ name: \"{}\", prms: [", self.name)?;
        write_list(f, &self.params)?;
        write!(f, "], rettyp: {}, locals: {{", self.rettyp)?;
        write_list(f, &self.locals)?;
        f.write_str("}, stmts: [")?;
        write_list(f, &self.stmts)?;
        f.write_str("] }")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Structs and externs render with a separator after every element,
        // functions only between elements. Downstream tooling matches on
        // this exact shape.
        f.write_str("Program { structs: {")?;
        for struct_def in &self.structs {
            write!(f, "{struct_def}, ")?;
        }
        f.write_str("}, externs: {")?;
        for decl in &self.externs {
            write!(f, "{decl}, ")?;
        }
        f.write_str("}, functions: {")?;
        write_list(f, &self.functions)?;
        f.write_str("}}")
    }
}
