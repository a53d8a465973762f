//! Grammar rules, split by construct.
//!
//! - `stmt.rs`: statement dispatch, blocks, `if`/`while`/`return`,
//!   assignment disambiguation
//! - `expr.rs`: precedence chain and factors
//! - `postfix.rs`: member/call/index chains and argument lists
//! - `item.rs`: `class`, `using`, type names, `new`

mod expr;
mod item;
mod postfix;
mod stmt;
