//! Parser for the ember scripting language.
//!
//! Source text is turned into [`lexer::Token`]s, which [`parser::Parser`] turns into an
//! [`ast::Program`]. Syntax errors are collected in an [`ember_source::ErrorReporter`]
//! instead of aborting the parse.

pub mod ast;
pub mod cursor;
pub mod lexer;
pub mod parser;
pub mod visitor;
