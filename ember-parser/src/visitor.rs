//! Visitor pattern for AST nodes.

use crate::ast::{Expr, Program, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
}

/// Iteratively visit all statements in a `Vec<Stmt>`.
macro_rules! visit_stmt_list {
    ($visitor: expr, $body: expr) => {
        for stmt in $body {
            Visitor::visit_stmt($visitor, stmt);
        }
    };
}

pub fn walk_program<'ast>(visitor: &mut impl Visitor<'ast>, program: &'ast Program) {
    visit_stmt_list!(visitor, &program.stmts);
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::Assign { ident: _, value } => visitor.visit_expr(value),
        Expr::Logical { lhs, op: _, rhs } | Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
        Expr::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Literal(_) => {}
        Expr::Identifier(_) => {}
        Expr::Grouping(inner) => visitor.visit_expr(inner),
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::FnDeclaration {
            ident: _,
            params: _,
            body,
        } => visit_stmt_list!(visitor, body),
        Stmt::VarBinding {
            ident: _,
            initializer,
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_expr(initializer);
            }
        }
        Stmt::Block(body) => visit_stmt_list!(visitor, body),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::While { condition, body } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(body);
        }
        Stmt::Print(expr) => visitor.visit_expr(expr),
        Stmt::ReturnStmt(expr) => visitor.visit_expr(expr),
        Stmt::ExprStmt(expr) => visitor.visit_expr(expr),
    }
}

/// Counts every node of a tree, the [`Program`] root included.
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl<'ast> Visitor<'ast> for NodeCounter {
    fn visit_program(&mut self, program: &'ast Program) {
        self.count += 1;
        walk_program(self, program);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.count += 1;
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.count += 1;
        walk_stmt(self, stmt);
    }
}

/// Returns the number of nodes in `program`.
pub fn count_nodes(program: &Program) -> usize {
    let mut counter = NodeCounter::default();
    counter.visit_program(program);
    counter.count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn nodes(source: &str) -> usize {
        let source = source.into();
        let program = Parser::new(&source).parse_program();
        assert!(source.has_no_errors());
        count_nodes(&program)
    }

    #[test]
    fn test_count_nodes() {
        assert_eq!(nodes(""), 1);
        // Program, ExprStmt, Binary, Literal, Binary, Literal, Literal
        assert_eq!(nodes("1 + 2 * 3"), 7);
        // Program, FnDeclaration, ReturnStmt, Call, Identifier, Identifier
        assert_eq!(nodes("fn f(a) do return g(a) end"), 6);
        // Program, Block, ExprStmt, Assign, Literal, While, Binary, Identifier, Literal,
        // Block, Print, Identifier, ExprStmt, Assign, Binary, Identifier, Literal
        assert_eq!(nodes("for (i = 0 and i < 10 and i = i + 1) print i"), 17);
    }

    #[derive(Default)]
    struct IdentCollector<'ast> {
        idents: Vec<&'ast str>,
    }

    impl<'ast> Visitor<'ast> for IdentCollector<'ast> {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let Expr::Identifier(ident) = expr {
                self.idents.push(ident);
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_visit_order() {
        let source = "if a print b(c) else while (d) e = f\n".into();
        let program = Parser::new(&source).parse_program();
        assert!(source.has_no_errors());

        let mut collector = IdentCollector::default();
        collector.visit_program(&program);
        assert_eq!(collector.idents, vec!["a", "b", "c", "d", "f"]);
    }
}
