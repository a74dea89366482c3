use super::*;

impl<'a> Parser<'a> {
    /// Parses a declaration (or statement).
    pub fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        match self.cursor.peek().kind {
            TokenKind::Fn => self.parse_fn_declaration(),
            _ => self.parse_stmt(),
        }
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        debug!(
            "parsing {:?} statement on line {}",
            self.cursor.peek().kind,
            self.cursor.line()
        );
        match self.cursor.peek().kind {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => Ok(Stmt::Block(self.parse_block()?)),
            _ => {
                // expression statement
                let expr = self.parse_expr()?;
                self.expect_stmt_end("expected end of line after expression")?;
                Ok(Stmt::ExprStmt(expr))
            }
        }
    }

    /// Parses `do` followed by declarations up to the matching `end`.
    /// If a declaration fails, the rest of the block is skipped so that the error can be
    /// reported once for the enclosing top level declaration.
    pub fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        let start = self.cursor.expect(TokenKind::Do, "expected 'do'")?;

        let mut body = Vec::new();
        loop {
            self.skip_newlines();
            if self.cursor.matches(TokenKind::End) {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedBlock,
                    start.line,
                ));
            }
            match self.parse_declaration() {
                Ok(stmt) => body.push(stmt),
                Err(error) => {
                    self.skip_to_block_end();
                    return Err(error);
                }
            }
        }

        Ok(body)
    }

    /// A statement ends at a line break. `end`, `else` and end of input also close it
    /// but are left for the enclosing construct.
    fn expect_stmt_end(&mut self, message: &str) -> ParseResult<()> {
        if self.cursor.matches(TokenKind::Eol)
            || self.cursor.check(TokenKind::End)
            || self.cursor.check(TokenKind::Else)
            || self.cursor.is_at_end()
        {
            Ok(())
        } else {
            Err(self.cursor.unexpected("end of line", message))
        }
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::Fn, "expected 'fn'")?;
        let ident = self.expect_ident("expected function name")?;
        self.cursor
            .expect(TokenKind::LeftParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.cursor.matches(TokenKind::RightParen) {
            loop {
                params.push(self.expect_ident("expected parameter name")?);

                if !self.cursor.matches(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor
                .expect(TokenKind::RightParen, "expected ')' after parameters")?;
        }

        self.skip_newlines();
        let body = self.parse_block()?;

        Ok(Stmt::FnDeclaration {
            ident,
            params,
            body,
        })
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::If, "expected 'if'")?;
        let condition = self.parse_expr()?;

        self.skip_newlines();
        let then_branch = Box::new(self.parse_stmt()?);

        // `else` may start a later line, e.g. after a `do ... end` branch
        if self.cursor.peek_past(TokenKind::Eol).kind == TokenKind::Else {
            self.skip_newlines();
        }
        // an inner `if` in `then_branch` has already claimed any `else` it could
        let else_branch = if self.cursor.matches(TokenKind::Else) {
            self.skip_newlines();
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::While, "expected 'while'")?;
        self.cursor
            .expect(TokenKind::LeftParen, "expected '(' after 'while'")?;
        let condition = self.parse_expr()?;
        self.cursor
            .expect(TokenKind::RightParen, "expected ')' after condition")?;

        self.skip_newlines();
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::While { condition, body })
    }

    /// Parses a `for` loop and desugars it into a `while` loop:
    /// `Block[initializer, While(condition, Block[body, increment])]`.
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::For, "expected 'for'")?;
        self.cursor
            .expect(TokenKind::LeftParen, "expected '(' after 'for'")?;
        let (initializer, condition, increment) =
            self.with_for_clauses(true, Self::parse_for_clauses)?;

        self.skip_newlines();
        let body = self.parse_stmt()?;

        let mut loop_body = vec![body];
        if let Some(increment) = increment {
            loop_body.push(Stmt::ExprStmt(increment));
        }

        let condition = condition.unwrap_or(Expr::Literal(LiteralValue::Bool(true)));
        let mut stmts = Vec::new();
        if let Some(initializer) = initializer {
            stmts.push(initializer);
        }
        stmts.push(Stmt::While {
            condition,
            body: Box::new(Stmt::Block(loop_body)),
        });

        Ok(Stmt::Block(stmts))
    }

    /// Parses `initializer and condition and increment )`, where every clause may be empty.
    fn parse_for_clauses(&mut self) -> ParseResult<(Option<Stmt>, Option<Expr>, Option<Expr>)> {
        let initializer = if self.cursor.matches(TokenKind::And) {
            None
        } else {
            let stmt = match self.parse_expr()? {
                // a lone name declares the loop variable
                Expr::Identifier(ident) => Stmt::VarBinding {
                    ident,
                    initializer: None,
                },
                expr => Stmt::ExprStmt(expr),
            };
            self.cursor
                .expect(TokenKind::And, "expected 'and' after loop initializer")?;
            Some(stmt)
        };

        let condition = if self.cursor.check(TokenKind::And) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor
            .expect(TokenKind::And, "expected 'and' after loop condition")?;

        let increment = if self.cursor.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor
            .expect(TokenKind::RightParen, "expected ')' after for clauses")?;

        Ok((initializer, condition, increment))
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::Print, "expected 'print'")?;
        let expr = self.parse_expr()?;
        self.expect_stmt_end("expected end of line after value")?;
        Ok(Stmt::Print(expr))
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        self.cursor.expect(TokenKind::Return, "expected 'return'")?;
        let expr = self.parse_expr()?;
        self.expect_stmt_end("expected end of line after return value")?;
        Ok(Stmt::ReturnStmt(expr))
    }
}
