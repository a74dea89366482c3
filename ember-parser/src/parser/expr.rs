use super::*;

const EQUALITY_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqualEqual, BinaryOp::Equal),
    (TokenKind::BangEqual, BinaryOp::NotEqual),
];

const COMPARISON_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Greater, BinaryOp::Greater),
    (TokenKind::GreaterEqual, BinaryOp::GreaterEqual),
    (TokenKind::Less, BinaryOp::Less),
    (TokenKind::LessEqual, BinaryOp::LessEqual),
];

const TERM_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Subtract),
];

// `**` and `??` share the multiplicative tier and fold left like `*`.
const FACTOR_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Slash, BinaryOp::Divide),
    (TokenKind::Star, BinaryOp::Multiply),
    (TokenKind::StarStar, BinaryOp::Power),
    (TokenKind::QuestionQuestion, BinaryOp::Coalesce),
];

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Parses a right associative assignment.
    /// The target is parsed as an ordinary expression first; only a trailing `=` makes it a target.
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let target = self.parse_logic_or()?;

        if self.cursor.check(TokenKind::Equal) {
            let equals = self.cursor.advance();
            return match target {
                Expr::Identifier(ident) => Ok(Expr::Assign {
                    ident,
                    value: Box::new(self.parse_assignment()?),
                }),
                _ => Err(SyntaxError::new(
                    SyntaxErrorKind::InvalidAssignmentTarget,
                    equals.line,
                )),
            };
        }

        Ok(target)
    }

    fn parse_logic_or(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_logic_and()?;

        while self.cursor.matches(TokenKind::Or) {
            let rhs = self.parse_logic_and()?;
            lhs = Expr::Logical {
                lhs: Box::new(lhs),
                op: LogicalOp::Or,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_logic_and(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_equality()?;

        // inside `for (...)`, a bare `and` ends the clause instead
        while !self.in_for_clauses && self.cursor.matches(TokenKind::And) {
            let rhs = self.parse_equality()?;
            lhs = Expr::Logical {
                lhs: Box::new(lhs),
                op: LogicalOp::And,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary_tier(EQUALITY_OPS, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_binary_tier(COMPARISON_OPS, Self::parse_term)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_binary_tier(TERM_OPS, Self::parse_factor)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_tier(FACTOR_OPS, Self::parse_unary)
    }

    /// Parses a left associative chain of the operators in `ops`, with operands parsed by `operand`.
    fn parse_binary_tier(
        &mut self,
        ops: &[(TokenKind, BinaryOp)],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut lhs = operand(self)?;

        loop {
            let kind = self.cursor.peek().kind;
            let op = match ops.iter().find(|(tok, _)| *tok == kind) {
                Some(&(_, op)) => op,
                None => break, // not an operator of this tier, stop parsing
            };
            self.cursor.advance();

            let rhs = operand(self)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.cursor.peek().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            _ => return self.parse_call(),
        };
        self.cursor.advance();

        Ok(Expr::Unary {
            op,
            arg: Box::new(self.parse_unary()?),
        })
    }

    /* Expressions.Call */
    /// Parses a primary expression followed by any number of argument lists.
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.cursor.matches(TokenKind::LeftParen) {
            let args = self.with_for_clauses(false, Self::parse_arguments)?;
            expr = Expr::Call {
                callee: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    /// Parses the comma separated arguments after an already consumed `(`.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.cursor.matches(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expr()?);

                if !self.cursor.matches(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor
                .expect(TokenKind::RightParen, "expected ')' after arguments")?;
        }

        Ok(args)
    }

    /// Parses a primary (atom) expression.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.cursor.matches(TokenKind::LeftParen) {
            let inner = self.with_for_clauses(false, Self::parse_expr)?;
            self.cursor
                .expect(TokenKind::RightParen, "expected ')' after expression")?;
            return Ok(Expr::Grouping(Box::new(inner)));
        }

        let token = self.cursor.peek();
        let expr = match (token.kind, &token.value) {
            (TokenKind::Number, Some(TokenValue::Number(val))) => {
                Expr::Literal(LiteralValue::Number(*val))
            }
            (TokenKind::String, Some(TokenValue::String(val))) => {
                Expr::Literal(LiteralValue::String(val.clone()))
            }
            // tokens built without a value carry the literal in their lexeme
            (TokenKind::Number, _) => match token.lexeme.parse() {
                Ok(val) => Expr::Literal(LiteralValue::Number(val)),
                Err(_) => {
                    return Err(self
                        .cursor
                        .unexpected(TokenKind::Number, "invalid number literal"))
                }
            },
            (TokenKind::String, _) => {
                let lexeme = token.lexeme.as_str();
                let val = lexeme
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .unwrap_or(lexeme);
                Expr::Literal(LiteralValue::String(val.to_string()))
            }
            (TokenKind::True, _) => Expr::Literal(LiteralValue::Bool(true)),
            (TokenKind::False, _) => Expr::Literal(LiteralValue::Bool(false)),
            (TokenKind::Nil, _) => Expr::Literal(LiteralValue::Nil),
            (TokenKind::Identifier, _) => Expr::Identifier(token.lexeme.clone()),
            _ => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingExpression,
                    token.line,
                ))
            }
        };
        self.cursor.advance(); // eat parsed token

        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn expr(source: &str) -> Expr {
        let source = source.into();
        let ast = Parser::new(&source).parse_expr().unwrap();
        assert!(source.has_no_errors());
        ast
    }

    fn expr_err(source: &str) -> SyntaxErrorKind {
        let source = source.into();
        Parser::new(&source).parse_expr().unwrap_err().kind
    }

    fn num(val: f64) -> Expr {
        Expr::Literal(LiteralValue::Number(val))
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    #[test]
    fn test_literal() {
        assert_eq!(expr("true"), Expr::Literal(LiteralValue::Bool(true)));
        assert_eq!(expr("false"), Expr::Literal(LiteralValue::Bool(false)));
        assert_eq!(expr("nil"), Expr::Literal(LiteralValue::Nil));
        assert_eq!(expr("1"), num(1.0));
        assert_eq!(expr("2.5"), num(2.5));
        assert_eq!(
            expr(r#""str""#),
            Expr::Literal(LiteralValue::String("str".to_string()))
        );
    }

    #[test]
    fn test_binary_expr() {
        assert_debug_snapshot!(expr("1 + 2 * 3"), @r###"
        Binary {
            lhs: Literal(
                Number(
                    1.0,
                ),
            ),
            op: Add,
            rhs: Binary {
                lhs: Literal(
                    Number(
                        2.0,
                    ),
                ),
                op: Multiply,
                rhs: Literal(
                    Number(
                        3.0,
                    ),
                ),
            },
        }
        "###);
        // should be (2 * 2) * 2
        assert_eq!(
            expr("2 * 2 * 2"),
            binary(
                binary(num(2.0), BinaryOp::Multiply, num(2.0)),
                BinaryOp::Multiply,
                num(2.0)
            )
        );
        assert_eq!(
            expr("1 == 2 - 1"),
            binary(
                num(1.0),
                BinaryOp::Equal,
                binary(num(2.0), BinaryOp::Subtract, num(1.0))
            )
        );
        assert_eq!(
            expr("a < b != c >= d"),
            binary(
                binary(ident("a"), BinaryOp::Less, ident("b")),
                BinaryOp::NotEqual,
                binary(ident("c"), BinaryOp::GreaterEqual, ident("d"))
            )
        );
    }

    #[test]
    fn test_power_and_coalesce_share_factor_tier() {
        // should be (2 ** 3) ** 2, not 2 ** (3 ** 2)
        assert_eq!(
            expr("2 ** 3 ** 2"),
            binary(
                binary(num(2.0), BinaryOp::Power, num(3.0)),
                BinaryOp::Power,
                num(2.0)
            )
        );
        // should be ((a ?? b) * c) / d
        assert_eq!(
            expr("a ?? b * c / d"),
            binary(
                binary(
                    binary(ident("a"), BinaryOp::Coalesce, ident("b")),
                    BinaryOp::Multiply,
                    ident("c")
                ),
                BinaryOp::Divide,
                ident("d")
            )
        );
        // should be a + (b ?? c)
        assert_eq!(
            expr("a + b ?? c"),
            binary(
                ident("a"),
                BinaryOp::Add,
                binary(ident("b"), BinaryOp::Coalesce, ident("c"))
            )
        );
    }

    #[test]
    fn test_logical() {
        // should be a or (b and c)
        assert_eq!(
            expr("a or b and c"),
            Expr::Logical {
                lhs: Box::new(ident("a")),
                op: LogicalOp::Or,
                rhs: Box::new(Expr::Logical {
                    lhs: Box::new(ident("b")),
                    op: LogicalOp::And,
                    rhs: Box::new(ident("c")),
                }),
            }
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            expr("!-a"),
            Expr::Unary {
                op: UnaryOp::Not,
                arg: Box::new(Expr::Unary {
                    op: UnaryOp::Negate,
                    arg: Box::new(ident("a")),
                }),
            }
        );
        // unary binds tighter than factor
        assert_eq!(
            expr("-a * b"),
            binary(
                Expr::Unary {
                    op: UnaryOp::Negate,
                    arg: Box::new(ident("a")),
                },
                BinaryOp::Multiply,
                ident("b")
            )
        );
    }

    #[test]
    fn test_assignment() {
        assert_debug_snapshot!(expr("a = b = 3"), @r###"
        Assign {
            ident: "a",
            value: Assign {
                ident: "b",
                value: Literal(
                    Number(
                        3.0,
                    ),
                ),
            },
        }
        "###);
        assert_eq!(
            expr("a = b or c"),
            Expr::Assign {
                ident: "a".to_string(),
                value: Box::new(Expr::Logical {
                    lhs: Box::new(ident("b")),
                    op: LogicalOp::Or,
                    rhs: Box::new(ident("c")),
                }),
            }
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert_eq!(expr_err("1 = 2"), SyntaxErrorKind::InvalidAssignmentTarget);
        assert_eq!(expr_err("(a) = 2"), SyntaxErrorKind::InvalidAssignmentTarget);
        assert_eq!(expr_err("a + b = 2"), SyntaxErrorKind::InvalidAssignmentTarget);
        assert_eq!(expr_err("f() = 2"), SyntaxErrorKind::InvalidAssignmentTarget);
    }

    #[test]
    fn test_identifier() {
        assert_eq!(expr("foo"), ident("foo"));
    }

    #[test]
    fn test_literals_without_value() {
        let errors = ErrorReporter::new();
        let tokens = vec![
            Token::new(TokenKind::Number, "2.5", 1),
            Token::new(TokenKind::Plus, "+", 1),
            Token::new(TokenKind::String, "\"hi\"", 1),
        ];
        let ast = Parser::from_tokens(tokens, &errors).parse_expr().unwrap();
        assert_eq!(
            ast,
            binary(
                num(2.5),
                BinaryOp::Add,
                Expr::Literal(LiteralValue::String("hi".to_string()))
            )
        );

        let tokens = vec![Token::new(TokenKind::Number, "1.2.3", 4)];
        let error = Parser::from_tokens(tokens, &errors)
            .parse_expr()
            .unwrap_err();
        assert_eq!(error.line, 4);
        assert_eq!(
            error.kind,
            SyntaxErrorKind::UnexpectedToken {
                message: "invalid number literal".to_string(),
                expected: "number".to_string(),
                found: "`1.2.3`".to_string(),
            }
        );
    }

    #[test]
    fn test_grouping() {
        assert_eq!(
            expr("(1 + 2) * 3"),
            binary(
                Expr::Grouping(Box::new(binary(num(1.0), BinaryOp::Add, num(2.0)))),
                BinaryOp::Multiply,
                num(3.0)
            )
        );
        assert!(matches!(
            expr_err("(1 + 2"),
            SyntaxErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_fn_call() {
        assert_eq!(
            expr("foo()"),
            Expr::Call {
                callee: Box::new(ident("foo")),
                args: vec![],
            }
        );
        assert_eq!(
            expr("foo(1, bar, baz())"),
            Expr::Call {
                callee: Box::new(ident("foo")),
                args: vec![
                    num(1.0),
                    ident("bar"),
                    Expr::Call {
                        callee: Box::new(ident("baz")),
                        args: vec![],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_chained_call() {
        assert_debug_snapshot!(expr("f()(1)"), @r###"
        Call {
            callee: Call {
                callee: Identifier(
                    "f",
                ),
                args: [],
            },
            args: [
                Literal(
                    Number(
                        1.0,
                    ),
                ),
            ],
        }
        "###);
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(expr_err(")"), SyntaxErrorKind::MissingExpression);
        assert_eq!(expr_err("1 +"), SyntaxErrorKind::MissingExpression);
        assert_eq!(expr_err("foo(1,)"), SyntaxErrorKind::MissingExpression);
    }
}
