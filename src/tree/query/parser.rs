//! Recursive descent parser for path queries
//!
//! ```text
//! query     := path ('|' path)*
//! path      := '/' relative? | '//' relative | relative
//! relative  := step (('/' | '//') step)*
//! step      := '.' | '..' | ('*' | NAME) predicate*
//! predicate := '[' (NUMBER | or_expr) ']'
//! or_expr   := and_expr ('or' and_expr)*
//! and_expr  := primary ('and' primary)*
//! primary   := '(' or_expr ')' | operand (('=' | '!=') LITERAL)?
//! operand   := '@' NAME | 'text' '(' ')' | 'local-name' '(' ')' | relative
//! ```

use smol_str::SmolStr;

use super::QueryError;
use super::lexer::{Token, TokenKind, tokenize};

// ============================================================================
// AST
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocationPath {
    pub absolute: bool,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Child,
    DescendantOrSelf,
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeTest {
    /// Matches the document node and every element.
    AnyNode,
    /// `*`: any element.
    Wildcard,
    /// Local name match.
    Name(SmolStr),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Predicate {
    /// 1-based position among the step's candidates.
    Position(usize),
    Expr(PredExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PredExpr {
    Or(Box<PredExpr>, Box<PredExpr>),
    And(Box<PredExpr>, Box<PredExpr>),
    Exists(Operand),
    Compare {
        operand: Operand,
        negated: bool,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Attribute(SmolStr),
    Text,
    LocalName,
    Path(LocationPath),
}

// ============================================================================
// PARSER
// ============================================================================

/// Parse a query into its union of location paths
pub(crate) fn parse(input: &str) -> Result<Vec<LocationPath>, QueryError> {
    let tokens = tokenize(input).map_err(|offset| QueryError::InvalidCharacter { offset })?;
    if tokens.is_empty() {
        return Err(QueryError::Empty);
    }
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let paths = parser.parse_union()?;
    if let Some(token) = parser.current() {
        return Err(QueryError::unexpected(token, "'|' or end of query"));
    }
    Ok(paths)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.current()
            .is_some_and(|t| t.kind == TokenKind::Name && t.text == keyword)
    }

    fn nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, QueryError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                let token = *token;
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(QueryError::unexpected(token, kind.describe())),
            None => Err(QueryError::UnexpectedEnd {
                expected: kind.describe(),
            }),
        }
    }

    // =========================================================================
    // Paths
    // =========================================================================

    fn parse_union(&mut self) -> Result<Vec<LocationPath>, QueryError> {
        let mut paths = vec![self.parse_path()?];
        while self.at(TokenKind::Pipe) {
            self.bump();
            paths.push(self.parse_path()?);
        }
        Ok(paths)
    }

    fn parse_path(&mut self) -> Result<LocationPath, QueryError> {
        if self.at(TokenKind::Slash) {
            self.bump();
            let mut steps = Vec::new();
            if self.at_step_start() {
                steps = self.parse_relative_steps()?;
            }
            return Ok(LocationPath {
                absolute: true,
                steps,
            });
        }
        if self.at(TokenKind::DoubleSlash) {
            self.bump();
            let mut steps = vec![descendant_or_self()];
            steps.extend(self.parse_relative_steps()?);
            return Ok(LocationPath {
                absolute: true,
                steps,
            });
        }
        Ok(LocationPath {
            absolute: false,
            steps: self.parse_relative_steps()?,
        })
    }

    fn at_step_start(&self) -> bool {
        matches!(
            self.current().map(|t| t.kind),
            Some(TokenKind::Dot | TokenKind::DotDot | TokenKind::Star | TokenKind::Name)
        )
    }

    fn parse_relative_steps(&mut self) -> Result<Vec<Step>, QueryError> {
        let mut steps = vec![self.parse_step()?];
        loop {
            if self.at(TokenKind::Slash) {
                self.bump();
            } else if self.at(TokenKind::DoubleSlash) {
                self.bump();
                steps.push(descendant_or_self());
            } else {
                break;
            }
            steps.push(self.parse_step()?);
        }
        Ok(steps)
    }

    fn parse_step(&mut self) -> Result<Step, QueryError> {
        let Some(token) = self.bump() else {
            return Err(QueryError::UnexpectedEnd { expected: "step" });
        };
        let (axis, test) = match token.kind {
            TokenKind::Dot => (Axis::SelfNode, NodeTest::AnyNode),
            TokenKind::DotDot => (Axis::Parent, NodeTest::AnyNode),
            TokenKind::Star => (Axis::Child, NodeTest::Wildcard),
            TokenKind::Name => (
                Axis::Child,
                NodeTest::Name(SmolStr::new(crate::tree::local_name(token.text))),
            ),
            _ => return Err(QueryError::unexpected(&token, "step")),
        };
        let mut predicates = Vec::new();
        while self.at(TokenKind::LBracket) {
            predicates.push(self.parse_predicate()?);
        }
        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    fn parse_predicate(&mut self) -> Result<Predicate, QueryError> {
        self.expect(TokenKind::LBracket)?;
        if self.at(TokenKind::Number) && self.nth(1) == Some(TokenKind::RBracket) {
            let token = self.expect(TokenKind::Number)?;
            self.expect(TokenKind::RBracket)?;
            let position = token
                .text
                .parse::<usize>()
                .ok()
                .filter(|&p| p > 0)
                .ok_or_else(|| QueryError::unexpected(&token, "position >= 1"))?;
            return Ok(Predicate::Position(position));
        }
        let expr = self.parse_or()?;
        self.expect(TokenKind::RBracket)?;
        Ok(Predicate::Expr(expr))
    }

    fn parse_or(&mut self) -> Result<PredExpr, QueryError> {
        let mut lhs = self.parse_and()?;
        while self.at_keyword("or") {
            self.bump();
            let rhs = self.parse_and()?;
            lhs = PredExpr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<PredExpr, QueryError> {
        let mut lhs = self.parse_primary()?;
        while self.at_keyword("and") {
            self.bump();
            let rhs = self.parse_primary()?;
            lhs = PredExpr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<PredExpr, QueryError> {
        if self.at(TokenKind::LParen) {
            self.bump();
            let inner = self.parse_or()?;
            self.expect(TokenKind::RParen)?;
            return Ok(inner);
        }
        let operand = self.parse_operand()?;
        let negated = if self.at(TokenKind::Eq) {
            false
        } else if self.at(TokenKind::NotEq) {
            true
        } else {
            return Ok(PredExpr::Exists(operand));
        };
        self.bump();
        let literal = self.expect(TokenKind::Literal)?;
        Ok(PredExpr::Compare {
            operand,
            negated,
            value: unquote(literal.text).to_string(),
        })
    }

    fn parse_operand(&mut self) -> Result<Operand, QueryError> {
        if self.at(TokenKind::At) {
            self.bump();
            let name = self.expect(TokenKind::Name)?;
            return Ok(Operand::Attribute(SmolStr::new(name.text)));
        }
        if self.at(TokenKind::Name) && self.nth(1) == Some(TokenKind::LParen) {
            let Some(name) = self.bump() else {
                return Err(QueryError::UnexpectedEnd { expected: "function" });
            };
            let operand = match name.text {
                "text" => Operand::Text,
                "local-name" => Operand::LocalName,
                _ => return Err(QueryError::UnknownFunction {
                    name: name.text.to_string(),
                    offset: name.offset,
                }),
            };
            self.expect(TokenKind::LParen)?;
            self.expect(TokenKind::RParen)?;
            return Ok(operand);
        }
        if self.at_step_start() {
            return Ok(Operand::Path(LocationPath {
                absolute: false,
                steps: self.parse_relative_steps()?,
            }));
        }
        match self.current() {
            Some(token) => Err(QueryError::unexpected(token, "predicate")),
            None => Err(QueryError::UnexpectedEnd {
                expected: "predicate",
            }),
        }
    }
}

fn descendant_or_self() -> Step {
    Step {
        axis: Axis::DescendantOrSelf,
        test: NodeTest::AnyNode,
        predicates: Vec::new(),
    }
}

fn unquote(literal: &str) -> &str {
    literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default()
}
