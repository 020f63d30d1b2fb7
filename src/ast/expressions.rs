use std::{
    fmt::{Display, Formatter, Result},
    mem,
    rc::Rc,
};

use crate::{lexer::tokens::Token, stack::ensure_sufficient_stack};

use super::{
    ast::{Expr, Node},
    statements::BlockStmt,
};

// LITERALS

/// Identifier
/// A name reference. Also used for `let` targets and function parameters.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Node for BooleanLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

/// String Literal
/// `value` holds the decoded contents; rendering re-quotes and re-escapes it.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Node for StringLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "\"")?;
        for ch in self.value.chars() {
            match ch {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{}", ch)?,
            }
        }
        write!(f, "\"")
    }
}

// COMPLEX

// Nodes that own child expressions detach them before being dropped and
// release them under `ensure_sufficient_stack`, so deeply nested trees are
// freed without overflowing the native stack.

/// Swaps `slot` for an allocation-free leaf and returns what it held.
fn detach(slot: &mut Expr, token: &Token) -> Expr {
    let vacant = Expr::Boolean(BooleanLiteral {
        token: Token {
            kind: token.kind,
            literal: String::new(),
            span: token.span.clone(),
        },
        value: false,
    });

    mem::replace(slot, vacant)
}

/// Prefix Expression
/// `!<right>` or `-<right>`.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: Token,
    pub right: Box<Expr>,
}

impl Node for PrefixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Drop for PrefixExpr {
    fn drop(&mut self) {
        let right = detach(&mut self.right, &self.token);
        ensure_sufficient_stack(move || drop(right));
    }
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.operator.literal, self.right)
    }
}

/// Infix Expression
/// A binary operator applied to two operands. The leading token is the
/// operator itself.
#[derive(Debug, Clone)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

impl Node for InfixExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Drop for InfixExpr {
    fn drop(&mut self) {
        let left = detach(&mut self.left, &self.token);
        let right = detach(&mut self.right, &self.token);
        ensure_sufficient_stack(move || drop((left, right)));
    }
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.left, self.operator.literal, self.right)
    }
}

#[derive(Debug, Clone)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl Node for IfExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Drop for IfExpr {
    fn drop(&mut self) {
        let condition = detach(&mut self.condition, &self.token);
        ensure_sufficient_stack(move || drop(condition));
    }
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

/// Function Literal
/// The body is shared with every function value created from this literal.
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStmt>,
}

impl Node for FunctionLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{}({}) {{ {} }}",
            self.token_literal(),
            params.join(", "),
            self.body
        )
    }
}

/// Call Expression
/// The leading token is the opening parenthesis of the argument list.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub token: Token,
    pub function: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Node for CallExpr {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Drop for CallExpr {
    fn drop(&mut self) {
        let function = detach(&mut self.function, &self.token);
        let arguments = mem::take(&mut self.arguments);
        ensure_sufficient_stack(move || drop((function, arguments)));
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let args: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.function, args.join(", "))
    }
}
