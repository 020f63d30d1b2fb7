use std::rc::Rc;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr, StringLiteral,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    stack::ensure_sufficient_stack,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

// Every handler starts with the parser on the expression's first token and
// leaves it on the expression's last token.

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    ensure_sufficient_stack(|| {
        // First parse NUD
        let token_kind = parser.current_token_kind();
        let nud = match parser.get_nud_lookup().get(&token_kind) {
            Some(nud) => *nud,
            None => {
                return Err(Error::new(
                    ErrorImpl::NoPrefixParseFn { kind: token_kind },
                    parser.get_position(),
                ))
            }
        };

        let mut left = nud(parser)?;

        // While the next token binds tighter than bp, fold it into lhs
        while parser.peek_token_kind() != TokenKind::Semicolon && bp < parser.peek_binding_power()
        {
            let led = match parser.get_led_lookup().get(&parser.peek_token_kind()) {
                Some(led) => *led,
                None => return Ok(left),
            };

            parser.advance();
            let operator_bp = parser.current_binding_power();
            left = led(parser, left, operator_bp)?;
        }

        Ok(left)
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Integer => match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.literal.clone(),
                },
                token.span.start.clone(),
            )),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(Identifier {
            value: token.literal.clone(),
            token,
        })),
        TokenKind::String => Ok(Expr::String(StringLiteral {
            value: token.literal.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanLiteral {
            value: token.kind == TokenKind::True,
            token,
        })),
        kind => Err(Error::new(
            ErrorImpl::NoPrefixParseFn { kind },
            token.span.start.clone(),
        )),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        token: operator_token.clone(),
        operator: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    // Same binding power on the right keeps equal-precedence operators left-associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        token: operator_token.clone(),
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // if (<condition>) { <consequence> } else { <alternative> }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_fn_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body: Rc::new(body),
    }))
}

fn parse_fn_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(Identifier {
            value: token.literal.clone(),
            token,
        });

        if parser.peek_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let mut arguments = vec![];

    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.peek_token_kind() == TokenKind::Comma {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}
