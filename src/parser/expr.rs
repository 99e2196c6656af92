use crate::{
    ast::expressions::{Expr, ExprKind, NumberLiteral},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expression"));
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than `bp`, keep folding into lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let binding_power = parser.current_binding_power();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("operator"));
        };

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::Number => ExprKind::Number(parse_number(&token.value).ok_or_else(|| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?),
        TokenKind::String => ExprKind::String(token.value.clone()),
        TokenKind::Char => match token.value.chars().next() {
            Some(ch) => ExprKind::Char(ch),
            None => {
                return Err(Error::new(
                    ErrorImpl::InvalidCharLiteral {
                        literal: token.value.clone(),
                    },
                    token.span.start.clone(),
                ))
            }
        },
        TokenKind::True => ExprKind::Bool(true),
        TokenKind::False => ExprKind::Bool(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    };

    Ok(Expr::new(kind, token.span))
}

fn parse_number(text: &str) -> Option<NumberLiteral> {
    if text.contains('.') {
        text.parse().ok().map(NumberLiteral::Float)
    } else {
        text.parse().ok().map(NumberLiteral::Int)
    }
}

/// Parses a name, a bare call `name(args)` or a module call
/// `module.function(args)`.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.expect(TokenKind::Identifier)?;

    match parser.current_token_kind() {
        TokenKind::Dot => {
            parser.advance();
            let error = Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected function name after `.`"),
                },
                parser.get_position(),
            );
            let function = parser.expect_error(TokenKind::Identifier, Some(error))?;
            let arguments = parse_call_arguments(parser)?;

            Ok(Expr::new(
                ExprKind::Call {
                    module: Some(name.value),
                    function: function.value,
                    arguments,
                },
                parser.span_from(name.span.start),
            ))
        }
        TokenKind::OpenParen => {
            let arguments = parse_call_arguments(parser)?;

            Ok(Expr::new(
                ExprKind::Call {
                    module: None,
                    function: name.value,
                    arguments,
                },
                parser.span_from(name.span.start),
            ))
        }
        _ => Ok(Expr::new(ExprKind::Var(name.value), name.span)),
    }
}

/// Parses `( expr, expr, ... )`.
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(args)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary {
            operator: operator_token,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;
    let span = Span {
        start: operator_token.span.start.clone(),
        end: rhs.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Unary {
            operator: operator_token,
            operand: Box::new(rhs),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
