use crate::{
    ast::statements::{Stmt, StmtKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

/// Parses one statement and an optional trailing `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let stmt = match handler {
        Some(handler) => handler(parser)?,
        None if parser.current_token_kind() == TokenKind::Identifier
            && parser.peek_kind() == TokenKind::Assignment =>
        {
            parse_assign_stmt(parser)?
        }
        None => {
            let expr = parse_expr(parser, BindingPower::Default)?;
            let span = expr.span.clone();
            Stmt::new(StmtKind::Expression(expr), span)
        }
    };

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(stmt)
}

/// Parses `{ stmt* }`.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("`}`"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(statements)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();
    let mutable = start_token.kind == TokenKind::Var;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected `:` and a type after the variable name"),
        },
        parser.get_position(),
    );
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let declared_type = parse_type(parser, BindingPower::Default)?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::VarDecl {
            name,
            declared_type,
            initializer,
            mutable,
        },
        parser.span_from(start_token.span.start),
    ))
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::new(
        StmtKind::Assign {
            name: target.value,
            value,
        },
        parser.span_from(target.span.start),
    ))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let module = parser.expect(TokenKind::Identifier)?.value;

    let source = if parser.current_token_kind() == TokenKind::From {
        parser.advance();
        if parser.current_token_kind() == TokenKind::String {
            Some(parser.advance().value.clone())
        } else {
            Some(parser.expect(TokenKind::Identifier)?.value)
        }
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::Import { module, source },
        parser.span_from(start),
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_block = parse_block(parser)?;

    let else_block = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(vec![parse_if_stmt(parser)?])
        } else {
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_block,
            else_block,
        },
        parser.span_from(start),
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::new(
        StmtKind::While { condition, body },
        parser.span_from(start),
    ))
}

/// Parses `for ( init [;] condition [;] update ) { body }`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    // `parse_stmt` consumes the `;` after `init`
    let init = parse_stmt(parser)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }
    let update = parse_stmt(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::new(
        StmtKind::For {
            init: Box::new(init),
            condition,
            update: Box::new(update),
            body,
        },
        parser.span_from(start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    // A value is only parsed when the next token can start an expression
    let value = if parser
        .get_nud_lookup()
        .contains_key(&parser.current_token_kind())
    {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::new(StmtKind::Return(value), parser.span_from(start)))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    Ok(Stmt::new(StmtKind::Break, span))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    Ok(Stmt::new(StmtKind::Continue, span))
}
