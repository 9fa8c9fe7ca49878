//! Recursive-descent parser for the schema notation.
//!
//! The parser never gives up on a source: errors are recorded as diagnostics
//! and parsing resumes at the next item (top level) or the next member
//! (inside a block). At most one diagnostic is reported per token position.

use std::ops::Range;

use typemirror_core::{Literal, PrimitiveKind};

use super::SourceId;
use super::ast::{
    AliasDef, Attr, AttrKind, EnumDef, Item, LiteralExpr, MemberDef, Name, PackageDecl,
    SchemaFile, Span, StructDef, TypeExpr, TypeExprKind, VariantDef,
};
use super::lexer::{Token, TokenKind, doc_text, lex, unquote};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};

/// Type expressions nested deeper than this are rejected.
const MAX_DEPTH: u32 = 128;

#[derive(Debug)]
pub struct ParseResult {
    pub file: SchemaFile,
    pub diagnostics: Diagnostics,
}

/// Parse one source.
pub fn parse(source: SourceId, text: &str) -> ParseResult {
    Parser::new(source, text).parse()
}

struct Parser<'src> {
    source: SourceId,
    text: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token.
    prev_end: usize,
    depth: u32,
    diagnostics: Diagnostics,
    last_diagnostic_pos: Option<usize>,
}

impl<'src> Parser<'src> {
    fn new(source: SourceId, text: &'src str) -> Self {
        Self {
            source,
            text,
            tokens: lex(text),
            pos: 0,
            prev_end: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
            last_diagnostic_pos: None,
        }
    }

    fn parse(mut self) -> ParseResult {
        let file = self.parse_file();
        ParseResult {
            file,
            diagnostics: self.diagnostics,
        }
    }

    // Token cursor

    /// Kind of the next token, reporting and skipping unrecognized input.
    fn current(&mut self) -> Option<TokenKind> {
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind != TokenKind::Garbage {
                return Some(token.kind);
            }
            let span = token.span.clone();
            self.pos += 1;
            if let Some(diag) = self.report(DiagnosticKind::UnexpectedCharacter, span) {
                diag.emit();
            }
        }
        None
    }

    /// Kind of the `n`-th token after the current one.
    fn peek(&mut self, n: usize) -> Option<TokenKind> {
        self.current()?;
        self.tokens[self.pos..]
            .iter()
            .filter(|t| t.kind != TokenKind::Garbage)
            .nth(n)
            .map(|t| t.kind)
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    fn current_span(&mut self) -> Span {
        self.current();
        self.tokens
            .get(self.pos)
            .map_or(self.text.len()..self.text.len(), |t| t.span.clone())
    }

    fn bump(&mut self) -> Span {
        let span = self.current_span();
        if self.pos < self.tokens.len() {
            self.pos += 1;
            self.prev_end = span.end;
        }
        span
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Span> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// On mismatch: report but don't consume.
    fn expect(&mut self, kind: TokenKind) -> Option<Span> {
        if let Some(span) = self.eat(kind) {
            return Some(span);
        }
        self.error_msg(DiagnosticKind::ExpectedToken, kind.describe());
        None
    }

    fn slice(&self, span: &Range<usize>) -> &'src str {
        &self.text[span.clone()]
    }

    // Diagnostics

    fn report(&mut self, kind: DiagnosticKind, span: Span) -> Option<DiagnosticBuilder<'_>> {
        if self.last_diagnostic_pos == Some(span.start) {
            return None;
        }
        self.last_diagnostic_pos = Some(span.start);
        Some(self.diagnostics.report(self.source, kind, span))
    }

    fn error(&mut self, kind: DiagnosticKind) {
        let span = self.current_span();
        if let Some(diag) = self.report(kind, span) {
            diag.emit();
        }
    }

    fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let span = self.current_span();
        if let Some(diag) = self.report(kind, span) {
            diag.message(message).emit();
        }
    }

    fn error_unclosed(&mut self, open: Span) {
        let span = self.current_span();
        let source = self.source;
        if let Some(diag) = self.report(DiagnosticKind::UnclosedBlock, span) {
            diag.related_to(source, "block opened here", open).emit();
        }
    }

    // Recovery

    fn recover_to_item(&mut self) {
        self.bump();
        while let Some(kind) = self.current() {
            if kind.is_item_start() || kind == TokenKind::DocComment {
                break;
            }
            self.bump();
        }
    }

    fn recover_in_block(&mut self) {
        self.bump();
        while let Some(kind) = self.current() {
            if self.is_block_sync(kind) {
                break;
            }
            self.bump();
        }
    }

    fn is_block_sync(&mut self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::RBrace
            | TokenKind::DotDot
            | TokenKind::DocComment
            | TokenKind::Comma
            | TokenKind::Semicolon => true,
            TokenKind::Ident => matches!(
                self.peek(1),
                Some(TokenKind::Colon | TokenKind::Equals)
            ),
            _ => kind.is_item_start(),
        }
    }

    // Grammar

    fn parse_file(&mut self) -> SchemaFile {
        let mut package: Option<PackageDecl> = None;
        let mut items = Vec::new();

        loop {
            let doc = self.take_docs();
            let Some(kind) = self.current() else {
                break;
            };
            match kind {
                TokenKind::KwPackage => {
                    let Some(decl) = self.parse_package() else {
                        continue;
                    };
                    match package.as_ref().map(|p| p.span.clone()) {
                        Some(first) => {
                            let source = self.source;
                            let kind = DiagnosticKind::DuplicatePackage;
                            if let Some(diag) = self.report(kind, decl.span) {
                                diag.related_to(source, "first declared here", first).emit();
                            }
                        }
                        None => package = Some(decl),
                    }
                }
                TokenKind::KwStruct => items.extend(self.parse_struct(doc).map(Item::Struct)),
                TokenKind::KwEnum => items.extend(self.parse_enum(doc).map(Item::Enum)),
                TokenKind::KwAlias => items.extend(self.parse_alias(doc).map(Item::Alias)),
                _ => {
                    self.error_msg(
                        DiagnosticKind::ExpectedToken,
                        "`struct`, `enum`, `alias` or `package`",
                    );
                    self.recover_to_item();
                }
            }
        }

        SchemaFile {
            source: self.source,
            package,
            items,
        }
    }

    fn take_docs(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        while self.at(TokenKind::DocComment) {
            let span = self.bump();
            lines.push(doc_text(self.slice(&span)));
        }
        if lines.is_empty() {
            return None;
        }
        Some(lines.join("\n"))
    }

    fn parse_name(&mut self) -> Option<Name> {
        let Some(span) = self.eat(TokenKind::Ident) else {
            self.error(DiagnosticKind::ExpectedName);
            return None;
        };
        Some(Name {
            text: self.slice(&span).to_string(),
            span,
        })
    }

    /// `package a.b/c` or `package "any/path"`.
    fn parse_package(&mut self) -> Option<PackageDecl> {
        let start = self.bump().start;

        if let Some(span) = self.eat(TokenKind::StringLiteral) {
            return Some(PackageDecl {
                path: unquote(self.slice(&span)),
                span: start..span.end,
            });
        }

        let first = self.parse_name()?;
        let mut path = first.text;
        while let Some(sep) = self
            .eat(TokenKind::Dot)
            .or_else(|| self.eat(TokenKind::Slash))
        {
            path.push_str(self.slice(&sep));
            let segment = self.parse_name()?;
            path.push_str(&segment.text);
        }

        Some(PackageDecl {
            path,
            span: start..self.prev_end,
        })
    }

    fn parse_struct(&mut self, doc: Option<String>) -> Option<StructDef> {
        self.bump();
        let Some(name) = self.parse_name() else {
            self.recover_to_item();
            return None;
        };
        let members = self.parse_members();
        Some(StructDef { name, doc, members })
    }

    /// `{ member* }`
    fn parse_members(&mut self) -> Vec<MemberDef> {
        let Some(open) = self.expect(TokenKind::LBrace) else {
            return Vec::new();
        };

        let mut members = Vec::new();
        loop {
            let doc = self.take_docs();
            match self.current() {
                Some(TokenKind::RBrace) => {
                    self.bump();
                    break;
                }
                None => {
                    self.error_unclosed(open);
                    break;
                }
                Some(kind) if kind.is_item_start() => {
                    self.error_unclosed(open);
                    break;
                }
                Some(TokenKind::Comma | TokenKind::Semicolon) => {
                    self.bump();
                }
                Some(TokenKind::DotDot) => members.extend(self.parse_embedded(doc)),
                Some(TokenKind::Ident) => members.extend(self.parse_member(doc)),
                Some(_) => {
                    self.error(DiagnosticKind::ExpectedName);
                    self.recover_in_block();
                }
            }
        }
        members
    }

    fn parse_member(&mut self, doc: Option<String>) -> Option<MemberDef> {
        let name = self.parse_name()?;
        if self.expect(TokenKind::Colon).is_none() {
            self.recover_in_block();
            return None;
        }
        let ty = self.parse_type();
        let attrs = self.parse_attrs();
        Some(MemberDef {
            name,
            ty,
            embedded: false,
            attrs,
            doc,
        })
    }

    /// `..T`, `..pkg.T` or `..*T`
    fn parse_embedded(&mut self, doc: Option<String>) -> Option<MemberDef> {
        self.bump();
        let ty = self.parse_type();
        if matches!(ty.kind, TypeExprKind::Error) {
            return None;
        }
        let Some(text) = ty.referenced_name() else {
            if let Some(diag) = self.report(DiagnosticKind::ExpectedName, ty.span.clone()) {
                diag.hint("embedded members name a struct, e.g. `..Base`")
                    .emit();
            }
            return None;
        };
        let name = Name {
            text: text.to_string(),
            span: ty.span.clone(),
        };
        let attrs = self.parse_attrs();
        Some(MemberDef {
            name,
            ty,
            embedded: true,
            attrs,
            doc,
        })
    }

    fn parse_attrs(&mut self) -> Vec<Attr> {
        let mut attrs = Vec::new();
        while let Some(at) = self.eat(TokenKind::At) {
            let Some(name) = self.parse_name() else {
                break;
            };
            let kind = match name.text.as_str() {
                "skip" => AttrKind::Skip,
                "optional" => AttrKind::Optional,
                "rename" => match self.parse_rename_arg() {
                    Some(renamed) => AttrKind::Rename(renamed),
                    None => continue,
                },
                other => {
                    let other = other.to_string();
                    if let Some(diag) = self.report(DiagnosticKind::UnknownAttribute, name.span)
                    {
                        diag.message(other).emit();
                    }
                    self.skip_attr_args();
                    continue;
                }
            };
            attrs.push(Attr {
                kind,
                span: at.start..self.prev_end,
            });
        }
        attrs
    }

    /// `("name")`
    fn parse_rename_arg(&mut self) -> Option<String> {
        self.expect(TokenKind::LParen)?;
        let Some(span) = self.eat(TokenKind::StringLiteral) else {
            self.error(DiagnosticKind::ExpectedLiteral);
            self.skip_attr_args();
            return None;
        };
        let value = unquote(self.slice(&span));
        self.expect(TokenKind::RParen)?;
        Some(value)
    }

    fn skip_attr_args(&mut self) {
        if !self.at(TokenKind::LParen) {
            return;
        }
        while let Some(kind) = self.current() {
            if kind == TokenKind::RBrace || kind.is_item_start() {
                return;
            }
            self.bump();
            if kind == TokenKind::RParen {
                return;
            }
        }
    }

    fn parse_type(&mut self) -> TypeExpr {
        if self.depth >= MAX_DEPTH {
            let span = self.current_span();
            if let Some(diag) = self.report(DiagnosticKind::ExpectedType, span.clone()) {
                diag.message("type is nested too deeply").emit();
            }
            return TypeExpr::error(span);
        }
        self.depth += 1;
        let ty = self.parse_type_inner();
        self.depth -= 1;
        ty
    }

    fn parse_type_inner(&mut self) -> TypeExpr {
        let start = self.current_span();
        let kind = match self.current() {
            Some(TokenKind::Star) => {
                self.bump();
                TypeExprKind::Pointer(Box::new(self.parse_type()))
            }
            Some(TokenKind::LBracket) => {
                self.bump();
                let element = self.parse_type();
                self.expect(TokenKind::RBracket);
                TypeExprKind::Sequence(Box::new(element))
            }
            Some(TokenKind::LBrace) => {
                self.bump();
                let key = self.parse_type();
                self.expect(TokenKind::Colon);
                let value = self.parse_type();
                self.expect(TokenKind::RBrace);
                TypeExprKind::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            Some(TokenKind::KwStruct) => {
                self.bump();
                TypeExprKind::Struct(self.parse_members())
            }
            Some(TokenKind::Ident) => {
                let span = self.bump();
                let text = self.slice(&span);
                if self.eat(TokenKind::Dot).is_some() {
                    match self.parse_name() {
                        Some(name) => TypeExprKind::Ref {
                            package: Some(text.to_string()),
                            name: name.text,
                        },
                        None => TypeExprKind::Error,
                    }
                } else if let Some(kind) = PrimitiveKind::from_keyword(text) {
                    TypeExprKind::Primitive(kind)
                } else {
                    TypeExprKind::Ref {
                        package: None,
                        name: text.to_string(),
                    }
                }
            }
            _ => {
                self.error(DiagnosticKind::ExpectedType);
                return TypeExpr::error(start.start..start.start);
            }
        };

        TypeExpr {
            kind,
            span: start.start..self.prev_end.max(start.start),
        }
    }

    /// `enum Name: base { variant* }`
    fn parse_enum(&mut self, doc: Option<String>) -> Option<EnumDef> {
        self.bump();
        let Some(name) = self.parse_name() else {
            self.recover_to_item();
            return None;
        };
        if self.expect(TokenKind::Colon).is_none() {
            self.recover_to_item();
            return None;
        }
        let Some(base) = self.parse_name() else {
            self.recover_to_item();
            return None;
        };
        let Some(open) = self.expect(TokenKind::LBrace) else {
            return Some(EnumDef {
                name,
                doc,
                base,
                variants: Vec::new(),
            });
        };

        let mut variants = Vec::new();
        loop {
            let doc = self.take_docs();
            match self.current() {
                Some(TokenKind::RBrace) => {
                    self.bump();
                    break;
                }
                None => {
                    self.error_unclosed(open);
                    break;
                }
                Some(kind) if kind.is_item_start() => {
                    self.error_unclosed(open);
                    break;
                }
                Some(TokenKind::Comma | TokenKind::Semicolon) => {
                    self.bump();
                }
                Some(TokenKind::Ident) => variants.extend(self.parse_variant(doc)),
                Some(_) => {
                    self.error(DiagnosticKind::ExpectedName);
                    self.recover_in_block();
                }
            }
        }

        Some(EnumDef {
            name,
            doc,
            base,
            variants,
        })
    }

    fn parse_variant(&mut self, doc: Option<String>) -> Option<VariantDef> {
        let name = self.parse_name()?;
        if self.expect(TokenKind::Equals).is_none() {
            self.recover_in_block();
            return None;
        }
        let value = self.parse_literal()?;
        Some(VariantDef { name, value, doc })
    }

    fn parse_literal(&mut self) -> Option<LiteralExpr> {
        let value = match self.current() {
            Some(TokenKind::StringLiteral) => {
                let span = self.current_span();
                Literal::String(unquote(self.slice(&span)))
            }
            Some(TokenKind::Integer) => {
                let span = self.current_span();
                let text = self.slice(&span);
                if let Ok(v) = text.parse::<i64>() {
                    Literal::Int(v)
                } else if let Ok(v) = text.parse::<u64>() {
                    Literal::UInt(v)
                } else {
                    if let Some(diag) = self.report(DiagnosticKind::ExpectedLiteral, span) {
                        diag.hint("integers must fit in 64 bits").emit();
                    }
                    self.bump();
                    return None;
                }
            }
            Some(TokenKind::Float) => {
                let span = self.current_span();
                match self.slice(&span).parse::<f64>() {
                    Ok(v) => Literal::Float(v),
                    Err(_) => {
                        self.error(DiagnosticKind::ExpectedLiteral);
                        self.bump();
                        return None;
                    }
                }
            }
            _ => {
                self.error(DiagnosticKind::ExpectedLiteral);
                return None;
            }
        };
        let span = self.bump();
        Some(LiteralExpr { value, span })
    }

    /// `alias Name = type`
    fn parse_alias(&mut self, doc: Option<String>) -> Option<AliasDef> {
        self.bump();
        let Some(name) = self.parse_name() else {
            self.recover_to_item();
            return None;
        };
        if self.expect(TokenKind::Equals).is_none() {
            self.recover_to_item();
            return None;
        }
        let target = self.parse_type();
        Some(AliasDef { name, doc, target })
    }
}
