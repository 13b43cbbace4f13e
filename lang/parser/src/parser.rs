use codespan::Span;
use logos::Logos;
use uwu_ast::{
    ArrayExpr, BinaryExpr, Block, Call, Case, CaseOf, Def, Do, EnumDeclaration, Expr, External,
    FloatLit, Hint, Ident, If, Let, NumLit, Param, Pattern, Program, StrLit, UnaryExpr,
    VariantCall, VariantDecl,
};

use crate::lexer::Token;
use crate::result::ParseError;

pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let mut tokens = Vec::new();
    for (tok, span) in Token::lexer(source).spanned() {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => {
                let found = source[span.clone()].chars().next().unwrap_or('\0');
                return Err(ParseError::UnexpectedChar {
                    found,
                    span: Some(make_span(span.start, span.end).to_miette()),
                });
            }
        }
    }
    let mut parser = Parser { tokens, pos: 0 };
    let body = parser.parse_block_until()?;
    if let Some((tok, span)) = parser.tokens.get(parser.pos) {
        return Err(ParseError::UnexpectedToken {
            found: tok.to_string(),
            expected: "end of input".to_string(),
            span: Some(make_span(span.start, span.end).to_miette()),
        });
    }
    Ok(Program { body })
}

fn make_span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

trait ToMiette {
    fn to_miette(self) -> miette::SourceSpan;
}

impl ToMiette for Span {
    fn to_miette(self) -> miette::SourceSpan {
        miette::SourceSpan::new(self.start.to_usize().into(), (self.end - self.start).to_usize())
    }
}

/// Tokens that end a block of statements: the parser keeps consuming
/// expressions until it sees one of these (or end of input).
const BLOCK_TERMINATORS: &[Token] = &[Token::End, Token::Elif, Token::Else];

struct Parser {
    tokens: Vec<(Token, std::ops::Range<usize>)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<(Token, std::ops::Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn at(&self, tok: &Token) -> bool {
        self.peek().map(|t| same_kind(t, tok)).unwrap_or(false)
    }

    fn expect(&mut self, tok: Token, expected: &str) -> Result<std::ops::Range<usize>, ParseError> {
        if self.at(&tok) {
            Ok(self.advance().unwrap().1)
        } else {
            self.error(expected)
        }
    }

    fn error<T>(&self, expected: &str) -> Result<T, ParseError> {
        match self.tokens.get(self.pos) {
            Some((tok, span)) => Err(ParseError::UnexpectedToken {
                found: tok.to_string(),
                expected: expected.to_string(),
                span: Some(make_span(span.start, span.end).to_miette()),
            }),
            None => Err(ParseError::UnexpectedEof { expected: expected.to_string() }),
        }
    }

    /// Parses expressions until a block terminator (`end`, `elif`, `else`)
    /// or end of input is reached.
    fn parse_block_until(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        loop {
            match self.peek() {
                None => break,
                Some(tok) if is_terminator(tok) => break,
                _ => exprs.push(self.parse_expr(0)?),
            }
        }
        Ok(exprs)
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let Some(tok) = self.peek() else { break };
            let Some((op, bp)) = binary_op(tok) else { break };
            if bp < min_bp {
                break;
            }
            let (_, op_span) = self.advance().unwrap();
            let rhs = self.parse_expr(bp + 1)?;
            let span = span_union(lhs.span(), Some(make_span(op_span.start, op_span.end)))
                .or_else(|| rhs.span());
            lhs = Expr::BinaryExpr(BinaryExpr {
                span,
                op: op.to_string(),
                left: Box::new(lhs),
                right: Box::new(rhs),
            });
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(Token::Minus) => Some("-"),
            Some(Token::Plus) => Some("+"),
            Some(Token::Bang) => Some("!"),
            Some(Token::Not) => Some("not"),
            _ => None,
        };
        if let Some(op) = op {
            let (_, span) = self.advance().unwrap();
            let e = self.parse_unary()?;
            let span = span_union(Some(make_span(span.start, span.end)), e.span());
            return Ok(Expr::UnaryExpr(UnaryExpr { span, op: op.to_string(), e: Box::new(e) }));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut e = self.parse_primary()?;
        while self.at(&Token::LParen) {
            let start = e.span();
            let (_, lp) = self.advance().unwrap();
            let args = if self.at(&Token::RParen) { Vec::new() } else { self.parse_expr_list()? };
            let rp = self.expect(Token::RParen, "')'")?;
            let span = span_union(start, Some(make_span(lp.start, rp.end)));
            e = Expr::Call(Call { span, callee: Box::new(e), args });
        }
        Ok(e)
    }

    fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut items = vec![self.parse_expr(0)?];
        while self.at(&Token::Comma) {
            self.advance();
            items.push(self.parse_expr(0)?);
        }
        Ok(items)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().cloned() {
            Some(Token::NumLit(text)) => {
                let (_, span) = self.advance().unwrap();
                let value: i64 = text.parse().map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    span: Some(make_span(span.start, span.end).to_miette()),
                })?;
                Ok(Expr::Num(NumLit { span: Some(make_span(span.start, span.end)), value }))
            }
            Some(Token::FloatLit(text)) => {
                let (_, span) = self.advance().unwrap();
                let value: f64 = text.parse().map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    span: Some(make_span(span.start, span.end).to_miette()),
                })?;
                Ok(Expr::Float(FloatLit { span: Some(make_span(span.start, span.end)), value }))
            }
            Some(Token::StrLit(value)) => {
                let (_, span) = self.advance().unwrap();
                Ok(Expr::Str(StrLit { span: Some(make_span(span.start, span.end)), value }))
            }
            Some(Token::External(verbatim)) => {
                let (_, span) = self.advance().unwrap();
                Ok(Expr::External(External { span: Some(make_span(span.start, span.end)), verbatim }))
            }
            Some(Token::LParen) => {
                self.advance();
                let e = self.parse_expr(0)?;
                self.expect(Token::RParen, "')'")?;
                Ok(e)
            }
            Some(Token::LBracket) => self.parse_array(),
            Some(Token::Do) => self.parse_do(),
            Some(Token::If) => self.parse_if(),
            Some(Token::Case) => self.parse_case_of(),
            Some(Token::Enum) => self.parse_enum(),
            Some(Token::Def) => self.parse_def(),
            Some(Token::Ident(name)) => self.parse_ident_or_let(name),
            Some(Token::TypeIdent(name)) => self.parse_variant_call(name),
            _ => self.error("an expression"),
        }
    }

    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let (_, lb) = self.advance().unwrap();
        let args = if self.at(&Token::RBracket) { Vec::new() } else { self.parse_expr_list()? };
        let rb = self.expect(Token::RBracket, "']'")?;
        Ok(Expr::Array(ArrayExpr { span: Some(make_span(lb.start, rb.end)), args }))
    }

    /// `let` is reserved for bindings; any other lowercase identifier
    /// references a term.
    fn parse_ident_or_let(&mut self, name: String) -> Result<Expr, ParseError> {
        let (_, span) = self.advance().unwrap();
        if name == "let" {
            return self.parse_let(span);
        }
        Ok(Expr::Identifier(Ident::with_span(name, make_span(span.start, span.end))))
    }

    fn parse_let(&mut self, let_span: std::ops::Range<usize>) -> Result<Expr, ParseError> {
        let id = self.parse_ident("an identifier")?;
        let hint = if self.at(&Token::Colon) {
            self.advance();
            Some(self.parse_hint()?)
        } else {
            None
        };
        self.expect(Token::Eq, "'='")?;
        let init = self.parse_expr(0)?;
        let span = span_union(Some(make_span(let_span.start, let_span.end)), init.span());
        Ok(Expr::Let(Let { span, id, init: Box::new(init), hint }))
    }

    fn parse_ident(&mut self, expected: &str) -> Result<Ident, ParseError> {
        match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                let (_, span) = self.advance().unwrap();
                Ok(Ident::with_span(name, make_span(span.start, span.end)))
            }
            _ => self.error(expected),
        }
    }

    fn parse_type_ident(&mut self, expected: &str) -> Result<Ident, ParseError> {
        match self.peek().cloned() {
            Some(Token::TypeIdent(name)) => {
                let (_, span) = self.advance().unwrap();
                Ok(Ident::with_span(name, make_span(span.start, span.end)))
            }
            _ => self.error(expected),
        }
    }

    fn parse_variant_call(&mut self, name: String) -> Result<Expr, ParseError> {
        let (_, span) = self.advance().unwrap();
        let id = Ident::with_span(name, make_span(span.start, span.end));
        self.expect(Token::LParen, "'('")?;
        let args = if self.at(&Token::RParen) { Vec::new() } else { self.parse_expr_list()? };
        let rp = self.expect(Token::RParen, "')'")?;
        let span = Some(make_span(span.start, rp.end));
        Ok(Expr::VariantCall(VariantCall { span, name: id, args }))
    }

    fn parse_do(&mut self) -> Result<Expr, ParseError> {
        let (_, start) = self.advance().unwrap();
        let hint = if self.at(&Token::Colon) {
            self.advance();
            Some(self.parse_hint()?)
        } else {
            None
        };
        let block = self.parse_block_until()?;
        let end = self.expect(Token::End, "'end'")?;
        Ok(Expr::Do(Do { span: Some(make_span(start.start, end.end)), block, hint }))
    }

    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let (_, start) = self.advance().unwrap();
        let test = self.parse_expr(0)?;
        self.expect(Token::Then, "'then'")?;
        let hint = if self.at(&Token::Colon) {
            self.advance();
            Some(self.parse_hint()?)
        } else {
            None
        };
        let then = self.parse_block_until()?;
        let or_else = self.parse_or_else()?;
        let end = self.expect(Token::End, "'end'")?;
        Ok(Expr::If(If {
            span: Some(make_span(start.start, end.end)),
            test: Box::new(test),
            then: Box::new(Expr::Block(Block { exprs: then })),
            or_else: or_else.map(Box::new),
            hint,
        }))
    }

    fn parse_or_else(&mut self) -> Result<Option<Expr>, ParseError> {
        match self.peek() {
            Some(Token::Else) => {
                self.advance();
                let block = self.parse_block_until()?;
                Ok(Some(Expr::Block(Block { exprs: block })))
            }
            Some(Token::Elif) => {
                let (_, start) = self.advance().unwrap();
                let test = self.parse_expr(0)?;
                self.expect(Token::Then, "'then'")?;
                let then = self.parse_block_until()?;
                let or_else = self.parse_or_else()?;
                Ok(Some(Expr::If(If {
                    span: Some(make_span(start.start, start.end)),
                    test: Box::new(test),
                    then: Box::new(Expr::Block(Block { exprs: then })),
                    or_else: or_else.map(Box::new),
                    hint: None,
                })))
            }
            _ => Ok(None),
        }
    }

    fn parse_case_of(&mut self) -> Result<Expr, ParseError> {
        let (_, start) = self.advance().unwrap();
        let scrutinee = self.parse_expr(0)?;
        self.expect(Token::Of, "'of'")?;
        let mut cases = Vec::new();
        while !self.at(&Token::End) {
            let pattern = self.parse_pattern()?;
            let body = self.parse_do()?;
            cases.push(Case { pattern, body: Box::new(body) });
        }
        let end = self.expect(Token::End, "'end'")?;
        Ok(Expr::CaseOf(CaseOf {
            span: Some(make_span(start.start, end.end)),
            scrutinee: Box::new(scrutinee),
            cases,
        }))
    }

    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                let (_, span) = self.advance().unwrap();
                Ok(Pattern::MatchAs(Ident::with_span(name, make_span(span.start, span.end))))
            }
            Some(Token::TypeIdent(name)) => {
                let (_, span) = self.advance().unwrap();
                let id = Ident::with_span(name, make_span(span.start, span.end));
                let sub_patterns = if self.at(&Token::LParen) {
                    self.advance();
                    let patterns = if self.at(&Token::RParen) {
                        Vec::new()
                    } else {
                        self.parse_pattern_list()?
                    };
                    self.expect(Token::RParen, "')'")?;
                    patterns
                } else {
                    Vec::new()
                };
                Ok(Pattern::MatchVariant(id, sub_patterns))
            }
            _ => self.error("a pattern"),
        }
    }

    fn parse_pattern_list(&mut self) -> Result<Vec<Pattern>, ParseError> {
        let mut items = vec![self.parse_pattern()?];
        while self.at(&Token::Comma) {
            self.advance();
            items.push(self.parse_pattern()?);
        }
        Ok(items)
    }

    fn parse_enum(&mut self) -> Result<Expr, ParseError> {
        let (_, start) = self.advance().unwrap();
        let id = self.parse_type_ident("an enum name")?;
        let generics = self.parse_optional_generics()?;
        self.expect(Token::LBrace, "'{'")?;
        let mut variants = Vec::new();
        if !self.at(&Token::RBrace) {
            variants.push(self.parse_variant_decl()?);
            while self.at(&Token::Comma) {
                self.advance();
                variants.push(self.parse_variant_decl()?);
            }
        }
        let end = self.expect(Token::RBrace, "'}'")?;
        Ok(Expr::EnumDeclaration(EnumDeclaration {
            span: Some(make_span(start.start, end.end)),
            id,
            generics,
            variants,
        }))
    }

    fn parse_variant_decl(&mut self) -> Result<VariantDecl, ParseError> {
        let id = self.parse_type_ident("a variant name")?;
        let fields = if self.at(&Token::LParen) {
            self.advance();
            let fields = if self.at(&Token::RParen) { Vec::new() } else { self.parse_hint_list()? };
            self.expect(Token::RParen, "')'")?;
            fields
        } else {
            Vec::new()
        };
        Ok(VariantDecl { id, fields })
    }

    fn parse_hint_list(&mut self) -> Result<Vec<Hint>, ParseError> {
        let mut items = vec![self.parse_hint()?];
        while self.at(&Token::Comma) {
            self.advance();
            items.push(self.parse_hint()?);
        }
        Ok(items)
    }

    fn parse_hint(&mut self) -> Result<Hint, ParseError> {
        let id = self.parse_type_ident("a type name")?;
        let args = if self.at(&Token::Lt) {
            self.advance();
            let args = self.parse_hint_list()?;
            self.expect(Token::Gt, "'>'")?;
            args
        } else {
            Vec::new()
        };
        let span = span_union(id.span, args.last().and_then(|h| h.span));
        Ok(Hint { span, id, args })
    }

    fn parse_optional_generics(&mut self) -> Result<Vec<Ident>, ParseError> {
        if !self.at(&Token::Lt) {
            return Ok(Vec::new());
        }
        self.advance();
        let mut items = vec![self.parse_type_ident("a generic parameter")?];
        while self.at(&Token::Comma) {
            self.advance();
            items.push(self.parse_type_ident("a generic parameter")?);
        }
        self.expect(Token::Gt, "'>'")?;
        Ok(items)
    }

    fn parse_def(&mut self) -> Result<Expr, ParseError> {
        let (_, start) = self.advance().unwrap();
        let id = self.parse_ident("a function name")?;
        let generics = self.parse_optional_generics()?;
        self.expect(Token::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.at(&Token::RParen) {
            params.push(self.parse_param()?);
            while self.at(&Token::Comma) {
                self.advance();
                params.push(self.parse_param()?);
            }
        }
        self.expect(Token::RParen, "')'")?;
        let hint = if self.at(&Token::Colon) {
            self.advance();
            Some(self.parse_hint()?)
        } else {
            None
        };
        let body = self.parse_do()?;
        let span = span_union(Some(make_span(start.start, start.end)), body.span());
        Ok(Expr::Def(Def { span, id, params, body: Box::new(body), hint, generics }))
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let id = self.parse_ident("a parameter name")?;
        let hint = if self.at(&Token::Colon) {
            self.advance();
            Some(self.parse_hint()?)
        } else {
            None
        };
        Ok(Param { id, hint })
    }
}

fn is_terminator(tok: &Token) -> bool {
    BLOCK_TERMINATORS.iter().any(|t| same_kind(t, tok))
}

fn same_kind(a: &Token, b: &Token) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn span_union(a: Option<Span>, b: Option<Span>) -> Option<Span> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Span::new(a.start.to_usize().min(b.start.to_usize()) as u32, a.end.to_usize().max(b.end.to_usize()) as u32)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Binary operator token to `(symbol, binding power)`. Higher binds tighter.
fn binary_op(tok: &Token) -> Option<(&'static str, u8)> {
    use Token::*;
    Some(match tok {
        EqEq => ("==", 1),
        NotEq => ("!=", 1),
        Lt => ("<", 2),
        Gt => (">", 2),
        Plus => ("+", 3),
        Minus => ("-", 3),
        Pipe => ("|", 3),
        PlusPlus => ("++", 3),
        PlusDot => ("+.", 3),
        MinusDot => ("-.", 3),
        Star => ("*", 4),
        Slash => ("/", 4),
        Percent => ("%", 4),
        StarDot => ("*.", 4),
        SlashDot => ("/.", 4),
        _ => return None,
    })
}

use uwu_ast::HasSpan;
