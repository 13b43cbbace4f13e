use logos::Logos;

/// Token kinds produced from source text. Whitespace, comments and newlines
/// carry no syntactic meaning in this grammar: statements inside a block are
/// delimited purely by what can follow an expression, so they are skipped by
/// `logos` rather than threaded through the parser as a separator token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token("def")]
    Def,
    #[token("do")]
    Do,
    #[token("end")]
    End,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("elif")]
    Elif,
    #[token("case")]
    Case,
    #[token("of")]
    Of,
    #[token("enum")]
    Enum,
    #[token("not")]
    Not,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("++")]
    PlusPlus,
    #[token("+.")]
    PlusDot,
    #[token("-.")]
    MinusDot,
    #[token("*.")]
    StarDot,
    #[token("/.")]
    SlashDot,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_owned())]
    FloatLit(String),
    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    NumLit(String),
    #[regex(r"'[^']*'", |lex| { let s = lex.slice(); s[1..s.len()-1].to_owned() })]
    StrLit(String),
    #[regex(r"`[^`]*`", |lex| { let s = lex.slice(); s[1..s.len()-1].to_owned() })]
    External(String),

    #[regex(r"[A-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_owned())]
    TypeIdent(String),
    #[regex(r"[a-z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Def => write!(f, "'def'"),
            Token::Do => write!(f, "'do'"),
            Token::End => write!(f, "'end'"),
            Token::If => write!(f, "'if'"),
            Token::Then => write!(f, "'then'"),
            Token::Else => write!(f, "'else'"),
            Token::Elif => write!(f, "'elif'"),
            Token::Case => write!(f, "'case'"),
            Token::Of => write!(f, "'of'"),
            Token::Enum => write!(f, "'enum'"),
            Token::Not => write!(f, "'not'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Eq => write!(f, "'='"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::PlusPlus => write!(f, "'++'"),
            Token::PlusDot => write!(f, "'+.'"),
            Token::MinusDot => write!(f, "'-.'"),
            Token::StarDot => write!(f, "'*.'"),
            Token::SlashDot => write!(f, "'/.'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::Lt => write!(f, "'<'"),
            Token::Gt => write!(f, "'>'"),
            Token::Pipe => write!(f, "'|'"),
            Token::Bang => write!(f, "'!'"),
            Token::FloatLit(s) => write!(f, "float {s}"),
            Token::NumLit(s) => write!(f, "number {s}"),
            Token::StrLit(s) => write!(f, "string {s:?}"),
            Token::External(s) => write!(f, "external {s:?}"),
            Token::TypeIdent(s) => write!(f, "type identifier {s}"),
            Token::Ident(s) => write!(f, "identifier {s}"),
        }
    }
}
