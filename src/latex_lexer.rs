use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Brace,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Paren => '(',
            Bracket::Square => '[',
            Bracket::Brace => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Paren => ')',
            Bracket::Square => ']',
            Bracket::Brace => '}',
        }
    }
}

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'a> {
    /// A backslash control sequence, captured without the backslash.
    #[regex(r"\\[a-zA-Z]+", |lex| &lex.slice()[1..])]
    CtrlSeq(&'a str),
    /// A maximal run of digits and decimal points. A second '.' is not
    /// rejected here; the run may still fail to convert to a value.
    #[regex(r"[0-9.]+", |lex| lex.slice())]
    Number(&'a str),
    #[regex(r"[a-zA-Z]", |lex| lex.slice().as_bytes()[0] as char)]
    Letter(char),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl<'a> Token<'a> {
    pub fn opens(&self) -> Option<Bracket> {
        Some(match self {
            Token::LParen => Bracket::Paren,
            Token::LBracket => Bracket::Square,
            Token::LBrace => Bracket::Brace,
            _ => return None,
        })
    }

    pub fn closes(&self) -> Option<Bracket> {
        Some(match self {
            Token::RParen => Bracket::Paren,
            Token::RBracket => Bracket::Square,
            Token::RBrace => Bracket::Brace,
            _ => return None,
        })
    }

    pub fn to_small_string(&self) -> String {
        match self {
            Token::CtrlSeq(word) => format!(r"'\{word}'"),
            Token::Number(text) => format!("'{text}'"),
            Token::Letter(c) => format!("'{c}'"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Caret => "'^'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
            Token::LBracket => "'['".into(),
            Token::RBracket => "']'".into(),
            Token::LBrace => "'{'".into(),
            Token::RBrace => "'}'".into(),
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = vec![];

    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(format!("unexpected character '{}'", &input[span])),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token as Tk;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers() {
        assert_eq!(tokenize("28.50"), Ok(vec![Tk::Number("28.50")]));
        assert_eq!(tokenize(".5"), Ok(vec![Tk::Number(".5")]));
        assert_eq!(tokenize("2."), Ok(vec![Tk::Number("2.")]));
        assert_eq!(
            tokenize("2x"),
            Ok(vec![Tk::Number("2"), Tk::Letter('x')])
        );
    }

    #[test]
    fn number_runs_are_not_validated() {
        assert_eq!(tokenize("1.2.3"), Ok(vec![Tk::Number("1.2.3")]));
        assert_eq!(tokenize("..."), Ok(vec![Tk::Number("...")]));
    }

    #[test]
    fn control_sequences() {
        assert_eq!(tokenize(r"\pi"), Ok(vec![Tk::CtrlSeq("pi")]));
        assert_eq!(
            tokenize(r"\sin(x)"),
            Ok(vec![
                Tk::CtrlSeq("sin"),
                Tk::LParen,
                Tk::Letter('x'),
                Tk::RParen,
            ])
        );
        assert_eq!(
            tokenize(r"\frac{1}{2}"),
            Ok(vec![
                Tk::CtrlSeq("frac"),
                Tk::LBrace,
                Tk::Number("1"),
                Tk::RBrace,
                Tk::LBrace,
                Tk::Number("2"),
                Tk::RBrace,
            ])
        );
    }

    #[test]
    fn operators_and_delimiters() {
        assert_eq!(
            tokenize("+-^()[]{}"),
            Ok(vec![
                Tk::Plus,
                Tk::Minus,
                Tk::Caret,
                Tk::LParen,
                Tk::RParen,
                Tk::LBracket,
                Tk::RBracket,
                Tk::LBrace,
                Tk::RBrace,
            ])
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(
            tokenize("x + y"),
            Ok(vec![Tk::Letter('x'), Tk::Plus, Tk::Letter('y')])
        );
    }

    #[test]
    fn unexpected_character() {
        assert_eq!(tokenize("x*y"), Err("unexpected character '*'".into()));
        assert_eq!(tokenize("a_b"), Err("unexpected character '_'".into()));
    }

    #[test]
    fn bracket_kinds() {
        assert_eq!(Tk::LParen.opens(), Some(Bracket::Paren));
        assert_eq!(Tk::RBracket.closes(), Some(Bracket::Square));
        assert_eq!(Tk::LBrace.closes(), None);
        assert_eq!(Tk::Plus.opens(), None);
    }
}
