use std::f64::consts;

use crate::{
    expr::{Expr, Trig},
    latex_lexer::{Bracket, Token, tokenize},
};

/// Parses a string of LaTeX math (implicit multiplication, no whitespace
/// required) into an expression tree.
pub fn parse_latex(input: &str) -> Result<Expr, String> {
    let tokens = tokenize(input)?;
    parse_expression(&tokens)
}

/// Splits the tokens into addends at depth zero, then hands each segment
/// to the factor pass. A `-` separates addends exactly like `+` does; the
/// sign is consumed but never applied to the addend that follows it.
fn parse_expression(tokens: &[Token]) -> Result<Expr, String> {
    let mut depth = 0i32;
    let mut addends = vec![];
    let mut segment_start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.opens().is_some() {
            depth += 1;
        } else if token.closes().is_some() {
            depth -= 1;
        } else if depth == 0
            && (token == &Token::Plus || (token == &Token::Minus && i != 0))
        {
            addends.push(parse_expression(&tokens[segment_start..i])?);
            segment_start = i + 1;
        }
    }

    if !addends.is_empty() {
        addends.push(parse_expression(&tokens[segment_start..])?);
        return Ok(Expr::Sum(addends));
    }

    parse_factors(tokens)
}

fn parse_factors(tokens: &[Token]) -> Result<Expr, String> {
    let mut factors = vec![];
    let mut index = 0;

    while index < tokens.len() {
        let factor = match &tokens[index] {
            Token::CtrlSeq(word) => parse_macro(tokens, &mut index, word)?,
            Token::Number(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{text}'"))?;
                index += 1;
                apply_exponent(tokens, &mut index, Expr::number(value))?
            }
            Token::Letter('e') => {
                index += 1;
                apply_exponent(tokens, &mut index, Expr::constant(consts::E, "e"))?
            }
            Token::Letter(c) => {
                // 'd' immediately followed by another letter forms a
                // two-character differential variable such as dx
                let name = match (*c, tokens.get(index + 1)) {
                    ('d', Some(Token::Letter(second))) => {
                        index += 2;
                        format!("d{second}")
                    }
                    _ => {
                        index += 1;
                        c.to_string()
                    }
                };
                apply_exponent(tokens, &mut index, Expr::Variable(name))?
            }
            _ => {
                // not the start of any factor; stray operators and
                // delimiters fall through without contributing
                index += 1;
                continue;
            }
        };
        factors.push(factor);
    }

    match factors.len() {
        0 => Err("malformed expression".into()),
        1 => Ok(factors.remove(0)),
        _ => Ok(Expr::Product(factors)),
    }
}

fn parse_macro(tokens: &[Token], index: &mut usize, word: &str) -> Result<Expr, String> {
    *index += 1;

    if let Some(func) = Trig::from_word(word) {
        // the exponent may sit between the macro and its argument, as in
        // \sin^{2}(x), or after the closing parenthesis
        let before = parse_exponent(tokens, index)?;
        let (inner, next) = delimited_group(tokens, *index, Bracket::Paren)?;
        *index = next;
        let trig = Expr::TrigFunc {
            func,
            arg: Box::new(parse_expression(inner)?),
        };
        let exponent = match before {
            Some(exponent) => Some(exponent),
            None => parse_exponent(tokens, index)?,
        };
        return Ok(match exponent {
            Some(exponent) => Expr::Power {
                base: Box::new(trig),
                exponent: Box::new(exponent),
                root: false,
            },
            None => trig,
        });
    }

    match word {
        "pi" => apply_exponent(tokens, index, Expr::constant(consts::PI, "π")),
        "sqrt" => {
            let root = if tokens.get(*index) == Some(&Token::LBracket) {
                let (inner, next) = delimited_group(tokens, *index, Bracket::Square)?;
                *index = next;
                parse_expression(inner)?
            } else {
                Expr::number(2.0)
            };
            let (inner, next) = delimited_group(tokens, *index, Bracket::Brace)?;
            *index = next;
            Ok(Expr::Power {
                base: Box::new(parse_expression(inner)?),
                exponent: Box::new(root),
                root: true,
            })
        }
        "frac" => {
            let rest = &tokens[*index..];
            let missing = || String::from(r"'\frac' expected two brace groups");
            let first = matching_closer(rest, Bracket::Brace, 1).ok_or_else(missing)?;
            let second = matching_closer(rest, Bracket::Brace, 2).ok_or_else(missing)?;
            if rest.first() != Some(&Token::LBrace)
                || rest.get(first + 1) != Some(&Token::LBrace)
            {
                return Err(missing());
            }
            let numerator = parse_expression(&rest[1..first])?;
            let denominator = parse_expression(&rest[first + 2..second])?;
            *index += second + 1;
            Ok(Expr::Fraction {
                numerator: Box::new(numerator),
                denominator: Box::new(denominator),
            })
        }
        // only \pi resolves to a value; any other control word keeps its
        // spelling as a display name and parses on without one
        _ => apply_exponent(tokens, index, Expr::constant(0.0, format!("\\{word}"))),
    }
}

/// Consumes `^{...}` at `index`, if present, and returns its contents
/// parsed. A `^` not followed by a brace group is an error.
fn parse_exponent(tokens: &[Token], index: &mut usize) -> Result<Option<Expr>, String> {
    if tokens.get(*index) != Some(&Token::Caret) {
        return Ok(None);
    }
    let (inner, next) = delimited_group(tokens, *index + 1, Bracket::Brace)?;
    *index = next;
    Ok(Some(parse_expression(inner)?))
}

fn apply_exponent(tokens: &[Token], index: &mut usize, base: Expr) -> Result<Expr, String> {
    Ok(match parse_exponent(tokens, index)? {
        Some(exponent) => Expr::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
            root: false,
        },
        None => base,
    })
}

/// Returns the tokens strictly between `tokens[start]`, which must open
/// the given bracket kind, and its matching closer, along with the index
/// just past that closer.
fn delimited_group<'t, 'a>(
    tokens: &'t [Token<'a>],
    start: usize,
    bracket: Bracket,
) -> Result<(&'t [Token<'a>], usize), String> {
    match tokens.get(start) {
        Some(token) if token.opens() == Some(bracket) => {}
        Some(token) => {
            return Err(format!(
                "expected '{}', found {}",
                bracket.open(),
                token.to_small_string()
            ));
        }
        None => {
            return Err(format!("expected '{}', found end of input", bracket.open()));
        }
    }

    let close = matching_closer(&tokens[start..], bracket, 1)
        .ok_or_else(|| format!("unmatched '{}'", bracket.open()))?;
    Ok((&tokens[start + 1..start + close], start + close + 1))
}

/// Finds the `count`-th position at which the nesting depth returns to
/// zero on a closer of the requested kind. Every opener of every kind
/// increments the depth and every closer decrements it.
fn matching_closer(tokens: &[Token], bracket: Bracket, mut count: usize) -> Option<usize> {
    let mut depth = 0i32;

    for (index, token) in tokens.iter().enumerate() {
        if token.opens().is_some() {
            depth += 1;
        } else if let Some(kind) = token.closes() {
            depth -= 1;
            if depth == 0 && kind == bracket {
                count -= 1;
                if count == 0 {
                    return Some(index);
                }
            }
        }
    }

    None
}
