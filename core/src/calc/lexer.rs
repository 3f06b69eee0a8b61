//! Tokenizer for the arithmetic grammar

use super::CalcError;

/// A single lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Split an expression string into tokens.
///
/// Assumes the character gate already ran; an unexpected character here is
/// still reported as a syntax error rather than a panic.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => {
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal.parse::<f64>().map_err(|_| {
                    CalcError::Syntax(format!("invalid number literal '{}'", literal))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(CalcError::Syntax(format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("2 + 2").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2.0), Token::Plus, Token::Number(2.0)]
        );
    }

    #[test]
    fn test_tokenize_all_operators() {
        let tokens = tokenize("(1.5 - 2) * 3 / 4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Number(1.5),
                Token::Minus,
                Token::Number(2.0),
                Token::RParen,
                Token::Star,
                Token::Number(3.0),
                Token::Slash,
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_tokenize_leading_dot() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_tokenize_bad_literal() {
        assert!(matches!(tokenize("1.2.3"), Err(CalcError::Syntax(_))));
        assert!(matches!(tokenize("."), Err(CalcError::Syntax(_))));
    }
}
