//! Tokenizer for Host Command response lines.
//!
//! A response line is split into whitespace-separated tokens, with three
//! quoted forms kept as single atomic tokens:
//!
//! - `"…"` quoted strings, with `""` as an escaped quote; the surrounding
//!   quotes are removed and escapes resolved in the returned token
//! - `{…}` byte arrays, returned verbatim including the braces
//! - `[…]` reserved nested groups, returned verbatim including the brackets

/// Tokenize a response line from the Host Command service.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        match c {
            '"' => {
                chars.next();
                let mut token = String::new();
                while let Some(ch) = chars.next() {
                    if ch == '"' {
                        // A doubled quote is an escaped quote, anything else
                        // terminates the token.
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            token.push('"');
                        } else {
                            break;
                        }
                    } else {
                        token.push(ch);
                    }
                }
                tokens.push(token);
            }
            '{' | '[' => {
                let close = if c == '{' { '}' } else { ']' };
                let mut token = String::new();
                for ch in chars.by_ref() {
                    token.push(ch);
                    if ch == close {
                        break;
                    }
                }
                tokens.push(token);
            }
            _ => {
                let mut token = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() {
                        break;
                    }
                    token.push(ch);
                    chars.next();
                }
                tokens.push(token);
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tokens() {
        assert_eq!(
            tokenize("R:GETLOAD 118 75.00"),
            vec!["R:GETLOAD", "118", "75.00"]
        );
    }

    #[test]
    fn test_quoted_string() {
        assert_eq!(
            tokenize(r#"R:ERROR:23 "login failed""#),
            vec!["R:ERROR:23", "login failed"]
        );
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            tokenize(r#"R:INVOKE 1 "say ""hi""" Object.GetName"#),
            vec!["R:INVOKE", "1", r#"say "hi""#, "Object.GetName"]
        );
    }

    #[test]
    fn test_byte_array_token() {
        assert_eq!(
            tokenize("R:INVOKE 5 0 ObjectData.Get {1,256,-1,0}"),
            vec!["R:INVOKE", "5", "0", "ObjectData.Get", "{1,256,-1,0}"]
        );
    }

    #[test]
    fn test_byte_array_with_spaces() {
        assert_eq!(tokenize("{1, 2, 3} next"), vec!["{1, 2, 3}", "next"]);
    }

    #[test]
    fn test_bracket_group() {
        assert_eq!(tokenize("a [1,2] b"), vec!["a", "[1,2]", "b"]);
    }

    #[test]
    fn test_empty_quoted_string() {
        assert_eq!(tokenize(r#"CMD """#), vec!["CMD", ""]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(tokenize("  S:LOAD 42 100.000  "), vec!["S:LOAD", "42", "100.000"]);
    }
}
