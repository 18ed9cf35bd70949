//! Reply blocks from the Host Command service.

use vantage_common::{tokenize, ClientError, ClientResult};

/// A single command's reply block: the data lines before the `R:` line, and
/// the tokenized arguments of the `R:` line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// The echoed command token of the `R:` line, prefix stripped
    /// (`"STATUS"`, `"INVOKE"`, or `"ERROR:<code>"`).
    pub command: String,
    /// The tokenized arguments following the command token.
    pub args: Vec<String>,
    /// Data lines preceding the `R:` line, from commands such as `HELP`
    /// and `LISTSTATUS`.
    pub data: Vec<String>,
}

impl CommandResponse {
    /// Build a response from the collected lines of a reply block. The final
    /// line must be the `R:` line.
    pub fn from_lines(mut lines: Vec<String>) -> ClientResult<Self> {
        let return_line = lines
            .pop()
            .ok_or_else(|| ClientError::Response("empty reply block".into()))?;

        let mut tokens = tokenize(&return_line).into_iter();
        let command = tokens
            .next()
            .and_then(|token| token.strip_prefix("R:").map(str::to_string))
            .ok_or_else(|| {
                ClientError::Response(format!("reply line is not an R: line: {return_line:?}"))
            })?;

        Ok(Self {
            command,
            args: tokens.collect(),
            data: lines,
        })
    }

    /// Map an `R:ERROR:<code>` reply to its client error, if this is one.
    pub fn error(&self) -> Option<ClientError> {
        let code_str = self.command.strip_prefix("ERROR:")?;
        let message = self.args.first().cloned().unwrap_or_default();
        match code_str.parse::<u32>() {
            Ok(code) => Some(ClientError::from_error_code(code, message)),
            Err(_) => Some(ClientError::Response(format!(
                "malformed error reply: R:{}",
                self.command
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_with_data_lines() {
        let response = CommandResponse::from_lines(vec![
            "LOAD 118".to_string(),
            "LOAD 119".to_string(),
            "R:LISTSTATUS".to_string(),
        ])
        .unwrap();
        assert_eq!(response.command, "LISTSTATUS");
        assert_eq!(response.data, vec!["LOAD 118", "LOAD 119"]);
        assert!(response.args.is_empty());
        assert!(response.error().is_none());
    }

    #[test]
    fn test_reply_args_are_tokenized() {
        let response =
            CommandResponse::from_lines(vec!["R:INVOKE 42 75.000 Load.GetLevel".to_string()])
                .unwrap();
        assert_eq!(response.command, "INVOKE");
        assert_eq!(response.args, vec!["42", "75.000", "Load.GetLevel"]);
    }

    #[test]
    fn test_error_reply_login_failed() {
        let response =
            CommandResponse::from_lines(vec![r#"R:ERROR:23 "login failed""#.to_string()]).unwrap();
        assert_eq!(
            response.error(),
            Some(ClientError::LoginFailed("login failed".into()))
        );
    }

    #[test]
    fn test_error_reply_generic() {
        let response =
            CommandResponse::from_lines(vec![r#"R:ERROR:4 "Invalid Parameter""#.to_string()])
                .unwrap();
        assert_eq!(
            response.error(),
            Some(ClientError::Command {
                code: 4,
                message: "Invalid Parameter".into()
            })
        );
    }

    #[test]
    fn test_non_reply_line_rejected() {
        assert!(CommandResponse::from_lines(vec!["S:LOAD 1 100".to_string()]).is_err());
        assert!(CommandResponse::from_lines(vec![]).is_err());
    }
}
