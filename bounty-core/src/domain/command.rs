//! Comment-triggered commands.
//!
//! The only recognized command is the bounty transfer. Recognition is
//! strict: an exact two-field colon split and a single mention. Anything
//! else is silently not a command.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueCommand {
    /// `send bounty: @user`
    Transfer { recipient: String },
}

pub fn parse_command(body: &str) -> Option<IssueCommand> {
    let (verb, argument) = split_two_fields(body)?;
    if verb != "send bounty" {
        return None;
    }
    let recipient = single_mention(argument)?;
    Some(IssueCommand::Transfer { recipient })
}

fn split_two_fields(body: &str) -> Option<(&str, &str)> {
    let mut fields = body.split(':');
    let first = fields.next()?;
    let second = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((first.trim(), second.trim()))
}

fn single_mention(argument: &str) -> Option<String> {
    let mut tokens = argument.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    let login = token.strip_prefix('@')?;
    if login.is_empty() || login.contains('@') {
        return None;
    }
    Some(login.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_a_transfer() {
        assert_eq!(
            parse_command("send bounty: @octocat"),
            Some(IssueCommand::Transfer { recipient: "octocat".to_string() })
        );
        // Surrounding whitespace is not significant.
        assert_eq!(
            parse_command("  send bounty :   @octocat  "),
            Some(IssueCommand::Transfer { recipient: "octocat".to_string() })
        );
    }

    #[test]
    fn requires_exactly_two_fields() {
        assert_eq!(parse_command("send bounty"), None);
        assert_eq!(parse_command("send bounty: @octocat: extra"), None);
        assert_eq!(parse_command("send: bounty: @octocat"), None);
    }

    #[test]
    fn requires_exactly_one_mention() {
        assert_eq!(parse_command("send bounty: @a @b"), None);
        assert_eq!(parse_command("send bounty: octocat"), None);
        assert_eq!(parse_command("send bounty: @"), None);
        assert_eq!(parse_command("send bounty: @@octocat"), None);
        assert_eq!(parse_command("send bounty: please pay @octocat"), None);
    }

    #[test]
    fn requires_the_exact_verb() {
        assert_eq!(parse_command("send bounties: @octocat"), None);
        assert_eq!(parse_command("Send bounty: @octocat"), None);
        assert_eq!(parse_command("give bounty: @octocat"), None);
    }

    #[test]
    fn ordinary_comments_are_not_commands() {
        assert_eq!(parse_command("thanks, looks good"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("deploy at 12:30"), None);
    }
}
