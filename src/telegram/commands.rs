//! Parsing of inbound chat text into commands

/// Usage prompt for `/add` without a word and translation
pub const ADD_USAGE: &str = "Please provide the word and its translation.";

/// Usage prompt for `/search` and `/delete` without a word
pub const WORD_USAGE: &str = "Please provide the word.";

/// One inbound message, parsed.
///
/// The command is the text up to the first whitespace, matched case-sensitively;
/// everything after that whitespace is the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    Register,
    Unregister,
    Add { word: &'a str, translation: &'a str },
    Search(&'a str),
    Random,
    Delete(&'a str),
    List,
    Clear,
    /// A known command with a missing argument; holds the prompt to send back
    Usage(&'static str),
    /// Anything that is not a command: a quiz answer or noise
    Text(&'a str),
}

impl<'a> ChatCommand<'a> {
    pub fn parse(text: &'a str) -> Self {
        let (command, argument) = split_command(text);

        match command {
            "/start" | "/register" => ChatCommand::Register,
            "/stop" | "/unregister" => ChatCommand::Unregister,
            "/add" => match argument.split_once(char::is_whitespace) {
                Some((word, translation)) if !translation.trim_start().is_empty() => ChatCommand::Add {
                    word,
                    translation: translation.trim_start(),
                },
                _ => ChatCommand::Usage(ADD_USAGE),
            },
            "/search" if argument.is_empty() => ChatCommand::Usage(WORD_USAGE),
            "/search" => ChatCommand::Search(argument),
            "/random" => ChatCommand::Random,
            "/delete" if argument.is_empty() => ChatCommand::Usage(WORD_USAGE),
            "/delete" => ChatCommand::Delete(argument),
            "/list" => ChatCommand::List,
            "/clear" => ChatCommand::Clear,
            _ => ChatCommand::Text(text),
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::Register => "register",
            ChatCommand::Unregister => "unregister",
            ChatCommand::Add { .. } => "add",
            ChatCommand::Search(_) => "search",
            ChatCommand::Random => "random",
            ChatCommand::Delete(_) => "delete",
            ChatCommand::List => "list",
            ChatCommand::Clear => "clear",
            ChatCommand::Usage(_) => "usage",
            ChatCommand::Text(_) => "text",
        }
    }
}

/// Split at the first whitespace into command and argument (empty if none).
/// Whitespace between the two is not part of the argument.
fn split_command(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("/list"), ("/list", ""));
        assert_eq!(split_command("/search cat"), ("/search", "cat"));
        assert_eq!(split_command("/add cat a small pet"), ("/add", "cat a small pet"));
        assert_eq!(split_command("/search\tcat"), ("/search", "cat"));
        assert_eq!(split_command("/search   cat"), ("/search", "cat"));
    }

    #[test]
    fn test_register_aliases() {
        assert_eq!(ChatCommand::parse("/start"), ChatCommand::Register);
        assert_eq!(ChatCommand::parse("/register"), ChatCommand::Register);
        assert_eq!(ChatCommand::parse("/stop"), ChatCommand::Unregister);
        assert_eq!(ChatCommand::parse("/unregister"), ChatCommand::Unregister);
    }

    #[test]
    fn test_add_splits_word_from_translation() {
        assert_eq!(
            ChatCommand::parse("/add 사과 red apple"),
            ChatCommand::Add {
                word: "사과",
                translation: "red apple"
            }
        );
    }

    #[test]
    fn test_add_ignores_extra_spaces_between_tokens() {
        let expected = ChatCommand::Add {
            word: "cat",
            translation: "dog",
        };
        assert_eq!(ChatCommand::parse("/add  cat dog"), expected);
        assert_eq!(ChatCommand::parse("/add cat  dog"), expected);
        assert_eq!(ChatCommand::parse("/add\tcat \t dog"), expected);
    }

    #[test]
    fn test_add_without_translation_asks_for_usage() {
        assert_eq!(ChatCommand::parse("/add"), ChatCommand::Usage(ADD_USAGE));
        assert_eq!(ChatCommand::parse("/add 사과"), ChatCommand::Usage(ADD_USAGE));
        assert_eq!(ChatCommand::parse("/add 사과 "), ChatCommand::Usage(ADD_USAGE));
        assert_eq!(ChatCommand::parse("/add   사과   "), ChatCommand::Usage(ADD_USAGE));
    }

    #[test]
    fn test_word_commands_need_argument() {
        assert_eq!(ChatCommand::parse("/search"), ChatCommand::Usage(WORD_USAGE));
        assert_eq!(ChatCommand::parse("/delete"), ChatCommand::Usage(WORD_USAGE));
        assert_eq!(ChatCommand::parse("/search 사과"), ChatCommand::Search("사과"));
        assert_eq!(ChatCommand::parse("/delete 사과"), ChatCommand::Delete("사과"));
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        assert_eq!(ChatCommand::parse("/LIST"), ChatCommand::Text("/LIST"));
        assert_eq!(ChatCommand::parse("/Random"), ChatCommand::Text("/Random"));
    }

    #[test]
    fn test_other_text_is_kept_whole() {
        assert_eq!(ChatCommand::parse("red apple"), ChatCommand::Text("red apple"));
        assert_eq!(ChatCommand::parse("/help me"), ChatCommand::Text("/help me"));
    }
}
