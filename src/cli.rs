use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kquiz")]
#[command(author, version, about = "Telegram bot for drilling vocabulary", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Print the vocabulary of one chat from the database
    Export {
        /// Chat whose words to print
        #[arg(long, allow_hyphen_values = true)]
        chat_id: i64,

        /// Print a JSON array instead of "word -> translation" lines
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
