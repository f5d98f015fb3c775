use crate::cli::{AliasesCommand, Commands, CrosswalkCommand, PlayersCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Players { command } => match command {
            PlayersCommand::Import { json, .. } | PlayersCommand::List { json, .. } => *json,
        },
        Commands::Aliases { command } => match command {
            AliasesCommand::Import { json, .. } | AliasesCommand::List { json, .. } => *json,
        },
        Commands::Crosswalk { command } => match command {
            CrosswalkCommand::Build { json, .. }
            | CrosswalkCommand::List { json, .. }
            | CrosswalkCommand::Runs { json, .. } => *json,
        },
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
