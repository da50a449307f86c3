pub mod match_json;

pub use match_json::{
    execute_match_command_json, CommandOutcome, MatchCommand, MatchCommandRequest,
    MatchCommandResponse,
};
