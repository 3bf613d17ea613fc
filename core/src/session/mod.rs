mod game_session;
mod session_rng;

pub use game_session::{
    GameSession, GameSnapshot, SessionSettings, SessionState, StateBroadcaster,
};
pub use session_rng::SessionRng;
