//! Client-side game state, rebuilt purely from broadcast events.
//!
//! This is the same reconciliation the browser client performs: a roster of
//! players with locally tallied click counts, the current ball color, and a
//! client-local end-of-game threshold. Nothing here is authoritative — the
//! server only persists raw click rows.

use std::collections::HashMap;

use clickball_types::ServerMessage;

/// First player to reach this many clicks ends the game, client-side only.
pub const WIN_CLICKS: u32 = 42;

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub nickname: String,
    pub color: String,
    pub clicks: u32,
}

/// Pure function of received broadcasts plus the player's own color.
pub struct ClientGame {
    players: HashMap<i64, RosterEntry>,
    own_color: String,
    /// Last ball color carried by a broadcast. Drives the scoring guard.
    ball_color: String,
    /// What the local scene shows right now — repainted optimistically on a
    /// local click, corrected by the next broadcast.
    displayed_color: String,
}

impl ClientGame {
    pub fn new(own_color: impl Into<String>) -> Self {
        Self {
            players: HashMap::new(),
            own_color: own_color.into(),
            ball_color: String::new(),
            displayed_color: String::new(),
        }
    }

    /// Fold one broadcast into the roster.
    pub fn apply(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::PlayerJoined { player } => {
                self.players.insert(
                    player.id,
                    RosterEntry {
                        nickname: player.nickname.clone(),
                        color: player.color.clone(),
                        clicks: 0,
                    },
                );
            }
            ServerMessage::PlayerLeft { player } => {
                self.players.remove(&player.id);
            }
            ServerMessage::BallClicked { color, player } => {
                // Scoring guard, kept as the original client has it: score
                // only when the ball wasn't already the clicking player's
                // color. Clients that honor the send-side guard can't make
                // this false for their own clicks; it exists to stop a player
                // double-scoring inside the pre-click window. Players who
                // joined before we did are not in our roster and score
                // nothing here.
                if self.ball_color != player.color {
                    if let Some(entry) = self.players.get_mut(&player.id) {
                        entry.clicks += 1;
                    }
                }
                self.ball_color = color.clone();
                self.displayed_color = color.clone();
            }
        }
    }

    /// A click is only worth sending while the ball isn't already ours.
    pub fn wants_click(&self) -> bool {
        self.displayed_color != self.own_color
    }

    /// Optimistically repaint the ball with our own color on a local click.
    pub fn local_click(&mut self) {
        self.displayed_color = self.own_color.clone();
    }

    pub fn ball_color(&self) -> &str {
        &self.ball_color
    }

    pub fn clicks_of(&self, player_id: i64) -> Option<u32> {
        self.players.get(&player_id).map(|e| e.clicks)
    }

    pub fn roster_len(&self) -> usize {
        self.players.len()
    }

    /// The first player at or past [`WIN_CLICKS`], if any.
    pub fn winner(&self) -> Option<(i64, &RosterEntry)> {
        self.players
            .iter()
            .find(|(_, e)| e.clicks >= WIN_CLICKS)
            .map(|(id, e)| (*id, e))
    }

    /// Roster sorted by clicks, best first.
    pub fn standings(&self) -> Vec<(i64, &RosterEntry)> {
        let mut all: Vec<_> = self.players.iter().map(|(id, e)| (*id, e)).collect();
        all.sort_by(|a, b| b.1.clicks.cmp(&a.1.clicks));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickball_types::Player;

    fn player(id: i64, color: &str) -> Player {
        Player {
            id,
            nickname: format!("p{id}"),
            color: color.into(),
        }
    }

    fn clicked(p: &Player) -> ServerMessage {
        ServerMessage::BallClicked {
            color: p.color.clone(),
            player: p.clone(),
        }
    }

    #[test]
    fn roster_follows_join_and_leave() {
        let mut game = ClientGame::new("#ff0000");
        let alice = player(1, "#ff0000");
        game.apply(&ServerMessage::PlayerJoined { player: alice.clone() });
        assert_eq!(game.roster_len(), 1);
        assert_eq!(game.clicks_of(1), Some(0));

        game.apply(&ServerMessage::PlayerLeft { player: alice });
        assert_eq!(game.roster_len(), 0);
    }

    #[test]
    fn own_click_scores_once() {
        let mut game = ClientGame::new("#ff0000");
        let alice = player(1, "#ff0000");
        game.apply(&ServerMessage::PlayerJoined { player: alice.clone() });

        assert!(game.wants_click());
        game.local_click();
        game.apply(&clicked(&alice));
        assert_eq!(game.clicks_of(1), Some(1));

        // Ball is now ours — a second click is suppressed at the source, and
        // a replayed event would not score either.
        assert!(!game.wants_click());
        game.apply(&clicked(&alice));
        assert_eq!(game.clicks_of(1), Some(1));
    }

    #[test]
    fn alternating_clicks_all_score() {
        let mut game = ClientGame::new("#ff0000");
        let alice = player(1, "#ff0000");
        let bob = player(2, "#00ff00");
        game.apply(&ServerMessage::PlayerJoined { player: alice.clone() });
        game.apply(&ServerMessage::PlayerJoined { player: bob.clone() });

        game.apply(&clicked(&alice));
        game.apply(&clicked(&bob));
        game.apply(&clicked(&alice));
        assert_eq!(game.clicks_of(1), Some(2));
        assert_eq!(game.clicks_of(2), Some(1));
        assert_eq!(game.ball_color(), "#ff0000");
    }

    #[test]
    fn clicks_by_unknown_players_are_ignored() {
        let mut game = ClientGame::new("#ff0000");
        // Joined before we did — never entered our roster.
        let ghost = player(9, "#123456");
        game.apply(&clicked(&ghost));
        assert_eq!(game.roster_len(), 0);
        assert_eq!(game.ball_color(), "#123456");
    }

    #[test]
    fn game_ends_at_the_click_threshold() {
        let mut game = ClientGame::new("#0000ff");
        let alice = player(1, "#ff0000");
        let bob = player(2, "#00ff00");
        game.apply(&ServerMessage::PlayerJoined { player: alice.clone() });
        game.apply(&ServerMessage::PlayerJoined { player: bob.clone() });

        for _ in 0..WIN_CLICKS {
            game.apply(&clicked(&alice));
            game.apply(&clicked(&bob));
        }
        assert!(game.winner().is_some());

        let standings = game.standings();
        assert_eq!(standings.len(), 2);
        assert!(standings[0].1.clicks >= standings[1].1.clicks);
    }
}
