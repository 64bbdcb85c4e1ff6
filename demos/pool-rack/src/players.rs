//! Local two-player scoreboard.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Map a host-side player number (1 or 2).
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    fn index(self) -> usize {
        self.number() as usize - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    fn fresh(slot: PlayerSlot) -> Self {
        Self {
            name: format!("Player {}", slot.number()),
            score: 0,
        }
    }
}

pub struct Scoreboard {
    players: [Player; 2],
    turn: PlayerSlot,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            players: [Player::fresh(PlayerSlot::One), Player::fresh(PlayerSlot::Two)],
            turn: PlayerSlot::One,
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    pub fn current_turn(&self) -> PlayerSlot {
        self.turn
    }

    pub fn set_score(&mut self, slot: PlayerSlot, score: u32) {
        self.players[slot.index()].score = score;
    }

    /// Hand the table to the other player. Returns the new current player.
    pub fn switch_turn(&mut self) -> PlayerSlot {
        self.turn = self.turn.other();
        self.turn
    }

    /// Back to zero scores, player one to break.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}
