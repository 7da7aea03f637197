use freccette_types::{GameError, MAX_PLAYERS, Player, PlayerId};

/// Players in registration order, which is also the turn order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

/// A player taken out of the registry, with the position it held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedPlayer {
    pub player: Player,
    pub position: usize,
    /// Player that followed the removed one, cyclically, before removal.
    /// `None` when the removed player was the only one.
    pub successor: Option<PlayerId>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from stored players. The caller validates the
    /// snapshot first.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn register(&mut self, name: &str) -> Result<&Player, GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::RegistryFull { max: MAX_PLAYERS });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }

        self.players.push(Player::new(name));
        let index = self.players.len() - 1;
        Ok(&self.players[index])
    }

    /// Remove a player. Unknown ids leave the registry untouched.
    pub fn remove(&mut self, id: PlayerId) -> Option<RemovedPlayer> {
        let position = self.position(id)?;
        let len = self.players.len();

        // Successor is picked from the order before removal
        let candidate = self.players[(position + 1) % len].id;
        let successor = (candidate != id).then_some(candidate);

        let player = self.players.remove(position);
        Some(RemovedPlayer {
            player,
            position,
            successor,
        })
    }

    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
            player.history.clear();
        }
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Next player in turn order after `id`, wrapping around. Falls back to
    /// the first player when `id` is no longer registered.
    pub fn next_after(&self, id: PlayerId) -> Option<PlayerId> {
        match self.position(id) {
            Some(position) => Some(self.players[(position + 1) % self.players.len()].id),
            None => self.first().map(|p| p.id),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }
}
