use serde::Serialize;

use crate::Point;
use crate::config::{self, GameConfig};
use crate::error::GoError;
use crate::goban::{Goban, Placement};
use crate::ko::{self, MoveRecord};
use crate::player::Player;
use crate::stone::Stone;
use crate::territory::{self, TerritoryScore};
use crate::turn::{Stage, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub applied: bool,
    pub stones_captured: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub game_over: bool,
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Both players passed. `black` and `white` are final scores: captures plus territory.
    Scored {
        territory: TerritoryScore,
        black: u32,
        white: u32,
    },
    Resigned { winner: Stone },
}

impl Outcome {
    pub fn winner(&self) -> Option<Stone> {
        match *self {
            Outcome::Scored { black, white, .. } if black > white => Some(Stone::Black),
            Outcome::Scored { black, white, .. } if white > black => Some(Stone::White),
            Outcome::Scored { .. } => None,
            Outcome::Resigned { winner } => Some(winner),
        }
    }

    pub fn result(&self) -> String {
        match *self {
            Outcome::Scored { black, white, .. } => territory::format_result(black, white),
            Outcome::Resigned { winner } => format!("{}+R", winner.letter()),
        }
    }
}

/// A two-player game on one board: turn order, ko state, scores.
#[derive(Debug, Clone)]
pub struct Game {
    players: [Player; 2],
    goban: Goban,
    stage: Stage,
    last_move: Option<MoveRecord>,
    moves: Vec<Turn>,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(board_size: u8) -> Result<Self, GoError> {
        Self::with_config(GameConfig::with_board_size(board_size))
    }

    pub fn with_config(config: GameConfig) -> Result<Self, GoError> {
        config.validate()?;
        Ok(Game {
            players: [
                Player::new(config.black_name, Stone::Black),
                Player::new(config.white_name, Stone::White),
            ],
            goban: Goban::with_size(config.board_size),
            stage: Stage::start(),
            last_move: None,
            moves: Vec::new(),
            outcome: None,
        })
    }

    // -- Accessors --

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn board_size(&self) -> u8 {
        self.goban.size()
    }

    pub fn board_snapshot(&self) -> Vec<Vec<Option<Stone>>> {
        self.goban.snapshot()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_over(&self) -> bool {
        self.stage.is_over()
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, stone: Stone) -> &Player {
        &self.players[Self::seat(stone)]
    }

    /// The player to move. Once the game is over, the player who would have moved next.
    pub fn current_player(&self) -> &Player {
        self.player(self.current_turn_stone())
    }

    pub fn current_turn_stone(&self) -> Stone {
        self.stage.to_move().unwrap_or_else(|| {
            self.moves
                .last()
                .map_or(Stone::Black, |t| t.stone.opp())
        })
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    // -- Validation --

    /// Resolve a move for the current player without touching any state.
    pub fn check_move(&self, point: Point) -> Result<Placement, GoError> {
        self.resolve_for_current(point).inspect_err(|e| {
            tracing::trace!(?point, error = %e, "move rejected");
        })
    }

    pub fn is_valid_move(&self, point: Point) -> bool {
        self.check_move(point).is_ok()
    }

    // -- Game actions --

    /// Play for the current player. Returns the number of stones captured.
    pub fn try_move(&mut self, point: Point) -> Result<u32, GoError> {
        let placement = self.check_move(point)?;
        let stone = placement.stone;
        let captured = placement.captures();

        self.goban.commit(&placement);
        self.players[Self::seat(stone)].add_score(captured);
        self.last_move = Some(MoveRecord::new(point, captured));
        self.moves.push(Turn::play(stone, point));
        self.stage = self.stage.after_play();

        tracing::debug!(?point, %stone, captured, "stone played");
        Ok(captured)
    }

    pub fn player_move(&mut self, point: Point) -> MoveOutcome {
        match self.try_move(point) {
            Ok(stones_captured) => MoveOutcome {
                applied: true,
                stones_captured,
            },
            Err(_) => MoveOutcome {
                applied: false,
                stones_captured: 0,
            },
        }
    }

    /// Pass the turn. A second consecutive pass ends the game and scores territory.
    pub fn pass_turn(&mut self) -> TurnOutcome {
        let Some(stone) = self.stage.to_move() else {
            return TurnOutcome { game_over: true };
        };

        self.moves.push(Turn::pass(stone));
        self.last_move = None;
        self.stage = self.stage.after_pass();
        tracing::debug!(%stone, "pass");

        if self.stage.is_over() {
            self.score_game();
        }

        TurnOutcome {
            game_over: self.stage.is_over(),
        }
    }

    /// The current player resigns; the opponent wins without scoring.
    pub fn resign(&mut self) -> TurnOutcome {
        if let Some(stone) = self.stage.to_move() {
            self.moves.push(Turn::resign(stone));
            self.stage = Stage::GameOver;
            self.outcome = Some(Outcome::Resigned {
                winner: stone.opp(),
            });
            tracing::debug!(%stone, "resigned");
        }
        TurnOutcome { game_over: true }
    }

    /// Clear the board and reset scores, turn order and ko state. Keeps the board size.
    pub fn restart_game(&mut self) {
        self.goban.clear();
        for p in &mut self.players {
            p.reset_score();
        }
        self.stage = Stage::start();
        self.last_move = None;
        self.moves.clear();
        self.outcome = None;
        tracing::debug!(size = self.goban.size(), "game restarted");
    }

    /// Replace the board with an empty one of a new size. Resets the game.
    pub fn set_board_size(&mut self, size: u8) -> Result<(), GoError> {
        config::validate_board_size(size)?;
        self.goban = Goban::with_size(size);
        tracing::debug!(size, "board resized");
        self.restart_game();
        Ok(())
    }

    // -- Internal helpers --

    fn seat(stone: Stone) -> usize {
        match stone {
            Stone::Black => 0,
            Stone::White => 1,
        }
    }

    fn resolve_for_current(&self, point: Point) -> Result<Placement, GoError> {
        let stone = self.stage.to_move().ok_or(GoError::GameOver)?;
        let placement = self.goban.resolve_move(point, stone)?;
        if ko::retakes(&placement, self.last_move.as_ref()) {
            return Err(GoError::KoViolation);
        }
        Ok(placement)
    }

    fn score_game(&mut self) {
        let territory = territory::score_territory(&self.goban);
        for p in &mut self.players {
            p.add_score(territory.get(p.color));
        }

        let outcome = Outcome::Scored {
            territory,
            black: self.player(Stone::Black).score,
            white: self.player(Stone::White).score,
        };
        tracing::debug!(result = %outcome.result(), "game over");
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::*;

    /// Collects the message of every emitted event.
    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Events {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut message = Message::default();
            event.record(&mut message);
            self.0.lock().unwrap().push(message.0);
        }
    }

    #[derive(Default)]
    struct Message(String);

    impl tracing::field::Visit for Message {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    fn capture_events(f: impl FnOnce()) -> Vec<String> {
        let events = Events::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        tracing::subscriber::with_default(subscriber, f);
        let recorded = events.0.lock().unwrap().clone();
        recorded
    }

    /// Build a game on a layout, `to_move` playing next.
    fn game_from_layout(layout: &[&str], to_move: Stone) -> Game {
        let mut game = Game::new(layout.len() as u8).unwrap();
        game.goban = Goban::from_layout(layout);
        game.stage = Stage::AwaitingMove {
            to_move,
            after_pass: false,
        };
        game
    }

    // -- Initialization --

    #[test]
    fn creates_empty_game() {
        let game = Game::new(9).unwrap();
        assert_eq!(game.board_size(), 9);
        assert!(game.goban().is_empty());
        assert_eq!(game.current_player().color, Stone::Black);
        assert_eq!(game.current_player().name, "Player 1");
        assert!(game.players().iter().all(|p| p.score == 0));
        assert!(game.last_move().is_none());
    }

    #[test]
    fn rejects_invalid_board_size() {
        assert_eq!(Game::new(1).unwrap_err(), GoError::InvalidBoardSize(1));
        assert_eq!(Game::new(25).unwrap_err(), GoError::InvalidBoardSize(25));
    }

    #[test]
    fn uses_configured_names() {
        let config = GameConfig {
            board_size: 13,
            black_name: "Shusaku".to_string(),
            white_name: "Genan".to_string(),
        };
        let game = Game::with_config(config).unwrap();
        assert_eq!(game.board_size(), 13);
        assert_eq!(game.player(Stone::White).name, "Genan");
    }

    // -- Turn management --

    #[test]
    fn alternates_turns() {
        let mut game = Game::new(4).unwrap();
        assert_eq!(game.try_move((0, 0)), Ok(0));
        assert_eq!(game.current_player().color, Stone::White);
        assert_eq!(game.try_move((1, 1)), Ok(0));
        assert_eq!(game.current_player().color, Stone::Black);
        assert_eq!(game.goban().stone_at((1, 1)), Some(Stone::White));
    }

    #[test]
    fn pass_hands_over_turn() {
        let mut game = Game::new(4).unwrap();
        assert_eq!(game.pass_turn(), TurnOutcome { game_over: false });
        assert_eq!(game.current_player().color, Stone::White);
    }

    #[test]
    fn move_between_passes_keeps_game_going() {
        let mut game = Game::new(4).unwrap();
        game.pass_turn();
        game.try_move((0, 0)).unwrap();
        assert!(!game.pass_turn().game_over);
        assert!(!game.is_over());
    }

    // -- Move validation --

    #[test]
    fn invalid_move_changes_nothing() {
        let mut game = Game::new(4).unwrap();
        game.try_move((0, 0)).unwrap();
        let before = game.goban().clone();

        let outcome = game.player_move((0, 0));
        assert_eq!(
            outcome,
            MoveOutcome {
                applied: false,
                stones_captured: 0
            }
        );
        assert_eq!(game.goban(), &before);
        assert_eq!(game.current_player().color, Stone::White);
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn rejects_off_board_and_suicide() {
        let mut game = game_from_layout(&["+B++", "B+++", "++++", "++++"], Stone::White);
        assert_eq!(game.try_move((4, 0)), Err(GoError::NotOnBoard));
        assert_eq!(game.try_move((0, 0)), Err(GoError::Suicide));
        assert!(!game.is_valid_move((0, 0)));
    }

    #[test]
    fn rejected_checks_are_traced() {
        let mut game = Game::new(4).unwrap();
        game.try_move((0, 0)).unwrap();

        let events = capture_events(|| {
            assert!(!game.is_valid_move((0, 0)));
            assert!(!game.is_valid_move((9, 9)));
            assert!(game.is_valid_move((1, 1)));
        });
        assert_eq!(events, vec!["move rejected", "move rejected"]);
    }

    #[test]
    fn credits_captures() {
        let mut game = Game::new(4).unwrap();
        game.try_move((1, 0)).unwrap();
        game.try_move((0, 0)).unwrap();
        assert_eq!(game.try_move((0, 1)), Ok(1));

        assert_eq!(game.player(Stone::Black).score, 1);
        assert_eq!(game.player(Stone::White).score, 0);
        assert_eq!(game.goban().stone_at((0, 0)), None);
        assert_eq!(game.last_move(), Some(&MoveRecord::new((0, 1), 1)));
    }

    // -- Ko --

    #[test]
    fn ko_blocks_immediate_retake() {
        let mut game = game_from_layout(&["+BW+", "BW+W", "+BW+", "++++"], Stone::Black);
        assert_eq!(game.try_move((1, 2)), Ok(1));

        assert!(!game.is_valid_move((1, 1)));
        assert_eq!(game.try_move((1, 1)), Err(GoError::KoViolation));
        assert_eq!(game.goban().stone_at((1, 2)), Some(Stone::Black));
    }

    #[test]
    fn ko_can_be_retaken_after_another_move() {
        let mut game = game_from_layout(&["+BW+", "BW+W", "+BW+", "++++"], Stone::Black);
        game.try_move((1, 2)).unwrap();
        game.try_move((3, 3)).unwrap();
        game.try_move((3, 0)).unwrap();

        assert_eq!(game.try_move((1, 1)), Ok(1));
        assert_eq!(game.goban().stone_at((1, 2)), None);
    }

    #[test]
    fn pass_clears_ko() {
        let mut game = game_from_layout(&["+BW+", "BW+W", "+BW+", "++++"], Stone::Black);
        game.try_move((1, 2)).unwrap();
        game.pass_turn();
        assert!(game.last_move().is_none());
    }

    // -- Game end --

    #[test]
    fn double_pass_scores_once() {
        let mut game = game_from_layout(&["+B+W", "+B+W", "+B+W", "+B+W"], Stone::Black);
        assert!(!game.pass_turn().game_over);
        assert!(game.pass_turn().game_over);

        assert!(game.is_over());
        assert_eq!(game.player(Stone::Black).score, 4);
        assert_eq!(game.player(Stone::White).score, 0);
        assert_eq!(game.outcome().map(Outcome::result).as_deref(), Some("B+4"));

        // Further passes are no-ops.
        assert!(game.pass_turn().game_over);
        assert_eq!(game.player(Stone::Black).score, 4);
        assert_eq!(game.moves().len(), 2);
    }

    #[test]
    fn moves_rejected_after_game_over() {
        let mut game = Game::new(4).unwrap();
        game.pass_turn();
        game.pass_turn();
        assert_eq!(game.try_move((0, 0)), Err(GoError::GameOver));
        assert!(!game.is_valid_move((0, 0)));
    }

    #[test]
    fn resign_ends_game() {
        let mut game = Game::new(9).unwrap();
        game.try_move((2, 2)).unwrap();
        assert!(game.resign().game_over);

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner(), Some(Stone::Black));
        assert_eq!(outcome.result(), "B+R");
        assert_eq!(game.player(Stone::Black).score, 0);
    }

    #[test]
    fn outcome_serializes_with_kind() {
        let outcome = Outcome::Resigned {
            winner: Stone::White,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "resigned");
        assert_eq!(json["winner"], -1);
    }

    // -- Reset --

    #[test]
    fn restart_resets_everything() {
        let mut game = Game::new(4).unwrap();
        game.try_move((1, 0)).unwrap();
        game.try_move((0, 0)).unwrap();
        game.try_move((0, 1)).unwrap();
        game.pass_turn();

        game.restart_game();
        assert!(game.goban().is_empty());
        assert_eq!(game.board_size(), 4);
        assert!(game.players().iter().all(|p| p.score == 0));
        assert_eq!(game.current_player().color, Stone::Black);
        assert!(game.last_move().is_none());
        assert!(game.moves().is_empty());
        assert_eq!(game.stage(), Stage::start());
    }

    #[test]
    fn resize_is_logged() {
        let mut game = Game::new(9).unwrap();
        let events = capture_events(|| game.set_board_size(13).unwrap());
        assert_eq!(events, vec!["board resized", "game restarted"]);
    }

    #[test]
    fn set_board_size_replaces_board() {
        let mut game = Game::new(9).unwrap();
        game.try_move((4, 4)).unwrap();
        game.set_board_size(13).unwrap();

        assert_eq!(game.board_size(), 13);
        assert!(game.goban().is_empty());
        assert_eq!(game.current_player().color, Stone::Black);
        assert_eq!(game.set_board_size(0), Err(GoError::InvalidBoardSize(0)));
        assert_eq!(game.board_size(), 13);
    }
}
