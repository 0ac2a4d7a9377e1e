use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Externally observable phase of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    Idle,
    InProgress,
    Lost,
    CashedOut,
}

impl From<RoundState> for RoundStatus {
    fn from(state: RoundState) -> Self {
        match state {
            RoundState::InProgress => Self::InProgress,
            RoundState::Lost => Self::Lost,
            RoundState::CashedOut => Self::CashedOut,
        }
    }
}

/// End-of-round text shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundMessage {
    Lost { stake: Credits },
    CashedOut { balance: Credits, multiplier: f64 },
}

impl fmt::Display for RoundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lost { stake } => write!(f, "You lost! You bet ${:.2}.", stake),
            Self::CashedOut {
                balance,
                multiplier,
            } => write!(
                f,
                "You cashed out with ${:.2} (Multiplier: {:.2}).",
                balance, multiplier
            ),
        }
    }
}

/// Owns the balance and the current round, and applies every player action.
#[derive(Clone, Debug)]
pub struct GameController<G = RandomLayoutGenerator> {
    balance: Credits,
    round: Option<Round>,
    message: Option<RoundMessage>,
    generator: G,
}

impl<G: LayoutGenerator> GameController<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            balance: config.starting_balance,
            round: None,
            message: None,
            generator,
        }
    }

    pub fn with_generator(generator: G) -> Self {
        Self::new(GameConfig::default(), generator)
    }

    pub fn balance(&self) -> Credits {
        self.balance
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn status(&self) -> RoundStatus {
        self.round
            .as_ref()
            .map_or(RoundStatus::Idle, |round| round.state().into())
    }

    pub fn can_cash_out(&self) -> bool {
        matches!(self.status(), RoundStatus::InProgress)
    }

    /// Multiplier earned so far this round, `None` when there is no round.
    pub fn current_multiplier(&self) -> Option<f64> {
        self.round.as_ref().map(Round::multiplier)
    }

    /// What a cash-out would bank right now, only while a round is in progress.
    pub fn potential_payout(&self) -> Option<Credits> {
        self.round
            .as_ref()
            .filter(|round| round.state().is_active())
            .map(Round::potential_payout)
    }

    pub fn cell_view(&self, index: CellIndex) -> CellView {
        self.round
            .as_ref()
            .map_or(CellView::Hidden, |round| round.cell_view(index))
    }

    pub fn message(&self) -> Option<RoundMessage> {
        self.message
    }

    pub fn start_round(&mut self, mine_count: CellCount, bet: Credits) -> Result<()> {
        if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
            return Err(GameError::InvalidMineCount);
        }

        if !bet.is_finite() || bet <= 0.0 {
            return Err(GameError::InvalidBet);
        }

        if bet > self.balance {
            return Err(GameError::InsufficientBalance {
                bet,
                balance: self.balance,
            });
        }

        // generate before touching the balance or the prior round
        let mines = self.generator.generate(mine_count)?;
        log::trace!("mines placed: {:?}", mines.iter().collect::<Vec<_>>());

        if let Some(previous) = self.round.take() {
            if previous.state().is_active() {
                log::warn!(
                    "round abandoned in progress, stake {} forfeited",
                    previous.stake()
                );
            } else {
                log::debug!("discarding finished round");
            }
        }
        self.message = None;

        self.balance -= bet;
        self.round = Some(Round::new(mines, bet));

        log::debug!(
            "round started with {} mines, stake {}, balance {}",
            mine_count,
            bet,
            self.balance
        );
        Ok(())
    }

    pub fn reveal_cell(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let Some(round) = self.round.as_mut() else {
            log::debug!("cannot reveal {}, no round started", index);
            return Err(GameError::RoundNotActive);
        };

        let outcome = round.reveal(index).inspect_err(|err| {
            if matches!(err, GameError::RoundNotActive) {
                log::debug!("cannot reveal {}, round is over", index);
            }
        })?;

        if matches!(outcome, RevealOutcome::HitMine) {
            self.message = Some(RoundMessage::Lost {
                stake: round.stake(),
            });
        }

        Ok(outcome)
    }

    pub fn cash_out(&mut self) -> Result<Payout> {
        let Some(round) = self.round.as_mut() else {
            log::debug!("cannot cash out, no round started");
            return Err(GameError::RoundNotActive);
        };

        let payout = round.cash_out().inspect_err(|_| {
            log::debug!("cannot cash out, round is over");
        })?;

        self.balance += payout.amount;
        self.message = Some(RoundMessage::CashedOut {
            balance: self.balance,
            multiplier: payout.multiplier,
        });
        log::debug!("balance now {}", self.balance);

        Ok(payout)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_controller(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn controller(mines: &[CellIndex]) -> GameController<FixedLayoutGenerator> {
        GameController::with_generator(FixedLayoutGenerator::from_indices(mines).unwrap())
    }

    #[test]
    fn fresh_controller_is_idle() {
        let game = controller(&[0]);

        assert_eq!(game.status(), RoundStatus::Idle);
        assert_eq!(game.balance(), DEFAULT_STARTING_BALANCE);
        assert!(!game.can_cash_out());
        assert_eq!(game.cell_view(0), CellView::Hidden);
        assert_eq!(game.potential_payout(), None);
        assert_eq!(game.message(), None);
        assert_eq!(game.status(), RoundStatus::default());
        assert_eq!(game.cell_view(0), CellView::default());
    }

    #[test]
    fn start_round_validates_in_order() {
        let mut game = GameController::new(
            GameConfig::new(50.0),
            FixedLayoutGenerator::from_indices(&[0]).unwrap(),
        );

        assert_eq!(game.start_round(0, 10.0), Err(GameError::InvalidMineCount));
        assert_eq!(game.start_round(25, -1.0), Err(GameError::InvalidMineCount));
        assert_eq!(game.start_round(5, 0.0), Err(GameError::InvalidBet));
        assert_eq!(game.start_round(5, -3.0), Err(GameError::InvalidBet));
        assert_eq!(game.start_round(5, f64::NAN), Err(GameError::InvalidBet));
        assert_eq!(game.start_round(5, f64::INFINITY), Err(GameError::InvalidBet));
        assert_eq!(
            game.start_round(5, 50.5),
            Err(GameError::InsufficientBalance {
                bet: 50.5,
                balance: 50.0
            })
        );

        assert_eq!(game.status(), RoundStatus::Idle);
        assert_eq!(game.balance(), 50.0);
    }

    #[test]
    fn bet_equal_to_balance_is_accepted() {
        let mut game = GameController::new(
            GameConfig::new(50.0),
            FixedLayoutGenerator::from_indices(&[0]).unwrap(),
        );

        game.start_round(1, 50.0).unwrap();

        assert_eq!(game.balance(), 0.0);
        assert_eq!(game.status(), RoundStatus::InProgress);
    }

    fn assert_round_unchanged(
        game: &GameController<FixedLayoutGenerator>,
        before: &Round,
        balance: Credits,
    ) {
        assert_eq!(game.round(), Some(before));
        assert_eq!(game.status(), RoundStatus::from(before.state()));
        assert_eq!(game.balance(), balance);
    }

    #[test]
    fn layout_with_wrong_mine_count_is_rejected() {
        let mut game = controller(&[7]);

        assert_eq!(game.start_round(5, 100.0), Err(GameError::InvalidLayout(5)));
        assert_eq!(game.status(), RoundStatus::Idle);
        assert_eq!(game.balance(), DEFAULT_STARTING_BALANCE);

        game.start_round(1, 100.0).unwrap();
        assert_eq!(game.round().unwrap().mine_count(), 1);
    }

    #[test]
    fn rejected_layout_keeps_the_running_round() {
        let mut game = controller(&[7]);
        game.start_round(1, 100.0).unwrap();
        game.reveal_cell(3).unwrap();
        let before = game.round().unwrap().clone();
        let balance = game.balance();

        assert_eq!(game.start_round(4, 10.0), Err(GameError::InvalidLayout(4)));

        assert_round_unchanged(&game, &before, balance);
        assert!(game.can_cash_out());
    }

    #[test]
    fn failed_start_keeps_the_round_in_progress() {
        let mut game = controller(&[7, 8]);
        game.start_round(2, 100.0).unwrap();
        game.reveal_cell(0).unwrap();
        game.reveal_cell(1).unwrap();
        let before = game.round().unwrap().clone();
        let balance = game.balance();

        assert_eq!(game.start_round(0, 10.0), Err(GameError::InvalidMineCount));
        assert_eq!(game.start_round(2, -10.0), Err(GameError::InvalidBet));
        assert_eq!(
            game.start_round(2, balance + 1.0),
            Err(GameError::InsufficientBalance {
                bet: balance + 1.0,
                balance
            })
        );

        assert_round_unchanged(&game, &before, balance);
        assert_eq!(game.round().unwrap().safe_reveals(), 2);
        assert_eq!(game.round().unwrap().stake(), 100.0);
        assert_eq!(game.status(), RoundStatus::InProgress);
    }

    #[test]
    fn failed_start_keeps_the_finished_round() {
        let mut game = controller(&[7]);
        game.start_round(1, 100.0).unwrap();
        game.reveal_cell(7).unwrap();
        let before = game.round().unwrap().clone();
        let balance = game.balance();
        let message = game.message();

        assert_eq!(game.start_round(25, 10.0), Err(GameError::InvalidMineCount));
        assert_eq!(game.start_round(1, f64::NAN), Err(GameError::InvalidBet));
        assert_eq!(
            game.start_round(1, 1_000_000.0),
            Err(GameError::InsufficientBalance {
                bet: 1_000_000.0,
                balance
            })
        );

        assert_round_unchanged(&game, &before, balance);
        assert_eq!(game.status(), RoundStatus::Lost);
        assert_eq!(game.message(), message);
        assert_eq!(game.cell_view(7), CellView::Detonated);
    }

    #[test]
    fn safe_reveal_then_cash_out() {
        let mut game = controller(&[0, 1, 2, 3, 4]);

        game.start_round(5, 100.0).unwrap();
        assert_eq!(game.balance(), 99_900.0);

        assert_eq!(game.reveal_cell(12).unwrap(), RevealOutcome::Safe);
        assert_eq!(game.round().unwrap().safe_reveals(), 1);

        let payout = game.cash_out().unwrap();
        assert!((payout.amount - 120.0).abs() < EPSILON);
        assert!((game.balance() - 100_020.0).abs() < EPSILON);
        assert_eq!(game.status(), RoundStatus::CashedOut);
        assert!(!game.can_cash_out());
        assert_eq!(
            game.message().unwrap().to_string(),
            "You cashed out with $100020.00 (Multiplier: 1.20)."
        );
    }

    #[test]
    fn hitting_a_mine_forfeits_the_stake() {
        let mut game = controller(&[7]);

        game.start_round(1, 250.0).unwrap();
        assert_eq!(game.reveal_cell(7).unwrap(), RevealOutcome::HitMine);

        assert_eq!(game.status(), RoundStatus::Lost);
        assert_eq!(game.balance(), 99_750.0);
        assert_eq!(game.cell_view(7), CellView::Detonated);
        assert_eq!(
            game.message().unwrap().to_string(),
            "You lost! You bet $250.00."
        );
    }

    #[test]
    fn moves_without_a_round_are_ignored() {
        let mut game = controller(&[7]);

        assert_eq!(game.reveal_cell(3), Err(GameError::RoundNotActive));
        assert_eq!(game.cash_out(), Err(GameError::RoundNotActive));
        assert_eq!(game.balance(), DEFAULT_STARTING_BALANCE);
        assert_eq!(game.status(), RoundStatus::Idle);
    }

    #[test]
    fn moves_after_round_end_do_not_touch_balance_or_mines() {
        let mut game = controller(&[7, 8]);
        game.start_round(2, 10.0).unwrap();
        game.reveal_cell(0).unwrap();
        game.cash_out().unwrap();

        let balance = game.balance();
        let mines = game.round().unwrap().mines().clone();

        assert_eq!(game.cash_out(), Err(GameError::RoundNotActive));
        assert_eq!(game.reveal_cell(7), Err(GameError::RoundNotActive));
        assert_eq!(game.reveal_cell(1), Err(GameError::RoundNotActive));

        assert_eq!(game.balance(), balance);
        assert_eq!(game.round().unwrap().mines(), &mines);
        assert_eq!(game.status(), RoundStatus::CashedOut);
    }

    #[test]
    fn new_round_replaces_the_finished_one() {
        let mut game = controller(&[7]);
        game.start_round(1, 10.0).unwrap();
        game.reveal_cell(7).unwrap();

        game.start_round(1, 10.0).unwrap();

        assert_eq!(game.status(), RoundStatus::InProgress);
        assert_eq!(game.message(), None);
        assert_eq!(game.round().unwrap().safe_reveals(), 0);
        assert_eq!(game.cell_view(7), CellView::Hidden);
        assert_eq!(game.balance(), 99_980.0);
    }

    #[test]
    fn restarting_mid_round_forfeits_the_old_stake() {
        let mut game = controller(&[7]);
        game.start_round(1, 10.0).unwrap();
        game.reveal_cell(1).unwrap();

        game.start_round(1, 20.0).unwrap();

        assert_eq!(game.balance(), 99_970.0);
        assert_eq!(game.round().unwrap().stake(), 20.0);
        assert_eq!(game.round().unwrap().safe_reveals(), 0);
    }

    #[test]
    fn potential_payout_tracks_reveals() {
        let mut game = controller(&[7]);
        game.start_round(1, 100.0).unwrap();

        assert_eq!(game.potential_payout(), Some(100.0));
        game.reveal_cell(0).unwrap();
        game.reveal_cell(1).unwrap();
        game.reveal_cell(2).unwrap();

        assert!((game.potential_payout().unwrap() - 172.8).abs() < EPSILON);
        assert!((game.current_multiplier().unwrap() - 1.728).abs() < EPSILON);

        game.cash_out().unwrap();
        assert_eq!(game.potential_payout(), None);
    }
}
