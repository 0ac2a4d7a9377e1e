use crate::utils::*;
use cashmine_core as game;
use game::{CellIndex, GameError, ToCellIndex};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const DEFAULT_MINES: &str = "3";
const DEFAULT_BET: &str = "100";

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl HasUpdate for game::Result<game::RevealOutcome> {
    fn has_update(self) -> bool {
        match self {
            Ok(outcome) => outcome.has_update(),
            Err(err) => log_rejected(err),
        }
    }
}

impl HasUpdate for game::Result<game::Payout> {
    fn has_update(self) -> bool {
        match self {
            Ok(payout) => {
                log::debug!("banked {}", format_credits(payout.amount));
                true
            }
            Err(err) => log_rejected(err),
        }
    }
}

/// Stale clicks after a round ended are expected, anything else is worth a warning.
fn log_rejected(err: GameError) -> bool {
    match err {
        GameError::RoundNotActive => log::trace!("ignored: {}", err),
        _ => log::warn!("rejected: {}", err),
    }
    false
}

/// CSS classes for a board cell.
fn cell_class_names(view: game::CellView) -> &'static [&'static str] {
    use game::CellView::*;
    match view {
        Hidden => &[],
        Picked => &["safe", "clicked"],
        Safe => &["safe"],
        Mine => &["mine"],
        Detonated => &["mine", "oops"],
    }
}

fn status_class_name(status: game::RoundStatus) -> &'static str {
    use game::RoundStatus::*;
    match status {
        Idle => "not-started",
        InProgress => "in-progress",
        Lost => "lose",
        CashedOut => "win",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SetMines(String),
    SetBet(String),
    Start,
    Reveal(CellIndex),
    CashOut,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: CellIndex,
    view: game::CellView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<CellIndex>,
}

#[function_component(CellTile)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        view,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("square");
    class.extend(cell_class_names(view).iter().copied());
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: Option<u64>,
    pub credits: f64,
}

#[derive(Debug)]
pub(crate) struct GameView {
    controller: game::GameController,
    mine_input: String,
    bet_input: String,
    notice: Option<&'static str>,
}

impl GameView {
    fn start_round(&mut self) {
        let started = game::parse_mine_count(&self.mine_input)
            .and_then(|mines| Ok((mines, game::parse_bet(&self.bet_input)?)))
            .and_then(|(mines, bet)| self.controller.start_round(mines, bet));

        self.notice = match started {
            Ok(()) => {
                log::debug!("new round, {} mines", self.mine_input.trim());
                None
            }
            Err(err) => {
                log::debug!("start rejected: {}", err);
                Some(err.user_message())
            }
        };
    }

    fn view_board(snapshot: &game::Snapshot, ctx: &Context<Self>) -> Html {
        let locked = snapshot.status != game::RoundStatus::InProgress;
        let callback = ctx.link().callback(Msg::Reveal);

        html! {
            <table class={classes!("board", (!locked).then_some("playable"))}>
                {
                    for snapshot.rows().zip(0..).map(|(row, y)| html! {
                        <tr>
                            {
                                for row.iter().zip(0..).filter_map(|(&view, x)| {
                                    let index = (x, y).to_cell_index()?;
                                    let callback = callback.clone();
                                    let locked = locked || !view.is_hidden();
                                    Some(html! {
                                        <CellTile {index} {view} {locked} {callback}/>
                                    })
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let generator = game::RandomLayoutGenerator::new(seed);

        Self {
            controller: game::GameController::new(game::GameConfig::new(props.credits), generator),
            mine_input: DEFAULT_MINES.to_string(),
            bet_input: DEFAULT_BET.to_string(),
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SetMines(text) => {
                self.mine_input = text;
                false
            }
            SetBet(text) => {
                self.bet_input = text;
                false
            }
            Start => {
                self.start_round();
                true
            }
            Reveal(index) => {
                log::debug!("reveal cell: {}", index);
                self.controller.reveal_cell(index).has_update()
            }
            CashOut => self.controller.cash_out().has_update(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.controller.snapshot();
        let status_class = status_class_name(snapshot.status);

        let on_mines = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            SetMines(input.value())
        });
        let on_bet = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            SetBet(input.value())
        });
        let on_start = ctx.link().callback(|_: MouseEvent| Start);
        let on_cash_out = ctx.link().callback(|_: MouseEvent| CashOut);

        html! {
            <div class={classes!("cashmine", status_class)}>
                <nav>
                    <aside id="credits">{format!("Credits: {}", format_credits(snapshot.balance))}</aside>
                </nav>
                <fieldset>
                    <label>
                        {"Mines"}
                        <input id="mine-count" type="number" min="1" max="24"
                            value={self.mine_input.clone()} oninput={on_mines}/>
                    </label>
                    <label>
                        {"Bet"}
                        <input id="bet-amount" type="number" min="0" step="any"
                            value={self.bet_input.clone()} oninput={on_bet}/>
                    </label>
                    <button id="start-game" onclick={on_start}>{"Start Game"}</button>
                    <button id="cashout" class={classes!((!snapshot.can_cash_out).then_some("hidden"))}
                        onclick={on_cash_out}>
                        {"Cash Out"}
                    </button>
                </fieldset>
                { Self::view_board(&snapshot, ctx) }
                if let Some(payout) = snapshot.potential_payout {
                    <p class="potential">
                        {format!("x{:.2} pays {}", snapshot.multiplier, format_credits(payout))}
                    </p>
                }
                if snapshot.status == game::RoundStatus::Lost {
                    <p id="game-over">{"Game Over!"}</p>
                }
                if let Some(message) = snapshot.message.clone() {
                    <p id="result">{message}</p>
                }
                if let Some(notice) = self.notice {
                    <p class="notice">{notice}</p>
                }
            </div>
        }
    }
}
