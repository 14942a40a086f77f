use crate::utils::*;
use clap::Args;
use lights_out_core as game;
use yew::prelude::*;

pub(crate) const WIN_MESSAGE: &str = "Winner!";

const DEFAULT_ROWS: game::Coord = 5;
const DEFAULT_COLS: game::Coord = 5;
const DEFAULT_CHANCE: f64 = 0.25;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct BoardProps {
    /// Board height
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: game::Coord,

    /// Board width
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: game::Coord,

    /// Chance any cell is lit at the start of the game
    #[arg(long, default_value_t = DEFAULT_CHANCE)]
    pub chance: f64,

    /// Compare the raw random draw instead of rounding it to tenths
    #[arg(long)]
    pub continuous: bool,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Default for BoardProps {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            chance: DEFAULT_CHANCE,
            continuous: false,
            seed: None,
        }
    }
}

impl BoardProps {
    pub(crate) fn config(&self) -> game::GameConfig {
        let threshold = if self.continuous {
            game::ThresholdPolicy::Continuous
        } else {
            game::ThresholdPolicy::Quantized
        };
        game::GameConfig::new((self.rows, self.cols), self.chance).with_threshold(threshold)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    /// A cell was clicked, carrying its `"y-x"` key.
    Activate(AttrValue),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    coord_key: AttrValue,
    coord: AttrValue,
    is_lit: bool,
    on_activate: Callback<AttrValue>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        coord_key,
        coord,
        is_lit,
        on_activate,
    } = props.clone();

    let class = classes!("cell", is_lit.then_some("lit"));

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{} clicked", coord_key);
        on_activate.emit(coord.clone());
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Debug)]
pub(crate) struct BoardView {
    game: game::LightsOut,
}

impl BoardView {
    fn new(props: &BoardProps) -> Self {
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        Self::from_game(game::LightsOut::new(props.config(), seed))
    }

    fn from_game(game: game::LightsOut) -> Self {
        Self { game }
    }

    /// Decodes the key once and applies the move. Returns whether a re-render is needed.
    fn activate(&mut self, key: &str) -> bool {
        match self.game.activate_key(key) {
            Ok(game::FlipOutcome::Won) => {
                log::info!("board solved after activating {}", key);
                true
            }
            Ok(game::FlipOutcome::Flipped) => {
                log::debug!("flipped around {}, {} lit", key, self.game.lit_count());
                true
            }
            Err(err) => {
                log::warn!("ignoring activation of {:?}: {}", key, err);
                false
            }
        }
    }

    fn view_row(&self, y: game::Coord, on_activate: &Callback<AttrValue>) -> Html {
        html! {
            <tr key={y.to_string()}>
                {
                    for self.game.board().row_cells(y).map(|cell| {
                        let game::CellInfo { key, is_lit, .. } = cell;
                        let element_key = key.clone();
                        let key = AttrValue::from(key);
                        html! {
                            <CellView
                                key={element_key}
                                coord_key={key.clone()}
                                coord={key}
                                {is_lit}
                                on_activate={on_activate.clone()}
                            />
                        }
                    })
                }
            </tr>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::new(ctx.props())
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Activate(key) => self.activate(&key),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        // the grid is not rendered at all once every light is out
        if self.game.is_won() {
            return html! { { WIN_MESSAGE } };
        }

        let (rows, _) = self.game.size();
        let on_activate = ctx.link().callback(Msg::Activate);

        html! {
            <table class="board">
                <tbody>
                    { for (0..rows).map(|y| self.view_row(y, &on_activate)) }
                </tbody>
            </table>
        }
    }
}
