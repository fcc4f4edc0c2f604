use crate::settings::{self, ConfigArgs};
use crate::theme::Theme;
use crate::utils::*;
use gloo::timers::callback::Timeout;
use mazerun_core as maze;
use yew::prelude::*;

const NOM_SOUND_ID: &str = "nomSound";

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<maze::MarkOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: maze::MarkOutcome| outcome.has_update())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    /// Left click, toggles a wall.
    Primary(maze::Coord2),
    /// Right click, toggles a user path cell.
    Secondary(maze::Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    NewMaze,
    Solve,
    WalkPath,
    Tick,
    ClosePopup,
    CycleTheme,
}

const fn role_class(role: maze::CellRole) -> Option<&'static str> {
    use maze::CellRole;
    match role {
        CellRole::None => None,
        CellRole::Wall => Some("wall"),
        CellRole::Visiting => Some("mouse"),
        CellRole::SettledPath => Some("path"),
        CellRole::GoalMarker => Some("goal"),
        CellRole::Marked => Some("user-path"),
    }
}

const fn role_content(role: maze::CellRole) -> &'static str {
    use maze::CellRole::*;
    match role {
        Visiting => "🐭",
        GoalMarker => "🧀",
        None | Wall | SettledPath | Marked => "",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: maze::Coord,
    col: maze::Coord,
    role: maze::CellRole,
    #[prop_or_default]
    locked: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        role,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("cell", role_class(role));
    if role.is_trail() {
        class.push("trail");
    }
    if locked {
        class.push("locked");
    }

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("({}, {}) primary", row, col);
            callback.emit(CellMsg::Primary((row, col)));
        })
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("({}, {}) secondary", row, col);
        callback.emit(CellMsg::Secondary((row, col)));
    });

    html! {
        <td {class} {onclick} {oncontextmenu}>{role_content(role)}</td>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct MazeProps {
    pub args: ConfigArgs,
    pub theme: Option<Theme>,
}

pub(crate) struct MazeView {
    config: maze::MazeConfig,
    forced_seed: Option<u64>,
    seed: u64,
    session: maze::Session,
    theme: Option<Theme>,
    popup_open: bool,
    _tick: Option<Timeout>,
}

impl MazeView {
    fn new_session(config: maze::MazeConfig, seed: u64) -> maze::Session {
        log::debug!("new maze, seed: {}", seed);
        maze::Session::generate(config, seed).expect("config was validated on load")
    }

    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    /// Schedules the next replay step. Dropping the previous timeout is fine since it already fired.
    fn schedule_tick(&mut self, ctx: &Context<Self>, delay_ms: u32) {
        let link = ctx.link().clone();
        self._tick = Some(Timeout::new(delay_ms, move || link.send_message(Msg::Tick)));
    }

    fn start_replay(&mut self, ctx: &Context<Self>, result: maze::Result<maze::ReplayMode>) -> bool {
        match result {
            Ok(mode) => {
                log::debug!("{:?} replay started", mode);
                self.popup_open = false;
                if self.session.is_replaying() {
                    self.schedule_tick(ctx, 0);
                }
                true
            }
            Err(err) => {
                log::warn!("cannot start replay: {}", err);
                false
            }
        }
    }

    fn advance_replay(&mut self, ctx: &Context<Self>) -> bool {
        let Some(step) = self.session.step() else {
            self._tick = None;
            return false;
        };

        if step == maze::ReplayStep::Reached {
            log::debug!("goal reached");
            self.popup_open = true;
            play_sound(NOM_SOUND_ID);
        }

        if self.session.is_replaying() {
            self.schedule_tick(ctx, step.delay_ms());
        } else {
            self._tick = None;
        }
        true
    }

    fn status_text(&self) -> &'static str {
        use maze::ReplayMode::*;
        match (self.session.replay_mode(), self.session.last_outcome()) {
            (Some(Search), _) => "The mouse is searching…",
            (Some(UserPath), _) => "Walking your path…",
            (None, Some(true)) => "Cheese found!",
            (None, Some(false)) => "No cheese this time.",
            (None, None) if self.session.is_recording() => {
                "Click to toggle walls, right click to draw a path."
            }
            (None, None) => "Click to toggle walls.",
        }
    }
}

impl Component for MazeView {
    type Message = Msg;
    type Properties = MazeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = settings::Settings::local_or_default().resolve(&props.args);
        settings::Settings { config }.local_save();

        let forced_seed = props.args.seed.as_deref().map(seed_from_str);
        let seed = forced_seed.unwrap_or_else(js_random_seed);

        Self {
            config,
            forced_seed,
            seed,
            session: Self::new_session(config, seed),
            theme: props.theme,
            popup_open: false,
            _tick: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Primary(coords)) => {
                log::debug!("toggle wall: {:?}", coords);
                self.session.primary_activate(coords).has_update()
            }
            CellEvent(Secondary(coords)) => {
                log::debug!("toggle path cell: {:?}", coords);
                self.session.secondary_activate(coords).has_update()
            }
            NewMaze => {
                if self.session.is_replaying() {
                    log::warn!("new maze ignored while a replay is running");
                    return false;
                }
                self.seed = self.next_seed();
                self.session = Self::new_session(self.config, self.seed);
                self.popup_open = false;
                true
            }
            Solve => {
                let result = self.session.start_search();
                self.start_replay(ctx, result)
            }
            WalkPath => {
                let result = self.session.start_user_path();
                self.start_replay(ctx, result)
            }
            Tick => self.advance_replay(ctx),
            ClosePopup => std::mem::replace(&mut self.popup_open, false),
            CycleTheme => {
                self.theme = Theme::cycle(self.theme);
                Theme::apply(self.theme);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.session.size();
        let replaying = self.session.is_replaying();
        let can_walk = !replaying && self.session.is_recording();

        let cb_new_maze = ctx.link().callback(|_: MouseEvent| NewMaze);
        let cb_solve = ctx.link().callback(|_: MouseEvent| Solve);
        let cb_walk = ctx.link().callback(|_: MouseEvent| WalkPath);
        let cb_close = ctx.link().callback(|_: MouseEvent| ClosePopup);
        let cb_theme = ctx.link().callback(|_: MouseEvent| CycleTheme);

        html! {
            <div class="mazerun" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <button onclick={cb_new_maze} disabled={replaying}>{"New maze"}</button>
                    <button onclick={cb_solve} disabled={replaying}>{"Solve"}</button>
                    <button onclick={cb_walk} disabled={!can_walk}>{"Walk my path"}</button>
                    <small onclick={cb_theme}>{Theme::label(self.theme)}</small>
                </nav>
                <table class={classes!(replaying.then_some("replaying"))}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let coords = (row, col);
                                        let role = self.session.role_at(coords);
                                        let locked = replaying
                                            || self.session.grid().is_start(coords)
                                            || self.session.grid().is_goal(coords);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {row} {col} {role} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <p class="status">{self.status_text()}</p>
                if self.popup_open {
                    <Modal>
                        <dialog id="popup" open={true}>
                            <article>
                                <h2>{"🐭 🧀"}</h2>
                                <p>{"The mouse found the cheese!"}</p>
                                <footer>
                                    <button onclick={cb_close}>{"Close"}</button>
                                </footer>
                            </article>
                        </dialog>
                    </Modal>
                }
            </div>
        }
    }
}
