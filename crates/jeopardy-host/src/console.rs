//! Line-oriented command console.
//!
//! Each input line is one command. Rounds and categories are numbered from
//! 1 on the console and converted to the store's zero-based indices here.
//! Setup commands act on the round open in the editor (`setup N`); play
//! commands act on the round on the play screen (`round N`).

use jeopardy_core::{ErrorKind, GameError, GameStore, KeyValueStore, RevealedCell};
use jeopardy_types::{CATEGORY_COUNT, ParseError, PlayerId, PointValue, Round};

/// Column width used by the board renderer.
const COLUMN_WIDTH: usize = 14;

/// How many missing clues `check` and `start` list before summarizing.
const MISSING_LIMIT: usize = 5;

const HELP: &str = "\
Setup:
  rounds N                     set the number of rounds
  setup N                      edit round N
  category C [NAME]            rename category C (blank restores the default)
  question C VALUE Q | A       write a clue
  clear C VALUE                blank a clue
  sample                       fill the edited round with the demo board
  check                        list missing clues
  start                        begin play
Play:
  round N                      show round N
  reveal C VALUE               open a clue
  answer                       show the open clue's response
  right P / wrong P            award or deduct the open clue's value
  score P DELTA                adjust a score by hand
  name P [NAME]                rename a player
Other:
  board                        draw the current board
  sfx / music                  toggle audio
  reset                        start over
  help / quit";

/// Errors from a single console command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The command word is not recognised.
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    /// Arguments are missing or malformed.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A round or category number was not a positive integer.
    #[error("expected a number from 1, got {0:?}")]
    Position(String),

    /// A score delta was not an integer.
    #[error("expected a whole number of points, got {0:?}")]
    Delta(String),

    /// `answer`, `right`, or `wrong` with no clue open.
    #[error("no clue is open")]
    NoOpenClue,

    /// A player or point value failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The store refused the operation.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading.
    Text(String),
    /// Stop the session.
    Quit,
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `help`
    Help,
    /// `board`
    Board,
    /// `rounds N`
    Rounds(usize),
    /// `setup N`
    Setup(usize),
    /// `category C [NAME]`
    Category {
        /// Zero-based category index.
        index: usize,
        /// New name, possibly empty.
        name: String,
    },
    /// `question C VALUE Q | A`
    Question {
        /// Zero-based category index.
        index: usize,
        /// Slot.
        value: PointValue,
        /// Clue text.
        question: String,
        /// Response text.
        answer: String,
    },
    /// `clear C VALUE`
    Clear {
        /// Zero-based category index.
        index: usize,
        /// Slot.
        value: PointValue,
    },
    /// `sample`
    Sample,
    /// `check`
    Check,
    /// `start`
    Start,
    /// `round N`
    Round(usize),
    /// `reveal C VALUE`
    Reveal {
        /// Zero-based category index.
        index: usize,
        /// Slot.
        value: PointValue,
    },
    /// `answer`
    Answer,
    /// `right P`
    Right(PlayerId),
    /// `wrong P`
    Wrong(PlayerId),
    /// `score P DELTA`
    Score {
        /// Whose score.
        player: PlayerId,
        /// Points to add, possibly negative.
        delta: i64,
    },
    /// `name P [NAME]`
    Name {
        /// Which player.
        player: PlayerId,
        /// New display name, possibly empty.
        name: String,
    },
    /// `sfx`
    Sfx,
    /// `music`
    Music,
    /// `reset`
    Reset,
    /// `quit`
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "help" | "?" => Self::Help,
            "board" | "status" => Self::Board,
            "rounds" => Self::Rounds(count(args.next(), "rounds N")?),
            "setup" => Self::Setup(position(args.next(), "setup N")?),
            "category" => {
                let (index, name) =
                    rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Self::Category {
                    index: position(Some(index), "category C [NAME]")?,
                    name: name.trim().to_owned(),
                }
            }
            "question" => {
                const USAGE: &str = "question C VALUE QUESTION | ANSWER";
                let index = position(args.next(), USAGE)?;
                let value = point_value(args.next(), USAGE)?;
                let text = args.collect::<Vec<_>>().join(" ");
                let (question, answer) =
                    text.split_once('|').ok_or(CommandError::Usage(USAGE))?;
                Self::Question {
                    index,
                    value,
                    question: question.to_owned(),
                    answer: answer.to_owned(),
                }
            }
            "clear" => Self::Clear {
                index: position(args.next(), "clear C VALUE")?,
                value: point_value(args.next(), "clear C VALUE")?,
            },
            "sample" => Self::Sample,
            "check" => Self::Check,
            "start" => Self::Start,
            "round" => Self::Round(position(args.next(), "round N")?),
            "reveal" => Self::Reveal {
                index: position(args.next(), "reveal C VALUE")?,
                value: point_value(args.next(), "reveal C VALUE")?,
            },
            "answer" => Self::Answer,
            "right" => Self::Right(player(args.next(), "right P")?),
            "wrong" => Self::Wrong(player(args.next(), "wrong P")?),
            "score" => {
                const USAGE: &str = "score P DELTA";
                let player = player(args.next(), USAGE)?;
                let raw = args.next().ok_or(CommandError::Usage(USAGE))?;
                let delta = raw
                    .parse()
                    .ok()
                    .ok_or_else(|| CommandError::Delta(raw.to_owned()))?;
                Self::Score { player, delta }
            }
            "name" => {
                let (who, name) =
                    rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Self::Name {
                    player: player(Some(who), "name P [NAME]")?,
                    name: name.trim().to_owned(),
                }
            }
            "sfx" => Self::Sfx,
            "music" => Self::Music,
            "reset" => Self::Reset,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn count(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    let raw = arg.ok_or(CommandError::Usage(usage))?;
    raw.parse()
        .ok()
        .ok_or_else(|| CommandError::Position(raw.to_owned()))
}

/// A 1-based console number as a zero-based index.
fn position(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    let raw = arg.filter(|a| !a.is_empty()).ok_or(CommandError::Usage(usage))?;
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::Position(raw.to_owned()))
}

fn point_value(arg: Option<&str>, usage: &'static str) -> Result<PointValue, CommandError> {
    Ok(arg.ok_or(CommandError::Usage(usage))?.parse()?)
}

fn player(arg: Option<&str>, usage: &'static str) -> Result<PlayerId, CommandError> {
    let raw = arg.filter(|a| !a.is_empty()).ok_or(CommandError::Usage(usage))?;
    Ok(raw.parse()?)
}

/// A game store driven by text commands.
pub struct Console<S: KeyValueStore> {
    store: GameStore<S>,
    open: Option<RevealedCell>,
}

impl<S: KeyValueStore> Console<S> {
    /// Wrap a store.
    pub const fn new(store: GameStore<S>) -> Self {
        Self { store, open: None }
    }

    /// The wrapped store.
    pub const fn store(&self) -> &GameStore<S> {
        &self.store
    }

    /// Parse and run one line.
    pub fn handle(&mut self, line: &str) -> Result<Reply, CommandError> {
        match Command::parse(line)? {
            None => Ok(Reply::Text(String::new())),
            Some(Command::Quit) => Ok(Reply::Quit),
            Some(command) => self.execute(command).map(Reply::Text),
        }
    }

    /// Run one parsed command and describe the outcome.
    #[allow(clippy::too_many_lines)]
    pub fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        let setup = self.store.setup_round_index();
        let active = self.store.active_round_index();

        let text = match command {
            Command::Help => HELP.to_owned(),
            Command::Board => self.render(),
            Command::Rounds(n) => {
                self.store.set_round_count(n)?;
                self.open = None;
                format!("{n} round(s)")
            }
            Command::Setup(index) => {
                self.store.set_setup_round(index)?;
                self.setup_heading()
            }
            Command::Category { index, name } => {
                self.store.rename_category(setup, index, &name)?;
                let shown = self
                    .store
                    .setup_round()
                    .and_then(|r| r.category(index))
                    .map_or_else(String::new, |c| c.name.clone());
                format!("Category {} is now {shown}", display(index))
            }
            Command::Question {
                index,
                value,
                question,
                answer,
            } => {
                self.store
                    .set_question(setup, index, value, &question, &answer)?;
                format!("Saved {value} in category {}", display(index))
            }
            Command::Clear { index, value } => {
                self.store.clear_question(setup, index, value)?;
                format!("Cleared {value} in category {}", display(index))
            }
            Command::Sample => {
                self.store.load_sample_board(setup)?;
                self.setup_heading()
            }
            Command::Check => {
                let readiness = self.store.all_questions_filled();
                if readiness.ready {
                    "All questions filled".to_owned()
                } else {
                    format!("Missing:\n{}", readiness.summary(MISSING_LIMIT))
                }
            }
            Command::Start => match self.store.start_play() {
                Ok(()) => {
                    self.open = None;
                    self.render()
                }
                Err(GameError::NotReady(readiness)) => format!(
                    "Please fill in all questions before starting!\n{}",
                    readiness.summary(MISSING_LIMIT)
                ),
                Err(e) => return Err(e.into()),
            },
            Command::Round(index) => {
                self.store.set_active_round(index)?;
                self.open = None;
                self.render()
            }
            Command::Reveal { index, value } => {
                let shown = self.store.reveal_cell(active, index, value)?;
                let text = format!(
                    "{}{} for {}:\n  {}",
                    if shown.first_time { "" } else { "(again) " },
                    self.category_name(active, index),
                    shown.value,
                    shown.entry.question
                );
                self.open = Some(shown);
                text
            }
            Command::Answer => {
                let open = self.open.as_ref().ok_or(CommandError::NoOpenClue)?;
                let text = format!("  {}", open.entry.answer);
                self.store.reveal_answer();
                text
            }
            Command::Right(player) => self.award(player, true)?,
            Command::Wrong(player) => self.award(player, false)?,
            Command::Score { player, delta } => {
                let total = self.store.adjust_score(player, delta);
                format!("{}: {total}", self.store.player_name(player))
            }
            Command::Name { player, name } => {
                self.store.set_player_name(player, &name);
                format!("{player} is {}", self.store.player_name(player))
            }
            Command::Sfx => on_off("Sound effects", self.store.toggle_sfx()),
            Command::Music => on_off("Music", self.store.toggle_music()),
            Command::Reset => {
                self.store.reset();
                self.open = None;
                "Game reset".to_owned()
            }
            Command::Quit => String::new(),
        };
        Ok(text)
    }

    fn award(&mut self, player: PlayerId, correct: bool) -> Result<String, CommandError> {
        let amount = self
            .open
            .as_ref()
            .ok_or(CommandError::NoOpenClue)?
            .value
            .as_delta();
        let delta = if correct { amount } else { amount.saturating_neg() };
        let total = self.store.adjust_score(player, delta);
        Ok(format!("{}: {total}", self.store.player_name(player)))
    }

    fn category_name(&self, round: usize, index: usize) -> String {
        self.store
            .game()
            .round(round)
            .and_then(|r| r.category(index))
            .map_or_else(|| format!("Category {}", display(index)), |c| c.name.clone())
    }

    fn setup_heading(&self) -> String {
        let Some(round) = self.store.setup_round() else {
            return String::new();
        };
        let names: Vec<String> = round
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| format!("  {}. {}", display(i), c.name))
            .collect();
        format!("Editing {}\n{}", round.name, names.join("\n"))
    }

    /// Draw the active round with scores underneath.
    pub fn render(&self) -> String {
        let Some(round) = self.store.active_round() else {
            return String::new();
        };
        let index = self.store.active_round_index();
        let remaining = self.store.game().cells_remaining(index);
        let mut lines = vec![format!("{} ({remaining} left)", round.name), header(round)];
        for value in PointValue::ALL {
            let row: String = (0..CATEGORY_COUNT)
                .map(|category| {
                    let label = if self.store.is_cell_used(index, category, value) {
                        String::new()
                    } else {
                        value.to_string()
                    };
                    format!("{label:^COLUMN_WIDTH$}")
                })
                .collect();
            lines.push(row.trim_end().to_owned());
        }
        let scores = self.store.scores();
        lines.push(String::new());
        for player in PlayerId::ALL {
            lines.push(format!(
                "{}: {}",
                self.store.player_name(player),
                scores.get(player)
            ));
        }
        if let Some(leader) = scores.leader() {
            lines.push(format!("{} leads", self.store.player_name(leader)));
        }
        lines.join("\n")
    }
}

fn header(round: &Round) -> String {
    round
        .category_names()
        .map(|name| {
            let clipped: String = name.chars().take(COLUMN_WIDTH.saturating_sub(2)).collect();
            format!("{clipped:^COLUMN_WIDTH$}")
        })
        .collect::<String>()
        .trim_end()
        .to_owned()
}

const fn display(index: usize) -> usize {
    index.saturating_add(1)
}

fn on_off(label: &str, enabled: bool) -> String {
    format!("{label} {}", if enabled { "on" } else { "off" })
}

/// A one-line message for a failed command.
pub fn describe_error(err: &CommandError) -> String {
    match err {
        CommandError::Game(e) => match e.kind() {
            ErrorKind::Validation => format!("Rejected: {e}"),
            ErrorKind::NotFound => format!("Not found: {e}"),
            ErrorKind::OutOfRange => format!("Out of range: {e}"),
        },
        other => other.to_string(),
    }
}
