//! A ready-made demo board for trying the game without typing 25 clues.

use jeopardy_types::{CATEGORY_COUNT, Category, QuestionEntry, VALUE_COUNT};

type Column = (&'static str, [(&'static str, &'static str); VALUE_COUNT]);

const SAMPLE: [Column; CATEGORY_COUNT] = [
    (
        "SCIENCE",
        [
            ("This planet is closest to the Sun", "What is Mercury?"),
            ("H2O is the chemical formula for this", "What is water?"),
            ("This scientist developed the theory of relativity", "Who is Einstein?"),
            ("The smallest unit of matter", "What is an atom?"),
            ("This gas makes up about 78% of Earth's atmosphere", "What is nitrogen?"),
        ],
    ),
    (
        "HISTORY",
        [
            ("This war ended in 1945", "What is World War II?"),
            ("The first man on the moon", "Who is Neil Armstrong?"),
            ("This wall fell in 1989", "What is the Berlin Wall?"),
            ("The year America declared independence", "What is 1776?"),
            ("This ancient wonder was located in Alexandria", "What is the Lighthouse?"),
        ],
    ),
    (
        "SPORTS",
        [
            ("Number of players on a basketball team on court", "What is 5?"),
            ("This sport uses a puck", "What is hockey?"),
            ("The Olympics are held every this many years", "What is 4?"),
            ("This tennis tournament is played on grass", "What is Wimbledon?"),
            ("The maximum score in bowling", "What is 300?"),
        ],
    ),
    (
        "MOVIES",
        [
            ("This movie features a shark", "What is Jaws?"),
            ("The boy wizard with a lightning scar", "Who is Harry Potter?"),
            ("This movie won Best Picture in 1994", "What is Forrest Gump?"),
            ("This director made Jaws and E.T.", "Who is Steven Spielberg?"),
            ("The highest-grossing movie of all time", "What is Avatar?"),
        ],
    ),
    (
        "GEOGRAPHY",
        [
            ("The largest continent", "What is Asia?"),
            ("This river is the longest in the world", "What is the Nile?"),
            ("The capital of Australia", "What is Canberra?"),
            ("This mountain range contains Everest", "What is the Himalayas?"),
            ("The smallest country in the world", "What is Vatican City?"),
        ],
    ),
];

/// Five fully filled demo categories, left to right.
pub fn sample_categories() -> [Category; CATEGORY_COUNT] {
    SAMPLE.map(|(name, clues)| Category {
        name: name.to_owned(),
        questions: clues.map(|(question, answer)| QuestionEntry::new(question, answer)),
    })
}
