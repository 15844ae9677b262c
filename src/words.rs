use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word
{
    pub english: String,
    pub chinese: String,
}

impl Word
{
    pub fn new(english: &str, chinese: &str) -> Self
    {
        Self {
            english: english.to_string(),
            chinese: chinese.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grade
{
    Lower,
    Middle,
    Upper,
}

const LOWER_WORDS: &[(&str, &str)] = &[
    ("balloon", "氣球"),
    ("swing", "鞦韆"),
    ("flower", "花"),
    ("tree", "樹"),
    ("bird", "鳥"),
];

const MIDDLE_WORDS: &[(&str, &str)] = &[
    ("celebration", "慶祝"),
    ("tradition", "傳統"),
    ("festival", "節日"),
    ("memory", "記憶"),
    ("culture", "文化"),
];

const UPPER_WORDS: &[(&str, &str)] = &[
    ("inheritance", "傳承"),
    ("ceremony", "儀式"),
    ("custom", "習俗"),
    ("heritage", "遺產"),
    ("wisdom", "智慧"),
];

impl Grade
{
    pub const ALL: [Grade; 3] = [Grade::Lower, Grade::Middle, Grade::Upper];

    pub fn label(self) -> &'static str
    {
        match self {
            Grade::Lower => "1-2",
            Grade::Middle => "3-4",
            Grade::Upper => "5-6",
        }
    }

    pub fn words(self) -> Vec<Word>
    {
        let table = match self {
            Grade::Lower => LOWER_WORDS,
            Grade::Middle => MIDDLE_WORDS,
            Grade::Upper => UPPER_WORDS,
        };
        table
            .iter()
            .map(|(english, chinese)| Word::new(english, chinese))
            .collect()
    }
}

impl fmt::Display for Grade
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "grade {}", self.label())
    }
}

impl FromStr for Grade
{
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err>
    {
        match value.trim() {
            "1-2" | "1" | "2" | "lower" => Ok(Grade::Lower),
            "3-4" | "3" | "4" | "middle" => Ok(Grade::Middle),
            "5-6" | "5" | "6" | "upper" => Ok(Grade::Upper),
            other => Err(format!("Unknown grade '{other}' (expected 1-2, 3-4 or 5-6)")),
        }
    }
}
