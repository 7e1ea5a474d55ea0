use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub league: String,
    pub class: String,
    pub level: u32,
}

impl Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (level {} {}, {})",
            self.name, self.level, self.class, self.league
        )
    }
}
