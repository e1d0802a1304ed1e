/// Progress of a request as shown in a status line.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    Working,
    /// Completed; carries the clock stamp of completion.
    Done(String),
    Error(String),
}

impl Status {
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Idle => "status",
            Self::Working => "status status--working",
            Self::Done(_) => "status status--success",
            Self::Error(_) => "status status--error",
        }
    }
}
