use crate::ui::mvi::UiState;

/// What a submitted prompt value is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    ImagePath,
    Title,
}

impl PromptPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            PromptPurpose::ImagePath => "Open a photograph",
            PromptPurpose::Title => "Give your poem a title",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PromptPurpose::ImagePath => "path/to/photo.jpg",
            PromptPurpose::Title => "Untitled",
        }
    }
}

/// Single-line text input. `cursor` counts characters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PromptState {
    #[default]
    Hidden,
    Active {
        purpose: PromptPurpose,
        input: String,
        cursor: usize,
    },
}

impl UiState for PromptState {}

impl PromptState {
    pub fn is_active(&self) -> bool {
        matches!(self, PromptState::Active { .. })
    }

    pub fn purpose(&self) -> Option<PromptPurpose> {
        match self {
            PromptState::Active { purpose, .. } => Some(*purpose),
            PromptState::Hidden => None,
        }
    }

    pub fn input(&self) -> Option<&str> {
        match self {
            PromptState::Active { input, .. } => Some(input),
            PromptState::Hidden => None,
        }
    }
}
