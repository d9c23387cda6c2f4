use super::model::{Animation, ScreenLayout, ScreenProperties, ScreenSize};

/// One typed change to a screen's nested properties.
///
/// Applying an edit rebuilds the complete [`ScreenProperties`] value, which the
/// store then swaps in wholesale through a shallow screen update.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Title(String),
    Description(String),
    ButtonText(String),
    /// `None` or an empty string removes the secondary button.
    SecondaryButtonText(Option<String>),
    Layout(ScreenLayout),
    Size(ScreenSize),
    Animation(Animation),
    BackgroundColor(String),
    TextColor(String),
    ButtonColor(String),
    BorderRadius(f32),
}

impl PropertyEdit {
    pub fn apply(self, properties: &ScreenProperties) -> ScreenProperties {
        let mut next = properties.clone();
        match self {
            PropertyEdit::Title(title) => next.title = title,
            PropertyEdit::Description(description) => next.description = description,
            PropertyEdit::ButtonText(text) => next.button_text = text,
            PropertyEdit::SecondaryButtonText(text) => {
                next.secondary_button_text = text.filter(|text| !text.is_empty());
            }
            PropertyEdit::Layout(layout) => next.layout = layout,
            PropertyEdit::Size(size) => next.size = size,
            PropertyEdit::Animation(animation) => next.style.animation = animation,
            PropertyEdit::BackgroundColor(color) => next.style.background_color = color,
            PropertyEdit::TextColor(color) => next.style.text_color = color,
            PropertyEdit::ButtonColor(color) => next.style.button_color = color,
            PropertyEdit::BorderRadius(radius) => next.style.border_radius = radius.max(0.0),
        }
        next
    }
}
