use egui::{Pos2, pos2};

use super::id::{ActionId, ConnectionId, ScreenId};
use super::model::{
    FlowData, NewAction, NewConnection, NewScreen, Screen, ScreenLayout, ScreenProperties,
    ScreenSize, ScreenStyle, ScreenType,
};

/// Where freshly added template screens land on the canvas.
pub const TEMPLATE_DROP_POSITION: Pos2 = pos2(200.0, 200.0);

/// A starting point offered by the screen palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTemplate {
    pub screen_type: ScreenType,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SCREEN_TEMPLATES: [ScreenTemplate; 5] = [
    ScreenTemplate {
        screen_type: ScreenType::Welcome,
        title: "Welcome Screen",
        description: "Greet users and set expectations",
    },
    ScreenTemplate {
        screen_type: ScreenType::Feature,
        title: "Feature Intro",
        description: "Highlight key features and benefits",
    },
    ScreenTemplate {
        screen_type: ScreenType::Form,
        title: "Form Screen",
        description: "Collect user information",
    },
    ScreenTemplate {
        screen_type: ScreenType::Tutorial,
        title: "Tutorial Step",
        description: "Guide users through actions",
    },
    ScreenTemplate {
        screen_type: ScreenType::Success,
        title: "Success Screen",
        description: "Celebrate completion",
    },
];

impl ScreenTemplate {
    pub fn for_type(screen_type: ScreenType) -> Self {
        SCREEN_TEMPLATES
            .iter()
            .copied()
            .find(|template| template.screen_type == screen_type)
            .unwrap_or(SCREEN_TEMPLATES[0])
    }

    pub fn new_screen(&self) -> NewScreen {
        self.new_screen_at(TEMPLATE_DROP_POSITION)
    }

    pub fn new_screen_at(&self, position: Pos2) -> NewScreen {
        NewScreen {
            screen_type: self.screen_type,
            position,
            properties: ScreenProperties {
                title: self.title.to_owned(),
                description: self.description.to_owned(),
                button_text: "Continue".to_owned(),
                secondary_button_text: None,
                style: ScreenStyle::default(),
                size: ScreenSize::Medium,
                layout: ScreenLayout::Modal,
            },
            actions: Vec::new(),
            is_start_screen: None,
        }
    }
}

/// A small pre-populated flow for first launch: welcome, feature, form, success.
pub fn demo_flow() -> FlowData {
    let mut flow = FlowData::new("Product Onboarding", "Demo flow showing a four step onboarding");

    let steps = [
        ("screen-welcome", ScreenType::Welcome, pos2(60.0, 80.0)),
        ("screen-feature", ScreenType::Feature, pos2(460.0, 80.0)),
        ("screen-form", ScreenType::Form, pos2(460.0, 360.0)),
        ("screen-success", ScreenType::Success, pos2(860.0, 360.0)),
    ];

    let ids: Vec<ScreenId> = steps.iter().map(|(id, ..)| ScreenId::from(*id)).collect();

    for (index, (_, screen_type, position)) in steps.iter().enumerate() {
        let mut new_screen = ScreenTemplate::for_type(*screen_type).new_screen_at(*position);
        if let Some(next) = ids.get(index + 1) {
            new_screen.actions.push(
                NewAction::click_to(next.clone())
                    .into_action(ActionId::from(format!("action-demo-{}", index + 1))),
            );
        }
        if index == 0 {
            new_screen.is_start_screen = Some(true);
            new_screen.properties.secondary_button_text = Some("Skip tour".to_owned());
        }
        flow.screens.push(new_screen.into_screen(ids[index].clone()));
    }

    let labels = ["Get started", "Sign up", "Done"];
    for (index, pair) in ids.windows(2).enumerate() {
        flow.connections.push(
            NewConnection::between(pair[0].clone(), pair[1].clone())
                .with_label(labels[index])
                .into_connection(ConnectionId::from(format!("connection-demo-{}", index + 1))),
        );
    }

    flow
}

/// Returns the template a screen was most likely created from.
pub fn template_of(screen: &Screen) -> ScreenTemplate {
    ScreenTemplate::for_type(screen.screen_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_template() {
        for screen_type in ScreenType::ALL {
            assert_eq!(ScreenTemplate::for_type(screen_type).screen_type, screen_type);
        }
    }

    #[test]
    fn template_screen_uses_default_style() {
        let screen = ScreenTemplate::for_type(ScreenType::Tutorial).new_screen();
        assert_eq!(screen.position, TEMPLATE_DROP_POSITION);
        assert_eq!(screen.properties.title, "Tutorial Step");
        assert_eq!(screen.properties.button_text, "Continue");
        assert_eq!(screen.properties.style.border_radius, 8.0);
        assert!(screen.actions.is_empty());
    }

    #[test]
    fn demo_flow_is_fully_linked() {
        let flow = demo_flow();
        assert_eq!(flow.screens.len(), 4);
        assert_eq!(flow.connections.len(), 3);
        assert_eq!(flow.start_screens().count(), 1);
        for conn in &flow.connections {
            assert!(flow.resolve_connection(conn).is_some());
        }
        for screen in &flow.screens {
            for action in &screen.actions {
                assert!(flow.resolve_action_target(action).is_some());
            }
        }
    }
}
