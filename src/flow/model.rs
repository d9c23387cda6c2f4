use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::id::{ActionId, ConnectionId, FlowId, ScreenId};
use crate::util::time;

/// Descriptive screen category. Drives icon and accent color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    Welcome,
    Feature,
    Form,
    Tutorial,
    Success,
}

impl ScreenType {
    pub const ALL: [ScreenType; 5] = [
        ScreenType::Welcome,
        ScreenType::Feature,
        ScreenType::Form,
        ScreenType::Tutorial,
        ScreenType::Success,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreenType::Welcome => "welcome",
            ScreenType::Feature => "feature",
            ScreenType::Form => "form",
            ScreenType::Tutorial => "tutorial",
            ScreenType::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    Fade,
    Slide,
    Bounce,
    Scale,
}

impl Animation {
    pub const ALL: [Animation; 4] = [
        Animation::Fade,
        Animation::Slide,
        Animation::Bounce,
        Animation::Scale,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Animation::Fade => "fade",
            Animation::Slide => "slide",
            Animation::Bounce => "bounce",
            Animation::Scale => "scale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ScreenSize {
    pub const ALL: [ScreenSize; 3] = [ScreenSize::Small, ScreenSize::Medium, ScreenSize::Large];

    pub fn label(self) -> &'static str {
        match self {
            ScreenSize::Small => "small",
            ScreenSize::Medium => "medium",
            ScreenSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenLayout {
    #[default]
    Modal,
    Fullscreen,
    Tooltip,
    Banner,
}

impl ScreenLayout {
    pub const ALL: [ScreenLayout; 4] = [
        ScreenLayout::Modal,
        ScreenLayout::Fullscreen,
        ScreenLayout::Tooltip,
        ScreenLayout::Banner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreenLayout::Modal => "modal",
            ScreenLayout::Fullscreen => "fullscreen",
            ScreenLayout::Tooltip => "tooltip",
            ScreenLayout::Banner => "banner",
        }
    }
}

/// Visual style of a screen. Colors are free-form CSS-like strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenStyle {
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub animation: Animation,
    pub border_radius: f32,
}

impl Default for ScreenStyle {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_owned(),
            text_color: "#1e293b".to_owned(),
            button_color: "#3b82f6".to_owned(),
            animation: Animation::Fade,
            border_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenProperties {
    pub title: String,
    pub description: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button_text: Option<String>,
    pub style: ScreenStyle,
    pub size: ScreenSize,
    pub layout: ScreenLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Click,
    Timer,
    Condition,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [Trigger::Click, Trigger::Timer, Trigger::Condition];

    pub fn label(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Timer => "timer",
            Trigger::Condition => "condition",
        }
    }
}

/// An event binding owned by a screen.
///
/// `target_screen_id` is a weak reference: it is never validated and may name
/// a screen that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub trigger: Trigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_screen_id: Option<ScreenId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

/// Everything an [`Action`] carries except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub trigger: Trigger,
    pub target_screen_id: Option<ScreenId>,
    pub event_name: Option<String>,
    pub condition: Option<String>,
    pub delay: Option<f64>,
}

impl NewAction {
    pub fn click_to(target: ScreenId) -> Self {
        Self {
            trigger: Trigger::Click,
            target_screen_id: Some(target),
            event_name: None,
            condition: None,
            delay: None,
        }
    }

    pub fn into_action(self, id: ActionId) -> Action {
        Action {
            id,
            trigger: self.trigger,
            target_screen_id: self.target_screen_id,
            event_name: self.event_name,
            condition: self.condition,
            delay: self.delay,
        }
    }
}

/// A node in the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: ScreenId,
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
    pub position: Pos2,
    pub properties: ScreenProperties,
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_start_screen: Option<bool>,
}

impl Screen {
    pub fn is_start(&self) -> bool {
        self.is_start_screen.unwrap_or(false)
    }

    pub fn action(&self, action_id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|action| &action.id == action_id)
    }
}

/// Everything a [`Screen`] carries except its id; the store allocates that.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScreen {
    pub screen_type: ScreenType,
    pub position: Pos2,
    pub properties: ScreenProperties,
    pub actions: Vec<Action>,
    pub is_start_screen: Option<bool>,
}

impl NewScreen {
    pub fn into_screen(self, id: ScreenId) -> Screen {
        Screen {
            id,
            screen_type: self.screen_type,
            position: self.position,
            properties: self.properties,
            actions: self.actions,
            is_start_screen: self.is_start_screen,
        }
    }
}

/// Shallow, top-level update of a screen. `None` fields are left untouched.
///
/// Nested values are replaced wholesale: to change one style color the caller
/// builds the complete new [`ScreenProperties`] (see [`super::PropertyEdit`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenUpdate {
    pub screen_type: Option<ScreenType>,
    pub position: Option<Pos2>,
    pub properties: Option<ScreenProperties>,
    pub actions: Option<Vec<Action>>,
    pub is_start_screen: Option<bool>,
}

impl ScreenUpdate {
    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn properties(properties: ScreenProperties) -> Self {
        Self {
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn actions(actions: Vec<Action>) -> Self {
        Self {
            actions: Some(actions),
            ..Default::default()
        }
    }

    pub fn apply_to(self, screen: &mut Screen) {
        if let Some(screen_type) = self.screen_type {
            screen.screen_type = screen_type;
        }
        if let Some(position) = self.position {
            screen.position = position;
        }
        if let Some(properties) = self.properties {
            screen.properties = properties;
        }
        if let Some(actions) = self.actions {
            screen.actions = actions;
        }
        if let Some(is_start) = self.is_start_screen {
            screen.is_start_screen = Some(is_start);
        }
    }
}

/// A directed edge between two screens. Both endpoints are weak references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub from_screen_id: ScreenId,
    pub to_screen_id: ScreenId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn touches(&self, screen_id: &ScreenId) -> bool {
        &self.from_screen_id == screen_id || &self.to_screen_id == screen_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewConnection {
    pub from_screen_id: ScreenId,
    pub to_screen_id: ScreenId,
    pub condition: Option<String>,
    pub label: Option<String>,
}

impl NewConnection {
    pub fn between(from: ScreenId, to: ScreenId) -> Self {
        Self {
            from_screen_id: from,
            to_screen_id: to,
            condition: None,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn into_connection(self, id: ConnectionId) -> Connection {
        Connection {
            id,
            from_screen_id: self.from_screen_id,
            to_screen_id: self.to_screen_id,
            condition: self.condition,
            label: self.label,
        }
    }
}

/// The aggregate root: one onboarding flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowData {
    pub id: FlowId,
    pub name: String,
    pub description: String,
    /// Insertion order is display order.
    pub screens: Vec<Screen>,
    pub connections: Vec<Connection>,
    /// Milliseconds since the UNIX epoch.
    pub created_at: u64,
    pub updated_at: u64,
    /// Inert metadata; no operation increments it.
    pub version: u32,
}

impl Default for FlowData {
    fn default() -> Self {
        Self::new("Untitled Flow", "A new onboarding flow")
    }
}

impl FlowData {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = time::timestamp_millis();
        Self {
            id: FlowId::generate(),
            name: name.into(),
            description: description.into(),
            screens: Vec::new(),
            connections: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    pub fn screen(&self, id: &ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|screen| &screen.id == id)
    }

    pub(crate) fn screen_mut(&mut self, id: &ScreenId) -> Option<&mut Screen> {
        self.screens.iter_mut().find(|screen| &screen.id == id)
    }

    pub fn contains_screen(&self, id: &ScreenId) -> bool {
        self.screen(id).is_some()
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|conn| &conn.id == id)
    }

    /// Looks up both endpoints; `None` if either no longer exists.
    pub fn resolve_connection(&self, connection: &Connection) -> Option<(&Screen, &Screen)> {
        let from = self.screen(&connection.from_screen_id)?;
        let to = self.screen(&connection.to_screen_id)?;
        Some((from, to))
    }

    pub fn resolve_action_target(&self, action: &Action) -> Option<&Screen> {
        action
            .target_screen_id
            .as_ref()
            .and_then(|target| self.screen(target))
    }

    pub fn outgoing<'a>(&'a self, id: &'a ScreenId) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections
            .iter()
            .filter(move |conn| &conn.from_screen_id == id)
    }

    pub fn start_screens(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter().filter(|screen| screen.is_start())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = time::timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::template::ScreenTemplate;

    #[test]
    fn default_flow_matches_placeholder_metadata() {
        let flow = FlowData::default();
        assert_eq!(flow.name, "Untitled Flow");
        assert_eq!(flow.description, "A new onboarding flow");
        assert_eq!(flow.version, 1);
        assert!(flow.screens.is_empty());
        assert!(flow.connections.is_empty());
        assert_eq!(flow.created_at, flow.updated_at);
    }

    #[test]
    fn screen_update_is_shallow() {
        let mut screen = ScreenTemplate::for_type(ScreenType::Form)
            .new_screen()
            .into_screen(ScreenId::from("s1"));
        let original_properties = screen.properties.clone();

        ScreenUpdate::position(Pos2::new(40.0, 60.0)).apply_to(&mut screen);

        assert_eq!(screen.position, Pos2::new(40.0, 60.0));
        assert_eq!(screen.properties, original_properties);
        assert_eq!(screen.id, "s1");
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let mut flow = FlowData::default();
        flow.screens.push(
            ScreenTemplate::for_type(ScreenType::Welcome)
                .new_screen()
                .into_screen(ScreenId::from("a")),
        );
        flow.connections.push(
            NewConnection::between("a".into(), "b".into()).into_connection("c".into()),
        );

        let json: serde_json::Value = serde_json::to_value(&flow).unwrap();
        assert_eq!(json["screens"][0]["type"], "welcome");
        assert_eq!(json["screens"][0]["position"]["x"], 200.0);
        assert_eq!(json["screens"][0]["properties"]["buttonText"], "Continue");
        assert_eq!(json["screens"][0]["properties"]["style"]["backgroundColor"], "#ffffff");
        assert_eq!(json["connections"][0]["fromScreenId"], "a");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn unresolved_connection_yields_none() {
        let flow = FlowData::default();
        let conn = NewConnection::between("ghost".into(), "other".into()).into_connection("c".into());
        assert!(flow.resolve_connection(&conn).is_none());
    }
}
