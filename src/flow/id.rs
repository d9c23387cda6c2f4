use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string-backed identifier newtype.
///
/// Generated ids take the form `<prefix>-<uuid v4>`, so two calls in the same
/// clock tick never collide.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Allocates a fresh, never reused identifier.
            pub fn generate() -> Self {
                Self(format!("{}-{}", Self::PREFIX, uuid::Uuid::new_v4()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifies the flow aggregate itself.
    FlowId,
    "flow"
);
string_id!(
    /// Identifies a screen node. Unique across the screen collection.
    ScreenId,
    "screen"
);
string_id!(
    /// Identifies an action within its owning screen.
    ActionId,
    "action"
);
string_id!(
    /// Identifies a directed connection between two screens.
    ConnectionId,
    "connection"
);
