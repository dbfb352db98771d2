//! Style records exchanged with the caller.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::ids::Axis;

/// A length or keyword written to a style property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Unitless pixels.
    Px(f64),
    /// CSS text used verbatim.
    Text(String),
}

impl StyleValue {
    pub fn to_css(&self) -> String {
        match self {
            StyleValue::Px(px) => format!("{px}px"),
            StyleValue::Text(text) => text.clone(),
        }
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(px: f64) -> Self {
        StyleValue::Px(px)
    }
}

/// Properties the animator may write.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    #[serde(rename = "width")]
    Width,
    #[serde(rename = "height")]
    Height,
    #[serde(rename = "transition")]
    Transition,
    #[serde(rename = "willChange")]
    WillChange,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 4] = [
        StyleProperty::Width,
        StyleProperty::Height,
        StyleProperty::Transition,
        StyleProperty::WillChange,
    ];

    /// Name accepted by `CSSStyleDeclaration.setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Transition => "transition",
            StyleProperty::WillChange => "will-change",
        }
    }
}

impl From<Axis> for StyleProperty {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Width => StyleProperty::Width,
            Axis::Height => StyleProperty::Height,
        }
    }
}

impl FromStr for StyleProperty {
    type Err = StyleError;

    /// Accepts both the CSS name and the camelCase style-object key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(StyleProperty::Width),
            "height" => Ok(StyleProperty::Height),
            "transition" => Ok(StyleProperty::Transition),
            "will-change" | "willChange" => Ok(StyleProperty::WillChange),
            other => Err(StyleError::UnknownProperty(other.to_string())),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Style produced by one update pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<StyleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<StyleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<StyleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub will_change: Option<StyleValue>,
}

impl OutputStyle {
    pub fn get(&self, prop: StyleProperty) -> Option<&StyleValue> {
        match prop {
            StyleProperty::Width => self.width.as_ref(),
            StyleProperty::Height => self.height.as_ref(),
            StyleProperty::Transition => self.transition.as_ref(),
            StyleProperty::WillChange => self.will_change.as_ref(),
        }
    }

    pub fn set(&mut self, prop: StyleProperty, value: Option<StyleValue>) {
        match prop {
            StyleProperty::Width => self.width = value,
            StyleProperty::Height => self.height = value,
            StyleProperty::Transition => self.transition = value,
            StyleProperty::WillChange => self.will_change = value,
        }
    }
}

/// Caller-declared style. A property that is present, even with no value,
/// belongs to the caller and is never computed or written by the animator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOverrides {
    entries: HashMap<StyleProperty, Option<StyleValue>>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, prop: StyleProperty, value: Option<StyleValue>) -> Self {
        self.insert(prop, value);
        self
    }

    pub fn insert(&mut self, prop: StyleProperty, value: Option<StyleValue>) {
        self.entries.insert(prop, value);
    }

    #[inline]
    pub fn contains(&self, prop: StyleProperty) -> bool {
        self.entries.contains_key(&prop)
    }

    /// The caller's value, flattened: absent and present-but-empty both yield `None`.
    pub fn get(&self, prop: StyleProperty) -> Option<&StyleValue> {
        self.entries.get(&prop).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
