//! Parameter and color editor state.
//!
//! The editor owns every editable value: one string per declared parameter,
//! the list of user-added colors, and the staging text for the next color
//! name. All operations are synchronous and never fail; invalid input
//! degrades to a no-op.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Value type of a parameter. Only free text is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
}

/// Descriptor of an editable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ParamType,
}

impl Param {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ParamType::String,
        }
    }
}

/// Current value bound to a parameter id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamValue {
    pub param_id: u32,
    pub value: String,
}

impl ParamValue {
    pub fn new(param_id: u32, value: impl Into<String>) -> Self {
        Self {
            param_id,
            value: value.into(),
        }
    }
}

/// A user-created color tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: u64,
    pub name: String,
}

/// Snapshot of parameter values and colors.
///
/// Used both as the initial seed of an [`Editor`] and as the result of
/// [`Editor::snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default)]
    pub param_values: Vec<ParamValue>,
    #[serde(default)]
    pub colors: Vec<Color>,
}

/// Monotonic source of color ids.
///
/// Once `u64::MAX` has been handed out (or is already taken by a seeded
/// color) the generator is exhausted and yields nothing.
#[derive(Debug, Clone)]
pub struct ColorIdGenerator {
    next: Option<u64>,
}

impl ColorIdGenerator {
    /// Start one past the largest id already in use.
    pub fn after(colors: &[Color]) -> Self {
        let next = match colors.iter().map(|c| c.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { next }
    }

    pub fn next_id(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

impl Default for ColorIdGenerator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

/// Editor state for a fixed set of parameters and a list of colors.
#[derive(Debug, Clone)]
pub struct Editor {
    params: Vec<Param>,
    // Declared params first in declaration order, unknown ids after.
    values: Vec<ParamValue>,
    colors: Vec<Color>,
    new_color_name: String,
    ids: ColorIdGenerator,
}

impl Editor {
    /// Build editor state from parameter definitions and an initial model.
    ///
    /// Every param gets exactly one value entry: the matching value from
    /// `model` if present, otherwise an empty string. Values in `model` for
    /// ids that are not declared are dropped, and so are seeded colors whose
    /// id repeats an earlier one.
    pub fn new(params: Vec<Param>, model: Model) -> Self {
        let values = params
            .iter()
            .map(|param| {
                let value = model
                    .param_values
                    .iter()
                    .find(|pv| pv.param_id == param.id)
                    .map(|pv| pv.value.clone())
                    .unwrap_or_default();
                ParamValue::new(param.id, value)
            })
            .collect();

        let mut seen = HashSet::new();
        let colors: Vec<Color> = model
            .colors
            .into_iter()
            .filter(|color| {
                let fresh = seen.insert(color.id);
                if !fresh {
                    tracing::warn!(id = color.id, name = %color.name, "dropping duplicate color id");
                }
                fresh
            })
            .collect();
        let ids = ColorIdGenerator::after(&colors);

        tracing::debug!(
            params = params.len(),
            colors = colors.len(),
            "editor constructed"
        );

        Self {
            params,
            values,
            colors,
            new_color_name: String::new(),
            ids,
        }
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn new_color_name(&self) -> &str {
        &self.new_color_name
    }

    /// Current value for a parameter id, if one has been stored.
    pub fn param_value(&self, param_id: u32) -> Option<&str> {
        self.values
            .iter()
            .find(|pv| pv.param_id == param_id)
            .map(|pv| pv.value.as_str())
    }

    /// Replace the value for `param_id`.
    ///
    /// Unknown ids are stored as a new entry after the declared params.
    pub fn update_param_value(&mut self, param_id: u32, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|pv| pv.param_id == param_id) {
            Some(entry) => entry.value = value,
            None => {
                tracing::debug!(param_id, "storing value for undeclared param");
                self.values.push(ParamValue::new(param_id, value));
            }
        }
    }

    /// Replace the staging text for the next color, verbatim.
    pub fn update_new_color_name(&mut self, text: impl Into<String>) {
        self.new_color_name = text.into();
    }

    /// Append a color named after the trimmed staging text.
    ///
    /// Whitespace-only staging text is ignored and left untouched, as is
    /// any text once the id space is used up. Returns the id of the new
    /// color.
    pub fn add_color(&mut self) -> Option<u64> {
        let name = self.new_color_name.trim();
        if name.is_empty() {
            return None;
        }

        let Some(id) = self.ids.next_id() else {
            tracing::warn!(name = %name, "no color ids left");
            return None;
        };
        let color = Color {
            id,
            name: name.to_string(),
        };
        tracing::debug!(id, name = %color.name, "color added");

        self.colors.push(color);
        self.new_color_name.clear();
        Some(id)
    }

    /// Remove the color with `id`. Returns false if no such color exists.
    pub fn delete_color(&mut self, id: u64) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| c.id != id);
        let removed = self.colors.len() != before;
        if removed {
            tracing::debug!(id, "color deleted");
        }
        removed
    }

    /// Copy of the current parameter values and colors.
    pub fn snapshot(&self) -> Model {
        Model {
            param_values: self.values.clone(),
            colors: self.colors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_starts_after_existing_ids() {
        let colors = vec![
            Color {
                id: 7,
                name: "Red".into(),
            },
            Color {
                id: 3,
                name: "Blue".into(),
            },
        ];
        let mut ids = ColorIdGenerator::after(&colors);
        assert_eq!(ids.next_id(), Some(8));
        assert_eq!(ids.next_id(), Some(9));
    }

    #[test]
    fn generator_defaults_to_one() {
        let mut ids = ColorIdGenerator::after(&[]);
        assert_eq!(ids.next_id(), Some(1));
    }

    #[test]
    fn generator_stops_at_max() {
        let near_max = [Color {
            id: u64::MAX - 1,
            name: "Edge".into(),
        }];
        let mut ids = ColorIdGenerator::after(&near_max);
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn undeclared_values_in_seed_are_dropped() {
        let model = Model {
            param_values: vec![ParamValue::new(1, "a"), ParamValue::new(99, "stray")],
            colors: Vec::new(),
        };
        let editor = Editor::new(vec![Param::new(1, "One")], model);
        assert_eq!(editor.snapshot().param_values, vec![ParamValue::new(1, "a")]);
    }

    #[test]
    fn undeclared_update_is_appended() {
        let mut editor = Editor::new(
            vec![Param::new(1, "One"), Param::new(2, "Two")],
            Model::default(),
        );
        editor.update_param_value(5, "x");
        editor.update_param_value(2, "y");

        let ids: Vec<u32> = editor
            .snapshot()
            .param_values
            .iter()
            .map(|pv| pv.param_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert_eq!(editor.param_value(5), Some("x"));
    }

    #[test]
    fn param_type_serializes_lowercase() {
        let json = serde_json::to_string(&Param::new(1, "Name")).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Name","type":"string"}"#);
    }
}
