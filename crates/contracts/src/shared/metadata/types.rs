//! Core metadata types for the per-resource field schema
//!
//! All string fields are 'static so the tables are zero-cost compile-time
//! constants.

use super::field_type::{FieldSource, FieldType};
use super::validation::ValidationRules;

/// Metadata for a single field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    pub name: &'static str,
    pub rust_type: &'static str,
    pub field_type: FieldType,
    pub source: FieldSource,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,

    /// Referenced aggregate index (for AggregateRef)
    pub ref_aggregate: Option<&'static str>,
    /// Variant codes (for Enum)
    pub enum_values: Option<&'static [&'static str]>,
}

impl FieldMetadata {
    /// Primitive field with default UI flags
    pub const fn primitive(
        name: &'static str,
        rust_type: &'static str,
        ui: FieldUiMetadata,
        validation: ValidationRules,
    ) -> Self {
        Self {
            name,
            rust_type,
            field_type: FieldType::Primitive,
            source: FieldSource::Specific,
            ui,
            validation,
            ref_aggregate: None,
            enum_values: None,
        }
    }

    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }

    pub fn visible_in_list(&self) -> bool {
        self.ui.visible_in_list
    }

    pub fn visible_in_form(&self) -> bool {
        self.ui.visible_in_form
    }
}

/// UI hints for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    pub hint: Option<&'static str>,
    pub visible_in_list: bool,
    pub visible_in_form: bool,
    /// Widget override for the renderer ("markdown", "color", "toggle", ...)
    pub widget: Option<&'static str>,
}

impl FieldUiMetadata {
    /// Labelled field, visible everywhere, default widget
    pub const fn labeled(label: &'static str) -> Self {
        Self {
            label,
            hint: None,
            visible_in_list: true,
            visible_in_form: true,
            widget: None,
        }
    }

    /// Labelled field rendered with a specific widget
    pub const fn widget(label: &'static str, widget: &'static str) -> Self {
        Self {
            label,
            hint: None,
            visible_in_list: true,
            visible_in_form: true,
            widget: Some(widget),
        }
    }

    /// Form-only field (hidden from list columns)
    pub const fn form_only(label: &'static str) -> Self {
        Self {
            label,
            hint: None,
            visible_in_list: false,
            visible_in_form: true,
            widget: None,
        }
    }
}
