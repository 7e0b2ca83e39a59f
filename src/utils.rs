// This file is part of the terraform-provider-octopusdeploy project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::cell::RefCell;

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::{AttributePath, Description, Diagnostics, Schema};

use crate::client::ApiError;

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

/// Build a non-sensitive attribute
pub(crate) fn attribute(
    attr_type: AttributeType,
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        sensitive: false,
        deprecated: false,
    }
}

pub(crate) fn string_list() -> AttributeType {
    AttributeType::List(Box::new(AttributeType::String))
}

pub(crate) fn owned<'a>(value: impl Into<String>) -> ValueString<'a> {
    Value::Value(Cow::Owned(value.into()))
}

/// Null and unknown lists expand to an empty list
pub(crate) fn expand_strings(list: &ValueList<ValueString<'_>>) -> Vec<String> {
    list.as_ref_option()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_deref_option().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn flatten_strings<'a>(items: Vec<String>) -> ValueList<ValueString<'a>> {
    Value::Value(items.into_iter().map(owned).collect())
}

/// Replace a null list by an empty one
pub(crate) fn default_empty<T>(list: &mut ValueList<T>) {
    if list.is_null() {
        *list = Value::Value(Vec::new());
    }
}

pub(crate) fn default_string<'a>(value: &mut ValueString<'a>, default: &'static str) {
    if value.is_null() {
        *value = Value::Value(Cow::Borrowed(default));
    }
}

/// Keep the prior value of a computed attribute when the plan does not know it
pub(crate) fn use_state_for_unknown<T: Clone>(planned: &mut Value<T>, prior: &Value<T>) {
    if !matches!(planned, Value::Value(_)) && matches!(prior, Value::Value(_)) {
        *planned = prior.clone();
    }
}

/// Record `name` as requiring replacement when its planned value differs from the prior one
pub(crate) fn replace_if_changed<T: PartialEq>(
    replace: &mut Vec<AttributePath>,
    name: &str,
    prior: &Value<T>,
    planned: &Value<T>,
) {
    if prior != planned {
        replace.push(AttributePath::new(name.to_owned()));
    }
}

/// Check that a known string is one of the allowed values
pub(crate) fn check_one_of(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    value: &ValueString<'_>,
    allowed: &[&str],
) {
    if let Some(value) = value.as_deref_option() {
        if !allowed.contains(&value) {
            diags.error(
                "Invalid attribute value",
                format!(
                    "Value must be one of: {}, got: \"{value}\"",
                    allowed.iter().map(|v| format!("\"{v}\"")).join_with(", ")
                ),
                attr_path,
            );
        }
    }
}

/// Check every known element of a string list with [`check_one_of`]
pub(crate) fn check_each_one_of(
    diags: &mut Diagnostics,
    attr_path: AttributePath,
    values: &ValueList<ValueString<'_>>,
    allowed: &[&str],
) {
    for (i, value) in values.iter().flatten().enumerate() {
        check_one_of(diags, attr_path.clone().index(i as i64), value, allowed);
    }
}

/// Exactly one of the named attributes must be set
///
/// Unknown attributes count as set, as they may become anything once known.
pub(crate) fn check_exactly_one_of(diags: &mut Diagnostics, attributes: &[(&str, bool)]) {
    let set = attributes.iter().filter(|(_, is_set)| *is_set).count();
    if set != 1 {
        diags.root_error(
            "Invalid attribute combination",
            format!(
                "Exactly one of these attributes must be configured: [{}]",
                attributes.iter().map(|(name, _)| name).join_with(", ")
            ),
        );
    }
}

/// At least one of the named attributes must be set
pub(crate) fn check_at_least_one_of(diags: &mut Diagnostics, attributes: &[(&str, bool)]) {
    if !attributes.iter().any(|(_, is_set)| *is_set) {
        diags.root_error(
            "Invalid attribute combination",
            format!(
                "At least one of these attributes must be configured: [{}]",
                attributes.iter().map(|(name, _)| name).join_with(", ")
            ),
        );
    }
}

/// Report an API error, returning `None` so callers can bail out with `?`
pub(crate) fn report<T>(diags: &mut Diagnostics, summary: &str, err: ApiError) -> Option<T> {
    tracing::debug!(error = %err, "{summary}");
    diags.root_error(summary.to_owned(), err.to_string());
    None
}

pub struct DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    iter: RefCell<T>,
    sep: &'a str,
}

pub trait DisplayJoinable {
    type Joiner<'a>;
    fn join_with(self, sep: &str) -> Self::Joiner<'_>;
}

impl<T, I> DisplayJoinable for T
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    type Joiner<'a> = DisplayJoiner<'a, T, I>;

    fn join_with(self, sep: &str) -> Self::Joiner<'_> {
        DisplayJoiner {
            iter: RefCell::new(self),
            sep,
        }
    }
}

impl<'a, T, I> std::fmt::Display for DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        let mut iter = self.iter.try_borrow_mut().or(Err(std::fmt::Error))?;
        for elt in iter.by_ref() {
            f.write_str(sep)?;
            f.write_fmt(format_args!("{elt}"))?;
            sep = self.sep;
        }
        Ok(())
    }
}
