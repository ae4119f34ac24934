//! The message formatter facade

use crate::ast::{Node, NumberStyle};
use crate::cache::TemplateCache;
use crate::error::{FormatError, FormatResult};
use crate::plurals::PluralSelector;
use crate::values::FormatArgs;
use crate::{dates, numbers, parser};
use std::sync::Arc;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// Default number of compiled templates kept per locale
pub const DEFAULT_TEMPLATE_CAPACITY: usize = 500;

/// Formats messages for one locale, caching their compiled form.
///
/// Formatting never fails: messages that do not parse, or that are given
/// unusable values, are returned unchanged with a logged warning.
#[derive(Debug)]
pub struct MessageFormatter {
    locale: LanguageIdentifier,
    plurals: PluralSelector,
    cache: TemplateCache,
}

impl MessageFormatter {
    /// Create a formatter for a locale with the default template capacity
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self::with_capacity(locale, DEFAULT_TEMPLATE_CAPACITY)
    }

    /// Create a formatter with an explicit template capacity
    pub fn with_capacity(locale: LanguageIdentifier, capacity: usize) -> Self {
        let plurals = PluralSelector::new(&locale);
        Self {
            locale,
            plurals,
            cache: TemplateCache::new(capacity),
        }
    }

    /// The formatter's current locale
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Switch locales, discarding every compiled template.
    ///
    /// Templates embed plural, number, and date rules, so they cannot
    /// survive a locale change. Switching to the current locale is a no-op.
    pub fn set_language(&mut self, locale: LanguageIdentifier) {
        if locale == self.locale {
            debug!(locale = %locale, "Formatter locale unchanged");
            return;
        }
        debug!(from = %self.locale, to = %locale, "Switching formatter locale");
        self.plurals = PluralSelector::new(&locale);
        self.locale = locale;
        self.cache.clear();
    }

    /// Format a message against the supplied values
    pub fn format(&mut self, message: &str, values: &FormatArgs) -> String {
        if is_plain_message(message) {
            return format_plain(message, values);
        }

        let compiled = match self.cache.get(message) {
            Some(compiled) => compiled,
            None => match parser::parse(message) {
                Ok(ast) => {
                    let compiled = Arc::new(ast);
                    self.cache.insert(message, Arc::clone(&compiled));
                    compiled
                }
                Err(err) => {
                    warn!(error = %err, "Failed to parse message, returning it unformatted");
                    return message.to_string();
                }
            },
        };

        match self.render(&compiled, values, None) {
            Ok(out) => out,
            Err(err) => {
                warn!(error = %err, "Failed to format message, returning it unformatted");
                message.to_string()
            }
        }
    }

    /// Number of compiled templates currently cached
    pub fn template_cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every compiled template without changing the locale
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn language(&self) -> &str {
        self.locale.language.as_str()
    }

    fn render(
        &self,
        nodes: &[Node],
        values: &FormatArgs,
        plural_scope: Option<f64>,
    ) -> FormatResult<String> {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Literal(text) => out.push_str(text),
                Node::Argument(name) => match values.get(name) {
                    Some(value) => out.push_str(&value.as_plain_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
                Node::Pound => {
                    let count = plural_scope.ok_or(FormatError::WrongType {
                        name: "#".to_string(),
                        expected: "a plural scope",
                    })?;
                    out.push_str(&numbers::format_decimal(self.language(), count));
                }
                Node::Plural(plural) => {
                    let value =
                        values
                            .get(&plural.arg)
                            .ok_or_else(|| FormatError::MissingValue {
                                name: plural.arg.clone(),
                            })?;
                    let number = value.as_number().ok_or_else(|| FormatError::WrongType {
                        name: plural.arg.clone(),
                        expected: "a number",
                    })?;

                    let exact = if number.fract() == 0.0 {
                        plural.exact_for(number as i64)
                    } else {
                        None
                    };
                    let arm = match exact {
                        Some(arm) => arm,
                        None => {
                            let category = self.plurals.select(number, plural.ordinal);
                            plural
                                .arm_for(category)
                                .or_else(|| plural.arm_for("other"))
                                .ok_or(FormatError::MissingOther {
                                    kind: if plural.ordinal {
                                        "selectordinal"
                                    } else {
                                        "plural"
                                    },
                                    arg: plural.arg.clone(),
                                })?
                        }
                    };
                    out.push_str(&self.render(arm, values, Some(number))?);
                }
                Node::Select(select) => {
                    let value =
                        values
                            .get(&select.arg)
                            .ok_or_else(|| FormatError::MissingValue {
                                name: select.arg.clone(),
                            })?;
                    let key = value.as_plain_string();
                    let arm = select
                        .arm_for(&key)
                        .or_else(|| select.arm_for("other"))
                        .ok_or(FormatError::MissingOther {
                            kind: "select",
                            arg: select.arg.clone(),
                        })?;
                    out.push_str(&self.render(arm, values, plural_scope)?);
                }
                Node::Number { arg, style } => {
                    let value = values.get(arg).ok_or_else(|| FormatError::MissingValue {
                        name: arg.clone(),
                    })?;
                    let number = value.as_number().ok_or_else(|| FormatError::WrongType {
                        name: arg.clone(),
                        expected: "a number",
                    })?;
                    let rendered = match style {
                        NumberStyle::Decimal => numbers::format_decimal(self.language(), number),
                        NumberStyle::Integer => numbers::format_integer(self.language(), number),
                        NumberStyle::Percent => numbers::format_percent(self.language(), number),
                        NumberStyle::Currency => numbers::format_currency(self.language(), number),
                    };
                    out.push_str(&rendered);
                }
                Node::Date { arg, preset } => {
                    let value = values.get(arg).ok_or_else(|| FormatError::MissingValue {
                        name: arg.clone(),
                    })?;
                    let datetime = value.as_datetime().ok_or_else(|| FormatError::WrongType {
                        name: arg.clone(),
                        expected: "a datetime",
                    })?;
                    out.push_str(&dates::format_date(self.language(), datetime, *preset));
                }
                Node::Time { arg, preset } => {
                    let value = values.get(arg).ok_or_else(|| FormatError::MissingValue {
                        name: arg.clone(),
                    })?;
                    let datetime = value.as_datetime().ok_or_else(|| FormatError::WrongType {
                        name: arg.clone(),
                        expected: "a datetime",
                    })?;
                    out.push_str(&dates::format_time(self.language(), datetime, *preset));
                }
            }
        }
        Ok(out)
    }
}

/// Whether a message can take the fast substitution path: no grammar
/// keywords, no quoting, only flat `{name}` placeholders.
pub fn is_plain_message(message: &str) -> bool {
    if message.contains('\'') {
        return false;
    }
    let mut depth = 0usize;
    for c in message.chars() {
        match c {
            '{' => {
                depth += 1;
                if depth > 1 {
                    return false;
                }
            }
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            ',' if depth > 0 => return false,
            _ => {}
        }
    }
    depth == 0
}

/// Direct placeholder substitution for plain messages.
///
/// Produces byte-identical output to the full parser for any message that
/// passes [`is_plain_message`].
fn format_plain(message: &str, values: &FormatArgs) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let inner = &rest[start + 1..];
        match inner.find('}') {
            Some(end) => {
                let name = inner[..end].trim();
                match values.get(name) {
                    Some(value) => out.push_str(&value.as_plain_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &inner[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
