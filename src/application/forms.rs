//! Field and form level validation errors shared by every form.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_field(field, message);
        errors
    }

    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_form(message);
        errors
    }

    pub fn add_field(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.non_field.is_empty() && self.fields.values().all(Vec::is_empty)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|errors| !errors.is_empty())
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// Every message, form level first, for toasts and logs.
    pub fn messages(&self) -> Vec<String> {
        self.non_field
            .iter()
            .cloned()
            .chain(self.fields.values().flatten().cloned())
            .collect()
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_field_and_form_errors() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());

        errors.add_field("feed_url", "Enter a valid URL.");
        errors.add_form("The URL did not return a valid podcast feed");

        assert!(!errors.is_empty());
        assert!(errors.has_field("feed_url"));
        assert!(!errors.has_field("title"));
        assert_eq!(errors.for_field("title"), &[] as &[String]);
        assert_eq!(
            errors.messages(),
            vec![
                "The URL did not return a valid podcast feed".to_string(),
                "Enter a valid URL.".to_string()
            ]
        );
    }

    #[test]
    fn into_result_only_fails_when_populated() {
        assert!(FormErrors::new().into_result().is_ok());
        assert!(FormErrors::form("nope").into_result().is_err());
    }
}
