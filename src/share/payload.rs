// SPDX-License-Identifier: GPL-3.0-only

//! Text payload built from the form

use crate::constants::MESSAGE_HEADER;
use crate::form::FormRecord;

/// Formatted message: a bold header, then one `Label: value` line per filled field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    text: String,
}

impl SharePayload {
    /// Build the message from the filled fields, in fixed field order
    ///
    /// Empty fields contribute no line at all.
    pub fn from_form(form: &FormRecord) -> Self {
        let mut text = String::from(MESSAGE_HEADER);
        for (field, value) in form.filled() {
            text.push('\n');
            text.push_str(field.label());
            text.push_str(": ");
            text.push_str(value);
        }
        let text = text.trim_end().to_string();
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for SharePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    #[test]
    fn test_empty_fields_are_omitted() {
        let mut form = FormRecord::default();
        form.set(FormField::Nome, "Ana");
        form.set(FormField::Mae, "");
        form.set(FormField::Cpf, "123");

        assert_eq!(
            SharePayload::from_form(&form).text(),
            "*Dados do Formulário:*\nNome: Ana\nCPF: 123"
        );
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let form = FormRecord {
            nome: "Ana".into(),
            mae: "Maria".into(),
            pai: "José".into(),
            nascimento: "1990-05-01".into(),
            rg: "12.345".into(),
            cpf: "123.456.789-00".into(),
        };

        assert_eq!(
            SharePayload::from_form(&form).text(),
            "*Dados do Formulário:*\nNome: Ana\nMãe: Maria\nPai: José\n\
             Data de Nascimento: 1990-05-01\nRG: 12.345\nCPF: 123.456.789-00"
        );
    }

    #[test]
    fn test_empty_form_is_header_only() {
        assert_eq!(
            SharePayload::from_form(&FormRecord::default()).text(),
            "*Dados do Formulário:*"
        );
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let mut form = FormRecord::default();
        form.set(FormField::Cpf, "123  ");
        assert_eq!(
            SharePayload::from_form(&form).text(),
            "*Dados do Formulário:*\nCPF: 123"
        );
    }
}
