// SPDX-License-Identifier: GPL-3.0-only

//! Personal-data form state

use serde::{Deserialize, Serialize};

/// Form fields, in the order they appear in the shared message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Nome,
    Mae,
    Pai,
    Nascimento,
    Rg,
    Cpf,
}

impl FormField {
    /// All fields in message order
    pub const ALL: [FormField; 6] = [
        FormField::Nome,
        FormField::Mae,
        FormField::Pai,
        FormField::Nascimento,
        FormField::Rg,
        FormField::Cpf,
    ];

    /// Label used in the shared message
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Nome => "Nome",
            FormField::Mae => "Mãe",
            FormField::Pai => "Pai",
            FormField::Nascimento => "Data de Nascimento",
            FormField::Rg => "RG",
            FormField::Cpf => "CPF",
        }
    }

    /// Input name of the field
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Nome => "nome",
            FormField::Mae => "mae",
            FormField::Pai => "pai",
            FormField::Nascimento => "nascimento",
            FormField::Rg => "rg",
            FormField::Cpf => "cpf",
        }
    }
}

/// Six free-text fields; an empty string means "not filled"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRecord {
    pub nome: String,
    pub mae: String,
    pub pai: String,
    pub nascimento: String,
    pub rg: String,
    pub cpf: String,
}

impl FormRecord {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Nome => &self.nome,
            FormField::Mae => &self.mae,
            FormField::Pai => &self.pai,
            FormField::Nascimento => &self.nascimento,
            FormField::Rg => &self.rg,
            FormField::Cpf => &self.cpf,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Nome => &mut self.nome,
            FormField::Mae => &mut self.mae,
            FormField::Pai => &mut self.pai,
            FormField::Nascimento => &mut self.nascimento,
            FormField::Rg => &mut self.rg,
            FormField::Cpf => &mut self.cpf,
        };
        *slot = value.into();
    }

    /// Filled fields with their values, in message order
    pub fn filled(&self) -> impl Iterator<Item = (FormField, &str)> {
        FormField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }
}
