//! Variables `clave=valor` de una invocación. Viven sólo durante el proceso.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::TaskError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    inner: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Valor no vacío de la variable. Un valor vacío (`stack=`) cuenta como ausente.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    pub fn require(&self, key: &str, target: &str) -> Result<&str, TaskError> {
        self.get(key).ok_or_else(|| TaskError::MissingArgument { variable: key.to_string(),
                                                                   target: target.to_string() })
    }

    /// Sustituye los `{clave}` de la plantilla por su valor.
    ///
    /// Una clave sin valor produce `MissingArgument`; `{{` y `}}` escapan llaves.
    pub fn render(&self, template: &str, target: &str) -> Result<String, TaskError> {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let key: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    out.push_str(self.require(&key, target)?);
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}
