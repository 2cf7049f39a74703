//! Parseo de la línea de comandos al estilo `make`:
//! `moments-tasks [flags] <target> [clave=valor ...]`.
//!
//! Las variables pueden aparecer antes o después del target.
use std::path::PathBuf;

use tasks_core::Variables;

use crate::errors::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// `None` equivale a `help`.
    pub target: Option<String>,
    pub variables: Variables,
    /// Imprime los steps sin ejecutarlos (`-n`, como `make -n`).
    pub dry_run: bool,
    pub journal: Option<PathBuf>,
}

fn is_variable_name(key: &str) -> bool {
    !key.is_empty()
    && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Invocation {
    /// Parsea los argumentos (sin el nombre del programa).
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let mut inv = Invocation::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(tok) = args.next() {
            match tok.as_str() {
                "-n" | "--dry-run" => inv.dry_run = true,
                "-h" | "--help" => {
                    inv.target.get_or_insert_with(|| "help".to_string());
                }
                "--journal" => {
                    let path = args.next()
                                   .ok_or_else(|| CliError::InvalidInvocation("--journal requires a path".into()))?;
                    inv.journal = Some(PathBuf::from(path));
                }
                _ if tok.starts_with("--journal=") => {
                    inv.journal = Some(PathBuf::from(&tok["--journal=".len()..]));
                }
                _ if tok.starts_with('-') => {
                    return Err(CliError::InvalidInvocation(format!("unknown flag `{tok}`")));
                }
                _ => match tok.split_once('=') {
                    Some((key, value)) if is_variable_name(key) => inv.variables.insert(key, value),
                    Some(_) => {
                        return Err(CliError::InvalidInvocation(format!("malformed variable `{tok}`")));
                    }
                    None if inv.target.is_none() => inv.target = Some(tok.clone()),
                    None => {
                        return Err(CliError::InvalidInvocation(format!("unexpected argument `{tok}`; variables are passed as key=value")));
                    }
                },
            }
        }
        Ok(inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_and_variables_in_any_order() {
        let a = Invocation::parse(["test", "stack=moments_app"]).unwrap();
        let b = Invocation::parse(["stack=moments_app", "test"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.target.as_deref(), Some("test"));
        assert_eq!(a.variables.get("stack"), Some("moments_app"));
    }

    #[test]
    fn empty_stack_is_kept_but_treated_as_missing() {
        let inv = Invocation::parse(["lint", "stack="]).unwrap();
        assert_eq!(inv.variables.get("stack"), None);
    }

    #[test]
    fn no_arguments_means_help() {
        let inv = Invocation::parse(Vec::<String>::new()).unwrap();
        assert!(inv.target.is_none());
        let inv = Invocation::parse(["--help"]).unwrap();
        assert_eq!(inv.target.as_deref(), Some("help"));
    }

    #[test]
    fn flags() {
        let inv = Invocation::parse(["-n", "--journal", "runs.jsonl", "synth-moments-app"]).unwrap();
        assert!(inv.dry_run);
        assert_eq!(inv.journal, Some(PathBuf::from("runs.jsonl")));
        let inv = Invocation::parse(["--journal=out/j.jsonl", "coverage"]).unwrap();
        assert_eq!(inv.journal, Some(PathBuf::from("out/j.jsonl")));
    }

    #[test]
    fn rejects_stray_and_malformed_arguments() {
        assert!(matches!(Invocation::parse(["test", "myapp"]), Err(CliError::InvalidInvocation(_))));
        assert!(matches!(Invocation::parse(["test", "=x"]), Err(CliError::InvalidInvocation(_))));
        assert!(matches!(Invocation::parse(["--verbose", "test"]), Err(CliError::InvalidInvocation(_))));
        assert!(matches!(Invocation::parse(["--journal"]), Err(CliError::InvalidInvocation(_))));
    }
}
