// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contract invocation requests and their CLI argument vectors.
//!
//! The CLI is spawned directly with an argument vector; no shell ever sees
//! the request. Identifiers (contract id, function, source, network) must be
//! plain tokens, argument names are reduced to `[A-Za-z0-9_-]`, and values
//! are passed through as single arguments.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::InvokeError;

/// Body of `POST /invoke`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub contract_id: Option<String>,
    pub function_name: Option<String>,
    #[serde(default)]
    pub args: Vec<InvokeArg>,
    pub source: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InvokeArg {
    #[serde(default)]
    pub name: String,
    /// Strings are passed as-is; numbers and booleans in their JSON form.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Value,
}

/// Defaults applied when the request omits `source` or `network`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeDefaults {
    pub source: String,
    pub network: String,
}

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub contract_id: String,
    pub function_name: String,
    /// `(sanitized name, raw value)` in request order
    pub args: Vec<(String, String)>,
    pub source: String,
    pub network: String,
}

/// Program plus argument vector, and a shell-style rendering for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub display: String,
}

impl InvocationRequest {
    pub fn from_body(body: InvokeRequest, defaults: &InvokeDefaults) -> Result<Self, InvokeError> {
        let contract_id = present(body.contract_id);
        let function_name = present(body.function_name);
        let (Some(contract_id), Some(function_name)) = (contract_id, function_name) else {
            return Err(InvokeError::InvalidRequest(
                "missing contractId or functionName".to_string(),
            ));
        };

        let source = present(body.source).unwrap_or_else(|| defaults.source.clone());
        let network = present(body.network).unwrap_or_else(|| defaults.network.clone());
        for (field, value) in [
            ("contractId", &contract_id),
            ("functionName", &function_name),
            ("source", &source),
            ("network", &network),
        ] {
            if !is_token(value) {
                return Err(InvokeError::InvalidRequest(format!("invalid {field}")));
            }
        }

        let args = body
            .args
            .into_iter()
            .map(|arg| {
                let name = sanitize_arg_name(&arg.name);
                if name.is_empty() {
                    return Err(InvokeError::InvalidRequest(format!(
                        "invalid argument name: {:?}",
                        arg.name
                    )));
                }
                Ok((name, value_to_string(&arg.value)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            contract_id,
            function_name,
            args,
            source,
            network,
        })
    }

    /// `<program> contract invoke --id <id> --source <src> -n <net> -- <fn> --<name>=<value>...`
    ///
    /// Each value is joined to its flag so a value starting with `-` is never
    /// read as a flag of its own. The display form keeps the quoted layout.
    pub fn to_cli(&self, program: &str) -> CliInvocation {
        let mut args: Vec<String> = vec![
            "contract".into(),
            "invoke".into(),
            "--id".into(),
            self.contract_id.clone(),
            "--source".into(),
            self.source.clone(),
            "-n".into(),
            self.network.clone(),
            "--".into(),
            self.function_name.clone(),
        ];
        let mut display = format!("{program} {}", args.join(" "));

        for (name, value) in &self.args {
            args.push(format!("--{name}={value}"));
            display.push_str(&format!(" --{name} \"{}\"", escape_value(value)));
        }

        CliInvocation {
            program: program.to_string(),
            args,
            display,
        }
    }
}

/// Keep only ASCII alphanumerics, `_` and `-`.
pub fn sanitize_arg_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Escape double quotes for the displayed command line.
pub fn escape_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_token(value: &str) -> bool {
    !value.starts_with('-')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> InvokeDefaults {
        InvokeDefaults {
            source: "blockhire-deployer".into(),
            network: "testnet".into(),
        }
    }

    fn request(body: Value) -> Result<InvocationRequest, InvokeError> {
        InvocationRequest::from_body(serde_json::from_value(body).unwrap(), &defaults())
    }

    #[test]
    fn missing_contract_or_function_is_invalid() {
        for body in [
            json!({"functionName": "hello"}),
            json!({"contractId": "C123"}),
            json!({"contractId": "  ", "functionName": "hello"}),
        ] {
            assert!(matches!(request(body), Err(InvokeError::InvalidRequest(_))));
        }
    }

    #[test]
    fn sanitizes_names_and_escapes_values_for_display() {
        let invocation = request(json!({
            "contractId": "C123",
            "functionName": "hello",
            "args": [{"name": "to/", "value": "a\"b"}]
        }))
        .unwrap();
        assert_eq!(invocation.args, vec![("to".to_string(), "a\"b".to_string())]);

        let cli = invocation.to_cli("stellar");
        assert_eq!(
            cli.display,
            r#"stellar contract invoke --id C123 --source blockhire-deployer -n testnet -- hello --to "a\"b""#
        );
        assert_eq!(cli.args.last().map(String::as_str), Some("--to=a\"b"));
    }

    #[test]
    fn dash_values_stay_bound_to_their_flag() {
        let invocation = request(json!({
            "contractId": "C1",
            "functionName": "transfer",
            "args": [{"name": "amount", "value": -5}, {"name": "memo", "value": "--help"}]
        }))
        .unwrap();
        let cli = invocation.to_cli("stellar");
        assert_eq!(&cli.args[cli.args.len() - 3..], ["transfer", "--amount=-5", "--memo=--help"]);
        assert!(!cli.args.iter().any(|a| a == "--help"));
    }

    #[test]
    fn sanitized_names_only_contain_safe_characters() {
        for raw in ["to/", "$(rm -rf /)", "a;b|c&d", "ok_name-1", "ünï`code`"] {
            let name = sanitize_arg_name(raw);
            assert!(name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
        assert_eq!(sanitize_arg_name("$(rm -rf /)"), "rm-rf");
    }

    #[test]
    fn name_that_sanitizes_to_nothing_is_rejected() {
        assert!(matches!(
            request(json!({
                "contractId": "C123",
                "functionName": "hello",
                "args": [{"name": "//", "value": "x"}]
            })),
            Err(InvokeError::InvalidRequest(_))
        ));
    }

    #[test]
    fn identifiers_must_be_plain_tokens() {
        for body in [
            json!({"contractId": "C1; rm -rf /", "functionName": "hello"}),
            json!({"contractId": "C1", "functionName": "--help"}),
            json!({"contractId": "C1", "functionName": "hello", "source": "me && x"}),
            json!({"contractId": "C1", "functionName": "hello", "network": "-n"}),
        ] {
            assert!(matches!(request(body), Err(InvokeError::InvalidRequest(_))));
        }
    }

    #[test]
    fn defaults_and_non_string_values() {
        let invocation = request(json!({
            "contractId": "C1",
            "functionName": "apply",
            "source": "alice",
            "args": [{"name": "job_id", "value": 42}, {"name": "ok", "value": true}]
        }))
        .unwrap();
        assert_eq!(invocation.source, "alice");
        assert_eq!(invocation.network, "testnet");
        assert_eq!(
            invocation.args,
            vec![
                ("job_id".to_string(), "42".to_string()),
                ("ok".to_string(), "true".to_string())
            ]
        );
    }
}
