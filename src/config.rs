//! Configuración del runner.
//! Se construye desde variables de entorno (tras cargar `.env` con dotenvy)
//! y se expone como instancia global perezosa (`CONFIG`).
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

use tasks_adapters::ToolConfig;

/// Configuración global del runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Raíz del proyecto CDK; los targets corren con este directorio como cwd.
    pub root: PathBuf,
    pub tools: ToolConfig,
    /// Journal JSON lines de eventos (opcional).
    pub journal: Option<PathBuf>,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl RunnerConfig {
    /// Lee `MOMENTS_TASKS_*`; cada variable ausente cae en su valor por defecto.
    pub fn from_env() -> Self {
        let defaults = ToolConfig::default();
        let root = non_empty_var("MOMENTS_TASKS_ROOT").map(PathBuf::from)
                                                      .or_else(|| env::current_dir().ok())
                                                      .unwrap_or_else(|| PathBuf::from("."));
        let tools = ToolConfig { uv: non_empty_var("MOMENTS_TASKS_UV").unwrap_or(defaults.uv),
                                 cdk: non_empty_var("MOMENTS_TASKS_CDK").unwrap_or(defaults.cdk),
                                 venv: non_empty_var("MOMENTS_TASKS_VENV").unwrap_or(defaults.venv),
                                 viewer: non_empty_var("MOMENTS_TASKS_VIEWER").unwrap_or(defaults.viewer),
                                 openers: non_empty_var("MOMENTS_TASKS_OPENERS").map(|v| {
                                                                                    v.split(',')
                                                                                     .map(|s| s.trim().to_string())
                                                                                     .filter(|s| !s.is_empty())
                                                                                     .collect()
                                                                                })
                                                                                .unwrap_or(defaults.openers) };
        RunnerConfig { root,
                       tools,
                       journal: non_empty_var("MOMENTS_TASKS_JOURNAL").map(PathBuf::from) }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<RunnerConfig> = Lazy::new(RunnerConfig::from_env);
