//! Constantes del motor.

/// Versión lógica del motor. Forma parte del fingerprint de cada ejecución,
/// de modo que dos journals sólo son comparables si comparten versión.
pub const ENGINE_VERSION: &str = "T1.0";

/// Código de salida usado cuando un error no proviene de un proceso externo.
pub const GENERIC_FAILURE_CODE: i32 = 1;

/// Código de salida convencional de un shell cuando el programa no existe.
pub const TOOL_NOT_FOUND_CODE: i32 = 127;

/// Código de salida de un shell cuando el programa existe pero no es ejecutable.
pub const TOOL_NOT_EXECUTABLE_CODE: i32 = 126;
