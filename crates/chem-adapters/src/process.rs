//! Ejecución de procesos hijos con tiempo máximo.
//!
//! Los scripts de consulta y la herramienta de propiedades se invocan como
//! procesos externos. Todo fallo (no se pudo lanzar, código de salida
//! distinto de cero, tiempo agotado) se traduce a `LookupError`, que el
//! motor degrada a `NotFound`.

use chem_core::LookupError;
use log::debug;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Programa externo con argumentos fijos que preceden a los de cada llamada
/// (p. ej. `python3 get_compound_info2.py`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    program: PathBuf,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl ProcessSpec {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { program: program.into(), leading_args: Vec::new(), timeout }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Lanza el programa y devuelve su stdout completo.
    ///
    /// El hijo se mata si se agota el tiempo (`kill_on_drop`).
    pub async fn run<I, S>(&self, args: I) -> Result<String, LookupError>
        where I: IntoIterator<Item = S>,
              S: AsRef<OsStr>
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
           .args(args)
           .stdin(Stdio::null())
           .stdout(Stdio::piped())
           .stderr(Stdio::piped())
           .kill_on_drop(true);

        let child = cmd.spawn()
                       .map_err(|e| LookupError::Transport(format!("no se pudo lanzar {}: {e}", self.program.display())))?;
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| LookupError::Transport(format!("{}: {e}", self.program.display())))?,
            Err(_) => return Err(LookupError::Timeout(self.timeout)),
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("[process] {} stderr: {}", self.program.display(), stderr.trim());
        }
        if !output.status.success() {
            return Err(LookupError::Transport(format!("{} terminó con {}: {}",
                                                      self.program.display(),
                                                      output.status,
                                                      stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Última línea no vacía de una salida. Los scripts pueden imprimir trazas
/// antes del resultado; el resultado siempre va al final.
///
/// Sólo se quita el fin de línea: un campo final vacío (`CAS\tIUPAC\t`)
/// conserva su tabulador.
pub fn last_line(stdout: &str) -> Option<&str> {
    stdout.lines()
          .map(|l| l.trim_end_matches(['\r', '\n']))
          .filter(|l| !l.trim().is_empty())
          .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_skips_trailing_blank_lines() {
        assert_eq!(last_line("INFO: x\n64-17-5\tethanol\tCCO\n\n"), Some("64-17-5\tethanol\tCCO"));
        assert_eq!(last_line("  \n"), None);
    }

    #[test]
    fn last_line_keeps_trailing_tabs() {
        assert_eq!(last_line("64-17-5\tethanol\t\r\n"), Some("64-17-5\tethanol\t"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout() {
        let spec = ProcessSpec::new("sh", Duration::from_secs(5)).with_arg("-c");
        let out = spec.run(["printf 'a\\tb\\n'"]).await.unwrap();
        assert_eq!(out, "a\tb\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_transport_error() {
        let spec = ProcessSpec::new("sh", Duration::from_secs(5)).with_arg("-c");
        let err = spec.run(["echo boom >&2; exit 3"]).await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(ref m) if m.contains("boom")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_process_times_out() {
        let spec = ProcessSpec::new("sh", Duration::from_millis(50)).with_arg("-c");
        let err = spec.run(["sleep 5"]).await.unwrap_err();
        assert_eq!(err, LookupError::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn missing_program_is_transport_error() {
        let spec = ProcessSpec::new("/nonexistent/chemresolve-tool", Duration::from_secs(1));
        assert!(matches!(spec.run(["x"]).await, Err(LookupError::Transport(_))));
    }
}
