//! Cancelación cooperativa de un lote.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Bandera compartida; el motor la consulta antes de cada fila y antes de
/// cada consulta externa. Una consulta ya en curso no se interrumpe, pero
/// sí la pausa entre filas.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<CancelState>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Se completa cuando la bandera se activa (de inmediato si ya lo estaba).
    pub async fn cancelled(&self) {
        loop {
            // registrarse antes de leer la bandera para no perder el aviso
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_wakes_waiters() {
        let flag = CancelFlag::new();
        let trigger = flag.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        tokio::time::timeout(Duration::from_secs(2), flag.cancelled()).await.unwrap();
        // ya cancelada: vuelve sin esperar
        flag.cancelled().await;
    }
}
